use tokchunk::TextChunk;
use tokchunk::types::TokenType;

/// Write chunks to `{prefix}{index}.txt` files, zero-based, no gaps.
///
/// A failed write is logged and skipped; remaining chunks are still
/// written. Partial output is useful output.
pub fn write_chunks<T: TokenType>(
    chunks: &[TextChunk<T>],
    prefix: &str,
) {
    for chunk in chunks {
        let filename = format!("{prefix}{}.txt", chunk.index);

        match std::fs::write(&filename, &chunk.text) {
            Ok(()) => log::info!("saved chunk {} to {}", chunk.index, filename),
            Err(err) => {
                log::error!("failed to save chunk {} to {}: {}", chunk.index, filename, err)
            }
        }
    }
}
