mod chunk_writer;
mod logging;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use tokchunk::chunker::ChunkSplitter;
use tokchunk::codec::TokenCodec;
use tokchunk::pretrained::vocabulary_for_model;

/// Split a long text file into chunks based on token count.
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Path to the input text file.
    input_file: PathBuf,

    /// Prefix for the output chunk files.
    #[clap(long, default_value = "chunk_")]
    output_prefix: String,

    /// Maximum number of tokens per chunk.
    #[clap(long, default_value = "4096")]
    max_tokens: NonZeroUsize,

    /// Model to use for tokenization.
    #[clap(long, default_value = "gpt-4o")]
    model: String,

    /// Directory containing the ".tiktoken" vocabulary files.
    #[clap(long, default_value = ".")]
    vocab_dir: PathBuf,

    #[command(flatten)]
    log: logging::LogArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.log.setup_logging(3)?;

    if let Err(err) = run(&args) {
        log::error!("failed to process text: {err}");
        return Err(err);
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(&args.input_file)?;

    let vocab = vocabulary_for_model(&args.model, &args.vocab_dir)?;
    let codec = Arc::new(TokenCodec::init(Arc::new(vocab))?);

    let splitter = ChunkSplitter::new(codec);
    let chunks = splitter.split(&text, args.max_tokens)?;
    log::info!(
        "split {} into {} chunks of <= {} tokens",
        args.input_file.display(),
        chunks.len(),
        args.max_tokens,
    );

    chunk_writer::write_chunks(&chunks, &args.output_prefix);

    Ok(())
}

/// Read the full input file; a missing path is an error, not a panic.
fn read_input(path: &Path) -> Result<String, std::io::Error> {
    if !path.is_file() {
        log::error!("file not found: {}", path.display());
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("file not found: {}", path.display()),
        ));
    }

    log::info!("reading file: {}", path.display());
    std::fs::read_to_string(path)
}
