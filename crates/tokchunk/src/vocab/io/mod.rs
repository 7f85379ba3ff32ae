//! # Vocabulary IO
//!
//! Readers and writers for the base64 rank-table line format:
//!
//! ```terminaloutput
//! {BASE64 SPAN} {TOKEN}
//! ```
//!
//! This is the interchange format pretrained ``*.tiktoken`` vocabulary
//! files use.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use base64::{Engine, prelude::BASE64_STANDARD};

use crate::errors::{Result, TokchunkError};
use crate::types::TokenType;
use crate::vocab::rank_vocab::RankVocab;
use crate::vocab::vocab_types::SpanTokenMap;

/// Load a [`RankVocab`] from a base64 vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_base64_rank_vocab_path<T, P>(path: P) -> Result<RankVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    Ok(load_base64_span_map_path(path)?.into())
}

/// Load a [`SpanTokenMap`] from a base64 vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_base64_span_map_path<T, P>(path: P) -> Result<SpanTokenMap<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    read_base64_span_map(reader)
}

/// Read a [`SpanTokenMap`] from a base64 vocab line reader.
///
/// # Arguments
/// * `reader` - the line reader.
pub fn read_base64_span_map<T, R>(reader: R) -> Result<SpanTokenMap<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut vocab = SpanTokenMap::default();

    for line in reader.lines() {
        let line = line?;
        let s = line.trim_end();
        if s.is_empty() {
            continue;
        }

        let (span, id) = s
            .split_once(' ')
            .ok_or_else(|| TokchunkError::Parse(format!("malformed vocab line: {s:?}")))?;

        let span = BASE64_STANDARD
            .decode(span)
            .map_err(|e| TokchunkError::Parse(e.to_string()))?;

        let id: u64 = id
            .parse()
            .map_err(|e: core::num::ParseIntError| TokchunkError::Parse(e.to_string()))?;
        let token = T::from_u64(id).ok_or(TokchunkError::TokenOutOfRange)?;

        vocab.insert(span, token);
    }

    Ok(vocab)
}

/// Save a [`SpanTokenMap`] to a base64 vocab file.
///
/// # Arguments
/// * `span_map` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_base64_span_map_path<T: TokenType, P: AsRef<Path>>(
    span_map: &SpanTokenMap<T>,
    path: P,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_base64_span_map(span_map, &mut writer)
}

/// Write a [`SpanTokenMap`] to a [`Write`] writer, in token order.
///
/// # Arguments
/// * `span_map` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_base64_span_map<T, W>(
    span_map: &SpanTokenMap<T>,
    writer: &mut W,
) -> Result<()>
where
    T: TokenType,
    W: Write,
{
    let mut items: Vec<(T, &Vec<u8>)> = span_map
        .iter()
        .map(|(span, &token)| (token, span))
        .collect();
    items.sort_by_key(|(t, _)| *t);

    for (token, span) in items {
        writeln!(
            writer,
            "{} {}",
            BASE64_STANDARD.encode(span),
            token.to_u64().unwrap()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        type T = u32;

        let mut span_map: SpanTokenMap<T> = Default::default();
        span_map.insert("apple".as_bytes().to_vec(), 300);
        span_map.insert("banana".as_bytes().to_vec(), 301);
        span_map.insert("pear".as_bytes().to_vec(), 302);

        tempdir::TempDir::new("vocab_test")
            .and_then(|dir| {
                let path = dir.path().join("vocab.tiktoken");

                save_base64_span_map_path(&span_map, &path).expect("Failed to save vocab");

                let loaded = load_base64_span_map_path(&path).expect("Failed to load vocab");
                assert_eq!(&loaded, &span_map);

                let rank_vocab: RankVocab<T> =
                    load_base64_rank_vocab_path(&path).expect("Failed to load vocab");
                assert_eq!(rank_vocab.lookup_rank(b"banana"), Some(301));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_read_rejects_malformed_lines() {
        type T = u32;

        let data = b"YQ== 0\nbogus\n".as_slice();
        assert!(read_base64_span_map::<T, _>(data).is_err());

        let data = b"YQ== zero\n".as_slice();
        assert!(read_base64_span_map::<T, _>(data).is_err());
    }

    #[test]
    fn test_read_skips_blank_lines() {
        type T = u32;

        let data = b"YQ== 0\n\nYg== 1\n".as_slice();
        let map = read_base64_span_map::<T, _>(data).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(b"a".as_slice()), Some(&0));
    }
}
