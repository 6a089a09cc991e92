//! ISO-8859-1 to UTF-8 transcoding.

use std::fs;
use std::path::Path;

use crate::error::{NormalizeError, Result};

/// Decode bytes as ISO-8859-1.
///
/// Each byte maps to the code point of the same value, so this cannot fail.
pub fn decode_latin1(content: &[u8]) -> String {
    content.iter().map(|&b| b as char).collect()
}

/// Read `path` fully as ISO-8859-1 and overwrite it with the UTF-8 encoding
/// of the same characters. Returns the number of bytes written.
pub fn transcode_file(path: &Path) -> Result<usize> {
    let content = fs::read(path).map_err(|source| NormalizeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = decode_latin1(&content);

    fs::write(path, text.as_bytes()).map_err(|source| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(text.len())
}
