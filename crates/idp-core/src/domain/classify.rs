//! Text/binary classification of template files.

use std::path::Path;

use serde::Serialize;

/// Extensions (lower-case, without the dot) always treated as binary.
pub const BINARY_EXTENSIONS: [&str; 17] = [
    "avif", "bmp", "eot", "gif", "gz", "ico", "jpeg", "jpg", "pdf", "png", "tar", "tgz", "ttf",
    "webp", "woff", "woff2", "zip",
];

/// Number of leading bytes inspected for a zero byte.
pub const SNIFF_LEN: usize = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileClass {
    /// Decoded, newline-normalized and placeholder-substituted.
    Text,
    /// Copied byte for byte.
    Binary,
}

/// `true` when the file extension alone marks `path` as binary.
pub fn has_binary_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            BINARY_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// `true` when the first [`SNIFF_LEN`] bytes contain a zero byte.
pub fn looks_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(SNIFF_LEN)];
    sample.contains(&0)
}

/// Classify a file from its path and (a prefix of) its content.
pub fn classify(path: &Path, content: &[u8]) -> FileClass {
    if has_binary_extension(path) || looks_binary(content) {
        FileClass::Binary
    } else {
        FileClass::Text
    }
}
