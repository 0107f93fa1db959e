//! Error types for packing and unpacking.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols to build a tree from.
    #[error("input is empty, no huffman tree can be built")]
    EmptyInput,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Open, read or write failure on a specific file.
    #[error("could not access {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input contains a byte that is neither printable nor a newline.
    #[error("input is not printable text: byte 0x{byte:02x} at offset {offset}")]
    NotAscii { offset: usize, byte: u8 },

    /// Attempt to encode a byte the tree was not built with.
    #[error("byte 0x{0:02x} is not in the huffman tree")]
    SymbolNotFound(u8),

    /// Ran out of input before the expected number of symbols was produced.
    #[error("stream truncated: expected {expected} symbols, decoded {decoded}")]
    Truncated { expected: usize, decoded: usize },

    #[error("corrupted data: {0}")]
    Corrupted(String),
}

impl HuffmanError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HuffmanError::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn corrupted(message: impl Into<String>) -> Self {
        HuffmanError::Corrupted(message.into())
    }
}
