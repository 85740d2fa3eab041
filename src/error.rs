//! Error types for huffman-text

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index {index} out of range for list of size {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("symbol {0:?} has no code in the table")]
    UnknownSymbol(char),

    #[error("bits from position {position} match no code")]
    MalformedBits { position: usize },

    #[error("empty input")]
    EmptyInput,

    #[error("cannot read input {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CodingError>;
