use std::fmt;
use std::path::PathBuf;

use crate::data_format::FormatError;

/// Text encoding an input was received in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "UTF-8"),
            Encoding::Utf16 => write!(f, "UTF-16"),
        }
    }
}

/// Errors surfaced by the engine. Nothing is retried or swallowed internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was out of range, e.g. an unknown normalization form.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Input is not well-formed text. `offset` counts bytes for UTF-8 and
    /// code units for UTF-16.
    #[error("malformed {encoding} text at offset {offset}: {detail}")]
    MalformedText {
        encoding: Encoding,
        offset: usize,
        detail: String,
    },

    /// The Unicode normalization backend is not configured.
    #[error("normalization provider unavailable: {0}")]
    UnavailableDependency(String),

    #[error("invalid confusables data: {0}")]
    InvalidTable(#[from] FormatError),

    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
