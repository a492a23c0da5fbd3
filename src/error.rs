// error.rs - Crate error type

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MsaError {
    /// Unknown variant, substitution mode, preset or a scoring scheme that
    /// does not carry the parameters the chosen variant needs.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),
    #[error("failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("output error: {0}")]
    Output(String),
}

impl MsaError {
    pub fn config(msg: impl Into<String>) -> Self {
        MsaError::Configuration(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MsaError::Io {
            path: path.into(),
            source,
        }
    }
}

// The binary reports errors as plain strings.
impl From<MsaError> for String {
    fn from(e: MsaError) -> Self {
        e.to_string()
    }
}

pub type Result<T> = std::result::Result<T, MsaError>;
