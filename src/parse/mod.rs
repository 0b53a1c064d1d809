//! Log readers and text parsers for the two labs.
//!
//! Parsers are pure functions over text; unrecognized lines are skipped, but
//! a numeric token that fails to convert inside a recognized data line is a
//! hard error.

pub mod kmeans;
pub mod sobel;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("log file not found: {path}")]
    MissingLog { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid numeric token {token:?} on line {line}")]
    InvalidNumber { token: String, line: usize },
}

/// Read a log file, mapping a missing file to `ParseError::MissingLog`.
pub fn read_log(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ParseError::MissingLog {
            path: path.to_path_buf(),
        },
        _ => ParseError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

pub(crate) fn parse_float(token: &str, line: usize) -> Result<f64, ParseError> {
    token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
        line,
    })
}
