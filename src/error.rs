//! Error types for the event log driver

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CannonError {
    #[error("failed to read event log {path}")]
    ReadLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("event log not found: {path}")]
    InvalidPath { path: PathBuf },
}
