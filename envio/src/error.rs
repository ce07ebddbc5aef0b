// Capability errors

use thiserror::Error;

/// Failure of a fallible console capability call
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No more input can be read.
    #[error("console input is closed")]
    Closed,

    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure requested by a test environment.
    #[error("scripted console failure: {0}")]
    Scripted(String),
}
