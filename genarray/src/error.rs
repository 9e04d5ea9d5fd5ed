//! Error types raised by the genomic zone index.
//!
//! Only argument validation can fail inside the index. Querying a chromosome
//! that was never registered is a routine case and is reported as `None`, not
//! as an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenomicArrayError {
    /// Rejected argument: empty chromosome name, `start < 1`, `end < start`
    /// or an unknown strand code.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GenomicArrayError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GenomicArrayError>;
