//! Errors raised by the content model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content group [{0}] not found")]
    GroupNotFound(String),

    #[error("content [{group}].{label} not found")]
    ItemNotFound { group: String, label: String },

    #[error("content [{group}].{label} has type {found}, expected {expected}")]
    WrongType {
        group: String,
        label: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("asset symbols differ: {left} vs {right}")]
    SymbolMismatch { left: String, right: String },

    #[error("asset arithmetic overflow")]
    Overflow,

    #[error("invalid document hash: {0}")]
    InvalidHash(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
