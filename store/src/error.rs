use thiserror::Error;

/// Failures reported by collaborator backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A batch deleted, or a service was asked about, something that is not there.
    #[error("{0} does not exist")]
    NotFound(String),

    /// A batch inserted a document or edge whose key is already taken.
    #[error("{0} already exists")]
    Duplicate(String),
}
