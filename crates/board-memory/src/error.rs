use thiserror::Error;

/// Errors raised by [`crate::MemoryStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    /// A record with this id is already stored.
    #[error("a record with id {id} already exists")]
    DuplicateId { id: i64 },
}
