//! # board-memory
//!
//! The in-process store of insight records.
//!
//! Records are kept in insertion order. One record id may be pinned; the
//! executive summary and the timeline are derived from the records and the
//! pin on every read and never cached.
//!
//! [`MemoryStore`] is a cheap, cloneable handle. All clones share the same
//! state, and every mutation runs under a single write lock so a reader never
//! observes a half-applied update.

mod error;
mod store;

pub use error::MemoryError;
pub use store::{MemoryStore, StoreSnapshot};
