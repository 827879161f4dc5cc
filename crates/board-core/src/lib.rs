//! # board-core
//!
//! Core types and error types for Boardroom.
//!
//! This crate provides the foundational types shared across all Boardroom crates:
//! - The insight record stored in the memory store, and the parsed view of an answer
//! - Record kind and lifecycle enums
//! - Wire types for the proxy endpoint and the upstream chat-completion API
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod wire;
