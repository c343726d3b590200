//! Veil Core — Shared types for the Veil linked-data proof system.
//!
//! Defines the proof-type and key-type vocabularies every suite agrees on,
//! and the tagged statement messages that selective disclosure operates on.

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{KeyType, ProofMessage, ProofMessageKind, ProofType};
