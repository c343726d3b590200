//! Veil Proof — Orchestrates canonicalization, framing, and suite dispatch
//! into the linked-data proof workflow.
//!
//! [`LdProofService::sign`] canonicalizes the proof metadata and document
//! into one ordered statement list and signs it through the registered
//! suite; [`LdProofService::verify`] replays the same list against the
//! document's single proof; [`LdProofService::derive`] frames the document,
//! tags each statement Revealed or Hidden, and produces a new document
//! carrying a revealed-subset proof.

pub mod canonical;
pub mod error;
pub mod ld_proof;
pub mod service;

pub use canonical::{align_statements, Canonicalizer, Framer, JsonStatements, ShapeFramer};
pub use error::ProofError;
pub use ld_proof::{LdProof, ASSERTION_METHOD, SECURITY_CONTEXT};
pub use service::LdProofService;
