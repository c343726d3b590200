//! Signature-suite capability interfaces and the shipped implementations.
//!
//! Each suite implements whichever capability subset it supports: the
//! reveal-all suites provide only [`Signer`]/[`Verifier`]; BBS+ and
//! Dilithium-SD additionally provide [`Proofer`]/[`ProofVerifier`] for
//! derived (revealed-subset) proofs.

pub mod bbs;
pub mod dilithium;
pub mod dilithium_sd;
pub mod ecdsa;
pub mod eddsa;

use veil_core::{ProofMessage, ProofType};

use crate::error::CryptoError;
use crate::keys::KeyPair;

pub use bbs::{BbsProofVerifier, BbsProofer, BbsSigner, BbsVerifier};
pub use dilithium::{DilithiumSigner, DilithiumVerifier};
pub use dilithium_sd::{
    DilithiumSdProofVerifier, DilithiumSdProofer, DilithiumSdSigner, DilithiumSdVerifier, SALT_LEN,
};
pub use ecdsa::{P256Signer, P256Verifier, Secp256k1Signer, Secp256k1Verifier};
pub use eddsa::{Ed25519Signer, Ed25519Verifier};

/// Produces a signature over an ordered message list.
pub trait Signer: Send + Sync {
    /// The key material this signer was built from.
    fn key_pair(&self) -> &KeyPair;

    /// Sign the ordered messages. Fails with `MissingPrivateKey` when the
    /// private half is absent and `SigningFailed` on primitive errors.
    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError>;
}

/// Checks a signature over an ordered message list.
///
/// A bad signature is a normal outcome (`Ok(false)`), never an error;
/// malformed public keys are rejected when the verifier is constructed.
pub trait Verifier: Send + Sync {
    /// Raw public key bytes.
    fn public_key(&self) -> &[u8];

    /// Verify the signature over the ordered messages.
    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError>;
}

/// Derives a revealed-subset proof from an existing signature.
pub trait Proofer: Send + Sync {
    /// The proof type of the derived proofs this proofer produces.
    fn derived_proof_type(&self) -> ProofType;

    /// Produce a proof disclosing only the `Revealed` messages. `messages`
    /// must carry every signed statement, tagged, in original order.
    fn derive_proof(
        &self,
        signature: &[u8],
        nonce: &[u8],
        messages: &[ProofMessage],
    ) -> Result<Vec<u8>, CryptoError>;
}

/// Checks a derived proof against the revealed statements.
pub trait ProofVerifier: Send + Sync {
    /// The original signature type the proof was derived from.
    fn original_proof_type(&self) -> ProofType;

    /// Verify the proof. `revealed` carries only the disclosed statements,
    /// in original order. Ill-formed proof bytes are `MalformedProof`; a
    /// well-formed but invalid proof is `Ok(false)`.
    fn verify_proof(
        &self,
        revealed: &[Vec<u8>],
        proof: &[u8],
        nonce: &[u8],
    ) -> Result<bool, CryptoError>;
}
