/// Signature-suite errors.
///
/// Cryptographic verification failure is not an error: `verify` and
/// `verify_proof` return `Ok(false)` for a bad signature. Errors cover
/// malformed key material, workflow misuse, and wrapped primitive failures.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("private key required but absent")]
    MissingPrivateKey,

    #[error("public key required but absent")]
    MissingPublicKey,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("verification error: {0}")]
    VerificationError(String),

    #[error("malformed proof: {0}")]
    MalformedProof(String),

    #[error("invalid verification method: {0}")]
    InvalidVerificationMethod(String),

    #[error(transparent)]
    Core(#[from] veil_core::CoreError),
}
