use veil_core::ProofType;

/// Proof-workflow errors.
///
/// Structural and workflow violations are unrecoverable precondition
/// failures and surface immediately. A cryptographically invalid proof is
/// not an error: `verify` returns `Ok(false)` and callers branch on the
/// boolean.
#[derive(Debug, thiserror::Error)]
pub enum ProofError {
    #[error("document already carries a proof")]
    AlreadySigned,

    #[error("document carries no proof")]
    MissingProof,

    #[error("multi-signature documents are unsupported")]
    MultipleProofs,

    #[error("no suite registered for proof type {0}")]
    UnknownProofType(ProofType),

    #[error("proof type {0} doesn't support proof derivation")]
    UnsupportedDerivation(ProofType),

    #[error("proof type {0} is a derived type and cannot sign documents")]
    SignWithDerivedType(ProofType),

    #[error(
        "framed document is not an ordered subsequence of the original \
         ({matched} of {framed} framed statements matched)"
    )]
    FramingMismatch { matched: usize, framed: usize },

    #[error("canonicalization failed: {0}")]
    Canonicalization(String),

    #[error("invalid document: {0}")]
    InvalidDocument(String),

    #[error("invalid proof encoding: {0}")]
    InvalidProofEncoding(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] veil_crypto::CryptoError),

    #[error(transparent)]
    Core(#[from] veil_core::CoreError),

    #[error("background task failed: {0}")]
    TaskJoin(String),
}
