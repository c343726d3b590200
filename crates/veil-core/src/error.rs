/// Core type errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown proof type: {0}")]
    UnknownProofType(String),

    #[error("unknown multicodec prefix: 0x{0:02x} 0x{1:02x}")]
    UnknownMulticodec(u8, u8),
}
