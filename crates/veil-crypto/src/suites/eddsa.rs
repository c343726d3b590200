//! Ed25519 reveal-all suite.
//!
//! Signs the SHA-256 digest of the concatenated message list; 64-byte raw
//! signature layout.

use ed25519_dalek::{Signer as _, Verifier as _};
use rand::rngs::OsRng;
use veil_core::KeyType;

use crate::error::CryptoError;
use crate::hashing;
use crate::keys::KeyPair;
use crate::suites::{Signer, Verifier};

/// Ed25519 signer.
pub struct Ed25519Signer {
    key_pair: KeyPair,
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    /// Build a signer from key material; both halves are required.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let sk = key_pair.require_private()?;
        let seed: [u8; 32] = sk
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("ed25519 private key".to_string()))?;
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        Ok(Self {
            key_pair,
            signing_key,
        })
    }
}

impl Signer for Ed25519Signer {
    fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        Ok(self.signing_key.sign(&digest).to_bytes().to_vec())
    }
}

/// Ed25519 verifier.
pub struct Ed25519Verifier {
    public_key: Vec<u8>,
    verifying_key: ed25519_dalek::VerifyingKey,
}

impl Ed25519Verifier {
    /// Build a verifier from 32 raw public key bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; 32] = public_key
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: 32,
                actual: public_key.len(),
            })?;
        let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&bytes)
            .map_err(|e| CryptoError::InvalidKey(format!("ed25519 public key: {}", e)))?;
        Ok(Self {
            public_key: public_key.to_vec(),
            verifying_key,
        })
    }
}

impl Verifier for Ed25519Verifier {
    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return Ok(false);
        };
        let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        Ok(self.verifying_key.verify(&digest, &signature).is_ok())
    }
}

pub(crate) fn generate_ed25519() -> (Vec<u8>, Vec<u8>) {
    let signing_key = ed25519_dalek::SigningKey::generate(&mut OsRng);
    (
        signing_key.verifying_key().to_bytes().to_vec(),
        signing_key.to_bytes().to_vec(),
    )
}
