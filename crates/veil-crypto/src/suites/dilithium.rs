//! Dilithium reveal-all suite (lattice, post-quantum).
//!
//! Signs the SHA-256 digest of the concatenated message list with the raw
//! lattice primitive. All three parameter sets ship; the set is inferred
//! from key length, which is unambiguous for both halves.

use crystals_dilithium::{dilithium2, dilithium3, dilithium5};
use rand::RngCore;
use veil_core::KeyType;

use crate::error::CryptoError;
use crate::hashing;
use crate::keys::KeyPair;
use crate::suites::{Signer, Verifier};

/// Dilithium parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DilithiumVariant {
    Two,
    Three,
    Five,
}

impl DilithiumVariant {
    /// Infer the parameter set from a public key length.
    pub fn from_public_len(len: usize) -> Result<Self, CryptoError> {
        match len {
            dilithium2::PUBLICKEYBYTES => Ok(Self::Two),
            dilithium3::PUBLICKEYBYTES => Ok(Self::Three),
            dilithium5::PUBLICKEYBYTES => Ok(Self::Five),
            other => Err(CryptoError::InvalidKeyLength {
                expected: dilithium2::PUBLICKEYBYTES,
                actual: other,
            }),
        }
    }

    /// Infer the parameter set from a secret key length.
    pub fn from_private_len(len: usize) -> Result<Self, CryptoError> {
        match len {
            dilithium2::SECRETKEYBYTES => Ok(Self::Two),
            dilithium3::SECRETKEYBYTES => Ok(Self::Three),
            dilithium5::SECRETKEYBYTES => Ok(Self::Five),
            other => Err(CryptoError::InvalidKeyLength {
                expected: dilithium2::SECRETKEYBYTES,
                actual: other,
            }),
        }
    }

    /// Fixed signature length for this parameter set.
    pub fn signature_len(&self) -> usize {
        match self {
            Self::Two => dilithium2::SIGNBYTES,
            Self::Three => dilithium3::SIGNBYTES,
            Self::Five => dilithium5::SIGNBYTES,
        }
    }

    pub(crate) fn sign(&self, secret_key: &[u8], message: &[u8]) -> Vec<u8> {
        match self {
            Self::Two => dilithium2::SecretKey::from_bytes(secret_key)
                .sign(message)
                .to_vec(),
            Self::Three => dilithium3::SecretKey::from_bytes(secret_key)
                .sign(message)
                .to_vec(),
            Self::Five => dilithium5::SecretKey::from_bytes(secret_key)
                .sign(message)
                .to_vec(),
        }
    }

    pub(crate) fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        if signature.len() != self.signature_len() {
            return false;
        }
        match self {
            Self::Two => {
                let mut sig = [0u8; dilithium2::SIGNBYTES];
                sig.copy_from_slice(signature);
                dilithium2::PublicKey::from_bytes(public_key).verify(message, &sig)
            }
            Self::Three => {
                let mut sig = [0u8; dilithium3::SIGNBYTES];
                sig.copy_from_slice(signature);
                dilithium3::PublicKey::from_bytes(public_key).verify(message, &sig)
            }
            Self::Five => {
                let mut sig = [0u8; dilithium5::SIGNBYTES];
                sig.copy_from_slice(signature);
                dilithium5::PublicKey::from_bytes(public_key).verify(message, &sig)
            }
        }
    }
}

/// Dilithium reveal-all signer.
pub struct DilithiumSigner {
    key_pair: KeyPair,
    variant: DilithiumVariant,
}

impl DilithiumSigner {
    /// Build a signer from key material; both halves are required.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let variant = DilithiumVariant::from_private_len(key_pair.require_private()?.len())?;
        Ok(Self { key_pair, variant })
    }
}

impl Signer for DilithiumSigner {
    fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        let sk = self.key_pair.require_private()?;
        Ok(self.variant.sign(sk, &digest))
    }
}

/// Dilithium reveal-all verifier.
pub struct DilithiumVerifier {
    public_key: Vec<u8>,
    variant: DilithiumVariant,
}

impl DilithiumVerifier {
    /// Build a verifier from raw public key bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let variant = DilithiumVariant::from_public_len(public_key.len())?;
        Ok(Self {
            public_key: public_key.to_vec(),
            variant,
        })
    }
}

impl Verifier for DilithiumVerifier {
    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        Ok(self.variant.verify(&self.public_key, &digest, signature))
    }
}

pub(crate) fn generate(key_type: KeyType) -> (Vec<u8>, Vec<u8>) {
    let mut seed = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut seed);
    match key_type {
        KeyType::Dilithium2 => {
            let kp = dilithium2::Keypair::generate(Some(&seed));
            (kp.public.to_bytes().to_vec(), kp.secret.to_bytes().to_vec())
        }
        KeyType::Dilithium3 => {
            let kp = dilithium3::Keypair::generate(Some(&seed));
            (kp.public.to_bytes().to_vec(), kp.secret.to_bytes().to_vec())
        }
        _ => {
            let kp = dilithium5::Keypair::generate(Some(&seed));
            (kp.public.to_bytes().to_vec(), kp.secret.to_bytes().to_vec())
        }
    }
}
