//! ECDSA reveal-all suites over P-256 and secp256k1.
//!
//! Both sign the SHA-256 digest of the concatenated message list and emit
//! the fixed 64-byte `r ‖ s` layout. Public keys are SEC1-compressed.

use p256::ecdsa::signature::{Signer as _, Verifier as _};
use rand::rngs::OsRng;
use veil_core::KeyType;

use crate::error::CryptoError;
use crate::hashing;
use crate::keys::KeyPair;
use crate::suites::{Signer, Verifier};

/// ECDSA P-256 signer.
pub struct P256Signer {
    key_pair: KeyPair,
    signing_key: p256::ecdsa::SigningKey,
}

impl P256Signer {
    /// Build a signer from key material; both halves are required.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let sk = key_pair.require_private()?;
        let signing_key = p256::ecdsa::SigningKey::from_slice(sk)
            .map_err(|e| CryptoError::InvalidKey(format!("p256 private key: {}", e)))?;
        Ok(Self {
            key_pair,
            signing_key,
        })
    }
}

impl Signer for P256Signer {
    fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        let signature: p256::ecdsa::Signature = self.signing_key.sign(&digest);
        Ok(signature.to_bytes().to_vec())
    }
}

/// ECDSA P-256 verifier.
pub struct P256Verifier {
    public_key: Vec<u8>,
    verifying_key: p256::ecdsa::VerifyingKey,
}

impl P256Verifier {
    /// Build a verifier from SEC1-compressed public key bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| CryptoError::InvalidKey(format!("p256 public key: {}", e)))?;
        Ok(Self {
            public_key: public_key.to_vec(),
            verifying_key,
        })
    }
}

impl Verifier for P256Verifier {
    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        let Ok(signature) = p256::ecdsa::Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(self.verifying_key.verify(&digest, &signature).is_ok())
    }
}

/// ECDSA secp256k1 signer.
pub struct Secp256k1Signer {
    key_pair: KeyPair,
    signing_key: k256::ecdsa::SigningKey,
}

impl Secp256k1Signer {
    /// Build a signer from key material; both halves are required.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let sk = key_pair.require_private()?;
        let signing_key = k256::ecdsa::SigningKey::from_slice(sk)
            .map_err(|e| CryptoError::InvalidKey(format!("secp256k1 private key: {}", e)))?;
        Ok(Self {
            key_pair,
            signing_key,
        })
    }
}

impl Signer for Secp256k1Signer {
    fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        let signature: k256::ecdsa::Signature = self.signing_key.sign(&digest);
        Ok(signature.to_bytes().to_vec())
    }
}

/// ECDSA secp256k1 verifier.
pub struct Secp256k1Verifier {
    public_key: Vec<u8>,
    verifying_key: k256::ecdsa::VerifyingKey,
}

impl Secp256k1Verifier {
    /// Build a verifier from SEC1-compressed public key bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
            .map_err(|e| CryptoError::InvalidKey(format!("secp256k1 public key: {}", e)))?;
        Ok(Self {
            public_key: public_key.to_vec(),
            verifying_key,
        })
    }
}

impl Verifier for Secp256k1Verifier {
    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError> {
        let digest = hashing::sha256_concat(messages);
        let Ok(signature) = k256::ecdsa::Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(self.verifying_key.verify(&digest, &signature).is_ok())
    }
}

pub(crate) fn generate_p256() -> (Vec<u8>, Vec<u8>) {
    use p256::elliptic_curve::sec1::ToEncodedPoint;

    let signing_key = p256::ecdsa::SigningKey::random(&mut OsRng);
    let public = signing_key
        .verifying_key()
        .to_encoded_point(true)
        .as_bytes()
        .to_vec();
    (public, signing_key.to_bytes().to_vec())
}

pub(crate) fn generate_secp256k1() -> (Vec<u8>, Vec<u8>) {
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    let signing_key = k256::ecdsa::SigningKey::random(&mut OsRng);
    let public = signing_key
        .verifying_key()
        .to_encoded_point(true)
        .as_bytes()
        .to_vec();
    (public, signing_key.to_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<Vec<u8>> {
        vec![b"stmt-1".to_vec(), b"stmt-2".to_vec(), b"stmt-3".to_vec()]
    }

    #[test]
    fn test_p256_sign_verify_roundtrip() {
        let kp = KeyPair::generate(KeyType::P256).unwrap();
        let public = kp.public_key().unwrap().to_vec();
        let signer = P256Signer::new(kp).unwrap();
        let sig = signer.sign(&messages()).unwrap();
        assert_eq!(sig.len(), 64);

        let verifier = P256Verifier::new(&public).unwrap();
        assert!(verifier.verify(&messages(), &sig).unwrap());
    }

    #[test]
    fn test_p256_verify_rejects_flipped_byte() {
        let kp = KeyPair::generate(KeyType::P256).unwrap();
        let public = kp.public_key().unwrap().to_vec();
        let signer = P256Signer::new(kp).unwrap();
        let mut sig = signer.sign(&messages()).unwrap();
        sig[10] ^= 0x01;

        let verifier = P256Verifier::new(&public).unwrap();
        assert!(!verifier.verify(&messages(), &sig).unwrap());
    }

    #[test]
    fn test_p256_verify_rejects_altered_message() {
        let kp = KeyPair::generate(KeyType::P256).unwrap();
        let public = kp.public_key().unwrap().to_vec();
        let signer = P256Signer::new(kp).unwrap();
        let sig = signer.sign(&messages()).unwrap();

        let mut altered = messages();
        altered[1] = b"stmt-X".to_vec();
        let verifier = P256Verifier::new(&public).unwrap();
        assert!(!verifier.verify(&altered, &sig).unwrap());
    }

    #[test]
    fn test_p256_signer_requires_private_key() {
        let kp = KeyPair::generate(KeyType::P256).unwrap();
        let public_only =
            KeyPair::from_public(KeyType::P256, kp.public_key().unwrap().to_vec()).unwrap();
        assert!(matches!(
            P256Signer::new(public_only),
            Err(CryptoError::MissingPrivateKey)
        ));
    }

    #[test]
    fn test_secp256k1_sign_verify_roundtrip() {
        let kp = KeyPair::generate(KeyType::Secp256k1).unwrap();
        let public = kp.public_key().unwrap().to_vec();
        let signer = Secp256k1Signer::new(kp).unwrap();
        let sig = signer.sign(&messages()).unwrap();
        assert_eq!(sig.len(), 64);

        let verifier = Secp256k1Verifier::new(&public).unwrap();
        assert!(verifier.verify(&messages(), &sig).unwrap());
        assert!(!verifier.verify(&messages()[..2].to_vec(), &sig).unwrap());
    }

    #[test]
    fn test_verifier_rejects_malformed_public_key() {
        assert!(P256Verifier::new(&[0u8; 33]).is_err());
        assert!(Secp256k1Verifier::new(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_verify_garbage_signature_is_false_not_error() {
        let kp = KeyPair::generate(KeyType::P256).unwrap();
        let verifier = P256Verifier::new(kp.public_key().unwrap()).unwrap();
        assert!(!verifier.verify(&messages(), &[0u8; 7]).unwrap());
    }
}
