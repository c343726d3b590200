use std::fmt;

use veil_core::KeyType;
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::suites;

/// Raw key material for one suite.
///
/// Either half may be absent: a `Signer` requires both halves, a `Verifier`
/// only the public one. Sizes are validated against the [`KeyType`] at
/// construction. Private-key bytes are zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    key_type: KeyType,
    private_key: Option<Vec<u8>>,
    public_key: Option<Vec<u8>>,
}

impl KeyPair {
    /// Create a key pair from raw bytes, validating sizes.
    pub fn new(
        key_type: KeyType,
        private_key: Option<Vec<u8>>,
        public_key: Option<Vec<u8>>,
    ) -> Result<Self, CryptoError> {
        if let Some(ref sk) = private_key {
            if sk.len() != key_type.private_key_len() {
                return Err(CryptoError::InvalidKeyLength {
                    expected: key_type.private_key_len(),
                    actual: sk.len(),
                });
            }
        }
        if let Some(ref pk) = public_key {
            if pk.len() != key_type.public_key_len() {
                return Err(CryptoError::InvalidKeyLength {
                    expected: key_type.public_key_len(),
                    actual: pk.len(),
                });
            }
        }
        Ok(Self {
            key_type,
            private_key,
            public_key,
        })
    }

    /// Key pair holding only the public half.
    pub fn from_public(key_type: KeyType, public_key: Vec<u8>) -> Result<Self, CryptoError> {
        Self::new(key_type, None, Some(public_key))
    }

    /// Key pair holding both halves.
    pub fn from_parts(
        key_type: KeyType,
        private_key: Vec<u8>,
        public_key: Vec<u8>,
    ) -> Result<Self, CryptoError> {
        Self::new(key_type, Some(private_key), Some(public_key))
    }

    /// Generate a fresh key pair for the given suite family.
    pub fn generate(key_type: KeyType) -> Result<Self, CryptoError> {
        let (public_key, private_key) = match key_type {
            KeyType::P256 => suites::ecdsa::generate_p256(),
            KeyType::Secp256k1 => suites::ecdsa::generate_secp256k1(),
            KeyType::Ed25519 => suites::eddsa::generate_ed25519(),
            KeyType::Bls12381G2 => suites::bbs::generate_bls12381_g2()?,
            KeyType::Dilithium2 | KeyType::Dilithium3 | KeyType::Dilithium5 => {
                suites::dilithium::generate(key_type)
            }
        };
        Self::from_parts(key_type, private_key, public_key)
    }

    /// The suite family this key belongs to.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The public half, if present.
    pub fn public_key(&self) -> Option<&[u8]> {
        self.public_key.as_deref()
    }

    /// The private half, if present.
    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_deref()
    }

    /// The public half, or `MissingPublicKey`.
    pub fn require_public(&self) -> Result<&[u8], CryptoError> {
        self.public_key.as_deref().ok_or(CryptoError::MissingPublicKey)
    }

    /// The private half, or `MissingPrivateKey`.
    pub fn require_private(&self) -> Result<&[u8], CryptoError> {
        self.private_key
            .as_deref()
            .ok_or(CryptoError::MissingPrivateKey)
    }
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        if let Some(ref mut sk) = self.private_key {
            sk.zeroize();
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_type", &self.key_type)
            .field("private_key", &self.private_key.as_ref().map(|_| "<private>"))
            .field("public_key", &self.public_key.as_ref().map(|pk| pk.len()))
            .finish()
    }
}

/// A key pair plus its derived public identifiers.
///
/// `ver_key` is the bare base58 public key; `did_key` is the multicodec
/// did:key encoding; `verification_method` is the did:key URI with the
/// multibase fragment.
#[derive(Debug, Clone)]
pub struct CryptoCredentials {
    key_pair: KeyPair,
    ver_key: String,
    did_key: String,
    verification_method: String,
}

impl CryptoCredentials {
    /// Derive identifiers from a key pair. The public half must be present
    /// and exactly the suite's declared size.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let public = key_pair.require_public()?;
        let ver_key = bs58::encode(public).into_string();

        let prefix = key_pair.key_type().multicodec_prefix();
        let mut prefixed = Vec::with_capacity(2 + public.len());
        prefixed.extend_from_slice(&prefix);
        prefixed.extend_from_slice(public);
        let multibase = format!("z{}", bs58::encode(&prefixed).into_string());
        let did_key = format!("did:key:{}", multibase);
        let verification_method = format!("{}#{}", did_key, multibase);

        Ok(Self {
            key_pair,
            ver_key,
            did_key,
            verification_method,
        })
    }

    /// Generate fresh credentials for a suite family.
    pub fn generate(key_type: KeyType) -> Result<Self, CryptoError> {
        Self::new(KeyPair::generate(key_type)?)
    }

    /// The underlying key pair.
    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Base58 of the raw public key.
    pub fn ver_key(&self) -> &str {
        &self.ver_key
    }

    /// The `did:key:z…` identifier.
    pub fn did_key(&self) -> &str {
        &self.did_key
    }

    /// The verification method URI (`<did_key>#<multibase>`).
    pub fn verification_method(&self) -> &str {
        &self.verification_method
    }

    /// Recover the suite family and public key bytes from a verification
    /// method URI (or bare did:key).
    pub fn recover_public_key(
        verification_method: &str,
    ) -> Result<(KeyType, Vec<u8>), CryptoError> {
        let did = verification_method
            .split('#')
            .next()
            .unwrap_or(verification_method);
        let multibase = did.strip_prefix("did:key:").ok_or_else(|| {
            CryptoError::InvalidVerificationMethod(format!("not a did:key: {}", did))
        })?;
        let b58 = multibase.strip_prefix('z').ok_or_else(|| {
            CryptoError::InvalidVerificationMethod(format!(
                "unsupported multibase prefix: {}",
                multibase
            ))
        })?;
        let decoded = bs58::decode(b58)
            .into_vec()
            .map_err(|e| CryptoError::InvalidVerificationMethod(format!("bad base58: {}", e)))?;
        if decoded.len() < 2 {
            return Err(CryptoError::InvalidVerificationMethod(
                "truncated multicodec key".to_string(),
            ));
        }
        let key_type = KeyType::from_multicodec([decoded[0], decoded[1]])?;
        let public = decoded[2..].to_vec();
        if public.len() != key_type.public_key_len() {
            return Err(CryptoError::InvalidKeyLength {
                expected: key_type.public_key_len(),
                actual: public.len(),
            });
        }
        Ok((key_type, public))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_validates_public_size() {
        let result = KeyPair::from_public(KeyType::Ed25519, vec![0u8; 31]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));

        let result = KeyPair::from_public(KeyType::Ed25519, vec![0u8; 33]);
        assert!(matches!(result, Err(CryptoError::InvalidKeyLength { .. })));
    }

    #[test]
    fn test_key_pair_validates_private_size() {
        let result = KeyPair::new(KeyType::P256, Some(vec![0u8; 31]), None);
        assert!(matches!(result, Err(CryptoError::InvalidKeyLength { .. })));
    }

    #[test]
    fn test_key_pair_requires() {
        let kp = KeyPair::from_public(KeyType::Ed25519, vec![7u8; 32]).unwrap();
        assert!(kp.require_public().is_ok());
        assert!(matches!(
            kp.require_private(),
            Err(CryptoError::MissingPrivateKey)
        ));
    }

    #[test]
    fn test_generate_matches_declared_sizes() {
        for kt in [KeyType::P256, KeyType::Secp256k1, KeyType::Ed25519] {
            let kp = KeyPair::generate(kt).unwrap();
            assert_eq!(kp.public_key().unwrap().len(), kt.public_key_len());
            assert_eq!(kp.private_key().unwrap().len(), kt.private_key_len());
        }
    }

    #[test]
    fn test_generate_dilithium_sizes() {
        let kp = KeyPair::generate(KeyType::Dilithium2).unwrap();
        assert_eq!(kp.public_key().unwrap().len(), 1312);
        assert_eq!(kp.private_key().unwrap().len(), 2528);
    }

    #[test]
    fn test_credentials_did_key_shape() {
        let creds = CryptoCredentials::generate(KeyType::Ed25519).unwrap();
        assert!(creds.did_key().starts_with("did:key:z"));
        assert!(creds.verification_method().starts_with(creds.did_key()));
        assert!(creds.verification_method().contains('#'));
        assert!(!creds.ver_key().is_empty());
    }

    #[test]
    fn test_credentials_roundtrip_all_classical() {
        for kt in [
            KeyType::P256,
            KeyType::Secp256k1,
            KeyType::Ed25519,
        ] {
            let creds = CryptoCredentials::generate(kt).unwrap();
            let (recovered_type, recovered_pk) =
                CryptoCredentials::recover_public_key(creds.verification_method()).unwrap();
            assert_eq!(recovered_type, kt);
            assert_eq!(recovered_pk, creds.key_pair().public_key().unwrap());
        }
    }

    #[test]
    fn test_credentials_require_public() {
        let kp = KeyPair::new(KeyType::Ed25519, Some(vec![1u8; 32]), None).unwrap();
        assert!(matches!(
            CryptoCredentials::new(kp),
            Err(CryptoError::MissingPublicKey)
        ));
    }

    #[test]
    fn test_recover_rejects_non_did_key() {
        assert!(matches!(
            CryptoCredentials::recover_public_key("did:web:example.com#key-1"),
            Err(CryptoError::InvalidVerificationMethod(_))
        ));
    }

    #[test]
    fn test_recover_rejects_wrong_multibase() {
        assert!(matches!(
            CryptoCredentials::recover_public_key("did:key:uABCDEF"),
            Err(CryptoError::InvalidVerificationMethod(_))
        ));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let kp = KeyPair::from_parts(KeyType::Ed25519, vec![9u8; 32], vec![1u8; 32]).unwrap();
        let dbg = format!("{:?}", kp);
        assert!(!dbg.contains("9, 9"));
        assert!(dbg.contains("<private>"));
    }
}
