//! BBS+ suite over BLS12-381 (zkryptium backend).
//!
//! The only suite with native cryptographic selective disclosure: the
//! signature covers the statement vector message-by-message, and a derived
//! proof is a zero-knowledge proof of knowledge of the signature that
//! discloses a chosen subset. The pairing math lives in zkryptium; this
//! module owns message-vector construction, revealed-index bookkeeping, and
//! byte round-tripping. The orchestrator nonce is bound as the presentation
//! header.
//!
//! Derived-proof envelope: `u16-be revealedCount ‖ (u16-be index)* ‖ pok`,
//! so a verifier can recover the disclosed positions from the proof alone.

use rand::RngCore;

use veil_core::{ProofMessage, ProofType};
use zkryptium::bbsplus::ciphersuites::Bls12381Sha256 as BbsBls12381Sha256;
use zkryptium::bbsplus::keys::{BBSplusPublicKey, BBSplusSecretKey};
use zkryptium::keys::pair::KeyPair as BbsKeyPair;
use zkryptium::schemes::algorithms::BBSplus;
use zkryptium::schemes::generics::{PoKSignature, Signature as BbsSignature};

use crate::error::CryptoError;
use crate::keys::KeyPair;
use crate::suites::{Proofer, ProofVerifier, Signer, Verifier};

type Suite = BBSplus<BbsBls12381Sha256>;

/// BBS+ signature length (one G1 point plus two scalars).
const BBS_SIGNATURE_LEN: usize = 80;

/// BBS+ signer.
pub struct BbsSigner {
    key_pair: KeyPair,
    secret_key: BBSplusSecretKey,
    public_key: BBSplusPublicKey,
}

impl BbsSigner {
    /// Build a signer from key material; both halves are required.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let secret_key = BBSplusSecretKey::from_bytes(key_pair.require_private()?)
            .map_err(|e| CryptoError::InvalidKey(format!("bls12-381 secret key: {}", e)))?;
        let public_key = BBSplusPublicKey::from_bytes(key_pair.require_public()?)
            .map_err(|e| CryptoError::InvalidKey(format!("bls12-381 public key: {}", e)))?;
        Ok(Self {
            key_pair,
            secret_key,
            public_key,
        })
    }
}

impl Signer for BbsSigner {
    fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Multi-message signature: one BBS+ message per canonical statement,
    /// not a digest of the concatenation.
    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        let signature =
            BbsSignature::<Suite>::sign(Some(messages), &self.secret_key, &self.public_key, None)
                .map_err(|e| CryptoError::SigningFailed(format!("bbs+: {}", e)))?;
        Ok(signature.to_bytes().to_vec())
    }
}

/// BBS+ verifier for original signatures.
pub struct BbsVerifier {
    public_key_bytes: Vec<u8>,
    public_key: BBSplusPublicKey,
}

impl BbsVerifier {
    /// Build a verifier from 96 compressed G2 bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let parsed = BBSplusPublicKey::from_bytes(public_key)
            .map_err(|e| CryptoError::InvalidKey(format!("bls12-381 public key: {}", e)))?;
        Ok(Self {
            public_key_bytes: public_key.to_vec(),
            public_key: parsed,
        })
    }
}

impl Verifier for BbsVerifier {
    fn public_key(&self) -> &[u8] {
        &self.public_key_bytes
    }

    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError> {
        let Ok(sig_bytes) = <[u8; BBS_SIGNATURE_LEN]>::try_from(signature) else {
            return Ok(false);
        };
        let Ok(signature) = BbsSignature::<Suite>::from_bytes(&sig_bytes) else {
            return Ok(false);
        };
        Ok(signature
            .verify(&self.public_key, Some(messages), None)
            .is_ok())
    }
}

/// Derives revealed-subset proofs from BBS+ signatures.
pub struct BbsProofer {
    public_key: BBSplusPublicKey,
}

impl BbsProofer {
    /// Build a proofer for the signer's public key.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let public_key = BBSplusPublicKey::from_bytes(public_key)
            .map_err(|e| CryptoError::InvalidKey(format!("bls12-381 public key: {}", e)))?;
        Ok(Self { public_key })
    }
}

impl Proofer for BbsProofer {
    fn derived_proof_type(&self) -> ProofType {
        ProofType::BbsBlsSignatureProof2020
    }

    fn derive_proof(
        &self,
        signature: &[u8],
        nonce: &[u8],
        messages: &[ProofMessage],
    ) -> Result<Vec<u8>, CryptoError> {
        let all: Vec<Vec<u8>> = messages.iter().map(|m| m.payload.clone()).collect();
        let disclosed: Vec<usize> = messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_revealed())
            .map(|(i, _)| i)
            .collect();

        let pok = PoKSignature::<Suite>::proof_gen(
            &self.public_key,
            signature,
            None,
            Some(nonce),
            Some(&all),
            Some(&disclosed),
        )
        .map_err(|e| CryptoError::SigningFailed(format!("bbs+ proof generation: {}", e)))?;

        let mut proof = Vec::new();
        proof.extend_from_slice(&(disclosed.len() as u16).to_be_bytes());
        for index in &disclosed {
            proof.extend_from_slice(&(*index as u16).to_be_bytes());
        }
        proof.extend_from_slice(&pok.to_bytes());

        tracing::debug!(
            statements = messages.len(),
            revealed = disclosed.len(),
            "derived bbs+ proof"
        );
        Ok(proof)
    }
}

/// Verifies derived BBS+ proofs against the revealed statements.
pub struct BbsProofVerifier {
    public_key: BBSplusPublicKey,
}

impl BbsProofVerifier {
    /// Build a proof verifier from 96 compressed G2 bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let public_key = BBSplusPublicKey::from_bytes(public_key)
            .map_err(|e| CryptoError::InvalidKey(format!("bls12-381 public key: {}", e)))?;
        Ok(Self { public_key })
    }
}

impl ProofVerifier for BbsProofVerifier {
    fn original_proof_type(&self) -> ProofType {
        ProofType::BbsBlsSignature2020
    }

    fn verify_proof(
        &self,
        revealed: &[Vec<u8>],
        proof: &[u8],
        nonce: &[u8],
    ) -> Result<bool, CryptoError> {
        if proof.len() < 2 {
            return Err(CryptoError::MalformedProof(
                "missing revealed-index header".to_string(),
            ));
        }
        let count = u16::from_be_bytes([proof[0], proof[1]]) as usize;
        let pok_start = 2 + 2 * count;
        if proof.len() < pok_start {
            return Err(CryptoError::MalformedProof(
                "truncated revealed-index list".to_string(),
            ));
        }
        let indexes: Vec<usize> = (0..count)
            .map(|i| u16::from_be_bytes([proof[2 + 2 * i], proof[3 + 2 * i]]) as usize)
            .collect();

        if count != revealed.len() {
            return Ok(false);
        }
        let Ok(pok) = PoKSignature::<Suite>::from_bytes(&proof[pok_start..]) else {
            return Err(CryptoError::MalformedProof(
                "unparseable bbs+ proof body".to_string(),
            ));
        };
        Ok(pok
            .proof_verify(
                &self.public_key,
                Some(revealed),
                Some(&indexes),
                None,
                Some(nonce),
            )
            .is_ok())
    }
}

pub(crate) fn generate_bls12381_g2() -> Result<(Vec<u8>, Vec<u8>), CryptoError> {
    let mut ikm = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut ikm);
    let keypair = BbsKeyPair::<Suite>::generate(&ikm, None, None)
        .map_err(|e| CryptoError::InvalidKey(format!("bls12-381 keygen: {}", e)))?;
    Ok((
        keypair.public_key().to_bytes().to_vec(),
        keypair.private_key().to_bytes().to_vec(),
    ))
}
