//! Dilithium with salted-hash-chain selective disclosure.
//!
//! Dilithium has no native selective disclosure; this suite layers a chained
//! commitment on top of the raw lattice primitive. At signing time a random
//! 16-byte salt seeds a hash chain over every canonical statement; the
//! lattice signature covers the digest of the whole chain. A derived proof
//! replaces each hidden statement with its pre-committed chain digest, so a
//! verifier can replay the chain across the gaps without ever seeing the
//! hidden content. Reordering or substituting a revealed statement breaks
//! the chain from that point forward.
//!
//! Byte layouts:
//! - signature: `salt(16) ‖ latticeSig`
//! - derived proof: `u32-be infoLen ‖ infoBlock ‖ salt(16) ‖ latticeSig`,
//!   where the info block is a sequence of `u16-be revealedRun ‖ digest(32)`
//!   entries (one per hidden statement) closed by a trailing `u16-be`.
//!
//! Known limitation: every proof derived from one signature carries the same
//! salt, so such proofs are linkable to each other. Unlinkable derivation
//! would need a different commitment layout.

use rand::RngCore;

use veil_core::{ProofMessage, ProofType};

use crate::error::CryptoError;
use crate::hashing::{self, Hash};
use crate::keys::KeyPair;
use crate::suites::dilithium::DilithiumVariant;
use crate::suites::{Proofer, ProofVerifier, Signer, Verifier};

/// Salt length prepended to every Dilithium-SD signature.
pub const SALT_LEN: usize = 16;

/// Bytes per info-block entry: revealed-run count plus one chain digest.
const INFO_ENTRY_LEN: usize = 2 + 32;

/// Dilithium-SD signer.
pub struct DilithiumSdSigner {
    key_pair: KeyPair,
    variant: DilithiumVariant,
}

impl DilithiumSdSigner {
    /// Build a signer from key material; both halves are required.
    pub fn new(key_pair: KeyPair) -> Result<Self, CryptoError> {
        let variant = DilithiumVariant::from_private_len(key_pair.require_private()?.len())?;
        Ok(Self { key_pair, variant })
    }
}

impl Signer for DilithiumSdSigner {
    fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    fn sign(&self, messages: &[Vec<u8>]) -> Result<Vec<u8>, CryptoError> {
        let mut salt = [0u8; SALT_LEN];
        rand::rngs::OsRng.fill_bytes(&mut salt);

        let chain = hashing::salted_hash_chain(&salt, messages);
        let commitment = hashing::sha256_concat(&chain);
        let lattice_sig = self.variant.sign(self.key_pair.require_private()?, &commitment);

        let mut out = Vec::with_capacity(SALT_LEN + lattice_sig.len());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&lattice_sig);
        Ok(out)
    }
}

/// Dilithium-SD verifier for original (reveal-all) signatures.
pub struct DilithiumSdVerifier {
    public_key: Vec<u8>,
    variant: DilithiumVariant,
}

impl DilithiumSdVerifier {
    /// Build a verifier from raw public key bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let variant = DilithiumVariant::from_public_len(public_key.len())?;
        Ok(Self {
            public_key: public_key.to_vec(),
            variant,
        })
    }
}

impl Verifier for DilithiumSdVerifier {
    fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    fn verify(&self, messages: &[Vec<u8>], signature: &[u8]) -> Result<bool, CryptoError> {
        if signature.len() != SALT_LEN + self.variant.signature_len() {
            return Ok(false);
        }
        let (salt, lattice_sig) = signature.split_at(SALT_LEN);
        let chain = hashing::salted_hash_chain(salt, messages);
        let commitment = hashing::sha256_concat(&chain);
        Ok(self.variant.verify(&self.public_key, &commitment, lattice_sig))
    }
}

/// Derives revealed-subset proofs from Dilithium-SD signatures.
pub struct DilithiumSdProofer {
    variant: DilithiumVariant,
}

impl DilithiumSdProofer {
    /// Build a proofer for the signer's public key.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            variant: DilithiumVariant::from_public_len(public_key.len())?,
        })
    }
}

impl Proofer for DilithiumSdProofer {
    fn derived_proof_type(&self) -> ProofType {
        ProofType::DilithiumSdSignatureProof2023
    }

    /// The prover holds every statement, so the chain is recomputed exactly
    /// as at signing time; the nonce is accepted for interface uniformity
    /// but the commitment binds to the signing-time salt.
    fn derive_proof(
        &self,
        signature: &[u8],
        _nonce: &[u8],
        messages: &[ProofMessage],
    ) -> Result<Vec<u8>, CryptoError> {
        if signature.len() != SALT_LEN + self.variant.signature_len() {
            return Err(CryptoError::MalformedProof(format!(
                "signature length {} does not match salt + lattice layout",
                signature.len()
            )));
        }
        let (salt, lattice_sig) = signature.split_at(SALT_LEN);

        let payloads: Vec<&[u8]> = messages.iter().map(|m| m.payload.as_slice()).collect();
        let chain = hashing::salted_hash_chain(salt, &payloads);

        // Run-length walk: one entry per hidden statement, carrying the
        // revealed run since the previous entry and the digest the verifier
        // resumes the chain from.
        let mut info = Vec::new();
        let mut run: u16 = 0;
        for (i, message) in messages.iter().enumerate() {
            if message.is_revealed() {
                run += 1;
            } else {
                info.extend_from_slice(&run.to_be_bytes());
                info.extend_from_slice(&chain[i]);
                run = 0;
            }
        }
        info.extend_from_slice(&run.to_be_bytes());

        let mut proof = Vec::with_capacity(4 + info.len() + SALT_LEN + lattice_sig.len());
        proof.extend_from_slice(&(info.len() as u32).to_be_bytes());
        proof.extend_from_slice(&info);
        proof.extend_from_slice(salt);
        proof.extend_from_slice(lattice_sig);

        tracing::debug!(
            statements = messages.len(),
            hidden = (info.len() - 2) / INFO_ENTRY_LEN,
            "derived dilithium-sd proof"
        );
        Ok(proof)
    }
}

/// Verifies derived Dilithium-SD proofs against the revealed statements.
pub struct DilithiumSdProofVerifier {
    public_key: Vec<u8>,
    variant: DilithiumVariant,
}

impl DilithiumSdProofVerifier {
    /// Build a proof verifier from raw public key bytes.
    pub fn new(public_key: &[u8]) -> Result<Self, CryptoError> {
        let variant = DilithiumVariant::from_public_len(public_key.len())?;
        Ok(Self {
            public_key: public_key.to_vec(),
            variant,
        })
    }
}

impl ProofVerifier for DilithiumSdProofVerifier {
    fn original_proof_type(&self) -> ProofType {
        ProofType::DilithiumSdSignature2023
    }

    fn verify_proof(
        &self,
        revealed: &[Vec<u8>],
        proof: &[u8],
        _nonce: &[u8],
    ) -> Result<bool, CryptoError> {
        if proof.len() < 4 {
            return Err(CryptoError::MalformedProof(
                "missing info block length".to_string(),
            ));
        }
        let info_len = u32::from_be_bytes([proof[0], proof[1], proof[2], proof[3]]) as usize;
        let expected_len = 4 + info_len + SALT_LEN + self.variant.signature_len();
        if proof.len() != expected_len {
            return Err(CryptoError::MalformedProof(format!(
                "expected {} bytes, got {}",
                expected_len,
                proof.len()
            )));
        }
        let info = &proof[4..4 + info_len];
        let salt = &proof[4 + info_len..4 + info_len + SALT_LEN];
        let lattice_sig = &proof[4 + info_len + SALT_LEN..];

        if info.len() % INFO_ENTRY_LEN != 2 {
            return Err(CryptoError::MalformedProof(
                "info block is not entries + trailing count".to_string(),
            ));
        }

        // Replay: chain each revealed run from the current seed, splice in
        // the pre-committed digest at every hidden position, and adopt it as
        // the next seed.
        let mut digests: Vec<Hash> = Vec::new();
        let mut seed: Vec<u8> = salt.to_vec();
        let mut supplied = revealed.iter();
        let mut consumed = 0usize;
        let mut offset = 0usize;
        loop {
            let count = u16::from_be_bytes([info[offset], info[offset + 1]]) as usize;
            offset += 2;
            for _ in 0..count {
                let Some(message) = supplied.next() else {
                    return Ok(false);
                };
                let digest = hashing::chain_digest(&seed, message);
                digests.push(digest);
                seed = digest.to_vec();
                consumed += 1;
            }
            if offset == info.len() {
                break;
            }
            let mut hidden: Hash = [0u8; 32];
            hidden.copy_from_slice(&info[offset..offset + 32]);
            offset += 32;
            digests.push(hidden);
            seed = hidden.to_vec();
        }
        if consumed != revealed.len() {
            return Ok(false);
        }

        let commitment = hashing::sha256_concat(&digests);
        Ok(self.variant.verify(&self.public_key, &commitment, lattice_sig))
    }
}
