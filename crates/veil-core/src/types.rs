use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

const SECURITY_VOCAB: &str = "https://w3id.org/security#";

/// Signature/proof suites supported by Veil.
///
/// Each variant names one suite (or the derived-proof companion of a suite)
/// with a stable, globally unique URI identifier. Variants with
/// [`is_proof`](ProofType::is_proof) `== true` are derived proofs: they can
/// only be verified, never produced by a plain `sign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofType {
    /// ECDSA over NIST P-256.
    EcdsaSecp256r1Signature2019,
    /// ECDSA over secp256k1.
    EcdsaSecp256k1Signature2019,
    /// Ed25519 (EdDSA).
    Ed25519Signature2018,
    /// BBS+ multi-message signature over BLS12-381.
    BbsBlsSignature2020,
    /// Derived BBS+ proof revealing a statement subset.
    BbsBlsSignatureProof2020,
    /// Dilithium lattice signature (reveal-all).
    DilithiumSignature2023,
    /// Dilithium with salted-hash-chain selective disclosure.
    DilithiumSdSignature2023,
    /// Derived Dilithium-SD proof revealing a statement subset.
    DilithiumSdSignatureProof2023,
}

impl ProofType {
    /// Stable URI identifier for this suite.
    pub fn iri(&self) -> &'static str {
        match self {
            Self::EcdsaSecp256r1Signature2019 => {
                "https://w3id.org/security#EcdsaSecp256r1Signature2019"
            }
            Self::EcdsaSecp256k1Signature2019 => {
                "https://w3id.org/security#EcdsaSecp256k1Signature2019"
            }
            Self::Ed25519Signature2018 => "https://w3id.org/security#Ed25519Signature2018",
            Self::BbsBlsSignature2020 => "https://w3id.org/security#BbsBlsSignature2020",
            Self::BbsBlsSignatureProof2020 => "https://w3id.org/security#BbsBlsSignatureProof2020",
            Self::DilithiumSignature2023 => "https://w3id.org/security#DilithiumSignature2023",
            Self::DilithiumSdSignature2023 => "https://w3id.org/security#DilithiumSdSignature2023",
            Self::DilithiumSdSignatureProof2023 => {
                "https://w3id.org/security#DilithiumSdSignatureProof2023"
            }
        }
    }

    /// Resolve a proof type from its URI identifier.
    ///
    /// Accepts both the full URI and the bare suffix (the form most
    /// documents embed in their `type` field).
    pub fn from_iri(iri: &str) -> Result<Self, CoreError> {
        let name = iri.strip_prefix(SECURITY_VOCAB).unwrap_or(iri);
        match name {
            "EcdsaSecp256r1Signature2019" => Ok(Self::EcdsaSecp256r1Signature2019),
            "EcdsaSecp256k1Signature2019" => Ok(Self::EcdsaSecp256k1Signature2019),
            "Ed25519Signature2018" => Ok(Self::Ed25519Signature2018),
            "BbsBlsSignature2020" => Ok(Self::BbsBlsSignature2020),
            "BbsBlsSignatureProof2020" => Ok(Self::BbsBlsSignatureProof2020),
            "DilithiumSignature2023" => Ok(Self::DilithiumSignature2023),
            "DilithiumSdSignature2023" => Ok(Self::DilithiumSdSignature2023),
            "DilithiumSdSignatureProof2023" => Ok(Self::DilithiumSdSignatureProof2023),
            other => Err(CoreError::UnknownProofType(other.to_string())),
        }
    }

    /// Whether this type marks a derived (revealed-subset) proof.
    pub fn is_proof(&self) -> bool {
        matches!(
            self,
            Self::BbsBlsSignatureProof2020 | Self::DilithiumSdSignatureProof2023
        )
    }

    /// The derived-proof companion of this suite, if it supports derivation.
    pub fn derived_type(&self) -> Option<Self> {
        match self {
            Self::BbsBlsSignature2020 => Some(Self::BbsBlsSignatureProof2020),
            Self::DilithiumSdSignature2023 => Some(Self::DilithiumSdSignatureProof2023),
            _ => None,
        }
    }

    /// The original signature type a derived proof verifies against.
    pub fn original_type(&self) -> Option<Self> {
        match self {
            Self::BbsBlsSignatureProof2020 => Some(Self::BbsBlsSignature2020),
            Self::DilithiumSdSignatureProof2023 => Some(Self::DilithiumSdSignature2023),
            _ => None,
        }
    }
}

impl fmt::Display for ProofType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display as the bare suffix; the full URI is iri().
        let iri = self.iri();
        write!(f, "{}", iri.strip_prefix(SECURITY_VOCAB).unwrap_or(iri))
    }
}

/// Key families used by the shipped suites.
///
/// Carries the exact key sizes and the 2-byte varint multicodec prefix used
/// in `did:key` encoding. The prefix identifies the family; within the
/// Dilithium family, key lengths alone are enough to tell the parameter
/// sets apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// NIST P-256, SEC1-compressed public key.
    P256,
    /// secp256k1, SEC1-compressed public key.
    Secp256k1,
    /// Ed25519.
    Ed25519,
    /// BLS12-381 G2 public key (BBS+).
    Bls12381G2,
    /// Dilithium parameter set 2.
    Dilithium2,
    /// Dilithium parameter set 3.
    Dilithium3,
    /// Dilithium parameter set 5.
    Dilithium5,
}

impl KeyType {
    /// Exact public key length in bytes.
    pub fn public_key_len(&self) -> usize {
        match self {
            Self::P256 | Self::Secp256k1 => 33,
            Self::Ed25519 => 32,
            Self::Bls12381G2 => 96,
            Self::Dilithium2 => 1312,
            Self::Dilithium3 => 1952,
            Self::Dilithium5 => 2592,
        }
    }

    /// Exact private key length in bytes.
    pub fn private_key_len(&self) -> usize {
        match self {
            Self::P256 | Self::Secp256k1 | Self::Ed25519 | Self::Bls12381G2 => 32,
            Self::Dilithium2 => 2528,
            Self::Dilithium3 => 4000,
            Self::Dilithium5 => 4864,
        }
    }

    /// Varint-encoded multicodec prefix for did:key encoding.
    pub fn multicodec_prefix(&self) -> [u8; 2] {
        match self {
            Self::P256 => [0x80, 0x24],
            Self::Secp256k1 => [0xe7, 0x01],
            Self::Ed25519 => [0xed, 0x01],
            Self::Bls12381G2 => [0xeb, 0x01],
            Self::Dilithium2 => [0x87, 0x24],
            Self::Dilithium3 => [0x88, 0x24],
            Self::Dilithium5 => [0x89, 0x24],
        }
    }

    /// Recover a key type from a multicodec prefix.
    pub fn from_multicodec(prefix: [u8; 2]) -> Result<Self, CoreError> {
        match prefix {
            [0x80, 0x24] => Ok(Self::P256),
            [0xe7, 0x01] => Ok(Self::Secp256k1),
            [0xed, 0x01] => Ok(Self::Ed25519),
            [0xeb, 0x01] => Ok(Self::Bls12381G2),
            [0x87, 0x24] => Ok(Self::Dilithium2),
            [0x88, 0x24] => Ok(Self::Dilithium3),
            [0x89, 0x24] => Ok(Self::Dilithium5),
            [a, b] => Err(CoreError::UnknownMulticodec(a, b)),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::P256 => write!(f, "P-256"),
            Self::Secp256k1 => write!(f, "secp256k1"),
            Self::Ed25519 => write!(f, "Ed25519"),
            Self::Bls12381G2 => write!(f, "BLS12-381 G2"),
            Self::Dilithium2 => write!(f, "Dilithium2"),
            Self::Dilithium3 => write!(f, "Dilithium3"),
            Self::Dilithium5 => write!(f, "Dilithium5"),
        }
    }
}

/// Disclosure tag on one canonical statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofMessageKind {
    /// The statement is disclosed to the verifier.
    Revealed,
    /// The statement stays hidden behind its commitment.
    Hidden,
}

/// One canonical statement tagged for derivation.
///
/// Order is significant: the message list must match the canonical statement
/// order of the signed document exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofMessage {
    /// Disclosure tag.
    pub kind: ProofMessageKind,
    /// Statement bytes (the canonical line, UTF-8).
    pub payload: Vec<u8>,
}

impl ProofMessage {
    /// Tag a statement as revealed.
    pub fn revealed(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ProofMessageKind::Revealed,
            payload: payload.into(),
        }
    }

    /// Tag a statement as hidden.
    pub fn hidden(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ProofMessageKind::Hidden,
            payload: payload.into(),
        }
    }

    /// Whether this statement is revealed.
    pub fn is_revealed(&self) -> bool {
        self.kind == ProofMessageKind::Revealed
    }
}
