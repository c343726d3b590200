use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veil_core::ProofType;

use crate::error::ProofError;

/// JSON-LD security context carried by every proof.
pub const SECURITY_CONTEXT: &str = "https://w3id.org/security/v2";

/// Default proof purpose.
pub const ASSERTION_METHOD: &str = "assertionMethod";

/// A linked-data proof attached to a document.
///
/// `proof_value` is `None` until the document is signed and `Some`
/// afterwards; `nonce` is populated only on derived (revealed-subset)
/// proofs. A signed proof is never mutated again: derivation produces a new
/// `LdProof`, and verification reads it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdProof {
    /// JSON-LD context of the proof block.
    #[serde(rename = "@context")]
    pub context: String,
    /// Proof type(s); the first entry drives suite dispatch.
    #[serde(rename = "type")]
    pub proof_type: Vec<ProofType>,
    /// Optional creator DID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// When the proof was created.
    pub created: DateTime<Utc>,
    /// Optional domain binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Optional challenge from the relying party.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    /// Derivation nonce (base64); derived proofs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    /// Why the proof was attached.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,
    /// did:key verification method of the signer.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,
    /// Signature or derived proof bytes (base64); `None` until signed.
    #[serde(rename = "proofValue", skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,
}

impl LdProof {
    /// A fresh, unsigned proof for the given suite and verification method.
    pub fn new(proof_type: ProofType, verification_method: impl Into<String>) -> Self {
        Self {
            context: SECURITY_CONTEXT.to_string(),
            proof_type: vec![proof_type],
            creator: None,
            created: Utc::now(),
            domain: None,
            challenge: None,
            nonce: None,
            proof_purpose: ASSERTION_METHOD.to_string(),
            verification_method: verification_method.into(),
            proof_value: None,
        }
    }

    /// Set the creator DID.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the domain binding.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the relying-party challenge.
    pub fn with_challenge(mut self, challenge: impl Into<String>) -> Self {
        self.challenge = Some(challenge.into());
        self
    }

    /// Set an explicit creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// The proof type driving suite dispatch.
    pub fn primary_type(&self) -> Result<ProofType, ProofError> {
        self.proof_type
            .first()
            .copied()
            .ok_or_else(|| ProofError::InvalidDocument("proof has no type".to_string()))
    }

    /// Whether a proof value is present.
    pub fn is_signed(&self) -> bool {
        self.proof_value.is_some()
    }

    /// Decoded proof value bytes.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, ProofError> {
        let value = self.proof_value.as_ref().ok_or(ProofError::MissingProof)?;
        BASE64
            .decode(value)
            .map_err(|e| ProofError::InvalidProofEncoding(format!("proofValue: {}", e)))
    }

    /// Decoded nonce bytes; empty when no nonce is present.
    pub fn nonce_bytes(&self) -> Result<Vec<u8>, ProofError> {
        match &self.nonce {
            None => Ok(Vec::new()),
            Some(nonce) => BASE64
                .decode(nonce)
                .map_err(|e| ProofError::InvalidProofEncoding(format!("nonce: {}", e))),
        }
    }

    /// The proof-metadata document whose canonical statements are signed:
    /// this proof without `proofValue` and without `nonce`.
    ///
    /// When verifying a derived proof, pass the original signature type so
    /// the metadata statements match what the issuer signed.
    pub fn for_signing(&self, type_override: Option<ProofType>) -> Result<serde_json::Value, ProofError> {
        let mut metadata = self.clone();
        metadata.proof_value = None;
        metadata.nonce = None;
        if let Some(original) = type_override {
            metadata.proof_type = vec![original];
        }
        serde_json::to_value(&metadata)
            .map_err(|e| ProofError::InvalidDocument(format!("unserializable proof: {}", e)))
    }
}
