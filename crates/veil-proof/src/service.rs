use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::RngCore;
use serde_json::Value;

use veil_core::ProofMessage;
use veil_crypto::{CryptoCredentials, CryptoRegistry, KeyPair};

use crate::canonical::{align_statements, Canonicalizer, Framer, JsonStatements, ShapeFramer};
use crate::error::ProofError;
use crate::ld_proof::LdProof;

/// Ties canonicalization, framing, and suite dispatch into the
/// sign / verify / derive workflow.
///
/// All operations are synchronous, CPU-bound pure functions over the
/// document; the `*_async` wrappers only move a call onto a blocking
/// worker so callers need not stall their event loop.
#[derive(Clone)]
pub struct LdProofService {
    registry: Arc<CryptoRegistry>,
    canonicalizer: Arc<dyn Canonicalizer>,
    framer: Arc<dyn Framer>,
}

impl LdProofService {
    /// Build a service around an explicit registry and RDF stack.
    pub fn new(
        registry: Arc<CryptoRegistry>,
        canonicalizer: Arc<dyn Canonicalizer>,
        framer: Arc<dyn Framer>,
    ) -> Self {
        Self {
            registry,
            canonicalizer,
            framer,
        }
    }

    /// All shipped suites with the built-in JSON canonicalizer and framer.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(CryptoRegistry::with_default_suites()),
            Arc::new(JsonStatements),
            Arc::new(ShapeFramer),
        )
    }

    /// The suite registry this service dispatches through.
    pub fn registry(&self) -> &CryptoRegistry {
        &self.registry
    }

    /// Sign a document, returning it with the proof attached.
    ///
    /// The document must not already carry a proof and `proof` must be
    /// unsigned. The signer's public key is recovered from the proof's
    /// verification method; `private_key` supplies the private half.
    pub fn sign(
        &self,
        document: &Value,
        private_key: &[u8],
        proof: LdProof,
    ) -> Result<Value, ProofError> {
        if !document.is_object() {
            return Err(ProofError::InvalidDocument(
                "document must be a JSON object".to_string(),
            ));
        }
        if document.get("proof").is_some() || proof.is_signed() {
            return Err(ProofError::AlreadySigned);
        }
        let proof_type = proof.primary_type()?;
        if proof_type.is_proof() {
            return Err(ProofError::SignWithDerivedType(proof_type));
        }

        let (key_type, public_key) =
            CryptoCredentials::recover_public_key(&proof.verification_method)?;
        let key_pair = KeyPair::new(key_type, Some(private_key.to_vec()), Some(public_key))?;

        let messages = self.canonical_messages(&proof.for_signing(None)?, document)?;
        let signer = self
            .registry
            .signer(&proof_type, key_pair)
            .ok_or(ProofError::UnknownProofType(proof_type))??;
        let signature = signer.sign(&messages)?;

        let mut signed = proof;
        signed.proof_value = Some(BASE64.encode(signature));

        tracing::info!(
            proof_type = %proof_type,
            verification_method = %signed.verification_method,
            statements = messages.len(),
            "document signed"
        );
        attach_proof(document, &signed)
    }

    /// Verify the single proof a document carries.
    ///
    /// Dispatches to the suite's `ProofVerifier` for derived proof types and
    /// to its `Verifier` otherwise. A cryptographically invalid proof is
    /// `Ok(false)`; errors are reserved for structural violations.
    pub fn verify(&self, document: &Value) -> Result<bool, ProofError> {
        let proof = extract_proof(document)?;
        if !proof.is_signed() {
            return Err(ProofError::MissingProof);
        }
        let proof_type = proof.primary_type()?;

        // The signed statements carry the original proof metadata: for a
        // derived proof, map the type back and drop the nonce.
        let metadata = proof.for_signing(proof_type.original_type())?;
        let bare = without_proof(document);
        let messages = self.canonical_messages(&metadata, &bare)?;

        let (_, public_key) = CryptoCredentials::recover_public_key(&proof.verification_method)?;
        let signature = proof.signature_bytes()?;

        let valid = if proof_type.is_proof() {
            let verifier = self
                .registry
                .proof_verifier(&proof_type, &public_key)
                .ok_or(ProofError::UnknownProofType(proof_type))??;
            verifier.verify_proof(&messages, &signature, &proof.nonce_bytes()?)?
        } else {
            let verifier = self
                .registry
                .verifier(&proof_type, &public_key)
                .ok_or(ProofError::UnknownProofType(proof_type))??;
            verifier.verify(&messages, &signature)?
        };

        tracing::debug!(proof_type = %proof_type, valid, "proof checked");
        Ok(valid)
    }

    /// Derive a revealed-subset proof: the returned document is the framed
    /// sub-document carrying a new proof of the suite's derived type.
    /// The original document and its proof are left untouched.
    pub fn derive(&self, document: &Value, frame: &Value) -> Result<Value, ProofError> {
        let proof = extract_proof(document)?;
        if !proof.is_signed() {
            return Err(ProofError::MissingProof);
        }
        let proof_type = proof.primary_type()?;
        if proof_type.is_proof() {
            return Err(ProofError::UnsupportedDerivation(proof_type));
        }

        let bare = without_proof(document);
        let full = self.canonicalizer.canonicalize(&bare)?;
        let framed_doc = self.framer.frame(&bare, frame)?;
        let framed = self.canonicalizer.canonicalize(&framed_doc)?;
        let tagged = align_statements(&full, &framed)?;

        // Proof metadata statements are always revealed.
        let metadata_lines = self.canonicalizer.canonicalize(&proof.for_signing(None)?)?;
        let mut messages: Vec<ProofMessage> = metadata_lines
            .into_iter()
            .map(|line| ProofMessage::revealed(line.into_bytes()))
            .collect();
        messages.extend(tagged);

        let (_, public_key) = CryptoCredentials::recover_public_key(&proof.verification_method)?;
        let proofer = self
            .registry
            .proofer(&proof_type, &public_key)
            .ok_or(ProofError::UnsupportedDerivation(proof_type))??;

        let mut nonce = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut nonce);
        let derived = proofer.derive_proof(&proof.signature_bytes()?, &nonce, &messages)?;
        let derived_type = proofer.derived_proof_type();

        let mut derived_proof = proof;
        derived_proof.proof_type = vec![derived_type];
        derived_proof.proof_value = Some(BASE64.encode(derived));
        derived_proof.nonce = Some(BASE64.encode(nonce));

        tracing::info!(
            original = %proof_type,
            derived = %derived_type,
            revealed = framed.len(),
            total = full.len(),
            "derived selective-disclosure proof"
        );
        attach_proof(&framed_doc, &derived_proof)
    }

    /// [`sign`](Self::sign) on a blocking worker.
    pub async fn sign_async(
        &self,
        document: Value,
        private_key: Vec<u8>,
        proof: LdProof,
    ) -> Result<Value, ProofError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.sign(&document, &private_key, proof))
            .await
            .map_err(|e| ProofError::TaskJoin(e.to_string()))?
    }

    /// [`verify`](Self::verify) on a blocking worker.
    pub async fn verify_async(&self, document: Value) -> Result<bool, ProofError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.verify(&document))
            .await
            .map_err(|e| ProofError::TaskJoin(e.to_string()))?
    }

    /// [`derive`](Self::derive) on a blocking worker.
    pub async fn derive_async(&self, document: Value, frame: Value) -> Result<Value, ProofError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.derive(&document, &frame))
            .await
            .map_err(|e| ProofError::TaskJoin(e.to_string()))?
    }

    /// One ordered message list: proof-metadata statements first, then the
    /// document's statements.
    fn canonical_messages(
        &self,
        proof_metadata: &Value,
        document: &Value,
    ) -> Result<Vec<Vec<u8>>, ProofError> {
        let mut lines = self.canonicalizer.canonicalize(proof_metadata)?;
        lines.extend(self.canonicalizer.canonicalize(document)?);
        Ok(lines.into_iter().map(String::into_bytes).collect())
    }
}

/// The document's single proof; multi-proof documents are rejected.
fn extract_proof(document: &Value) -> Result<LdProof, ProofError> {
    let proof_json = match document.get("proof") {
        None => return Err(ProofError::MissingProof),
        Some(Value::Array(items)) => match items.len() {
            0 => return Err(ProofError::MissingProof),
            1 => &items[0],
            _ => return Err(ProofError::MultipleProofs),
        },
        Some(other) => other,
    };
    serde_json::from_value(proof_json.clone())
        .map_err(|e| ProofError::InvalidDocument(format!("unparseable proof: {}", e)))
}

fn without_proof(document: &Value) -> Value {
    let mut doc = document.clone();
    if let Value::Object(map) = &mut doc {
        map.remove("proof");
    }
    doc
}

fn attach_proof(document: &Value, proof: &LdProof) -> Result<Value, ProofError> {
    let mut doc = document.clone();
    let Value::Object(map) = &mut doc else {
        return Err(ProofError::InvalidDocument(
            "document must be a JSON object".to_string(),
        ));
    };
    let proof_json = serde_json::to_value(proof)
        .map_err(|e| ProofError::InvalidDocument(format!("unserializable proof: {}", e)))?;
    map.insert("proof".to_string(), proof_json);
    Ok(doc)
}
