//! Suite registry: maps proof types to suite constructors.
//!
//! The central extension point. All shipped suites are installed by
//! [`CryptoRegistry::with_default_suites`]; callers may register additional
//! suites (or replace shipped ones) at runtime. Lookups on an unregistered
//! type return `None`, never an error; a factory rejecting its key material
//! surfaces as the factory's `Result`.

use std::sync::Arc;

use dashmap::DashMap;
use veil_core::ProofType;

use crate::error::CryptoError;
use crate::keys::KeyPair;
use crate::suites::{
    BbsProofVerifier, BbsProofer, BbsSigner, BbsVerifier, DilithiumSdProofVerifier,
    DilithiumSdProofer, DilithiumSdSigner, DilithiumSdVerifier, DilithiumSigner,
    DilithiumVerifier, Ed25519Signer, Ed25519Verifier, P256Signer, P256Verifier, Proofer,
    ProofVerifier, Secp256k1Signer, Secp256k1Verifier, Signer, Verifier,
};

/// Builds a [`Signer`] from key material.
pub type SignerFactory =
    Arc<dyn Fn(KeyPair) -> Result<Box<dyn Signer>, CryptoError> + Send + Sync>;
/// Builds a [`Verifier`] from raw public key bytes.
pub type VerifierFactory =
    Arc<dyn Fn(&[u8]) -> Result<Box<dyn Verifier>, CryptoError> + Send + Sync>;
/// Builds a [`Proofer`] from the signer's public key bytes.
pub type ProoferFactory =
    Arc<dyn Fn(&[u8]) -> Result<Box<dyn Proofer>, CryptoError> + Send + Sync>;
/// Builds a [`ProofVerifier`] from the signer's public key bytes.
pub type ProofVerifierFactory =
    Arc<dyn Fn(&[u8]) -> Result<Box<dyn ProofVerifier>, CryptoError> + Send + Sync>;

/// Runtime-mutable suite registry.
///
/// Signer/verifier factories are keyed by the original proof type; proofer
/// factories by the original type they derive from; proof-verifier
/// factories by the derived type they check.
pub struct CryptoRegistry {
    signers: DashMap<ProofType, SignerFactory>,
    verifiers: DashMap<ProofType, VerifierFactory>,
    proofers: DashMap<ProofType, ProoferFactory>,
    proof_verifiers: DashMap<ProofType, ProofVerifierFactory>,
}

impl CryptoRegistry {
    /// An empty registry with no suites installed.
    pub fn new() -> Self {
        Self {
            signers: DashMap::new(),
            verifiers: DashMap::new(),
            proofers: DashMap::new(),
            proof_verifiers: DashMap::new(),
        }
    }

    /// A registry with every shipped suite installed.
    pub fn with_default_suites() -> Self {
        let registry = Self::new();

        registry.register_signer(
            ProofType::EcdsaSecp256r1Signature2019,
            Arc::new(|kp| Ok(Box::new(P256Signer::new(kp)?) as Box<dyn Signer>)),
        );
        registry.register_verifier(
            ProofType::EcdsaSecp256r1Signature2019,
            Arc::new(|pk| Ok(Box::new(P256Verifier::new(pk)?) as Box<dyn Verifier>)),
        );

        registry.register_signer(
            ProofType::EcdsaSecp256k1Signature2019,
            Arc::new(|kp| Ok(Box::new(Secp256k1Signer::new(kp)?) as Box<dyn Signer>)),
        );
        registry.register_verifier(
            ProofType::EcdsaSecp256k1Signature2019,
            Arc::new(|pk| Ok(Box::new(Secp256k1Verifier::new(pk)?) as Box<dyn Verifier>)),
        );

        registry.register_signer(
            ProofType::Ed25519Signature2018,
            Arc::new(|kp| Ok(Box::new(Ed25519Signer::new(kp)?) as Box<dyn Signer>)),
        );
        registry.register_verifier(
            ProofType::Ed25519Signature2018,
            Arc::new(|pk| Ok(Box::new(Ed25519Verifier::new(pk)?) as Box<dyn Verifier>)),
        );

        registry.register_signer(
            ProofType::BbsBlsSignature2020,
            Arc::new(|kp| Ok(Box::new(BbsSigner::new(kp)?) as Box<dyn Signer>)),
        );
        registry.register_verifier(
            ProofType::BbsBlsSignature2020,
            Arc::new(|pk| Ok(Box::new(BbsVerifier::new(pk)?) as Box<dyn Verifier>)),
        );
        registry.register_proofer(
            ProofType::BbsBlsSignature2020,
            Arc::new(|pk| Ok(Box::new(BbsProofer::new(pk)?) as Box<dyn Proofer>)),
        );
        registry.register_proof_verifier(
            ProofType::BbsBlsSignatureProof2020,
            Arc::new(|pk| Ok(Box::new(BbsProofVerifier::new(pk)?) as Box<dyn ProofVerifier>)),
        );

        registry.register_signer(
            ProofType::DilithiumSignature2023,
            Arc::new(|kp| Ok(Box::new(DilithiumSigner::new(kp)?) as Box<dyn Signer>)),
        );
        registry.register_verifier(
            ProofType::DilithiumSignature2023,
            Arc::new(|pk| Ok(Box::new(DilithiumVerifier::new(pk)?) as Box<dyn Verifier>)),
        );

        registry.register_signer(
            ProofType::DilithiumSdSignature2023,
            Arc::new(|kp| Ok(Box::new(DilithiumSdSigner::new(kp)?) as Box<dyn Signer>)),
        );
        registry.register_verifier(
            ProofType::DilithiumSdSignature2023,
            Arc::new(|pk| Ok(Box::new(DilithiumSdVerifier::new(pk)?) as Box<dyn Verifier>)),
        );
        registry.register_proofer(
            ProofType::DilithiumSdSignature2023,
            Arc::new(|pk| Ok(Box::new(DilithiumSdProofer::new(pk)?) as Box<dyn Proofer>)),
        );
        registry.register_proof_verifier(
            ProofType::DilithiumSdSignatureProof2023,
            Arc::new(|pk| {
                Ok(Box::new(DilithiumSdProofVerifier::new(pk)?) as Box<dyn ProofVerifier>)
            }),
        );

        registry
    }

    /// Install (or replace) a signer factory.
    pub fn register_signer(&self, proof_type: ProofType, factory: SignerFactory) {
        tracing::debug!(proof_type = %proof_type, "signer registered");
        self.signers.insert(proof_type, factory);
    }

    /// Remove a signer factory.
    pub fn unregister_signer(&self, proof_type: &ProofType) {
        tracing::debug!(proof_type = %proof_type, "signer unregistered");
        self.signers.remove(proof_type);
    }

    /// Install (or replace) a verifier factory.
    pub fn register_verifier(&self, proof_type: ProofType, factory: VerifierFactory) {
        self.verifiers.insert(proof_type, factory);
    }

    /// Remove a verifier factory.
    pub fn unregister_verifier(&self, proof_type: &ProofType) {
        self.verifiers.remove(proof_type);
    }

    /// Install (or replace) a proofer factory, keyed by the original type.
    pub fn register_proofer(&self, proof_type: ProofType, factory: ProoferFactory) {
        self.proofers.insert(proof_type, factory);
    }

    /// Remove a proofer factory.
    pub fn unregister_proofer(&self, proof_type: &ProofType) {
        self.proofers.remove(proof_type);
    }

    /// Install (or replace) a proof-verifier factory, keyed by the derived type.
    pub fn register_proof_verifier(&self, proof_type: ProofType, factory: ProofVerifierFactory) {
        self.proof_verifiers.insert(proof_type, factory);
    }

    /// Remove a proof-verifier factory.
    pub fn unregister_proof_verifier(&self, proof_type: &ProofType) {
        self.proof_verifiers.remove(proof_type);
    }

    /// Build a signer for the given type, or `None` if unregistered.
    pub fn signer(
        &self,
        proof_type: &ProofType,
        key_pair: KeyPair,
    ) -> Option<Result<Box<dyn Signer>, CryptoError>> {
        let factory = self.signers.get(proof_type)?.clone();
        Some(factory(key_pair))
    }

    /// Build a verifier for the given type, or `None` if unregistered.
    pub fn verifier(
        &self,
        proof_type: &ProofType,
        public_key: &[u8],
    ) -> Option<Result<Box<dyn Verifier>, CryptoError>> {
        let factory = self.verifiers.get(proof_type)?.clone();
        Some(factory(public_key))
    }

    /// Build a proofer for the given original type, or `None` if the suite
    /// has no derivation support registered.
    pub fn proofer(
        &self,
        proof_type: &ProofType,
        public_key: &[u8],
    ) -> Option<Result<Box<dyn Proofer>, CryptoError>> {
        let factory = self.proofers.get(proof_type)?.clone();
        Some(factory(public_key))
    }

    /// Build a proof verifier for the given derived type, or `None` if
    /// unregistered.
    pub fn proof_verifier(
        &self,
        proof_type: &ProofType,
        public_key: &[u8],
    ) -> Option<Result<Box<dyn ProofVerifier>, CryptoError>> {
        let factory = self.proof_verifiers.get(proof_type)?.clone();
        Some(factory(public_key))
    }
}

impl Default for CryptoRegistry {
    fn default() -> Self {
        Self::with_default_suites()
    }
}
