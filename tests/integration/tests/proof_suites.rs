//! Integration test: sign/verify round-trips for every reveal-all suite
//! through the full orchestrator, plus key-size and tamper invariants.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;

use veil_core::{KeyType, ProofType};
use veil_crypto::{CryptoCredentials, CryptoError, KeyPair};
use veil_proof::{LdProof, LdProofService};

use veil_integration_tests::sample_credential;

fn sign_with(
    service: &LdProofService,
    key_type: KeyType,
    proof_type: ProofType,
) -> (Value, CryptoCredentials) {
    let creds = CryptoCredentials::generate(key_type).expect("keygen");
    let proof = LdProof::new(proof_type, creds.verification_method());
    let signed = service
        .sign(
            &sample_credential(),
            creds.key_pair().private_key().unwrap(),
            proof,
        )
        .expect("sign");
    (signed, creds)
}

/// Flip one byte of the attached proofValue.
fn flip_proof_value_byte(document: &mut Value) {
    let encoded = document["proof"]["proofValue"].as_str().unwrap();
    let mut bytes = BASE64.decode(encoded).unwrap();
    bytes[0] ^= 0x01;
    document["proof"]["proofValue"] = Value::String(BASE64.encode(bytes));
}

fn suite_matrix() -> Vec<(KeyType, ProofType)> {
    vec![
        (KeyType::P256, ProofType::EcdsaSecp256r1Signature2019),
        (KeyType::Secp256k1, ProofType::EcdsaSecp256k1Signature2019),
        (KeyType::Ed25519, ProofType::Ed25519Signature2018),
        (KeyType::Bls12381G2, ProofType::BbsBlsSignature2020),
        (KeyType::Dilithium2, ProofType::DilithiumSignature2023),
        (KeyType::Dilithium3, ProofType::DilithiumSignature2023),
        (KeyType::Dilithium5, ProofType::DilithiumSignature2023),
        (KeyType::Dilithium3, ProofType::DilithiumSdSignature2023),
    ]
}

#[test]
fn test_sign_verify_roundtrip_every_suite() {
    let service = LdProofService::with_defaults();
    for (key_type, proof_type) in suite_matrix() {
        let (signed, _) = sign_with(&service, key_type, proof_type);
        assert!(
            service.verify(&signed).unwrap(),
            "round-trip failed for {} / {}",
            key_type,
            proof_type
        );
    }
}

#[test]
fn test_flipped_proof_value_fails_every_suite() {
    let service = LdProofService::with_defaults();
    for (key_type, proof_type) in suite_matrix() {
        let (mut signed, _) = sign_with(&service, key_type, proof_type);
        flip_proof_value_byte(&mut signed);
        assert!(
            !service.verify(&signed).unwrap(),
            "tampered proof accepted for {} / {}",
            key_type,
            proof_type
        );
    }
}

#[test]
fn test_verify_with_wrong_signer_key_fails() {
    let service = LdProofService::with_defaults();
    let honest = CryptoCredentials::generate(KeyType::Ed25519).unwrap();
    let imposter = CryptoCredentials::generate(KeyType::Ed25519).unwrap();

    // Signed with the imposter's private key but claiming the honest
    // party's verification method.
    let proof = LdProof::new(
        ProofType::Ed25519Signature2018,
        honest.verification_method(),
    );
    let signed = service
        .sign(
            &sample_credential(),
            imposter.key_pair().private_key().unwrap(),
            proof,
        )
        .unwrap();
    assert!(!service.verify(&signed).unwrap());
}

#[test]
fn test_key_size_invariant_every_suite() {
    for key_type in [
        KeyType::P256,
        KeyType::Secp256k1,
        KeyType::Ed25519,
        KeyType::Bls12381G2,
        KeyType::Dilithium2,
        KeyType::Dilithium3,
        KeyType::Dilithium5,
    ] {
        let good_len = key_type.public_key_len();
        for bad_len in [good_len - 1, good_len + 1] {
            let result = KeyPair::from_public(key_type, vec![0u8; bad_len]);
            assert!(
                matches!(result, Err(CryptoError::InvalidKeyLength { .. })),
                "{} accepted a {}-byte public key",
                key_type,
                bad_len
            );
        }
    }
}

#[test]
fn test_did_key_recovery_across_suites() {
    for key_type in [
        KeyType::P256,
        KeyType::Secp256k1,
        KeyType::Ed25519,
        KeyType::Bls12381G2,
        KeyType::Dilithium2,
        KeyType::Dilithium3,
        KeyType::Dilithium5,
    ] {
        let creds = CryptoCredentials::generate(key_type).unwrap();
        let (recovered_type, recovered_key) =
            CryptoCredentials::recover_public_key(creds.verification_method()).unwrap();
        assert_eq!(recovered_type, key_type);
        assert_eq!(recovered_key, creds.key_pair().public_key().unwrap());
    }
}

#[test]
fn test_signature_byte_layouts() {
    let service = LdProofService::with_defaults();

    let (signed, _) = sign_with(&service, KeyType::P256, ProofType::EcdsaSecp256r1Signature2019);
    let sig = BASE64
        .decode(signed["proof"]["proofValue"].as_str().unwrap())
        .unwrap();
    assert_eq!(sig.len(), 64);

    let (signed, _) = sign_with(&service, KeyType::Ed25519, ProofType::Ed25519Signature2018);
    let sig = BASE64
        .decode(signed["proof"]["proofValue"].as_str().unwrap())
        .unwrap();
    assert_eq!(sig.len(), 64);

    // Dilithium-SD: 16-byte salt followed by the fixed lattice signature.
    let (signed, _) = sign_with(
        &service,
        KeyType::Dilithium2,
        ProofType::DilithiumSdSignature2023,
    );
    let sig = BASE64
        .decode(signed["proof"]["proofValue"].as_str().unwrap())
        .unwrap();
    assert_eq!(sig.len(), 16 + 2420);
}
