//! Integration test: selective-disclosure flows for BBS+ and Dilithium-SD
//! through sign → derive → verify, including tamper and workflow negatives.

use serde_json::{json, Value};

use veil_core::{KeyType, ProofType};
use veil_crypto::CryptoCredentials;
use veil_proof::{LdProof, LdProofService, ProofError};

use veil_integration_tests::{country_and_level_frame, sample_credential};

fn derive_flow(key_type: KeyType, proof_type: ProofType) -> (LdProofService, Value, Value) {
    let service = LdProofService::with_defaults();
    let creds = CryptoCredentials::generate(key_type).expect("keygen");
    let proof = LdProof::new(proof_type, creds.verification_method());
    let signed = service
        .sign(
            &sample_credential(),
            creds.key_pair().private_key().unwrap(),
            proof,
        )
        .expect("sign");
    let derived = service
        .derive(&signed, &country_and_level_frame())
        .expect("derive");
    (service, signed, derived)
}

#[test]
fn test_bbs_derive_and_verify() {
    let (service, signed, derived) = derive_flow(KeyType::Bls12381G2, ProofType::BbsBlsSignature2020);

    // The original document still verifies and was not mutated by derive.
    assert!(service.verify(&signed).unwrap());
    assert_eq!(
        signed["proof"]["type"][0].as_str().unwrap(),
        "BbsBlsSignature2020"
    );

    // The derived document carries the derived type, a nonce, and only the
    // framed fields.
    assert_eq!(
        derived["proof"]["type"][0].as_str().unwrap(),
        "BbsBlsSignatureProof2020"
    );
    assert!(derived["proof"]["nonce"].is_string());
    assert_eq!(derived["credentialSubject"]["country"], "BR");
    assert_eq!(derived["credentialSubject"]["kycLevel"], 3);
    assert!(derived["credentialSubject"].get("name").is_none());
    assert!(derived["credentialSubject"].get("birthDate").is_none());

    // Verifies without access to the hidden fields.
    assert!(service.verify(&derived).unwrap());
}

#[test]
fn test_bbs_derived_verify_fails_on_altered_revealed_field() {
    let (service, _, mut derived) =
        derive_flow(KeyType::Bls12381G2, ProofType::BbsBlsSignature2020);
    derived["credentialSubject"]["country"] = json!("AR");
    assert!(!service.verify(&derived).unwrap());
}

#[test]
fn test_dilithium_sd_derive_and_verify() {
    let (service, signed, derived) =
        derive_flow(KeyType::Dilithium3, ProofType::DilithiumSdSignature2023);

    assert!(service.verify(&signed).unwrap());
    assert_eq!(
        derived["proof"]["type"][0].as_str().unwrap(),
        "DilithiumSdSignatureProof2023"
    );
    assert!(derived["credentialSubject"].get("name").is_none());
    assert!(service.verify(&derived).unwrap());
}

#[test]
fn test_dilithium_sd_derived_verify_fails_on_altered_revealed_field() {
    let (service, _, mut derived) =
        derive_flow(KeyType::Dilithium3, ProofType::DilithiumSdSignature2023);
    derived["credentialSubject"]["kycLevel"] = json!(5);
    assert!(!service.verify(&derived).unwrap());
}

#[test]
fn test_dilithium_sd_derived_verify_fails_on_added_field() {
    let (service, _, mut derived) =
        derive_flow(KeyType::Dilithium3, ProofType::DilithiumSdSignature2023);
    derived["credentialSubject"]["name"] = json!("Alice Santos");
    assert!(!service.verify(&derived).unwrap());
}

#[test]
fn test_derive_from_derived_proof_rejected() {
    let (service, _, derived) = derive_flow(KeyType::Bls12381G2, ProofType::BbsBlsSignature2020);
    assert!(matches!(
        service.derive(&derived, &json!({"id": {}})),
        Err(ProofError::UnsupportedDerivation(
            ProofType::BbsBlsSignatureProof2020
        ))
    ));
}

#[test]
fn test_derivations_from_one_signature_are_independent() {
    let (service, signed, derived_a) =
        derive_flow(KeyType::Bls12381G2, ProofType::BbsBlsSignature2020);
    let derived_b = service.derive(&signed, &json!({"issuer": {}})).unwrap();

    assert!(service.verify(&derived_a).unwrap());
    assert!(service.verify(&derived_b).unwrap());
    assert!(derived_b.get("credentialSubject").is_none());
}

#[test]
fn test_multi_proof_document_is_workflow_error() {
    let (service, signed, _) = derive_flow(KeyType::Bls12381G2, ProofType::BbsBlsSignature2020);
    let proof = signed["proof"].clone();
    let mut doubled = signed;
    doubled["proof"] = json!([proof.clone(), proof]);
    assert!(matches!(
        service.verify(&doubled),
        Err(ProofError::MultipleProofs)
    ));
}

#[test]
fn test_frame_of_whole_document_reveals_everything() {
    let service = LdProofService::with_defaults();
    let creds = CryptoCredentials::generate(KeyType::Dilithium2).unwrap();
    let proof = LdProof::new(
        ProofType::DilithiumSdSignature2023,
        creds.verification_method(),
    );
    let signed = service
        .sign(
            &sample_credential(),
            creds.key_pair().private_key().unwrap(),
            proof,
        )
        .unwrap();

    let derived = service.derive(&signed, &json!({})).unwrap();
    assert_eq!(derived["credentialSubject"]["name"], "Alice Santos");
    assert!(service.verify(&derived).unwrap());
}

#[tokio::test]
async fn test_async_derive_flow() {
    let service = LdProofService::with_defaults();
    let creds = CryptoCredentials::generate(KeyType::Bls12381G2).unwrap();
    let proof = LdProof::new(ProofType::BbsBlsSignature2020, creds.verification_method());

    let signed = service
        .sign_async(
            sample_credential(),
            creds.key_pair().private_key().unwrap().to_vec(),
            proof,
        )
        .await
        .unwrap();
    let derived = service
        .derive_async(signed, country_and_level_frame())
        .await
        .unwrap();
    assert!(service.verify_async(derived).await.unwrap());
}
