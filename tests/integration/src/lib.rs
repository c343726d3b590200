//! Shared fixtures for the Veil integration tests.

use serde_json::{json, Value};

/// A small KYC-style credential document.
pub fn sample_credential() -> Value {
    json!({
        "id": "urn:credential:kyc-7f3a",
        "issuer": "did:example:issuer-bank",
        "credentialSubject": {
            "name": "Alice Santos",
            "birthDate": "1995-03-15",
            "country": "BR",
            "kycLevel": 3
        }
    })
}

/// A frame revealing only the subject's country and KYC level.
pub fn country_and_level_frame() -> Value {
    json!({
        "id": {},
        "issuer": {},
        "credentialSubject": {
            "country": {},
            "kycLevel": {}
        }
    })
}
