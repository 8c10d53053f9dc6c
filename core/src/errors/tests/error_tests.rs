//! Unit tests for error codes, stages and responses

use chrono::Utc;

use crate::domain::entities::claims::ReservedClaim;
use crate::errors::{DomainError, ErrorResponse, FailureStage, KeyError, TokenError};

#[test]
fn test_key_errors_report_key_decode_stage() {
    let errors = [
        KeyError::InvalidKeyFormat { expected_prefix: "pk_" },
        KeyError::KeyDecodeError { message: "bad base64".to_string() },
    ];
    for error in errors {
        assert_eq!(error.stage(), FailureStage::KeyDecode);
    }
}

#[test]
fn test_token_error_stages() {
    let cases = [
        (TokenError::SigningError { message: "x".into() }, FailureStage::Signing),
        (TokenError::BadSignature { reason: "x".into() }, FailureStage::Signature),
        (TokenError::Expired { expired_at: Utc::now() }, FailureStage::Freshness),
        (
            TokenError::ClaimMismatch { claim: ReservedClaim::Audience },
            FailureStage::Claims,
        ),
        (TokenError::MalformedPayload { message: "x".into() }, FailureStage::Claims),
    ];
    for (error, stage) in cases {
        assert_eq!(error.stage(), stage, "{}", error);
    }
}

#[test]
fn test_claim_mismatch_names_claim() {
    let error = TokenError::ClaimMismatch { claim: ReservedClaim::Subject };
    assert_eq!(error.to_string(), "Claim mismatch: subject");
}

#[test]
fn test_invalid_key_format_names_prefix() {
    let error = KeyError::InvalidKeyFormat { expected_prefix: "sk_" };
    assert!(error.to_string().contains("'sk_'"));
}

#[test]
fn test_domain_error_bridges_codes() {
    let error: DomainError = KeyError::InvalidKeyFormat { expected_prefix: "pk_" }.into();
    assert_eq!(error.code(), "INVALID_KEY_FORMAT");
    assert_eq!(error.stage(), Some(FailureStage::KeyDecode));

    let error: DomainError = TokenError::BadSignature { reason: "x".into() }.into();
    assert_eq!(error.code(), "BAD_SIGNATURE");
    assert_eq!(error.stage(), Some(FailureStage::Signature));

    let error = DomainError::Internal { message: "rng".into() };
    assert_eq!(error.code(), "INTERNAL_ERROR");
    assert_eq!(error.stage(), None);
}

#[test]
fn test_error_response_serialization() {
    let error: DomainError = TokenError::ClaimMismatch { claim: ReservedClaim::Issuer }.into();
    let response = ErrorResponse::from(&error);
    assert_eq!(response.error, "CLAIM_MISMATCH");
    assert_eq!(response.stage, Some(FailureStage::Claims));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["error"], "CLAIM_MISMATCH");
    assert_eq!(json["stage"], "claims");
    assert_eq!(json["message"], "Claim mismatch: issuer");
}

#[test]
fn test_error_response_omits_missing_stage() {
    let error = DomainError::Internal { message: "rng".into() };
    let json = serde_json::to_value(ErrorResponse::from(&error)).unwrap();
    assert!(json.get("stage").is_none());
}
