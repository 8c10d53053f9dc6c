//! Claim entities for ES256 tokens.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use kt_shared::ClaimsConfig;

/// One of the reserved identity claims every token carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedClaim {
    Issuer,
    Subject,
    Audience,
}

impl ReservedClaim {
    /// Comparison order used during verification
    pub const ALL: [ReservedClaim; 3] = [
        ReservedClaim::Issuer,
        ReservedClaim::Subject,
        ReservedClaim::Audience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedClaim::Issuer => "issuer",
            ReservedClaim::Subject => "subject",
            ReservedClaim::Audience => "audience",
        }
    }
}

impl std::fmt::Display for ReservedClaim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reserved claims stamped at issuance and demanded at verification
///
/// Immutable once built. Issuer and verifier each construct their own value;
/// the two must agree field for field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimSet {
    issuer: String,
    subject: String,
    audience: String,
}

impl ClaimSet {
    pub fn new(
        issuer: impl Into<String>,
        subject: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            subject: subject.into(),
            audience: audience.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn get(&self, claim: ReservedClaim) -> &str {
        match claim {
            ReservedClaim::Issuer => &self.issuer,
            ReservedClaim::Subject => &self.subject,
            ReservedClaim::Audience => &self.audience,
        }
    }

    /// Returns the first reserved claim in `claims` that differs from this set
    ///
    /// A claim missing from the token counts as a difference.
    pub fn first_mismatch<T>(&self, claims: &TokenClaims<T>) -> Option<ReservedClaim> {
        ReservedClaim::ALL
            .into_iter()
            .find(|claim| claims.claim(*claim) != Some(self.get(*claim)))
    }
}

impl From<&ClaimsConfig> for ClaimSet {
    fn from(config: &ClaimsConfig) -> Self {
        Self::new(&config.issuer, &config.subject, &config.audience)
    }
}

/// Signed body of a token
///
/// The caller payload sits under `data`; the registered claims use their JWT
/// names so the token reads naturally in any JWT debugger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims<T> {
    /// Caller supplied payload
    pub data: T,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

impl<T> TokenClaims<T> {
    /// Builds claims valid from `issued_at` for `validity_seconds`
    pub fn new(data: T, claims: &ClaimSet, issued_at: DateTime<Utc>, validity_seconds: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            data,
            iat,
            exp: iat.saturating_add(validity_seconds),
            iss: Some(claims.issuer().to_string()),
            sub: Some(claims.subject().to_string()),
            aud: Some(claims.audience().to_string()),
        }
    }

    pub fn claim(&self, claim: ReservedClaim) -> Option<&str> {
        match claim {
            ReservedClaim::Issuer => self.iss.as_deref(),
            ReservedClaim::Subject => self.sub.as_deref(),
            ReservedClaim::Audience => self.aud.as_deref(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token is still fresh at the exact second of its expiry
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claim_set() -> ClaimSet {
        ClaimSet::new("I", "S", "A")
    }

    #[test]
    fn test_new_claims_window() {
        let issued_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let claims = TokenClaims::new(json!({"sample": "hello"}), &claim_set(), issued_at, 3600);

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_003_600);
        assert_eq!(claims.issued_at(), Some(issued_at));
        assert_eq!(claims.claim(ReservedClaim::Issuer), Some("I"));
        assert_eq!(claims.claim(ReservedClaim::Subject), Some("S"));
        assert_eq!(claims.claim(ReservedClaim::Audience), Some("A"));
    }

    #[test]
    fn test_expiry_boundary() {
        let issued_at = Utc.timestamp_opt(1_000, 0).unwrap();
        let claims = TokenClaims::new((), &claim_set(), issued_at, 10);

        assert!(!claims.is_expired_at(1_009));
        assert!(!claims.is_expired_at(1_010));
        assert!(claims.is_expired_at(1_011));
    }

    #[test]
    fn test_negative_validity_is_already_expired() {
        let issued_at = Utc.timestamp_opt(1_000, 0).unwrap();
        let claims = TokenClaims::new((), &claim_set(), issued_at, -1);
        assert!(claims.is_expired_at(1_000));
    }

    #[test]
    fn test_serialized_shape() {
        let issued_at = Utc.timestamp_opt(50, 0).unwrap();
        let claims = TokenClaims::new(json!({"sample": "hello"}), &claim_set(), issued_at, 5);
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(
            value,
            json!({
                "data": {"sample": "hello"},
                "iat": 50,
                "exp": 55,
                "iss": "I",
                "sub": "S",
                "aud": "A",
            })
        );
    }

    #[test]
    fn test_first_mismatch_order() {
        let issued_at = Utc::now();
        let claims = TokenClaims::new((), &ClaimSet::new("x", "S", "y"), issued_at, 60);

        assert_eq!(claim_set().first_mismatch(&claims), Some(ReservedClaim::Issuer));
        assert_eq!(
            ClaimSet::new("x", "S", "A").first_mismatch(&claims),
            Some(ReservedClaim::Audience)
        );
        assert_eq!(ClaimSet::new("x", "S", "y").first_mismatch(&claims), None);
    }

    #[test]
    fn test_missing_claim_is_mismatch() {
        let claims: TokenClaims<()> = serde_json::from_value(json!({
            "data": null,
            "iat": 0,
            "exp": 10,
            "iss": "I",
            "aud": "A",
        }))
        .unwrap();

        assert_eq!(claims.sub, None);
        assert_eq!(claim_set().first_mismatch(&claims), Some(ReservedClaim::Subject));
    }

    #[test]
    fn test_claim_set_from_config() {
        let config = ClaimsConfig {
            issuer: "https://issuer.example".to_string(),
            subject: "session".to_string(),
            audience: "client-1".to_string(),
        };
        let claims = ClaimSet::from(&config);

        assert_eq!(claims.issuer(), "https://issuer.example");
        assert_eq!(claims.get(ReservedClaim::Subject), "session");
        assert_eq!(claims.audience(), "client-1");
    }
}
