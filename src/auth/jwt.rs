use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// Signed claims carried by a bearer token. The subject is the user's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub iss: String,
    pub aud: String,
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    fn sign_with_ttl(&self, email: &str, ttl: TimeDuration) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + ttl;
        let claims = Claims {
            sub: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%email, "jwt signed");
        Ok(token)
    }

    pub fn sign(&self, email: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(email, TimeDuration::seconds(self.ttl.as_secs() as i64))
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// Fails closed: any malformed, tampered, mismatched or expired token is
    /// simply not valid.
    pub fn validate(&self, token: &str, expected_email: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => claims.sub == expected_email,
            Err(e) => {
                debug!(error = %e, "token rejected");
                false
            }
        }
    }

    /// Returns the subject claim with the signature checked but expiry not
    /// enforced; used to find the candidate identity before full validation.
    pub fn extract_subject(&self, token: &str) -> anyhow::Result<String> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_token() {
        let keys = make_keys();
        let token = keys.sign("alice@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn validate_accepts_matching_subject() {
        let keys = make_keys();
        let token = keys.sign("alice@example.com").expect("sign");
        assert!(keys.validate(&token, "alice@example.com"));
    }

    #[tokio::test]
    async fn validate_rejects_other_subject() {
        let keys = make_keys();
        let token = keys.sign("alice@example.com").expect("sign");
        assert!(!keys.validate(&token, "bob@example.com"));
    }

    #[tokio::test]
    async fn validate_rejects_expired_token() {
        let keys = make_keys();
        let token = keys
            .sign_with_ttl("alice@example.com", TimeDuration::seconds(-120))
            .expect("sign");
        assert!(!keys.validate(&token, "alice@example.com"));
    }

    #[tokio::test]
    async fn validate_rejects_garbage_and_tampered_tokens() {
        let keys = make_keys();
        assert!(!keys.validate("not-a-jwt", "alice@example.com"));

        let token = keys.sign("alice@example.com").expect("sign");
        let mut tampered = token.clone();
        tampered.pop();
        assert!(!keys.validate(&tampered, "alice@example.com"));
    }

    #[tokio::test]
    async fn extract_subject_ignores_expiry() {
        let keys = make_keys();
        let token = keys
            .sign_with_ttl("alice@example.com", TimeDuration::seconds(-120))
            .expect("sign");
        let subject = keys.extract_subject(&token).expect("extract");
        assert_eq!(subject, "alice@example.com");
    }

    #[tokio::test]
    async fn extract_subject_rejects_bad_signature() {
        let keys = make_keys();
        let token = keys.sign("alice@example.com").expect("sign");
        let mut tampered = token.clone();
        tampered.pop();
        assert!(keys.extract_subject(&tampered).is_err());
    }
}
