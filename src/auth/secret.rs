use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Claims, TokenVerifier};

/// Issuer stamped on locally minted tokens
pub const DEV_ISSUER: &str = "boats-api-dev";

/// HS256 verifier for a shared secret. Stands in for Google in development and tests.
#[derive(Clone)]
pub struct SecretTokenVerifier {
    secret: String,
}

impl SecretTokenVerifier {
    pub fn new(secret: impl Into<String>) -> Result<Self, AuthError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        Ok(Self { secret })
    }

    /// Mint a token for `sub` valid for `expiry_hours`
    pub fn issue_token(&self, sub: &str, expiry_hours: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            email: None,
            iss: Some(DEV_ISSUER.to_string()),
            aud: None,
            exp: (now + Duration::hours(expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(AuthError::from)
    }
}

#[async_trait]
impl TokenVerifier for SecretTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.set_issuer(&[DEV_ISSUER]);

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }
}
