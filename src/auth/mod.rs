use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod chain;
pub mod google;
pub mod secret;

pub use chain::ChainedVerifier;
pub use google::{GoogleOAuthProvider, GoogleTokenVerifier};
pub use secret::SecretTokenVerifier;

/// Identity token claims the API relies on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the stable user id at the identity provider
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("signing keys unavailable: {0}")]
    KeysUnavailable(String),

    #[error("code exchange failed: {0}")]
    Exchange(String),

    #[error("token secret not configured")]
    InvalidSecret,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::InvalidToken(err.to_string())
    }
}

/// Verifies bearer identity tokens
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Authorization-code flow against an external identity provider
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Consent page URL carrying the one-shot `state`
    fn authorize_url(&self, state: &str) -> String;

    /// Trade an authorization code for an identity token
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;
}
