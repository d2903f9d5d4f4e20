use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use super::{AuthError, Claims, OAuthProvider, TokenVerifier};
use crate::config::OAuthConfig;

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];
const DEFAULT_KEYS_MAX_AGE: Duration = Duration::from_secs(3600);
// An unknown `kid` triggers a refetch at most this often
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
    max_age: Duration,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.max_age
    }
}

/// Verifies Google-issued ID tokens (RS256) against Google's published JWKS
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    certs_uri: String,
    client_id: String,
    keys: RwLock<Option<CachedKeys>>,
}

impl GoogleTokenVerifier {
    pub fn new(client: reqwest::Client, config: &OAuthConfig) -> Self {
        Self {
            client,
            certs_uri: config.certs_uri.clone(),
            client_id: config.client_id.clone(),
            keys: RwLock::new(None),
        }
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.keys.read().await;
            if let Some(cached) = cache.as_ref() {
                if let Some(key) = cached.keys.get(kid) {
                    if cached.is_fresh() {
                        return Ok(key.clone());
                    }
                } else if cached.is_fresh() && cached.fetched_at.elapsed() < MIN_REFRESH_INTERVAL {
                    return Err(AuthError::InvalidToken(format!("unknown key id '{}'", kid)));
                }
            }
        }

        let fetched = self.fetch_keys().await?;
        let key = fetched.keys.get(kid).cloned();
        *self.keys.write().await = Some(fetched);

        key.ok_or_else(|| AuthError::InvalidToken(format!("unknown key id '{}'", kid)))
    }

    async fn fetch_keys(&self) -> Result<CachedKeys, AuthError> {
        let response = self
            .client
            .get(&self.certs_uri)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeysUnavailable(e.to_string()))?;

        let max_age = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(cache_max_age)
            .unwrap_or(DEFAULT_KEYS_MAX_AGE);

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::KeysUnavailable(e.to_string()))?;

        let mut keys = HashMap::new();
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid, key);
                }
                Err(e) => warn!("Skipping unusable signing key '{}': {}", kid, e),
            }
        }

        info!("Fetched {} Google signing keys (max-age {:?})", keys.len(), max_age);
        Ok(CachedKeys {
            keys,
            fetched_at: Instant::now(),
            max_age,
        })
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!(
                "unexpected algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("missing key id".to_string()))?;

        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&GOOGLE_ISSUERS[..]);

        let token_data = decode::<Claims>(token, &key, &validation)?;
        debug!(sub = %token_data.claims.sub, "verified Google ID token");
        Ok(token_data.claims)
    }
}

/// Parse `max-age=N` out of a Cache-Control header value
fn cache_max_age(value: &str) -> Option<Duration> {
    value
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

/// Google authorization-code flow
pub struct GoogleOAuthProvider {
    client: reqwest::Client,
    auth_url: Url,
    token_uri: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl GoogleOAuthProvider {
    pub fn new(client: reqwest::Client, config: &OAuthConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            auth_url: Url::parse(&config.auth_uri)?,
            token_uri: config.token_uri.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        })
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    fn authorize_url(&self, state: &str) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", "openid email profile")
            .append_pair("state", state);
        url.into()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Exchange(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        token
            .id_token
            .ok_or_else(|| AuthError::Exchange("response carried no id_token".to_string()))
    }
}
