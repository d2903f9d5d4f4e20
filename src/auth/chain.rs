use async_trait::async_trait;
use std::sync::Arc;

use super::{AuthError, Claims, TokenVerifier};

/// Accepts a token when any of its verifiers does, tried in order.
///
/// When every verifier refuses, an `InvalidToken` verdict wins over an
/// infrastructure failure so a bad token still answers 401.
pub struct ChainedVerifier {
    verifiers: Vec<Arc<dyn TokenVerifier>>,
}

impl ChainedVerifier {
    pub fn new(verifiers: Vec<Arc<dyn TokenVerifier>>) -> Self {
        Self { verifiers }
    }
}

#[async_trait]
impl TokenVerifier for ChainedVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut refusal: Option<AuthError> = None;

        for verifier in &self.verifiers {
            match verifier.verify(token).await {
                Ok(claims) => return Ok(claims),
                Err(err) => {
                    let keep = match (&refusal, &err) {
                        (None, _) => true,
                        (Some(AuthError::InvalidToken(_)), _) => false,
                        (Some(_), AuthError::InvalidToken(_)) => true,
                        (Some(_), _) => false,
                    };
                    if keep {
                        refusal = Some(err);
                    }
                }
            }
        }

        Err(refusal.unwrap_or_else(|| AuthError::InvalidToken("no verifier configured".to_string())))
    }
}
