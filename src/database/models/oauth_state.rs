use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::repository::Entity;

/// How long a login may take between `/login` and the provider's callback
pub const STATE_TTL_MINUTES: i64 = 10;

/// One-shot `state` value handed to the OAuth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthState {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl OAuthState {
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::minutes(STATE_TTL_MINUTES)
    }
}

impl Entity for OAuthState {
    const KIND: &'static str = "OAuthState";

    fn id(&self) -> &str {
        &self.id
    }
}
