use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::{ServiceError, UserService};
use crate::auth::{OAuthProvider, TokenVerifier};
use crate::database::models::{OAuthState, User};
use crate::database::{Datastore, DocumentQuery, Repository};

/// Result of a completed OAuth login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub id_token: String,
    pub user: User,
}

/// Drives the authorization-code login: state issuance, code exchange, user registration
#[derive(Clone)]
pub struct AuthService {
    states: Repository<OAuthState>,
    users: UserService,
    provider: Arc<dyn OAuthProvider>,
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Datastore>,
        provider: Arc<dyn OAuthProvider>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            states: Repository::new(store.clone()),
            users: UserService::new(store),
            provider,
            verifier,
        }
    }

    /// Persist a fresh state and return the provider consent URL carrying it.
    /// States abandoned past their TTL are swept first.
    pub async fn begin_login(&self) -> Result<String, ServiceError> {
        self.purge_expired_states(Utc::now()).await?;

        let state = OAuthState::generate();
        self.states.save(&state).await?;
        Ok(self.provider.authorize_url(&state.id))
    }

    /// Delete every state whose TTL has passed at `now`; returns how many went
    pub async fn purge_expired_states(&self, now: DateTime<Utc>) -> Result<usize, ServiceError> {
        let states = self.states.select_any(DocumentQuery::all()).await?;

        let mut purged = 0;
        for state in states.iter().filter(|s| s.is_expired(now)) {
            if self.states.delete(&state.id).await? {
                purged += 1;
            }
        }

        if purged > 0 {
            info!(purged, "purged expired OAuth states");
        }
        Ok(purged)
    }

    pub async fn complete_login(&self, state: &str, code: &str) -> Result<LoginOutcome, ServiceError> {
        let stored = self
            .states
            .select_one(state)
            .await?
            .ok_or(ServiceError::InvalidState)?;

        // States are single use, whatever the outcome of the exchange
        self.states.delete(&stored.id).await?;
        if stored.is_expired(Utc::now()) {
            warn!("expired OAuth state presented");
            return Err(ServiceError::InvalidState);
        }

        let id_token = self.provider.exchange_code(code).await?;
        let claims = self.verifier.verify(&id_token).await?;
        let (user, created) = self.users.ensure_user(&claims.sub).await?;

        info!(user_id = %user.id, created, "completed OAuth login");
        Ok(LoginOutcome { id_token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthError, SecretTokenVerifier};
    use crate::database::models::oauth_state::STATE_TTL_MINUTES;
    use crate::database::MemoryDatastore;
    use async_trait::async_trait;
    use chrono::Duration;

    struct RefusingProvider;

    #[async_trait]
    impl OAuthProvider for RefusingProvider {
        fn authorize_url(&self, state: &str) -> String {
            format!("https://idp.test/auth?state={}", state)
        }

        async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
            Err(AuthError::Exchange(format!("unknown code '{}'", code)))
        }
    }

    fn service(store: Arc<dyn Datastore>) -> AuthService {
        let verifier = SecretTokenVerifier::new("auth-service-secret").unwrap();
        AuthService::new(store, Arc::new(RefusingProvider), Arc::new(verifier))
    }

    fn stale_state(id: &str) -> OAuthState {
        OAuthState {
            id: id.to_string(),
            created_at: Utc::now() - Duration::minutes(STATE_TTL_MINUTES + 1),
        }
    }

    #[tokio::test]
    async fn begin_login_sweeps_abandoned_states() {
        let memory = Arc::new(MemoryDatastore::new());
        let auth = service(memory.clone());
        let states = Repository::<OAuthState>::new(memory.clone());
        for id in ["stale-1", "stale-2", "stale-3"] {
            states.save(&stale_state(id)).await.unwrap();
        }

        let url = auth.begin_login().await.unwrap();
        assert!(url.starts_with("https://idp.test/auth?state="));

        assert_eq!(memory.len().await, 1);
        assert!(states.select_one("stale-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn purge_keeps_live_states() {
        let memory = Arc::new(MemoryDatastore::new());
        let auth = service(memory.clone());
        auth.begin_login().await.unwrap();
        auth.begin_login().await.unwrap();

        assert_eq!(auth.purge_expired_states(Utc::now()).await.unwrap(), 0);
        assert_eq!(memory.len().await, 2);

        let later = Utc::now() + Duration::minutes(STATE_TTL_MINUTES + 1);
        assert_eq!(auth.purge_expired_states(later).await.unwrap(), 2);
        assert_eq!(memory.len().await, 0);
    }

    #[tokio::test]
    async fn expired_state_is_refused_and_consumed() {
        let memory = Arc::new(MemoryDatastore::new());
        let auth = service(memory.clone());
        Repository::<OAuthState>::new(memory.clone())
            .save(&stale_state("late"))
            .await
            .unwrap();

        let err = auth.complete_login("late", "code").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState));
        assert_eq!(memory.len().await, 0);
    }
}
