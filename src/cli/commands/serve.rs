use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::auth::{
    ChainedVerifier, GoogleOAuthProvider, GoogleTokenVerifier, OAuthProvider, SecretTokenVerifier,
    TokenVerifier,
};
use crate::config::{AppConfig, StoreBackend};
use crate::database::{Datastore, DatabaseManager, MemoryDatastore, PgDatastore};
use crate::AppState;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    let state = build_state(config).await?;
    let port = state.config.api.port;
    let app = crate::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Boats API listening on http://{}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

/// Wire the datastore, token verifier and OAuth provider chosen by `config`
pub async fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = open_store(&config).await?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("boats-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    let verifier = token_verifier(&config, &http)?;

    let oauth: Arc<dyn OAuthProvider> = Arc::new(
        GoogleOAuthProvider::new(http, &config.oauth).context("invalid OAuth endpoint configuration")?,
    );

    Ok(AppState::new(config, store, verifier, oauth))
}

/// Google identity tokens always verify, so `/oauth` works in every mode.
/// `OAUTH_DEV_SECRET` adds locally minted HS256 tokens in front of them.
pub fn token_verifier(config: &AppConfig, http: &reqwest::Client) -> anyhow::Result<Arc<dyn TokenVerifier>> {
    if config.oauth.client_id.is_empty() {
        warn!("GOOGLE_CLIENT_ID is not set; Google identity tokens will be rejected");
    }
    let google: Arc<dyn TokenVerifier> = Arc::new(GoogleTokenVerifier::new(http.clone(), &config.oauth));

    let Some(secret) = &config.oauth.dev_secret else {
        return Ok(google);
    };
    if crate::is_production!() {
        anyhow::bail!("OAUTH_DEV_SECRET must not be set in production");
    }
    warn!("also accepting development tokens signed with OAUTH_DEV_SECRET");

    let dev: Arc<dyn TokenVerifier> = Arc::new(SecretTokenVerifier::new(secret.clone())?);
    Ok(Arc::new(ChainedVerifier::new(vec![dev, google])))
}

pub async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn Datastore>> {
    match config.database.backend {
        StoreBackend::Memory => {
            warn!("using the in-memory datastore; nothing survives a restart");
            Ok(Arc::new(MemoryDatastore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database).await?;
            let store = PgDatastore::new(pool);
            store.migrate().await.context("failed to prepare the document table")?;
            Ok(Arc::new(store))
        }
    }
}
