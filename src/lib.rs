pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{OAuthProvider, TokenVerifier};
use crate::config::AppConfig;
use crate::database::Datastore;
use crate::handlers::method_not_allowed;
use crate::services::{AuthService, BoatService, LoadService, UserService};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Datastore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub oauth: Arc<dyn OAuthProvider>,
    /// Serializes boat/load read-modify-write pairs within this process
    pub cargo_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn Datastore>,
        verifier: Arc<dyn TokenVerifier>,
        oauth: Arc<dyn OAuthProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            verifier,
            oauth,
            cargo_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn boats(&self) -> BoatService {
        BoatService::new(self.store.clone(), self.cargo_lock.clone())
    }

    pub fn loads(&self) -> LoadService {
        LoadService::new(self.store.clone(), self.cargo_lock.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.store.clone(), self.oauth.clone(), self.verifier.clone())
    }
}

/// Build the full HTTP application over `state`
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root).fallback(method_not_allowed("GET")))
        .route("/health", get(handlers::public::health).fallback(method_not_allowed("GET")))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(load_routes())
        // Protected
        .merge(boat_routes())
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn auth_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/login", get(auth::login_get).fallback(method_not_allowed("GET")))
        .route("/oauth", get(auth::oauth_get).fallback(method_not_allowed("GET")))
}

fn user_routes() -> Router<AppState> {
    use handlers::public::users;

    Router::new()
        .route("/users", get(users::list).fallback(method_not_allowed("GET")))
        .route("/users/:user_id", get(users::get).fallback(method_not_allowed("GET")))
}

fn load_routes() -> Router<AppState> {
    use handlers::public::loads;

    Router::new()
        .route(
            "/loads",
            get(loads::collection_get)
                .post(loads::collection_post)
                .fallback(method_not_allowed("GET, POST")),
        )
        .route(
            "/loads/:load_id",
            get(loads::record_get)
                .put(loads::record_put)
                .patch(loads::record_patch)
                .delete(loads::record_delete)
                .fallback(method_not_allowed("GET, PUT, PATCH, DELETE")),
        )
}

fn boat_routes() -> Router<AppState> {
    use handlers::protected::boats;

    Router::new()
        .route(
            "/boats",
            get(boats::collection_get)
                .post(boats::collection_post)
                .fallback(method_not_allowed("GET, POST")),
        )
        .route(
            "/boats/:boat_id",
            get(boats::record_get)
                .put(boats::record_put)
                .patch(boats::record_patch)
                .delete(boats::record_delete)
                .fallback(method_not_allowed("GET, PUT, PATCH, DELETE")),
        )
        .route(
            "/boats/:boat_id/loads",
            get(boats::cargo_list).fallback(method_not_allowed("GET")),
        )
        .route(
            "/boats/:boat_id/loads/:load_id",
            put(boats::cargo_assign)
                .delete(boats::cargo_remove)
                .fallback(method_not_allowed("PUT, DELETE")),
        )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}
