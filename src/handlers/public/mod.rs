// handlers/public/mod.rs - Public handlers (no authentication)

pub mod auth;
pub mod loads;
pub mod users;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::middleware::{AcceptsJson, BaseUrl};
use crate::AppState;

/// GET / - index pointing at the resource collections
pub async fn root(_: AcceptsJson, base: BaseUrl) -> Json<Value> {
    Json(json!({
        "name": "Boats API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "boats": base.link("/boats"),
            "loads": base.link("/loads"),
            "users": base.link("/users"),
            "login": base.link("/login"),
        }
    }))
}

/// GET /health - datastore connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "datastore": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Datastore health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "datastore": "unavailable"
                })),
            )
        }
    }
}
