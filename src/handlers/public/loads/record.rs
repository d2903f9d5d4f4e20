// handlers/public/loads/record.rs - GET/PUT/PATCH/DELETE /loads/:id

use axum::extract::State;
use serde_json::Value;

use crate::api::{load_to_api_value, payload, Presence};
use crate::middleware::{AcceptsJson, ApiPath, ApiResponse, ApiResult, BaseUrl, JsonBody};
use crate::AppState;

pub async fn get(
    State(state): State<AppState>,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(load_id): ApiPath<String>,
) -> ApiResult<Value> {
    let load = state.loads().get(&load_id).await?;
    Ok(ApiResponse::success(load_to_api_value(&load, &base)))
}

/// PUT /loads/:id - replace every attribute; the carrier is kept
pub async fn put(
    State(state): State<AppState>,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(load_id): ApiPath<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let changes = payload::load_changes(&body, Presence::All)?;
    let load = state.loads().update(&load_id, changes).await?;
    Ok(ApiResponse::success(load_to_api_value(&load, &base)))
}

pub async fn patch(
    State(state): State<AppState>,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(load_id): ApiPath<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let changes = payload::load_changes(&body, Presence::AtLeastOne)?;
    let load = state.loads().update(&load_id, changes).await?;
    Ok(ApiResponse::success(load_to_api_value(&load, &base)))
}

/// DELETE /loads/:id - also takes the load off its carrier
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(load_id): ApiPath<String>,
) -> ApiResult<()> {
    state.loads().delete(&load_id).await?;
    Ok(ApiResponse::<()>::no_content())
}
