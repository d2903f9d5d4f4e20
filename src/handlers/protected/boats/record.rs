// handlers/protected/boats/record.rs - GET/PUT/PATCH/DELETE /boats/:id

use axum::extract::State;
use serde_json::Value;

use crate::api::{boat_to_api_value, payload, Presence};
use crate::middleware::{AcceptsJson, ApiPath, ApiResponse, ApiResult, AuthUser, BaseUrl, JsonBody};
use crate::AppState;

pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(boat_id): ApiPath<String>,
) -> ApiResult<Value> {
    let boat = state.boats().get_owned(&user.user_id, &boat_id).await?;
    Ok(ApiResponse::success(boat_to_api_value(&boat, &base)))
}

/// PUT /boats/:id - replace name, type and length
pub async fn put(
    State(state): State<AppState>,
    user: AuthUser,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(boat_id): ApiPath<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let changes = payload::boat_changes(&body, Presence::All)?;
    let boat = state.boats().update(&user.user_id, &boat_id, changes).await?;
    Ok(ApiResponse::success(boat_to_api_value(&boat, &base)))
}

pub async fn patch(
    State(state): State<AppState>,
    user: AuthUser,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(boat_id): ApiPath<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let changes = payload::boat_changes(&body, Presence::AtLeastOne)?;
    let boat = state.boats().update(&user.user_id, &boat_id, changes).await?;
    Ok(ApiResponse::success(boat_to_api_value(&boat, &base)))
}

/// DELETE /boats/:id - unloads every load first
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(boat_id): ApiPath<String>,
) -> ApiResult<()> {
    state.boats().delete(&user.user_id, &boat_id).await?;
    Ok(ApiResponse::<()>::no_content())
}
