// handlers/public/users.rs - GET /users, GET /users/:id

use axum::extract::State;
use serde_json::{json, Value};

use crate::api::user_to_api_value;
use crate::middleware::{AcceptsJson, ApiPath, ApiResponse, ApiResult, BaseUrl};
use crate::AppState;

/// GET /users - every user that has completed a login
pub async fn list(State(state): State<AppState>, _: AcceptsJson, base: BaseUrl) -> ApiResult<Value> {
    let users = state.users().list().await?;
    let items: Vec<Value> = users.iter().map(|u| user_to_api_value(u, &base)).collect();

    Ok(ApiResponse::success(json!({
        "users": items,
        "total_items": users.len(),
    })))
}

pub async fn get(
    State(state): State<AppState>,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(user_id): ApiPath<String>,
) -> ApiResult<Value> {
    let user = state.users().get(&user_id).await?;
    Ok(ApiResponse::success(user_to_api_value(&user, &base)))
}
