// handlers/protected/boats/cargo.rs - loads carried by a boat
//
// GET    /boats/:boat_id/loads
// PUT    /boats/:boat_id/loads/:load_id
// DELETE /boats/:boat_id/loads/:load_id

use axum::extract::State;
use serde_json::{json, Value};

use crate::api::load_to_api_value;
use crate::middleware::{AcceptsJson, ApiPath, ApiResponse, ApiResult, AuthUser, BaseUrl};
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    _: AcceptsJson,
    base: BaseUrl,
    ApiPath(boat_id): ApiPath<String>,
) -> ApiResult<Value> {
    let loads = state.boats().loads_of(&user.user_id, &boat_id).await?;
    let items: Vec<Value> = loads.iter().map(|l| load_to_api_value(l, &base)).collect();

    Ok(ApiResponse::success(json!({
        "loads": items,
        "total_items": loads.len(),
    })))
}

/// 403 when the load already has a carrier, this boat included
pub async fn assign(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath((boat_id, load_id)): ApiPath<(String, String)>,
) -> ApiResult<()> {
    state.boats().assign_load(&user.user_id, &boat_id, &load_id).await?;
    Ok(ApiResponse::<()>::no_content())
}

pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath((boat_id, load_id)): ApiPath<(String, String)>,
) -> ApiResult<()> {
    state.boats().remove_load(&user.user_id, &boat_id, &load_id).await?;
    Ok(ApiResponse::<()>::no_content())
}
