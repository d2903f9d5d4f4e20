// handlers/protected/boats/collection.rs - GET/POST /boats

use axum::extract::State;
use serde_json::Value;

use crate::api::format::boat_link;
use crate::api::{boat_to_api_value, page_to_api_value, payload, PageQuery};
use crate::middleware::{AcceptsJson, ApiQuery, ApiResponse, ApiResult, AuthUser, BaseUrl, JsonBody};
use crate::AppState;

/// GET /boats - the caller's boats, one page at a time
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    _: AcceptsJson,
    base: BaseUrl,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Value> {
    let offset = query.offset()?;
    let page = state
        .boats()
        .list_for_owner(&user.user_id, offset, state.config.api.page_size)
        .await?;

    Ok(ApiResponse::success(page_to_api_value(&page, "boats", "/boats", &base, |b| {
        boat_to_api_value(b, &base)
    })))
}

/// POST /boats - create a boat owned by the caller
pub async fn post(
    State(state): State<AppState>,
    user: AuthUser,
    _: AcceptsJson,
    base: BaseUrl,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let new = payload::new_boat(&body)?;
    let boat = state
        .boats()
        .create(&user.user_id, new.name, new.boat_type, new.length)
        .await?;

    Ok(ApiResponse::created(
        boat_to_api_value(&boat, &base),
        boat_link(&base, &boat.id),
    ))
}
