// handlers/public/loads/collection.rs - GET/POST /loads

use axum::extract::State;
use serde_json::Value;

use crate::api::format::load_link;
use crate::api::{load_to_api_value, page_to_api_value, payload, PageQuery};
use crate::middleware::{AcceptsJson, ApiQuery, ApiResponse, ApiResult, BaseUrl, JsonBody};
use crate::AppState;

/// GET /loads - every load, one page at a time
pub async fn get(
    State(state): State<AppState>,
    _: AcceptsJson,
    base: BaseUrl,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Value> {
    let offset = query.offset()?;
    let page = state.loads().list(offset, state.config.api.page_size).await?;

    Ok(ApiResponse::success(page_to_api_value(&page, "loads", "/loads", &base, |l| {
        load_to_api_value(l, &base)
    })))
}

/// POST /loads - create an unassigned load
pub async fn post(
    State(state): State<AppState>,
    _: AcceptsJson,
    base: BaseUrl,
    JsonBody(body): JsonBody,
) -> ApiResult<Value> {
    let new = payload::new_load(&body)?;
    let load = state.loads().create(new.volume, new.content, new.creation_date).await?;

    Ok(ApiResponse::created(
        load_to_api_value(&load, &base),
        load_link(&base, &load.id),
    ))
}
