// handlers/mod.rs - HTTP route handlers
//
// public/    - no authentication: index, health, OAuth login, loads, users
// protected/ - bearer identity token required: boats and their cargo

pub mod protected;
pub mod public;

use axum::http::Uri;

use crate::error::ApiError;

/// Router-level fallback for paths no route matches
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No resource at '{}'", uri.path()))
}

/// Method-router fallback answering 405 with the supported methods in `Allow`
pub fn method_not_allowed(
    allow: &'static str,
) -> impl FnOnce() -> std::future::Ready<ApiError> + Clone + Send + Sync + 'static {
    move || std::future::ready(ApiError::method_not_allowed(allow))
}
