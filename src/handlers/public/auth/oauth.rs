// handlers/public/auth/oauth.rs - GET /oauth redirect target

use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{AcceptsJson, ApiQuery, ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    pub state: Option<String>,
    pub code: Option<String>,
    /// Set by the provider when the user declines consent
    pub error: Option<String>,
}

/// GET /oauth?state=..&code=.. - finish the authorization-code flow
///
/// The state must have been issued by `/login` and not yet used. On success
/// the caller receives the identity token to send as `Authorization: Bearer`
/// and the user id that will own the boats it creates.
pub async fn get(
    State(state): State<AppState>,
    _: AcceptsJson,
    ApiQuery(callback): ApiQuery<OAuthCallback>,
) -> ApiResult<Value> {
    if let Some(error) = callback.error {
        return Err(ApiError::unauthorized(format!("Authorization was not granted: {}", error)));
    }

    let (Some(oauth_state), Some(code)) = (callback.state, callback.code) else {
        return Err(ApiError::bad_request("Both 'state' and 'code' query parameters are required"));
    };

    let outcome = state.auth().complete_login(&oauth_state, &code).await?;

    Ok(ApiResponse::success(json!({
        "id_token": outcome.id_token,
        "user_id": outcome.user.id,
    })))
}
