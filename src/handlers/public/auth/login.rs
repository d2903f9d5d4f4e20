// handlers/public/auth/login.rs - GET /login handler

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::AppState;

/// GET /login - issue a one-shot OAuth state and redirect to the provider consent page
pub async fn get(State(state): State<AppState>) -> Result<Response, ApiError> {
    let url = state.auth().begin_login().await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
