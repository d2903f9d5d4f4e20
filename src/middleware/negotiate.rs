use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Guard for routes that only produce `application/json`; rejects with 406 otherwise
#[derive(Debug, Clone, Copy)]
pub struct AcceptsJson;

#[async_trait]
impl<S> FromRequestParts<S> for AcceptsJson
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if accepts_json(&parts.headers) {
            Ok(AcceptsJson)
        } else {
            Err(ApiError::not_acceptable(
                "This resource is only available as application/json",
            ))
        }
    }
}

/// A request body that must be declared and parsed as a JSON object
#[derive(Debug, Clone)]
pub struct JsonBody(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ApiError::unsupported_media_type(
                "Request body must be sent as application/json",
            ));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(rejection.body_text())
            } else {
                ApiError::bad_request(rejection.body_text())
            }
        })?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(JsonBody(map)),
            Ok(_) => Err(ApiError::invalid_json("Request body must be a JSON object")),
            Err(e) => Err(ApiError::invalid_json(format!("Malformed JSON body: {}", e))),
        }
    }
}

/// True when no Accept header is sent or one of its media ranges admits JSON
pub fn accepts_json(headers: &HeaderMap) -> bool {
    let ranges: Vec<String> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|range| range.split(';').next())
        .map(|range| range.trim().to_ascii_lowercase())
        .filter(|range| !range.is_empty())
        .collect();

    ranges.is_empty()
        || ranges.iter().any(|range| {
            matches!(range.as_str(), "application/json" | "application/*" | "*/*")
        })
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}
