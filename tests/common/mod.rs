#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use boats_api_rust::auth::{AuthError, OAuthProvider, SecretTokenVerifier};
use boats_api_rust::config::AppConfig;
use boats_api_rust::database::MemoryDatastore;
use boats_api_rust::{app, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const HOST: &str = "boats.test";
pub const BASE: &str = "http://boats.test";

/// Stand-in identity provider: code `code-<sub>` exchanges for a token identifying `<sub>`
pub struct FakeOAuthProvider {
    tokens: SecretTokenVerifier,
}

#[async_trait]
impl OAuthProvider for FakeOAuthProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://accounts.example.test/o/oauth2/auth?response_type=code&state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        match code.strip_prefix("code-") {
            Some(sub) if !sub.is_empty() => self.tokens.issue_token(sub, 1),
            _ => Err(AuthError::Exchange("invalid_grant".to_string())),
        }
    }
}

pub struct TestApp {
    router: Router,
    tokens: SecretTokenVerifier,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;
        config.security.enable_cors = false;
        config.oauth.dev_secret = Some(SECRET.to_string());

        let tokens = SecretTokenVerifier::new(SECRET).expect("secret");
        let state = AppState::new(
            config,
            Arc::new(MemoryDatastore::new()),
            Arc::new(tokens.clone()),
            Arc::new(FakeOAuthProvider { tokens: tokens.clone() }),
        );

        Self { router: app(state), tokens }
    }

    pub fn token(&self, sub: &str) -> String {
        self.tokens.issue_token(sub, 1).expect("token")
    }

    pub fn request(method: Method, path: &str, token: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::HOST, HOST)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    pub async fn send(&self, request: Request<Body>) -> Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(TestResponse { status, headers, body })
    }

    pub async fn call(&self, method: Method, path: &str, token: Option<&str>) -> Result<TestResponse> {
        self.send(Self::request(method, path, token).body(Body::empty())?).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<TestResponse> {
        self.call(Method::GET, path, token).await
    }

    pub async fn json(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> Result<TestResponse> {
        let request = Self::request(method, path, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?;
        self.send(request).await
    }

    /// Create a boat for the owner of `token`, returning its id
    pub async fn create_boat(&self, token: &str, name: &str) -> Result<String> {
        let res = self
            .json(
                Method::POST,
                "/boats",
                Some(token),
                serde_json::json!({ "name": name, "type": "Catamaran", "length": 28 }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "create boat failed: {} {}", res.status, res.body);
        Ok(res.body["id"].as_str().unwrap_or_default().to_string())
    }

    pub async fn create_load(&self, content: &str) -> Result<String> {
        let res = self
            .json(
                Method::POST,
                "/loads",
                None,
                serde_json::json!({ "volume": 5, "content": content, "creation_date": "10/19/2026" }),
            )
            .await?;
        anyhow::ensure!(res.status == StatusCode::CREATED, "create load failed: {} {}", res.status, res.body);
        Ok(res.body["id"].as_str().unwrap_or_default().to_string())
    }
}
