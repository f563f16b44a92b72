//! API client for the Petspot REST API.
//!
//! This module provides the `ApiClient` struct used to log owners in and
//! register new owner accounts.

use std::time::Duration;

use reqwest::{header, Client};
use serde::Serialize;
use tracing::debug;

use crate::models::{LoginPayload, LoginResponse, RegisterPayload};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Login endpoint, relative to the API base URL
const LOGIN_PATH: &str = "/auth/login";

/// Owner registration endpoint, relative to the API base URL
const OWNERS_PATH: &str = "/api/owners";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for Petspot.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl ApiClient {
    /// Create a new API client. Without a base URL every request fails with
    /// [`ApiError::NotConfigured`].
    pub fn new(base_url: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        Ok(format!("{}{}", base, path))
    }

    /// Log in and return the issued session token
    pub async fn login(&self, payload: &LoginPayload) -> Result<String, ApiError> {
        let response = self.post_json(LOGIN_PATH, payload).await?;
        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)))?;

        if body.token.is_empty() {
            return Err(ApiError::InvalidResponse("Login response has an empty token".to_string()));
        }
        Ok(body.token)
    }

    /// Register a new owner. The response body is not inspected.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<(), ApiError> {
        self.post_json(OWNERS_PATH, payload).await?;
        Ok(())
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path)?;
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        Self::check_response(response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn register_payload() -> RegisterPayload {
        RegisterPayload {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "hunter2".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/login")
            .match_header("content-type", "application/json")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "email": "ana@example.com",
                "password": "hunter2"
            })))
            .with_status(200)
            .with_body(r#"{"token": "abc.def.ghi"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(Some(server.url())).unwrap();
        let token = api
            .login(&LoginPayload::new("ana@example.com", "hunter2"))
            .await
            .unwrap();

        m.assert_async().await;
        assert_eq!(token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn test_login_trailing_slash_base_url() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"token": "abc.def.ghi"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(Some(format!("{}/", server.url()))).unwrap();
        assert!(api.login(&LoginPayload::new("a@b.c", "pw")).await.is_ok());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_unauthorized() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"message": "bad credentials"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(Some(server.url())).unwrap();
        let result = api.login(&LoginPayload::new("ana@example.com", "wrong")).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_missing_token_field() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"jwt": "abc.def.ghi"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(Some(server.url())).unwrap();
        let result = api.login(&LoginPayload::new("ana@example.com", "hunter2")).await;
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_register_success_without_body() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/owners")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "hunter2",
                "phone": "555-0100"
            })))
            .with_status(201)
            .create_async()
            .await;

        let api = ApiClient::new(Some(server.url())).unwrap();
        assert!(api.register(&register_payload()).await.is_ok());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/owners")
            .with_status(409)
            .with_body("email already registered")
            .create_async()
            .await;

        let api = ApiClient::new(Some(server.url())).unwrap();
        let result = api.register(&register_payload()).await;
        assert!(matches!(result, Err(ApiError::Conflict(msg)) if msg == "email already registered"));
    }

    #[tokio::test]
    async fn test_not_configured() {
        let api = ApiClient::new(None).unwrap();
        let result = api.login(&LoginPayload::new("a@b.c", "pw")).await;
        assert!(matches!(result, Err(ApiError::NotConfigured)));

        let api = ApiClient::new(Some(String::new())).unwrap();
        assert!(api.base_url().is_none());
    }
}
