//! REST Client
//!
//! Frontend bindings to the catalog backend, organized by resource.
//! Every request passes through the same two hooks: the stored bearer token is
//! attached on the way out, and a `401` clears the stored tokens on the way back.

mod auth;
mod categories;
mod products;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::config;
use crate::storage::TokenStorage;

// Re-export all public items
pub use auth::*;
pub use categories::*;
pub use products::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Your session has expired, please sign in again")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Error for a non-success status, using the server's message when it sent one
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", status));
        ApiError::Status { status, message }
    }
}

/// `{"message": "..."}` or `{"message": ["...", "..."]}`
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        serde_json::Value::Array(messages) => {
            let joined = messages
                .iter()
                .filter_map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

fn endpoint(path: &str) -> String {
    format!("{}{}", config().api_base_url, path)
}

/// Request builder with the bearer token attached when one is stored
fn request(method: Method, path: &str) -> RequestBuilder {
    log::debug!("[API] {} {}", method, path);
    let builder = reqwest::Client::new().request(method, endpoint(path));
    match TokenStorage::browser().get_token() {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

async fn execute(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        log::warn!("[API] Received 401, clearing stored tokens");
        TokenStorage::browser().clear_tokens();
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &body);
        log::warn!("[API] Request failed: {}", error);
        return Err(error);
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    execute(builder)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
