//! Auth Endpoints

use reqwest::Method;

use super::{request, send_json, ApiError};
use crate::models::{LoginRequest, LoginResponse};

pub async fn login(credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
    let builder = request(Method::POST, "/auth/login").json(credentials);
    match send_json(builder).await {
        // Bad credentials, not an expired session
        Err(ApiError::Unauthorized) => Err(ApiError::Status {
            status: 401,
            message: "Invalid email or password".to_string(),
        }),
        other => other,
    }
}
