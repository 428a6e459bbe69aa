//! Category Endpoints

use reqwest::Method;

use super::{request, send_json, ApiError};
use crate::models::Category;

pub async fn list_categories() -> Result<Vec<Category>, ApiError> {
    send_json(request(Method::GET, "/categories")).await
}
