//! Product Endpoints
//!
//! CRUD bindings for `/products`.

use reqwest::Method;

use super::{execute, request, send_json, ApiError};
use crate::models::{Product, ProductCreateRequest, ProductQueryParams, ProductUpdateRequest};

pub async fn list_products(params: &ProductQueryParams) -> Result<Vec<Product>, ApiError> {
    send_json(request(Method::GET, "/products").query(params)).await
}

pub async fn get_product(id: u32) -> Result<Product, ApiError> {
    send_json(request(Method::GET, &format!("/products/{}", id))).await
}

pub async fn create_product(data: &ProductCreateRequest) -> Result<Product, ApiError> {
    send_json(request(Method::POST, "/products").json(data)).await
}

pub async fn update_product(id: u32, data: &ProductUpdateRequest) -> Result<Product, ApiError> {
    send_json(request(Method::PUT, &format!("/products/{}", id)).json(data)).await
}

/// The backend answers with a bare `true`; only the status matters
pub async fn delete_product(id: u32) -> Result<(), ApiError> {
    execute(request(Method::DELETE, &format!("/products/{}", id))).await?;
    Ok(())
}
