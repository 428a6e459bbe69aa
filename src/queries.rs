//! Product Queries
//!
//! Cached reads and notifying mutations on top of the REST client.

use serde::Serialize;

use crate::api::{self, ApiError};
use crate::cache::{self, product_detail_key, product_list_key};
use crate::context::AppContext;
use crate::models::{Category, Product, ProductFormData, ProductQueryParams, ProductUpdateRequest};
use crate::store::{notify_error, notify_success};

/// Cache a success, expire the session on 401
fn settle<T: Serialize>(ctx: AppContext, key: String, result: Result<T, ApiError>) -> Result<T, ApiError> {
    match &result {
        Ok(value) => ctx.cache_insert(key, value),
        Err(ApiError::Unauthorized) => ctx.auth.expire(),
        Err(e) => log::warn!("[QUERY] {} failed: {}", key, e),
    }
    result
}

fn report_failure(ctx: AppContext, action: &str, error: &ApiError) {
    if *error == ApiError::Unauthorized {
        ctx.auth.expire();
    }
    notify_error(ctx.store, failure_message(action, error));
}

fn failure_message(action: &str, error: &ApiError) -> String {
    format!("Failed to {} product: {}", action, error)
}

pub async fn fetch_products(ctx: AppContext, params: ProductQueryParams) -> Result<Vec<Product>, ApiError> {
    let key = product_list_key(&params);
    if let Some(products) = ctx.cached(&key) {
        log::debug!("[CACHE] Hit {}", key);
        return Ok(products);
    }
    let result = api::list_products(&params).await;
    settle(ctx, key, result)
}

pub async fn fetch_product(ctx: AppContext, id: u32) -> Result<Product, ApiError> {
    let key = product_detail_key(id);
    if let Some(product) = ctx.cached(&key) {
        log::debug!("[CACHE] Hit {}", key);
        return Ok(product);
    }
    let result = api::get_product(id).await;
    settle(ctx, key, result)
}

pub async fn fetch_categories(ctx: AppContext) -> Result<Vec<Category>, ApiError> {
    if let Some(categories) = ctx.cached(cache::CATEGORIES) {
        return Ok(categories);
    }
    let result = api::list_categories().await;
    settle(ctx, cache::CATEGORIES.to_string(), result)
}

pub async fn create_product(ctx: AppContext, form: ProductFormData) -> Result<Product, ApiError> {
    let result = api::create_product(&form.into()).await;
    match &result {
        Ok(product) => {
            log::info!("[QUERY] Created product {}", product.id);
            ctx.invalidate(cache::PRODUCT_LISTS);
            ctx.reload_products();
            notify_success(ctx.store, "Product created successfully!");
        }
        Err(e) => report_failure(ctx, "create", e),
    }
    result
}

/// Sends only the fields that differ from `existing`; an unchanged form sends nothing
pub async fn update_product(ctx: AppContext, existing: &Product, form: ProductFormData) -> Result<Product, ApiError> {
    let update = ProductUpdateRequest::diff(existing, &form);
    if update.is_empty() {
        log::debug!("[QUERY] Product {} unchanged, skipping update", existing.id);
        return Ok(existing.clone());
    }

    let result = api::update_product(existing.id, &update).await;
    match &result {
        Ok(product) => {
            log::info!("[QUERY] Updated product {}", product.id);
            ctx.invalidate(cache::PRODUCT_LISTS);
            ctx.cache_insert(product_detail_key(product.id), product);
            ctx.reload_products();
            notify_success(ctx.store, "Product updated successfully!");
        }
        Err(e) => report_failure(ctx, "update", e),
    }
    result
}

pub async fn delete_product(ctx: AppContext, id: u32) -> Result<(), ApiError> {
    let result = api::delete_product(id).await;
    match &result {
        Ok(()) => {
            log::info!("[QUERY] Deleted product {}", id);
            ctx.invalidate(cache::PRODUCT_LISTS);
            ctx.cache_remove(&product_detail_key(id));
            ctx.reload_products();
            notify_success(ctx.store, "Product deleted successfully!");
        }
        Err(e) => report_failure(ctx, "delete", e),
    }
    result
}
