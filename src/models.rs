//! Frontend Models
//!
//! Data structures matching backend entities, plus the list-view state that
//! lives in the URL.

use serde::{Deserialize, Serialize};

use crate::config::config;

/// Product data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub title: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Category,
    #[serde(rename = "creationAt", default, skip_serializing_if = "Option::is_none")]
    pub creation_at: Option<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Category data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCreateRequest {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    #[serde(rename = "categoryId")]
    pub category_id: u32,
}

/// Partial update; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
}

impl ProductUpdateRequest {
    /// Only the fields where `form` differs from `existing`
    pub fn diff(existing: &Product, form: &ProductFormData) -> Self {
        Self {
            title: (form.title != existing.title).then(|| form.title.clone()),
            price: (form.price != existing.price).then_some(form.price),
            description: (form.description != existing.description)
                .then(|| form.description.clone()),
            images: (form.images != existing.images).then(|| form.images.clone()),
            category_id: (form.category_id != existing.category.id).then_some(form.category_id),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Validated product form contents
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFormData {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub category_id: u32,
}

impl From<ProductFormData> for ProductCreateRequest {
    fn from(form: ProductFormData) -> Self {
        Self {
            title: form.title,
            price: form.price,
            description: form.description,
            images: form.images,
            category_id: form.category_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// ========================
// List View State
// ========================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Title,
    Price,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Price => "price",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(SortField::Title),
            "price" => Some(SortField::Price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    /// Header arrow
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub title: Option<String>,
    pub category_id: Option<u32>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for ProductPagination {
    fn default() -> Self {
        Self {
            limit: config().default_page_limit,
            offset: 0,
        }
    }
}

/// Everything the product list shows, as encoded in the URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTableState {
    pub filters: ProductFilters,
    pub sort: ProductSort,
    pub pagination: ProductPagination,
}

/// Query string for `GET /products`; absent values are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<f64>,
    #[serde(rename = "categoryId", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(rename = "categorySlug", skip_serializing_if = "Option::is_none")]
    pub category_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}
