//! Query Cache
//!
//! Short-lived cache of backend responses, keyed by request. Fresh entries are
//! served without a round trip; mutations invalidate by key prefix.

use std::collections::HashMap;

use leptos_url_state::QueryParams;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::config;
use crate::models::ProductQueryParams;
use crate::query_state::format_number;

pub const PRODUCT_LISTS: &str = "products/list";
pub const CATEGORIES: &str = "categories";

/// `products/list?<query>`, with the request's parameters in send order
pub fn product_list_key(params: &ProductQueryParams) -> String {
    let mut query = QueryParams::new();
    let fields = [
        ("title", params.title.clone()),
        ("price", params.price.map(format_number)),
        ("price_min", params.price_min.map(format_number)),
        ("price_max", params.price_max.map(format_number)),
        ("categoryId", params.category_id.map(|id| id.to_string())),
        ("categorySlug", params.category_slug.clone()),
        ("limit", params.limit.map(|limit| limit.to_string())),
        ("offset", params.offset.map(|offset| offset.to_string())),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            query.set(key, value);
        }
    }
    format!("{}?{}", PRODUCT_LISTS, query.to_query_string())
}

pub fn product_detail_key(id: u32) -> String {
    format!("products/detail/{}", id)
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    fetched_at_ms: i64,
}

#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    stale_time_ms: i64,
    gc_time_ms: i64,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(config().stale_time_ms, config().gc_time_ms)
    }
}

impl QueryCache {
    pub fn new(stale_time_ms: i64, gc_time_ms: i64) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time_ms,
            gc_time_ms,
        }
    }

    /// Cached value if it is still fresh
    pub fn get<T: DeserializeOwned>(&self, key: &str, now_ms: i64) -> Option<T> {
        let entry = self.entries.get(key)?;
        if now_ms - entry.fetched_at_ms >= self.stale_time_ms {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: &T, now_ms: i64) {
        let gc_time_ms = self.gc_time_ms;
        self.entries
            .retain(|_, entry| now_ms - entry.fetched_at_ms < gc_time_ms);

        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.insert(key.into(), CacheEntry { value, fetched_at_ms: now_ms });
            }
            Err(e) => log::warn!("[CACHE] Could not cache response: {}", e),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry whose key starts with `prefix`
    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entries_are_served() {
        let mut cache = QueryCache::new(10_000, 10_000);
        cache.insert("categories", &vec!["a".to_string()], 1_000);
        assert_eq!(cache.get::<Vec<String>>("categories", 5_000), Some(vec!["a".to_string()]));
        assert_eq!(cache.get::<Vec<String>>("categories", 11_000), None);
        assert_eq!(cache.get::<Vec<String>>("missing", 1_000), None);
    }

    #[test]
    fn test_insert_evicts_expired_entries() {
        let mut cache = QueryCache::new(1_000, 5_000);
        cache.insert("old", &1, 0);
        cache.insert("new", &2, 6_000);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<i32>("new", 6_500), Some(2));
    }

    #[test]
    fn test_invalidate_prefix_keeps_other_keys() {
        let mut cache = QueryCache::new(10_000, 10_000);
        let first = product_list_key(&ProductQueryParams { limit: Some(10), ..Default::default() });
        let second = product_list_key(&ProductQueryParams { limit: Some(20), ..Default::default() });
        assert_ne!(first, second);

        cache.insert(first, &1, 0);
        cache.insert(second, &2, 0);
        cache.insert(product_detail_key(3), &3, 0);
        cache.insert(CATEGORIES, &4, 0);

        cache.invalidate_prefix(PRODUCT_LISTS);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get::<i32>(&product_detail_key(3), 0), Some(3));
    }

    #[test]
    fn test_list_key_is_form_encoded_query() {
        let params = ProductQueryParams {
            title: Some("red shoes".to_string()),
            price_min: Some(10.0),
            price_max: Some(99.5),
            category_id: Some(2),
            limit: Some(10),
            offset: Some(0),
            ..Default::default()
        };
        assert_eq!(
            product_list_key(&params),
            "products/list?title=red+shoes&price_min=10&price_max=99.5&categoryId=2&limit=10&offset=0"
        );
        assert_eq!(product_list_key(&ProductQueryParams::default()), "products/list?");
    }

    #[test]
    fn test_type_mismatch_is_a_miss() {
        let mut cache = QueryCache::new(10_000, 10_000);
        cache.insert("k", &"text", 0);
        assert_eq!(cache.get::<u32>("k", 0), None);
    }
}
