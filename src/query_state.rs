//! Query-Parameter State
//!
//! The URL query string is the single source of truth for the product list.
//! This module maps it to `ProductTableState` and back. Every update is a pure
//! function from the current parameters to the next ones and only touches the
//! keys it owns, so unrelated parameters survive. Updates that would not change
//! the URL do not navigate.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use leptos_url_state::QueryParams;

use crate::models::{
    ProductFilters, ProductPagination, ProductQueryParams, ProductSort, ProductTableState,
    SortDirection, SortField,
};
use crate::validation::{self, FieldErrors};

pub const TITLE: &str = "title";
pub const CATEGORY_ID: &str = "categoryId";
pub const PRICE_MIN: &str = "price_min";
pub const PRICE_MAX: &str = "price_max";
pub const SORT_FIELD: &str = "sortField";
pub const SORT_DIRECTION: &str = "sortDirection";
pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";

// ========================
// Parsing
// ========================

fn string_param(params: &QueryParams, key: &str) -> Option<String> {
    params
        .get(key)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn number_param(params: &QueryParams, key: &str) -> Option<f64> {
    let value = params.get(key)?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn whole_number(n: f64) -> Option<u32> {
    (n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64).then_some(n as u32)
}

impl ProductTableState {
    pub fn from_params(params: &QueryParams) -> Self {
        let defaults = ProductPagination::default();
        Self {
            filters: ProductFilters {
                title: string_param(params, TITLE),
                category_id: number_param(params, CATEGORY_ID).and_then(whole_number),
                price_min: number_param(params, PRICE_MIN),
                price_max: number_param(params, PRICE_MAX),
            },
            sort: ProductSort {
                field: params
                    .get(SORT_FIELD)
                    .and_then(SortField::parse)
                    .unwrap_or_default(),
                direction: params
                    .get(SORT_DIRECTION)
                    .and_then(SortDirection::parse)
                    .unwrap_or_default(),
            },
            pagination: ProductPagination {
                limit: number_param(params, LIMIT)
                    .and_then(whole_number)
                    .filter(|limit| *limit > 0)
                    .unwrap_or(defaults.limit),
                offset: number_param(params, OFFSET)
                    .and_then(whole_number)
                    .unwrap_or(defaults.offset),
            },
        }
    }

    /// Backend query for the current filters and page
    pub fn api_params(&self) -> ProductQueryParams {
        ProductQueryParams {
            title: self.filters.title.clone(),
            category_id: self.filters.category_id,
            price_min: self.filters.price_min,
            price_max: self.filters.price_max,
            limit: Some(self.pagination.limit),
            offset: Some(self.pagination.offset),
            ..Default::default()
        }
    }
}

/// Stringify like a browser does (`10`, `10.5`, never `-0`)
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

// ========================
// Updates
// ========================

/// Filter changes; `None` leaves a key alone, `Some(None)` clears it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub title: Option<Option<String>>,
    pub category_id: Option<Option<u32>>,
    pub price_min: Option<Option<f64>>,
    pub price_max: Option<Option<f64>>,
}

impl FilterPatch {
    pub fn title(title: Option<String>) -> Self {
        Self { title: Some(title), ..Default::default() }
    }

    pub fn category(category_id: Option<u32>) -> Self {
        Self { category_id: Some(category_id), ..Default::default() }
    }

    pub fn prices(price_min: Option<f64>, price_max: Option<f64>) -> Self {
        Self {
            price_min: Some(price_min),
            price_max: Some(price_max),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationPatch {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

fn set_or_remove(params: &mut QueryParams, key: &str, value: Option<String>) {
    match value {
        Some(value) => params.set(key, value),
        None => params.remove(key),
    }
}

/// Apply filter changes and go back to the first page
pub fn apply_filters(params: &QueryParams, patch: &FilterPatch) -> QueryParams {
    let mut next = params.clone();

    if let Some(title) = &patch.title {
        let title = title.clone().filter(|t| !t.is_empty());
        set_or_remove(&mut next, TITLE, title);
    }
    if let Some(category_id) = patch.category_id {
        let category_id = category_id.filter(|id| *id > 0).map(|id| id.to_string());
        set_or_remove(&mut next, CATEGORY_ID, category_id);
    }
    if let Some(price_min) = patch.price_min {
        let price_min = price_min.filter(|p| p.is_finite()).map(format_number);
        set_or_remove(&mut next, PRICE_MIN, price_min);
    }
    if let Some(price_max) = patch.price_max {
        let price_max = price_max.filter(|p| p.is_finite()).map(format_number);
        set_or_remove(&mut next, PRICE_MAX, price_max);
    }

    next.set(OFFSET, "0");
    next
}

pub fn apply_sort(params: &QueryParams, sort: ProductSort) -> QueryParams {
    let mut next = params.clone();
    next.set(SORT_FIELD, sort.field.as_str());
    next.set(SORT_DIRECTION, sort.direction.as_str());
    next
}

pub fn apply_pagination(params: &QueryParams, patch: PaginationPatch) -> QueryParams {
    let mut next = params.clone();
    if let Some(limit) = patch.limit {
        next.set(LIMIT, limit.to_string());
    }
    if let Some(offset) = patch.offset {
        next.set(OFFSET, offset.to_string());
    }
    next
}

/// Drop every filter, keeping sort and page size
pub fn reset_filters(state: &ProductTableState) -> QueryParams {
    let mut next = QueryParams::new();
    next.set(SORT_FIELD, state.sort.field.as_str());
    next.set(SORT_DIRECTION, state.sort.direction.as_str());
    next.set(LIMIT, state.pagination.limit.to_string());
    next.set(OFFSET, "0");
    next
}

// ========================
// Filter Bar Change Detection
// ========================

/// Patch for a settled title input, if it differs from the URL
pub fn title_change(input: &str, committed: Option<&str>) -> Option<FilterPatch> {
    let next = (!input.is_empty()).then(|| input.to_string());
    (next.as_deref() != committed).then(|| FilterPatch::title(next))
}

/// Patch for settled price inputs.
///
/// Invalid input yields the field errors and never reaches the URL; valid input
/// equal to the URL yields no patch.
pub fn price_change(
    min_input: &str,
    max_input: &str,
    committed: (Option<f64>, Option<f64>),
) -> Result<Option<FilterPatch>, FieldErrors> {
    let (price_min, price_max) = validation::validate_price_filter(min_input, max_input)?;
    if (price_min, price_max) == committed {
        return Ok(None);
    }
    Ok(Some(FilterPatch::prices(price_min, price_max)))
}

/// URL to navigate to for `next`, or `None` when it would not change the URL
pub fn target_url(current: &QueryParams, next: &QueryParams, path: &str) -> Option<String> {
    if current == next {
        return None;
    }
    if next.is_empty() {
        Some(path.to_string())
    } else {
        Some(format!("{}?{}", path, next.to_query_string()))
    }
}

// ========================
// Router Glue
// ========================

/// Product list state bound to the current location
#[derive(Clone, Copy)]
pub struct ProductQuery {
    pub state: Memo<ProductTableState>,
    params: Memo<QueryParams>,
    pathname: Memo<String>,
    navigate: Callback<String>,
}

pub fn use_product_query() -> ProductQuery {
    let location = use_location();
    let search = location.search;
    let params = Memo::new(move |_| QueryParams::parse(&search.get()));
    let state = Memo::new(move |_| params.with(ProductTableState::from_params));

    let navigate = use_navigate();
    let navigate = Callback::new(move |url: String| {
        navigate(
            &url,
            NavigateOptions {
                scroll: false,
                ..Default::default()
            },
        );
    });

    ProductQuery {
        state,
        params,
        pathname: location.pathname,
        navigate,
    }
}

impl ProductQuery {
    pub fn update_filters(&self, patch: FilterPatch) {
        let next = self.params.with_untracked(|params| apply_filters(params, &patch));
        self.commit(next);
    }

    pub fn update_sort(&self, sort: ProductSort) {
        let next = self.params.with_untracked(|params| apply_sort(params, sort));
        self.commit(next);
    }

    pub fn update_pagination(&self, patch: PaginationPatch) {
        let next = self.params.with_untracked(|params| apply_pagination(params, patch));
        self.commit(next);
    }

    pub fn reset_filters(&self) {
        let next = self.state.with_untracked(reset_filters);
        self.commit(next);
    }

    fn commit(&self, next: QueryParams) {
        let path = self.pathname.get_untracked();
        let target = self.params.with_untracked(|current| target_url(current, &next, &path));
        match target {
            Some(url) => {
                log::debug!("[QUERY] Navigating to {}", url);
                self.navigate.run(url);
            }
            None => log::debug!("[QUERY] Skipping redundant update"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_of(query: &str) -> ProductTableState {
        ProductTableState::from_params(&QueryParams::parse(query))
    }

    #[test]
    fn test_defaults_without_params() {
        let state = state_of("");
        assert_eq!(state.filters, ProductFilters::default());
        assert_eq!(state.sort.field, SortField::Title);
        assert_eq!(state.sort.direction, SortDirection::Asc);
        assert_eq!(state.pagination, ProductPagination { limit: 10, offset: 0 });
    }

    #[test]
    fn test_parses_filters_sort_and_pagination() {
        let state = state_of(
            "?title=test+product&categoryId=5&price_min=10&price_max=100.5&sortField=price&sortDirection=desc&limit=20&offset=40",
        );
        assert_eq!(state.filters.title.as_deref(), Some("test product"));
        assert_eq!(state.filters.category_id, Some(5));
        assert_eq!(state.filters.price_min, Some(10.0));
        assert_eq!(state.filters.price_max, Some(100.5));
        assert_eq!(state.sort, ProductSort { field: SortField::Price, direction: SortDirection::Desc });
        assert_eq!(state.pagination, ProductPagination { limit: 20, offset: 40 });
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let state = state_of("title=&categoryId=invalid&price_min=abc&price_max=NaN&sortField=rating&sortDirection=up&limit=0&offset=-5");
        assert_eq!(state.filters, ProductFilters::default());
        assert_eq!(state.sort, ProductSort::default());
        assert_eq!(state.pagination, ProductPagination { limit: 10, offset: 0 });
    }

    #[test]
    fn test_fractional_category_is_ignored() {
        assert_eq!(state_of("categoryId=2.5").filters.category_id, None);
        assert_eq!(state_of("categoryId=3.0").filters.category_id, Some(3));
    }

    #[test]
    fn test_apply_filters_resets_offset_and_keeps_unrelated_keys() {
        let params = QueryParams::parse("utm=mail&sortField=price&offset=30&title=old");
        let next = apply_filters(&params, &FilterPatch::category(Some(2)));
        assert_eq!(
            next.to_query_string(),
            "utm=mail&sortField=price&offset=0&title=old&categoryId=2"
        );
    }

    #[test]
    fn test_apply_filters_clears_empty_and_invalid_values() {
        let params = QueryParams::parse("title=shoes&categoryId=3&price_min=5&price_max=9");
        let patch = FilterPatch {
            title: Some(Some(String::new())),
            category_id: Some(Some(0)),
            price_min: Some(Some(f64::NAN)),
            price_max: Some(None),
        };
        let next = apply_filters(&params, &patch);
        assert_eq!(next.to_query_string(), "offset=0");
    }

    #[test]
    fn test_apply_filters_formats_prices_like_browser() {
        let next = apply_filters(&QueryParams::new(), &FilterPatch::prices(Some(10.0), Some(99.99)));
        assert_eq!(next.get(PRICE_MIN), Some("10"));
        assert_eq!(next.get(PRICE_MAX), Some("99.99"));
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_apply_sort_and_pagination_touch_only_their_keys() {
        let params = QueryParams::parse("title=hat&offset=20");
        let sorted = apply_sort(&params, ProductSort { field: SortField::Price, direction: SortDirection::Desc });
        assert_eq!(sorted.to_query_string(), "title=hat&offset=20&sortField=price&sortDirection=desc");

        let paged = apply_pagination(&sorted, PaginationPatch { limit: None, offset: Some(30) });
        assert_eq!(paged.get(OFFSET), Some("30"));
        assert_eq!(paged.get(TITLE), Some("hat"));
        assert!(!paged.contains(LIMIT));
    }

    #[test]
    fn test_reset_keeps_sort_and_limit_only() {
        let state = state_of("title=x&categoryId=1&sortField=price&sortDirection=desc&limit=25&offset=50&utm=x");
        assert_eq!(
            reset_filters(&state).to_query_string(),
            "sortField=price&sortDirection=desc&limit=25&offset=0"
        );
    }

    #[test]
    fn test_api_params_drop_absent_filters() {
        let params = state_of("title=lamp&limit=5&offset=10").api_params();
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({"title": "lamp", "limit": 5, "offset": 10}));
    }

    #[test]
    fn test_title_change_only_when_different() {
        assert_eq!(title_change("", None), None);
        assert_eq!(title_change("lamp", Some("lamp")), None);
        assert_eq!(title_change("", Some("lamp")), Some(FilterPatch::title(None)));
        assert_eq!(
            title_change("desk", Some("lamp")),
            Some(FilterPatch::title(Some("desk".to_string())))
        );
    }

    #[test]
    fn test_price_change_validates_and_skips_unchanged() {
        assert_eq!(price_change("10", "20", (Some(10.0), Some(20.0))), Ok(None));
        assert_eq!(
            price_change("10", "", (None, None)),
            Ok(Some(FilterPatch::prices(Some(10.0), None)))
        );

        let errors = price_change("30", "20", (None, None)).unwrap_err();
        assert_eq!(errors.get("price_max"), Some("Min price cannot be greater than max price"));

        let errors = price_change("-1", "", (None, None)).unwrap_err();
        assert_eq!(errors.get("price_min"), Some("Price must be positive or zero"));
    }

    #[test]
    fn test_unchanged_sort_or_page_does_not_navigate() {
        let current = QueryParams::parse("title=hat&sortField=price&sortDirection=desc&limit=10&offset=20");
        let same_sort = apply_sort(&current, ProductSort { field: SortField::Price, direction: SortDirection::Desc });
        assert_eq!(target_url(&current, &same_sort, "/"), None);

        let same_page = apply_pagination(&current, PaginationPatch { limit: None, offset: Some(20) });
        assert_eq!(target_url(&current, &same_page, "/"), None);

        let next_page = apply_pagination(&current, PaginationPatch { limit: None, offset: Some(30) });
        assert_eq!(
            target_url(&current, &next_page, "/"),
            Some("/?title=hat&sortField=price&sortDirection=desc&limit=10&offset=30".to_string())
        );
    }

    #[test]
    fn test_empty_params_navigate_to_bare_path() {
        let current = QueryParams::parse("title=hat");
        let mut next = current.clone();
        next.remove(TITLE);
        assert_eq!(target_url(&current, &next, "/"), Some("/".to_string()));
        assert_eq!(target_url(&next, &QueryParams::new(), "/"), None);
    }
}
