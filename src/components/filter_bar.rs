//! Filter Bar Component
//!
//! Title search, category select and price range. Typed input is debounced
//! and only written to the URL once it is valid and differs from what the URL
//! already holds; the category applies immediately.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_url_state::use_debounced;

use crate::components::{FormInput, FormSelect};
use crate::config::config;
use crate::context::use_app_context;
use crate::models::Category;
use crate::queries;
use crate::query_state::{format_number, price_change, title_change, FilterPatch, ProductQuery};
use crate::validation::{validate_price_filter, FieldErrors};

#[component]
pub fn FilterBar(query: ProductQuery) -> impl IntoView {
    let ctx = use_app_context();
    let delay = config().debounce_delay_ms;

    let initial = query.state.get_untracked().filters;
    let title = RwSignal::new(initial.title.unwrap_or_default());
    let price_min = RwSignal::new(initial.price_min.map(format_number).unwrap_or_default());
    let price_max = RwSignal::new(initial.price_max.map(format_number).unwrap_or_default());

    let (categories, set_categories) = signal(Vec::<Category>::new());
    Effect::new(move |_| {
        spawn_local(async move {
            match queries::fetch_categories(ctx).await {
                Ok(loaded) => set_categories.set(loaded),
                Err(e) => log::warn!("[QUERY] Could not load categories: {}", e),
            }
        });
    });

    // Errors show while typing; the URL only sees settled, valid input
    let price_errors = Memo::new(move |_| {
        validate_price_filter(&price_min.get(), &price_max.get())
            .err()
            .unwrap_or_default()
    });

    let debounced_title = use_debounced(Signal::<String>::from(title), delay);
    Effect::new(move |_| {
        let input = debounced_title.get();
        let committed = query.state.with_untracked(|state| state.filters.title.clone());
        if let Some(patch) = title_change(&input, committed.as_deref()) {
            query.update_filters(patch);
        }
    });

    let prices = Signal::derive(move || (price_min.get(), price_max.get()));
    let debounced_prices = use_debounced(prices, delay);
    Effect::new(move |_| {
        let (min, max) = debounced_prices.get();
        let committed = query
            .state
            .with_untracked(|state| (state.filters.price_min, state.filters.price_max));
        match price_change(&min, &max, committed) {
            Ok(Some(patch)) => query.update_filters(patch),
            Ok(None) => {}
            Err(errors) => log::debug!("[QUERY] Holding back invalid price range ({} errors)", errors.len()),
        }
    });

    let category_value = Signal::derive(move || {
        query
            .state
            .with(|state| state.filters.category_id.map(|id| id.to_string()))
            .unwrap_or_default()
    });
    let category_options = Signal::derive(move || {
        let mut options = vec![(String::new(), "All Categories".to_string())];
        categories.with(|categories| {
            options.extend(categories.iter().map(|c| (c.id.to_string(), c.name.clone())));
        });
        options
    });

    let on_category = move |value: String| {
        let category_id = value.parse::<u32>().ok().filter(|id| *id > 0);
        query.update_filters(FilterPatch::category(category_id));
    };

    let clear_filters = move |_| {
        title.set(String::new());
        price_min.set(String::new());
        price_max.set(String::new());
        query.reset_filters();
    };

    let price_error = move |field: &'static str| {
        Signal::derive(move || price_errors.with(|errors: &FieldErrors| errors.get(field).map(str::to_string)))
    };

    view! {
        <div class="filter-bar">
            <form class="filter-grid" on:submit=|ev| ev.prevent_default()>
                <FormInput
                    id="filter-title"
                    label="Title"
                    placeholder="Search by title..."
                    value=title
                    on_input=move |value: String| title.set(value)
                />
                <FormSelect
                    id="filter-category"
                    label="Category"
                    value=category_value
                    options=category_options
                    on_change=on_category
                />
                <FormInput
                    id="filter-price-min"
                    label="Min Price"
                    input_type="number"
                    placeholder="Min"
                    min="0"
                    step="0.01"
                    value=price_min
                    on_input=move |value: String| price_min.set(value)
                    error=price_error("price_min")
                />
                <FormInput
                    id="filter-price-max"
                    label="Max Price"
                    input_type="number"
                    placeholder="Max"
                    min="0"
                    step="0.01"
                    value=price_max
                    on_input=move |value: String| price_max.set(value)
                    error=price_error("price_max")
                />
                <div class="filter-actions">
                    <button type="button" class="btn btn-secondary" on:click=clear_filters>
                        "Clear Filters"
                    </button>
                </div>
            </form>
        </div>
    }
}
