//! Product Table Component
//!
//! Current page of products as a table on wide screens and as cards on narrow
//! ones, with sortable headers, pagination and a delete confirmation dialog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_url_state::Generation;

use crate::components::{ErrorMessage, LoadingSpinner, ProductImage};
use crate::context::{use_app_context, use_go_to};
use crate::listing::{
    format_price, has_next_page, next_offset, next_sort, page_number, previous_offset,
    primary_image, sort_products,
};
use crate::models::{Product, SortField};
use crate::queries;
use crate::query_state::{PaginationPatch, ProductQuery};

#[component]
fn ProductRow(
    product: Product,
    on_view: Callback<u32>,
    on_edit: Callback<u32>,
    on_delete: Callback<u32>,
) -> impl IntoView {
    let id = product.id;
    let image = primary_image(&product).to_string();

    view! {
        <tr class="product-row" on:click=move |_| on_view.run(id)>
            <td>
                <ProductImage src=image alt=product.title.clone() class="row-thumbnail" />
            </td>
            <td class="product-title">{product.title}</td>
            <td>{format_price(product.price)}</td>
            <td>{product.category.name}</td>
            <td>
                <div class="row-actions">
                    <button
                        class="btn btn-primary btn-small"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_edit.run(id);
                        }
                    >
                        "Edit"
                    </button>
                    <button
                        class="btn btn-danger btn-small"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_delete.run(id);
                        }
                    >
                        "Delete"
                    </button>
                </div>
            </td>
        </tr>
    }
}

#[component]
fn ProductCard(
    product: Product,
    on_view: Callback<u32>,
    on_edit: Callback<u32>,
    on_delete: Callback<u32>,
) -> impl IntoView {
    let id = product.id;
    let image = primary_image(&product).to_string();

    view! {
        <div class="product-card" on:click=move |_| on_view.run(id)>
            <ProductImage src=image alt=product.title.clone() class="card-image" />
            <h3>{product.title}</h3>
            <p class="card-price">{format_price(product.price)}</p>
            <p class="card-category">{product.category.name}</p>
            <div class="card-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_edit.run(id);
                    }
                >
                    "Edit"
                </button>
                <button
                    class="btn btn-danger"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        on_delete.run(id);
                    }
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}

/// Sortable column header; the arrow shows on the active column
#[component]
fn SortHeader(query: ProductQuery, field: SortField, label: &'static str) -> impl IntoView {
    let sort = Memo::new(move |_| query.state.with(|state| state.sort));

    view! {
        <th>
            <button
                class="sort-button"
                on:click=move |_| query.update_sort(next_sort(sort.get_untracked(), field))
            >
                {label}
                {move || {
                    let sort = sort.get();
                    (sort.field == field).then(|| view! { <span class="sort-arrow">{sort.direction.arrow()}</span> })
                }}
            </button>
        </th>
    }
}

#[component]
pub fn ProductTable(query: ProductQuery) -> impl IntoView {
    let ctx = use_app_context();
    let go_to = use_go_to();

    let (products, set_products) = signal(Vec::<Product>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let (delete_target, set_delete_target) = signal(None::<u32>);
    let (is_deleting, set_is_deleting) = signal(false);

    // Reload when the URL state changes or after a mutation
    let requests = Generation::scoped();
    Effect::new(move |_| {
        let params = query.state.with(|state| state.api_params());
        let version = ctx.products_version.get();
        let ticket = requests.next();
        let requests = requests.clone();
        log::debug!("[APP] Loading products, version={}", version);
        set_is_loading.set(true);
        spawn_local(async move {
            let result = queries::fetch_products(ctx, params).await;
            if !requests.is_current(ticket) {
                log::debug!("[APP] Dropping superseded product response");
                return;
            }
            match result {
                Ok(loaded) => {
                    log::debug!("[APP] Loaded {} products", loaded.len());
                    set_products.set(loaded);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    });

    let sorted = Memo::new(move |_| {
        let sort = query.state.with(|state| state.sort);
        products.with(|products| sort_products(products, sort))
    });
    let pagination = Memo::new(move |_| query.state.with(|state| state.pagination));

    let on_view = Callback::new(move |id: u32| go_to.run(format!("/products/{}", id)));
    let on_edit = Callback::new(move |id: u32| go_to.run(format!("/products/{}/edit", id)));
    let on_delete = Callback::new(move |id: u32| set_delete_target.set(Some(id)));

    let confirm_delete = move |_| {
        let Some(id) = delete_target.get_untracked() else { return };
        set_is_deleting.set(true);
        spawn_local(async move {
            // Failures are reported by the toast
            let _ = queries::delete_product(ctx, id).await;
            set_is_deleting.set(false);
            set_delete_target.set(None);
        });
    };

    let table = move || {
        view! {
            <div class="table-wrapper">
                <table class="product-table">
                    <thead>
                        <tr>
                            <th>"Image"</th>
                            <SortHeader query=query field=SortField::Title label="Title" />
                            <SortHeader query=query field=SortField::Price label="Price" />
                            <th>"Category"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || sorted.with(|rows| rows.is_empty())>
                            <tr>
                                <td colspan="5" class="empty-state">"No products found"</td>
                            </tr>
                        </Show>
                        <For
                            each=move || sorted.get()
                            key=|product| (product.id, product.updated_at.clone())
                            children=move |product| view! {
                                <ProductRow product=product on_view=on_view on_edit=on_edit on_delete=on_delete />
                            }
                        />
                    </tbody>
                </table>
            </div>

            <div class="card-list">
                <Show when=move || sorted.with(|rows| rows.is_empty())>
                    <div class="empty-state">"No products found"</div>
                </Show>
                <For
                    each=move || sorted.get()
                    key=|product| (product.id, product.updated_at.clone())
                    children=move |product| view! {
                        <ProductCard product=product on_view=on_view on_edit=on_edit on_delete=on_delete />
                    }
                />
            </div>

            <div class="pagination">
                <button
                    class="btn btn-secondary"
                    disabled=move || pagination.get().offset == 0
                    on:click=move |_| query.update_pagination(PaginationPatch {
                        offset: Some(previous_offset(pagination.get_untracked())),
                        ..Default::default()
                    })
                >
                    "Previous"
                </button>
                <span class="page-number">{move || format!("Page {}", page_number(pagination.get()))}</span>
                <button
                    class="btn btn-secondary"
                    disabled=move || !has_next_page(sorted.with(Vec::len), pagination.get())
                    on:click=move |_| query.update_pagination(PaginationPatch {
                        offset: Some(next_offset(pagination.get_untracked())),
                        ..Default::default()
                    })
                >
                    "Next"
                </button>
            </div>
        }
    };

    view! {
        <div class="product-list" class:is-refreshing=move || is_loading.get()>
            {move || {
                if let Some(message) = error.get() {
                    view! { <ErrorMessage message=message /> }.into_any()
                } else if is_loading.get() && products.with(Vec::is_empty) {
                    view! { <LoadingSpinner /> }.into_any()
                } else {
                    table().into_any()
                }
            }}

            <Show when=move || delete_target.get().is_some()>
                <div class="modal-backdrop">
                    <div class="modal" role="dialog" aria-modal="true">
                        <h3>"Confirm Delete"</h3>
                        <p>"Are you sure you want to delete this product? This action cannot be undone."</p>
                        <div class="modal-actions">
                            <button
                                class="btn btn-secondary"
                                disabled=move || is_deleting.get()
                                on:click=move |_| set_delete_target.set(None)
                            >
                                "Cancel"
                            </button>
                            <button
                                class="btn btn-danger"
                                disabled=move || is_deleting.get()
                                on:click=confirm_delete
                            >
                                {move || if is_deleting.get() {
                                    view! { <LoadingSpinner small=true /> "Deleting..." }.into_any()
                                } else {
                                    view! { "Delete" }.into_any()
                                }}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
