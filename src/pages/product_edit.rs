use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_url_state::Generation;

use super::{use_product, use_product_id};
use crate::components::{ErrorMessage, LoadingSpinner, ProductForm};
use crate::context::{use_app_context, use_go_to};
use crate::models::{Product, ProductFormData};
use crate::queries;

#[component]
pub fn ProductEditPage() -> impl IntoView {
    let ctx = use_app_context();
    let go_to = use_go_to();
    let product = use_product(use_product_id());
    let (is_saving, set_is_saving) = signal(false);
    let saves = Generation::scoped();

    let form_for = move |existing: Product| {
        let stored = StoredValue::new(existing.clone());
        let saves = saves.clone();
        let on_submit = move |data: ProductFormData| {
            set_is_saving.set(true);
            let existing = stored.get_value();
            let ticket = saves.next();
            let saves = saves.clone();
            spawn_local(async move {
                let result = queries::update_product(ctx, &existing, data).await;
                if !saves.is_current(ticket) {
                    return;
                }
                set_is_saving.set(false);
                if result.is_ok() {
                    go_to.run("/".to_string());
                }
            });
        };
        view! { <ProductForm product=existing on_submit=on_submit is_saving=is_saving /> }
    };

    view! {
        <div class="page">
            <div class="panel narrow">
                <div class="panel-header">
                    <h1>"Edit Product"</h1>
                    <button class="btn-link" on:click=move |_| go_to.run("/".to_string())>
                        "← Back to Products"
                    </button>
                </div>
                {move || match product.get() {
                    None => view! { <LoadingSpinner /> }.into_any(),
                    Some(Err(message)) => view! { <ErrorMessage message=message /> }.into_any(),
                    Some(Ok(existing)) => form_for(existing).into_any(),
                }}
            </div>
        </div>
    }
}
