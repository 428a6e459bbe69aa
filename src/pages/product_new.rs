use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_url_state::Generation;

use crate::components::ProductForm;
use crate::context::{use_app_context, use_go_to};
use crate::models::ProductFormData;
use crate::queries;

#[component]
pub fn ProductNewPage() -> impl IntoView {
    let ctx = use_app_context();
    let go_to = use_go_to();
    let (is_saving, set_is_saving) = signal(false);
    let saves = Generation::scoped();

    let on_submit = move |data: ProductFormData| {
        set_is_saving.set(true);
        let ticket = saves.next();
        let saves = saves.clone();
        spawn_local(async move {
            let result = queries::create_product(ctx, data).await;
            // The user may have left the page while the request was in flight
            if !saves.is_current(ticket) {
                return;
            }
            set_is_saving.set(false);
            if result.is_ok() {
                go_to.run("/".to_string());
            }
        });
    };

    view! {
        <div class="page">
            <div class="panel narrow">
                <div class="panel-header">
                    <h1>"Create New Product"</h1>
                    <button class="btn-link" on:click=move |_| go_to.run("/".to_string())>
                        "← Back to Products"
                    </button>
                </div>
                <ProductForm on_submit=on_submit is_saving=is_saving />
            </div>
        </div>
    }
}
