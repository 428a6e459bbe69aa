//! Products Page

use leptos::prelude::*;

use crate::components::{FilterBar, ProductTable};
use crate::context::{use_auth, use_go_to};
use crate::query_state::use_product_query;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let auth = use_auth();
    let go_to = use_go_to();
    let query = use_product_query();

    view! {
        <div class="page">
            <nav class="top-nav">
                <div class="nav-inner">
                    <h1>"Platzi Fake Store"</h1>
                    <div class="nav-actions">
                        <button class="btn btn-primary" on:click=move |_| go_to.run("/products/new".to_string())>
                            "Create Product"
                        </button>
                        <button class="btn btn-secondary" on:click=move |_| auth.logout()>
                            "Logout"
                        </button>
                    </div>
                </div>
            </nav>
            <main class="content">
                <FilterBar query=query />
                <ProductTable query=query />
            </main>
        </div>
    }
}
