//! Pages
//!
//! One component per route.

mod login;
mod not_found;
mod product_detail;
mod product_edit;
mod product_new;
mod products;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use leptos_url_state::Generation;

use crate::context::use_app_context;
use crate::models::Product;
use crate::queries;

pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use product_detail::ProductDetailPage;
pub use product_edit::ProductEditPage;
pub use product_new::ProductNewPage;
pub use products::ProductsPage;

/// Product loading state: `None` while in flight
type ProductLoad = Option<Result<Product, String>>;

/// `:id` route parameter; anything that is not a product id is `None`
fn use_product_id() -> Memo<Option<u32>> {
    let params = use_params_map();
    Memo::new(move |_| {
        params
            .with(|params| params.get("id"))
            .and_then(|id| id.parse::<u32>().ok())
    })
}

/// Load the product named by the route, dropping responses for ids left behind
fn use_product(id: Memo<Option<u32>>) -> ReadSignal<ProductLoad> {
    let ctx = use_app_context();
    let (product, set_product) = signal(None);
    let requests = Generation::scoped();

    Effect::new(move |_| {
        let id = id.get();
        let ticket = requests.next();
        let Some(id) = id else {
            set_product.set(Some(Err("Product not found".to_string())));
            return;
        };
        set_product.set(None);

        let requests = requests.clone();
        spawn_local(async move {
            let result = queries::fetch_product(ctx, id).await.map_err(|e| e.to_string());
            if requests.is_current(ticket) {
                set_product.set(Some(result));
            }
        });
    });

    product
}
