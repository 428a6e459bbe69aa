//! Product Detail Page

use leptos::prelude::*;

use super::{use_product, use_product_id};
use crate::components::{ErrorMessage, LoadingSpinner, ProductImage};
use crate::context::use_go_to;
use crate::listing::{format_price, primary_image};
use crate::models::Product;

#[component]
fn ProductDetails(product: Product) -> impl IntoView {
    let go_to = use_go_to();
    let id = product.id;
    let main_image = primary_image(&product).to_string();
    let thumbnails: Vec<(usize, String)> = product.images.iter().cloned().enumerate().skip(1).collect();
    let title = product.title.clone();

    view! {
        <div class="detail-grid">
            <div class="detail-gallery">
                <ProductImage src=main_image alt=title.clone() class="detail-image" />
                {(!thumbnails.is_empty()).then(|| view! {
                    <div class="thumbnail-grid">
                        {thumbnails.into_iter().map(|(index, url)| view! {
                            <ProductImage src=url alt=format!("{} {}", title, index + 1) class="thumbnail" />
                        }).collect_view()}
                    </div>
                })}
            </div>
            <div class="detail-info">
                <h1>{product.title.clone()}</h1>
                <p class="detail-price">{format_price(product.price)}</p>
                <span class="category-badge">{product.category.name.clone()}</span>
                <p class="detail-description">{product.description.clone()}</p>
                <button class="btn btn-primary" on:click=move |_| go_to.run(format!("/products/{}/edit", id))>
                    "Edit Product"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    let go_to = use_go_to();
    let product = use_product(use_product_id());

    view! {
        <div class="page">
            <div class="panel">
                <button class="btn-link" on:click=move |_| go_to.run("/".to_string())>
                    "← Back to Products"
                </button>
                {move || match product.get() {
                    None => view! { <LoadingSpinner /> }.into_any(),
                    Some(Err(message)) => view! { <ErrorMessage message=message /> }.into_any(),
                    Some(Ok(product)) => view! { <ProductDetails product=product /> }.into_any(),
                }}
            </div>
        </div>
    }
}
