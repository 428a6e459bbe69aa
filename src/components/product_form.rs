//! Product Form Component
//!
//! Shared create/edit form. Validation runs on submit and then on every edit
//! until the form is valid again.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{FormField, FormInput, FormSelect, FormTextarea, LoadingSpinner};
use crate::context::use_app_context;
use crate::models::{Category, Product, ProductFormData};
use crate::queries;
use crate::validation::{validate_product_form, FieldErrors, ProductFormInput};

/// Number of image rows; editing a URL keeps it unchanged, so the rows are not rebuilt
fn image_row_count(images: RwSignal<Vec<String>>) -> Memo<usize> {
    Memo::new(move |_| images.with(Vec::len))
}

#[component]
pub fn ProductForm(
    #[prop(optional)] product: Option<Product>,
    #[prop(into)] on_submit: Callback<ProductFormData>,
    #[prop(into)] is_saving: Signal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let is_edit = product.is_some();
    let initial = product
        .as_ref()
        .map(ProductFormInput::from_product)
        .unwrap_or_else(ProductFormInput::blank);

    let title = RwSignal::new(initial.title);
    let price = RwSignal::new(initial.price);
    let description = RwSignal::new(initial.description);
    let images = RwSignal::new(initial.images);
    let category_id = RwSignal::new(initial.category_id);
    let errors = RwSignal::new(FieldErrors::new());
    let (submitted, set_submitted) = signal(false);

    let (categories, set_categories) = signal(None::<Vec<Category>>);
    Effect::new(move |_| {
        spawn_local(async move {
            match queries::fetch_categories(ctx).await {
                Ok(loaded) => set_categories.set(Some(loaded)),
                Err(e) => {
                    log::warn!("[QUERY] Could not load categories: {}", e);
                    set_categories.set(Some(Vec::new()));
                }
            }
        });
    });

    let current_input = move || ProductFormInput {
        title: title.get(),
        price: price.get(),
        description: description.get(),
        images: images.get(),
        category_id: category_id.get(),
    };

    // Live re-validation once the user has tried to submit
    Effect::new(move |_| {
        if submitted.get() {
            let input = current_input();
            errors.set(validate_product_form(&input).err().unwrap_or_default());
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitted.set(true);
        let input = current_input();
        match validate_product_form(&input) {
            Ok(data) => {
                errors.set(FieldErrors::new());
                on_submit.run(data);
            }
            Err(field_errors) => {
                log::debug!("[APP] Product form has {} invalid fields", field_errors.len());
                errors.set(field_errors);
            }
        }
    };

    let error_for = move |field: String| {
        Signal::derive(move || errors.with(|errors| errors.get(&field).map(str::to_string)))
    };

    let category_options = Signal::derive(move || {
        let mut options = vec![("0".to_string(), "Select a category".to_string())];
        categories.with(|categories| {
            if let Some(categories) = categories {
                options.extend(categories.iter().map(|c| (c.id.to_string(), c.name.clone())));
            }
        });
        options
    });

    let image_count = image_row_count(images);
    let image_rows = move || {
        (0..image_count.get())
            .map(|index| {
                let value = Signal::derive(move || {
                    images.with(|images| images.get(index).cloned().unwrap_or_default())
                });
                view! {
                    <div class="image-row">
                        <FormInput
                            input_type="url"
                            placeholder="https://example.com/image.jpg"
                            value=value
                            on_input=move |url: String| images.update(|images| {
                                if let Some(slot) = images.get_mut(index) {
                                    *slot = url;
                                }
                            })
                            error=error_for(format!("images.{}", index))
                        />
                        <Show when=move || (image_count.get() > 1)>
                            <button
                                type="button"
                                class="btn btn-danger"
                                on:click=move |_| images.update(|images| {
                                    if images.len() > 1 && index < images.len() {
                                        images.remove(index);
                                    }
                                })
                            >
                                "Remove"
                            </button>
                        </Show>
                    </div>
                }
            })
            .collect_view()
    };

    let submit_label = move || {
        if is_saving.get() {
            "Saving..."
        } else if is_edit {
            "Update Product"
        } else {
            "Create Product"
        }
    };

    view! {
        <Show
            when=move || categories.with(Option::is_some)
            fallback=|| view! { <LoadingSpinner /> }
        >
            <form class="product-form" on:submit=submit novalidate=true>
                <FormInput
                    id="product-title"
                    label="Title"
                    required=true
                    value=title
                    on_input=move |value: String| title.set(value)
                    error=error_for("title".to_string())
                />
                <FormInput
                    id="product-price"
                    label="Price"
                    required=true
                    input_type="number"
                    step="0.01"
                    min="0"
                    value=price
                    on_input=move |value: String| price.set(value)
                    error=error_for("price".to_string())
                />
                <FormTextarea
                    id="product-description"
                    label="Description"
                    required=true
                    rows=4
                    value=description
                    on_input=move |value: String| description.set(value)
                    error=error_for("description".to_string())
                />
                <FormSelect
                    id="product-category"
                    label="Category"
                    required=true
                    value=category_id
                    options=category_options
                    on_change=move |value: String| category_id.set(value)
                    error=error_for("categoryId".to_string())
                />
                <FormField label="Images (URLs)" required=true error=error_for("images".to_string())>
                    <div class="image-list">
                        <div class="image-list-actions">
                            <button
                                type="button"
                                class="btn-link"
                                on:click=move |_| images.update(|images| images.push(String::new()))
                            >
                                "+ Add Image"
                            </button>
                        </div>
                        {image_rows}
                    </div>
                </FormField>
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled=move || is_saving.get()>
                        {submit_label}
                    </button>
                </div>
            </form>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_editing_an_image_url_keeps_rows() {
        let owner = Owner::new();
        owner.set();
        let images = RwSignal::new(vec![String::new()]);
        let count = image_row_count(images);

        let builds = Arc::new(AtomicUsize::new(0));
        let rows = Memo::new({
            let builds = Arc::clone(&builds);
            move |_| {
                builds.fetch_add(1, Ordering::SeqCst);
                count.get()
            }
        });
        assert_eq!(rows.get_untracked(), 1);

        for url in ["h", "https://img.example/a.png"] {
            images.update(|images| images[0] = url.to_string());
            assert_eq!(rows.get_untracked(), 1);
        }
        assert_eq!(builds.load(Ordering::SeqCst), 1);

        images.update(|images| images.push(String::new()));
        assert_eq!(rows.get_untracked(), 2);
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }
}
