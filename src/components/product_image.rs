//! Product Image Component
//!
//! Lazy image that swaps to the placeholder when its URL fails to load.

use leptos::prelude::*;

use crate::config::PLACEHOLDER_IMAGE;

#[component]
pub fn ProductImage(
    #[prop(into)] src: Signal<String>,
    #[prop(into)] alt: String,
    #[prop(into)] class: String,
) -> impl IntoView {
    // URL that failed last; a new src gets a fresh attempt
    let (failed, set_failed) = signal(None::<String>);

    let shown = move || {
        let src = src.get();
        let broken = failed.with(|failed| failed.as_deref() == Some(src.as_str()));
        if src.is_empty() || broken {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            src
        }
    };

    view! {
        <img
            src=shown
            alt=alt
            class=class
            loading="lazy"
            on:error=move |_| set_failed.set(Some(src.get_untracked()))
        />
    }
}
