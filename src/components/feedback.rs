//! Feedback Components
//!
//! Loading spinner, error panel and the toast stack.

use leptos::prelude::*;

use crate::store::{store_dismiss_toast, store_toasts, use_app_store, ToastKind};

#[component]
pub fn LoadingSpinner(#[prop(optional)] small: bool) -> impl IntoView {
    let (container, spinner) = if small {
        ("spinner-container small", "spinner small")
    } else {
        ("spinner-container", "spinner")
    };
    view! {
        <div class=container role="status" aria-label="Loading">
            <div class=spinner></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(
    #[prop(into, default = "Something went wrong".to_string())] message: String,
    #[prop(into, default = "Error".to_string())] title: String,
) -> impl IntoView {
    view! {
        <div class="error-panel" role="alert">
            <h3>{title}</h3>
            <p>{message}</p>
        </div>
    }
}

/// Toast stack in the top-right corner
#[component]
pub fn Toaster() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toaster">
            <For
                each=move || store_toasts(&store)
                key=|toast| toast.id
                children=move |toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status">
                            <span>{toast.message}</span>
                            <button
                                class="toast-close"
                                aria-label="Dismiss"
                                on:click=move |_| store_dismiss_toast(&store, id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
