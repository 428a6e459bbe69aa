//! Route Guards

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::context::use_auth;

/// Renders children for a signed-in session, otherwise sends the user to `/login`
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <Redirect path="/login" /> }
        >
            {children()}
        </Show>
    }
}

/// Inverse guard for the login page
#[component]
pub fn RedirectIfAuthenticated(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || !auth.is_authenticated()
            fallback=|| view! { <Redirect path="/" /> }
        >
            {children()}
        </Show>
    }
}
