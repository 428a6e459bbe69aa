//! Catalog Admin App
//!
//! Context providers and the route table.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::components::{RedirectIfAuthenticated, RequireAuth, Toaster};
use crate::context::{AppContext, AuthContext};
use crate::pages::{
    LoginPage, NotFoundPage, ProductDetailPage, ProductEditPage, ProductNewPage, ProductsPage,
};
use crate::store::AppState;

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let auth = AuthContext::new();

    // Provide context to all children
    provide_context(store);
    provide_context(auth);
    provide_context(AppContext::new(auth, store));

    Effect::new(move |_| {
        log::info!("[APP] Session authenticated={}", auth.is_authenticated());
    });

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route
                    path=path!("/login")
                    view=|| view! { <RedirectIfAuthenticated><LoginPage /></RedirectIfAuthenticated> }
                />
                <Route
                    path=path!("/")
                    view=|| view! { <RequireAuth><ProductsPage /></RequireAuth> }
                />
                <Route
                    path=path!("/products/new")
                    view=|| view! { <RequireAuth><ProductNewPage /></RequireAuth> }
                />
                <Route
                    path=path!("/products/:id/edit")
                    view=|| view! { <RequireAuth><ProductEditPage /></RequireAuth> }
                />
                <Route
                    path=path!("/products/:id")
                    view=|| view! { <RequireAuth><ProductDetailPage /></RequireAuth> }
                />
            </Routes>
            <Toaster />
        </Router>
    }
}
