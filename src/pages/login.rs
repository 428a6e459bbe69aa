//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{FormError, FormInput};
use crate::config::config;
use crate::context::{use_app_context, use_auth};
use crate::store::{notify_error, notify_success};
use crate::validation::{validate_login, FieldErrors};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let ctx = use_app_context();
    let test_credentials = config().test_credentials.clone();

    let email = RwSignal::new(
        test_credentials
            .as_ref()
            .map(|c| c.email.clone())
            .unwrap_or_default(),
    );
    let password = RwSignal::new(
        test_credentials
            .as_ref()
            .map(|c| c.password.clone())
            .unwrap_or_default(),
    );
    let errors = RwSignal::new(FieldErrors::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(FieldErrors::new());

        spawn_local(async move {
            match auth.login(credentials).await {
                // The login route redirects once the session is authenticated
                Ok(()) => notify_success(ctx.store, "Login successful!"),
                Err(e) => {
                    let message = e.to_string();
                    log::warn!("[AUTH] Sign in failed: {}", message);
                    errors.update(|errors| errors.add("root", message.clone()));
                    notify_error(ctx.store, message);
                }
            }
        });
    };

    let error_for = move |field: &'static str| {
        Signal::derive(move || errors.with(|errors| errors.get(field).map(str::to_string)))
    };

    view! {
        <div class="page centered">
            <div class="login-card">
                <h2>"Sign in to your account"</h2>
                {test_credentials.map(|c| view! {
                    <p class="test-credentials">
                        "Use test credentials: "
                        <code>{c.email}</code>
                        " / "
                        <code>{c.password}</code>
                    </p>
                })}
                <form class="login-form" on:submit=submit novalidate=true>
                    <FormInput
                        id="email"
                        input_type="email"
                        autocomplete="email"
                        placeholder="Email address"
                        value=email
                        on_input=move |value: String| email.set(value)
                        error=error_for("email")
                    />
                    <FormInput
                        id="password"
                        input_type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        value=password
                        on_input=move |value: String| password.set(value)
                        error=error_for("password")
                    />
                    <FormError error=error_for("root") />
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || auth.is_loading()>
                        {move || if auth.is_loading() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
