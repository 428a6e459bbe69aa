//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::{self, ApiError};
use crate::cache::QueryCache;
use crate::models::LoginRequest;
use crate::storage::TokenStorage;
use crate::store::AppStore;
use crate::token::{now_millis, validate_token};

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Invalid token received from server")]
    InvalidToken,
    #[error("Failed to store authentication token")]
    Storage,
}

/// Session state
#[derive(Clone, Copy)]
pub struct AuthContext {
    is_authenticated: RwSignal<bool>,
    is_loading: RwSignal<bool>,
}

impl AuthContext {
    /// Start from the stored token; a stored token that fails validation is discarded
    pub fn new() -> Self {
        let storage = TokenStorage::browser();
        let token = storage.get_token();
        let valid = validate_token(token.as_deref());
        if !valid && token.is_some() {
            log::info!("[AUTH] Stored token is invalid or expired, clearing");
            storage.clear_tokens();
        }

        Self {
            is_authenticated: RwSignal::new(valid),
            is_loading: RwSignal::new(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated.get()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<(), AuthError> {
        self.is_loading.set(true);
        let result = self.sign_in(&credentials).await;
        self.is_loading.set(false);
        result
    }

    async fn sign_in(&self, credentials: &LoginRequest) -> Result<(), AuthError> {
        let response = api::login(credentials).await?;
        if !validate_token(Some(&response.access_token)) {
            log::warn!("[AUTH] Server returned an unusable access token");
            return Err(AuthError::InvalidToken);
        }

        let storage = TokenStorage::browser();
        storage
            .set_token(&response.access_token)
            .map_err(|_| AuthError::Storage)?;
        if let Some(refresh_token) = &response.refresh_token {
            storage
                .set_refresh_token(refresh_token)
                .map_err(|_| AuthError::Storage)?;
        }

        log::info!("[AUTH] Signed in");
        self.is_authenticated.set(true);
        Ok(())
    }

    pub fn logout(&self) {
        TokenStorage::browser().clear_tokens();
        log::info!("[AUTH] Signed out");
        self.is_authenticated.set(false);
    }

    /// The backend rejected the token; tokens are already cleared by the client
    pub fn expire(&self) {
        if self.is_authenticated.get_untracked() {
            log::warn!("[AUTH] Session expired");
            self.is_authenticated.set(false);
        }
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub auth: AuthContext,
    pub store: AppStore,
    /// Bumped after product mutations so lists refetch - read
    pub products_version: ReadSignal<u32>,
    /// Bumped after product mutations so lists refetch - write
    set_products_version: WriteSignal<u32>,
    cache: StoredValue<QueryCache>,
}

impl AppContext {
    pub fn new(auth: AuthContext, store: AppStore) -> Self {
        let (products_version, set_products_version) = signal(0u32);
        Self {
            auth,
            store,
            products_version,
            set_products_version,
            cache: StoredValue::new(QueryCache::default()),
        }
    }

    /// Trigger a reload of product lists
    pub fn reload_products(&self) {
        self.set_products_version.update(|v| *v += 1);
    }

    pub fn cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = now_millis();
        self.cache.with_value(|cache| cache.get(key, now))
    }

    pub fn cache_insert<T: Serialize>(&self, key: String, value: &T) {
        let now = now_millis();
        self.cache.update_value(|cache| cache.insert(key, value, now));
    }

    pub fn cache_remove(&self, key: &str) {
        self.cache.update_value(|cache| cache.remove(key));
    }

    pub fn invalidate(&self, prefix: &str) {
        log::debug!("[CACHE] Invalidating {}", prefix);
        self.cache.update_value(|cache| cache.invalidate_prefix(prefix));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

/// Router navigation as a copyable callback
pub fn use_go_to() -> Callback<String> {
    let navigate = use_navigate();
    Callback::new(move |path: String| navigate(&path, Default::default()))
}
