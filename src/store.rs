//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::config;

/// Oldest toasts are dropped beyond this
const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Notifications currently on screen, oldest first
    pub toasts: Vec<Toast>,
    /// Last toast id handed out
    pub last_toast_id: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

fn push_capped(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.push(toast);
    if toasts.len() > MAX_TOASTS {
        let overflow = toasts.len() - MAX_TOASTS;
        toasts.drain(..overflow);
    }
}

// ========================
// Store Helper Functions
// ========================

/// Add a toast and return its id
pub fn store_push_toast(store: &AppStore, kind: ToastKind, message: String) -> u32 {
    let id = {
        let last_toast_id = store.last_toast_id();
        let mut last = last_toast_id.write();
        *last += 1;
        *last
    };
    push_capped(&mut store.toasts().write(), Toast { id, kind, message });
    id
}

/// Remove a toast by ID
pub fn store_dismiss_toast(store: &AppStore, toast_id: u32) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

/// Current toasts (tracked)
pub fn store_toasts(store: &AppStore) -> Vec<Toast> {
    store.toasts().get()
}

/// Show a toast that dismisses itself
pub fn notify(store: AppStore, kind: ToastKind, message: impl Into<String>) {
    let id = store_push_toast(&store, kind, message.into());
    Timeout::new(config().toast_duration_ms, move || store_dismiss_toast(&store, id)).forget();
}

pub fn notify_success(store: AppStore, message: impl Into<String>) {
    notify(store, ToastKind::Success, message);
}

pub fn notify_error(store: AppStore, message: impl Into<String>) {
    notify(store, ToastKind::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u32) -> Toast {
        Toast { id, kind: ToastKind::Success, message: format!("toast {}", id) }
    }

    #[test]
    fn test_push_capped_drops_oldest() {
        let mut toasts = Vec::new();
        for id in 1..=7 {
            push_capped(&mut toasts, toast(id));
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts.first().map(|t| t.id), Some(3));
        assert_eq!(toasts.last().map(|t| t.id), Some(7));
    }

    #[test]
    fn test_push_toast_allocates_increasing_ids() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());

        let first = store_push_toast(&store, ToastKind::Success, "Saved".to_string());
        let second = store_push_toast(&store, ToastKind::Error, "Failed".to_string());
        assert_eq!((first, second), (1, 2));

        let toasts = store_toasts(&store);
        assert_eq!(toasts.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(toasts[1].kind, ToastKind::Error);
        assert_eq!(toasts[1].message, "Failed");
    }

    #[test]
    fn test_dismiss_removes_only_matching_toast() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());
        for message in ["one", "two", "three"] {
            store_push_toast(&store, ToastKind::Success, message.to_string());
        }

        store_dismiss_toast(&store, 2);
        store_dismiss_toast(&store, 42);
        let ids: Vec<u32> = store_toasts(&store).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);

        // Ids are not reused after a dismissal
        assert_eq!(store_push_toast(&store, ToastKind::Success, "four".to_string()), 4);
    }
}
