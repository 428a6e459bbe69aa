//! Leptos URL State Utilities
//!
//! Query-string handling and input debouncing for Leptos apps that keep
//! view state in the URL.
//! - `QueryParams`: ordered key/value pairs with `URLSearchParams` semantics
//! - `Generation`: ticket counter for cancelling superseded async work
//! - `use_debounced`: signal that only follows its source once it settles

mod debounce;
mod params;

pub use debounce::{use_debounced, Generation};
pub use params::QueryParams;
