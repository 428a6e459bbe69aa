//! UI Components
//!
//! Reusable Leptos components.

mod feedback;
mod filter_bar;
mod forms;
mod product_form;
mod product_image;
mod product_table;
mod require_auth;

pub use feedback::{ErrorMessage, LoadingSpinner, Toaster};
pub use filter_bar::FilterBar;
pub use forms::{FormError, FormField, FormInput, FormSelect, FormTextarea};
pub use product_form::ProductForm;
pub use product_image::ProductImage;
pub use product_table::ProductTable;
pub use require_auth::{RedirectIfAuthenticated, RequireAuth};
