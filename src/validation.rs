//! Form Validation
//!
//! Field rules for the login, product and filter forms. Inputs arrive as raw
//! strings from the DOM; each validator either returns typed data or the
//! per-field messages to show next to the inputs.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{LoginRequest, Product, ProductFormData};
use crate::query_state::format_number;

/// Field path -> message, first error per field wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

// ========================
// Field Rules
// ========================

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Err("Email is required");
    }
    let well_formed = !email.starts_with('.') && !email.contains("..") && email_regex().is_match(email);
    if !well_formed {
        return Err("Invalid email address");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

pub fn is_valid_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok()
}

/// Optional URL field: empty is allowed
pub fn validate_url(value: &str) -> Result<(), &'static str> {
    if value.is_empty() || is_valid_url(value) {
        Ok(())
    } else {
        Err("Must be a valid URL")
    }
}

/// Empty -> absent; anything else must be a finite number
pub fn parse_price_input(input: &str) -> Result<Option<f64>, &'static str> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or("Price must be a number")
}

// ========================
// Forms
// ========================

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Err(message) = validate_email(email) {
        errors.add("email", message);
    }
    if let Err(message) = validate_password(password) {
        errors.add("password", message);
    }
    errors.into_result(|| LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Raw product form contents as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFormInput {
    pub title: String,
    pub price: String,
    pub description: String,
    pub images: Vec<String>,
    pub category_id: String,
}

impl ProductFormInput {
    /// Starting point for the create form
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            price: "0".to_string(),
            description: String::new(),
            images: vec![String::new()],
            category_id: "0".to_string(),
        }
    }

    pub fn from_product(product: &Product) -> Self {
        let images = if product.images.is_empty() {
            vec![String::new()]
        } else {
            product.images.clone()
        };
        Self {
            title: product.title.clone(),
            price: format_number(product.price),
            description: product.description.clone(),
            images,
            category_id: product.category.id.to_string(),
        }
    }
}

pub fn validate_product_form(input: &ProductFormInput) -> Result<ProductFormData, FieldErrors> {
    let mut errors = FieldErrors::new();

    if input.title.chars().count() < 3 {
        errors.add("title", "Title must be at least 3 characters");
    }

    let price = input
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite());
    match price {
        None => errors.add("price", "Price must be a number"),
        Some(p) if p < 0.0 => errors.add("price", "Price must be positive"),
        Some(_) => {}
    }

    if input.description.is_empty() {
        errors.add("description", "Description is required");
    }

    if input.images.is_empty() {
        errors.add("images", "At least one image URL is required");
    }
    for (index, image) in input.images.iter().enumerate() {
        if !is_valid_url(image) {
            errors.add(format!("images.{}", index), "Must be a valid URL");
        }
    }

    let category = input
        .category_id
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|c| c.is_finite());
    match category {
        None => errors.add("categoryId", "Category must be selected"),
        Some(c) if c < 1.0 || c.fract() != 0.0 || c > u32::MAX as f64 => {
            errors.add("categoryId", "Category is required")
        }
        Some(_) => {}
    }

    errors.into_result(|| ProductFormData {
        title: input.title.clone(),
        price: price.unwrap_or_default(),
        description: input.description.clone(),
        images: input.images.clone(),
        category_id: category.map(|c| c as u32).unwrap_or_default(),
    })
}

/// Price range filter: both bounds optional and non-negative, `min <= max`
pub fn validate_price_filter(
    min_input: &str,
    max_input: &str,
) -> Result<(Option<f64>, Option<f64>), FieldErrors> {
    let mut errors = FieldErrors::new();

    let mut check = |field: &str, input: &str| match parse_price_input(input) {
        Ok(Some(price)) if price < 0.0 => {
            errors.add(field, "Price must be positive or zero");
            None
        }
        Ok(price) => price,
        Err(message) => {
            errors.add(field, message);
            None
        }
    };
    let price_min = check("price_min", min_input);
    let price_max = check("price_max", max_input);

    if let (Some(min), Some(max)) = (price_min, price_max) {
        if min > max {
            errors.add("price_max", "Min price cannot be greater than max price");
        }
    }

    errors.into_result(|| (price_min, price_max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product_input() -> ProductFormInput {
        ProductFormInput {
            title: "Test Product".to_string(),
            price: "99.99".to_string(),
            description: "Test description".to_string(),
            images: vec!["https://example.com/image.jpg".to_string()],
            category_id: "1".to_string(),
        }
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email("test@example.com"), Ok(()));
        assert_eq!(validate_email(""), Err("Email is required"));
        assert_eq!(validate_email("invalid-email"), Err("Invalid email address"));
        assert_eq!(validate_email(".john@example.com"), Err("Invalid email address"));
        assert_eq!(validate_email("john..doe@example.com"), Err("Invalid email address"));
        assert_eq!(validate_email("john@example.c"), Err("Invalid email address"));
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password("password123"), Ok(()));
        assert_eq!(validate_password(""), Err("Password is required"));
        assert_eq!(validate_password("12345"), Err("Password must be at least 6 characters"));
    }

    #[test]
    fn test_url_rules() {
        assert_eq!(validate_url("https://example.com/image.jpg"), Ok(()));
        assert_eq!(validate_url(""), Ok(()));
        assert_eq!(validate_url("not-a-url"), Err("Must be a valid URL"));
    }

    #[test]
    fn test_login_collects_both_fields() {
        let errors = validate_login("bad", "123").unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("password"), Some("Password must be at least 6 characters"));

        let request = validate_login("john@mail.com", "changeme").unwrap();
        assert_eq!(request.email, "john@mail.com");
    }

    #[test]
    fn test_valid_product_form() {
        let data = validate_product_form(&valid_product_input()).unwrap();
        assert_eq!(data.price, 99.99);
        assert_eq!(data.category_id, 1);
        assert_eq!(data.images.len(), 1);
    }

    #[test]
    fn test_product_form_messages() {
        let mut input = valid_product_input();
        input.title = "ab".to_string();
        input.price = "-1".to_string();
        input.description = String::new();
        input.category_id = "0".to_string();
        let errors = validate_product_form(&input).unwrap_err();
        assert_eq!(errors.get("title"), Some("Title must be at least 3 characters"));
        assert_eq!(errors.get("price"), Some("Price must be positive"));
        assert_eq!(errors.get("description"), Some("Description is required"));
        assert_eq!(errors.get("categoryId"), Some("Category is required"));
    }

    #[test]
    fn test_product_form_number_parsing() {
        let mut input = valid_product_input();
        input.price = "abc".to_string();
        input.category_id = String::new();
        let errors = validate_product_form(&input).unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be a number"));
        assert_eq!(errors.get("categoryId"), Some("Category must be selected"));
    }

    #[test]
    fn test_product_form_images() {
        let mut input = valid_product_input();
        input.images = vec![];
        let errors = validate_product_form(&input).unwrap_err();
        assert_eq!(errors.get("images"), Some("At least one image URL is required"));

        input.images = vec!["https://ok.example/a.png".to_string(), "nope".to_string()];
        let errors = validate_product_form(&input).unwrap_err();
        assert_eq!(errors.get("images.1"), Some("Must be a valid URL"));
        assert_eq!(errors.get("images.0"), None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_price_filter_range() {
        assert_eq!(validate_price_filter("", ""), Ok((None, None)));
        assert_eq!(validate_price_filter("10", "10"), Ok((Some(10.0), Some(10.0))));
        assert_eq!(validate_price_filter("5", ""), Ok((Some(5.0), None)));

        let errors = validate_price_filter("100", "50").unwrap_err();
        assert_eq!(errors.get("price_max"), Some("Min price cannot be greater than max price"));
        assert_eq!(errors.get("price_min"), None);
    }

    #[test]
    fn test_price_filter_rejects_negative_and_garbage() {
        let errors = validate_price_filter("-3", "x").unwrap_err();
        assert_eq!(errors.get("price_min"), Some("Price must be positive or zero"));
        assert_eq!(errors.get("price_max"), Some("Price must be a number"));
    }

    #[test]
    fn test_form_input_from_product() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "Desk", "price": 120, "description": "Oak",
            "images": [], "category": {"id": 3, "name": "Furniture", "image": ""}
        }))
        .unwrap();
        let input = ProductFormInput::from_product(&product);
        assert_eq!(input.price, "120");
        assert_eq!(input.category_id, "3");
        assert_eq!(input.images, vec![String::new()]);
    }
}
