//! Listing Utilities
//!
//! Helper functions for rendering the product table.

use std::cmp::Ordering;

use crate::config::PLACEHOLDER_IMAGE;
use crate::models::{Product, ProductPagination, ProductSort, SortDirection, SortField};

/// Sort the rows of the current page
pub fn sort_products(products: &[Product], sort: ProductSort) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::Title => compare_titles(&a.title, &b.title),
            SortField::Price => a.price.total_cmp(&b.price),
        };
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

// Case-insensitive first, ordinal to keep the order total
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Clicking a header: same field flips ascending to descending, anything else starts ascending
pub fn next_sort(current: ProductSort, field: SortField) -> ProductSort {
    let direction = if current.field == field && current.direction == SortDirection::Asc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    ProductSort { field, direction }
}

/// 1-based page number
pub fn page_number(pagination: ProductPagination) -> u32 {
    pagination.offset / pagination.limit.max(1) + 1
}

pub fn previous_offset(pagination: ProductPagination) -> u32 {
    pagination.offset.saturating_sub(pagination.limit)
}

pub fn next_offset(pagination: ProductPagination) -> u32 {
    pagination.offset.saturating_add(pagination.limit)
}

/// A short page means there is nothing after it
pub fn has_next_page(rows: usize, pagination: ProductPagination) -> bool {
    rows >= pagination.limit as usize
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

pub fn primary_image(product: &Product) -> &str {
    product
        .images
        .iter()
        .map(String::as_str)
        .find(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn make_product(id: u32, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            description: String::new(),
            images: Vec::new(),
            category: Category {
                id: 1,
                name: "Misc".to_string(),
                image: String::new(),
                slug: None,
            },
            creation_at: None,
            updated_at: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let products = vec![
            make_product(1, "banana", 3.0),
            make_product(2, "Apple", 2.0),
            make_product(3, "cherry", 1.0),
        ];
        let asc = sort_products(&products, ProductSort { field: SortField::Title, direction: SortDirection::Asc });
        assert_eq!(ids(&asc), vec![2, 1, 3]);

        let desc = sort_products(&products, ProductSort { field: SortField::Title, direction: SortDirection::Desc });
        assert_eq!(ids(&desc), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_by_price() {
        let products = vec![
            make_product(1, "a", 10.5),
            make_product(2, "b", 2.0),
            make_product(3, "c", 100.0),
        ];
        let asc = sort_products(&products, ProductSort { field: SortField::Price, direction: SortDirection::Asc });
        assert_eq!(ids(&asc), vec![2, 1, 3]);
    }

    #[test]
    fn test_next_sort_toggles() {
        let title_asc = ProductSort::default();
        let flipped = next_sort(title_asc, SortField::Title);
        assert_eq!(flipped.direction, SortDirection::Desc);
        assert_eq!(next_sort(flipped, SortField::Title).direction, SortDirection::Asc);

        let by_price = next_sort(flipped, SortField::Price);
        assert_eq!(by_price, ProductSort { field: SortField::Price, direction: SortDirection::Asc });
    }

    #[test]
    fn test_pagination_helpers() {
        let page = ProductPagination { limit: 10, offset: 20 };
        assert_eq!(page_number(page), 3);
        assert_eq!(previous_offset(page), 10);
        assert_eq!(next_offset(page), 30);
        assert_eq!(previous_offset(ProductPagination { limit: 10, offset: 5 }), 0);

        assert!(has_next_page(10, page));
        assert!(!has_next_page(7, page));
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(format_price(12.0), "$12.00");
        assert_eq!(format_price(3.456), "$3.46");

        let mut product = make_product(1, "a", 1.0);
        assert_eq!(primary_image(&product), PLACEHOLDER_IMAGE);
        product.images = vec![String::new(), "https://img.example/a.png".to_string()];
        assert_eq!(primary_image(&product), "https://img.example/a.png");
    }
}
