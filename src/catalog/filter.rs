use std::sync::Arc;

use crate::state::data::Product;

/// Filter products by a search term, keeping fetch order.
///
/// The term is trimmed; a blank term returns the whole list. Otherwise a
/// product matches when its name contains the term (case-insensitive) or
/// the decimal form of its IBU contains it. A term that parses as a finite
/// number also matches products whose IBU equals that number exactly.
pub fn filter_products(products: &[Arc<Product>], term: &str) -> Vec<Arc<Product>> {
    let normalized = term.trim();
    if normalized.is_empty() {
        return products.to_vec();
    }

    let needle = normalized.to_lowercase();
    let numeric = needle.parse::<f64>().ok().filter(|value| value.is_finite());

    products
        .iter()
        .filter(|product| matches(product, &needle, numeric))
        .cloned()
        .collect()
}

fn matches(product: &Product, needle: &str, numeric: Option<f64>) -> bool {
    if numeric.is_some_and(|value| product.ibu == value) {
        return true;
    }
    // f64's Display drops a trailing ".0", so 45.0 reads as "45"
    product.ibu.to_string().contains(needle) || product.name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::api::tests::product;

    fn catalog() -> Vec<Arc<Product>> {
        vec![
            Arc::new(product(1, "Pale Ale", 45.0)),
            Arc::new(product(2, "Imperial Stout", 70.0)),
            Arc::new(product(3, "Session 45", 20.0)),
            Arc::new(product(4, "Hazy IPA", 145.5)),
            Arc::new(product(5, "Brown Ale", 24.0)),
        ]
    }

    fn ids(products: &[Arc<Product>]) -> Vec<u64> {
        products.iter().map(|product| product.id).collect()
    }

    #[test]
    fn test_blank_term_returns_everything() {
        let products = catalog();
        assert_eq!(ids(&filter_products(&products, "")), [1, 2, 3, 4, 5]);
        assert_eq!(ids(&filter_products(&products, "   ")), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_blank_term_shares_the_same_products() {
        let products = catalog();
        let filtered = filter_products(&products, "");
        assert!(Arc::ptr_eq(&filtered[0], &products[0]));
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        assert_eq!(ids(&filter_products(&catalog(), "ALE")), [1, 5]);
        assert_eq!(ids(&filter_products(&catalog(), "  stout ")), [2]);
    }

    #[test]
    fn test_numeric_term_matches_ibu_and_name() {
        // IBU 45 exactly, IBU "145.5" contains "45", name contains "45"
        assert_eq!(ids(&filter_products(&catalog(), "45")), [1, 3, 4]);
    }

    #[test]
    fn test_numeric_term_matches_exact_value() {
        assert_eq!(ids(&filter_products(&catalog(), "70.0")), [2]);
    }

    #[test]
    fn test_decimal_term_matches_ibu_digits() {
        assert_eq!(ids(&filter_products(&catalog(), "5.5")), [4]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        assert!(filter_products(&catalog(), "99").is_empty());
        assert!(filter_products(&catalog(), "lambic").is_empty());
    }
}
