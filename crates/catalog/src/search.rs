use crate::product::Product;

pub const MAX_SEARCH_RESULTS: usize = 10;

/// Type-ahead search. Item-number matches (whitespace ignored on both
/// sides) come first, then display-name matches; at most
/// [`MAX_SEARCH_RESULTS`]. A blank query matches nothing.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let raw = query.trim().to_lowercase();
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Vec::new();
    }

    let mut item_matches = Vec::new();
    let mut name_matches = Vec::new();
    for product in products {
        let item: String = product
            .item_number
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let name = product.display_name().unwrap_or("").to_lowercase();
        if item.contains(&compact) {
            item_matches.push(product);
        } else if name.contains(&raw) {
            name_matches.push(product);
        }
    }

    item_matches
        .into_iter()
        .chain(name_matches)
        .take(MAX_SEARCH_RESULTS)
        .collect()
}

/// Product named by `key` (id or item number).
pub fn find_product<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.matches_key(key))
}
