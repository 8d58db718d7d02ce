//! Catalogue statistics, computed in one pass.

use indexmap::IndexMap;
use serde::Serialize;

use crate::product::Product;

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_products: usize,
    /// Category → product count, keyed in first-seen order.
    pub categories: IndexMap<String, usize>,
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub total_value: f64,
    pub average_price: f64,
    pub price_range: PriceRange,
}

pub fn compute_stats(items: &[Product]) -> Stats {
    let mut categories = IndexMap::new();
    let mut in_stock = 0;
    let mut total_value = 0.0;
    let mut range = PriceRange::default();

    for p in items {
        *categories.entry(p.category.clone()).or_insert(0) += 1;
        if p.in_stock {
            in_stock += 1;
        }
        total_value += p.price;
        range.min = Some(range.min.map_or(p.price, |m: f64| m.min(p.price)));
        range.max = Some(range.max.map_or(p.price, |m: f64| m.max(p.price)));
    }

    let total = items.len();
    let average_price = if total == 0 { 0.0 } else { total_value / total as f64 };

    Stats {
        total_products: total,
        categories,
        in_stock,
        out_of_stock: total - in_stock,
        total_value,
        average_price,
        price_range: range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn empty_collection() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_price, 0.0);
        assert_eq!(stats.price_range, PriceRange { min: None, max: None });
        assert!(stats.categories.is_empty());

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["priceRange"], serde_json::json!({ "min": null, "max": null }));
        assert_eq!(json["averagePrice"], 0.0);
    }

    #[test]
    fn seeded_collection() {
        let stats = compute_stats(&Store::seeded().snapshot());
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.in_stock, 2);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(stats.total_value, 2050.0);
        assert!((stats.average_price - 2050.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.price_range, PriceRange { min: Some(50.0), max: Some(1200.0) });
        let keys: Vec<_> = stats.categories.keys().map(String::as_str).collect();
        assert_eq!(keys, ["electronics", "appliances"]);
        assert_eq!(stats.categories["electronics"], 2);
    }

    #[test]
    fn single_item_bounds_coincide() {
        let mut items = Store::seeded().snapshot();
        items.truncate(1);
        let stats = compute_stats(&items);
        assert_eq!(stats.price_range, PriceRange { min: Some(1200.0), max: Some(1200.0) });
        assert_eq!(stats.average_price, 1200.0);
    }
}
