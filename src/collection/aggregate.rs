//! Aggregate statistics over the full catalog.

use serde::Serialize;

use crate::catalog::Catalog;

/// Summary of the unfiltered catalog, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    pub total_products: usize,
    pub total_posts: usize,
    /// Mean product price as text with exactly two fraction digits.
    pub average_product_price: String,
    pub total_stock: u64,
}

impl Stats {
    pub fn compute(catalog: &Catalog) -> Self {
        let products = catalog.products();

        let average = if products.is_empty() {
            0.0
        } else {
            products.iter().map(|p| p.price).sum::<f64>() / products.len() as f64
        };

        Self {
            total_users: catalog.users().len(),
            total_products: products.len(),
            total_posts: catalog.posts().len(),
            average_product_price: to_fixed_2(average),
            // the catalog rejects stock totals beyond u64
            total_stock: products.iter().fold(0u64, |acc, p| acc.saturating_add(p.stock)),
        }
    }
}

/// Two fraction digits, ties rounded up.
///
/// A non-negative double sits exactly between two hundredths only when it is
/// an odd multiple of 1/8 (`x.125`, `x.375`, `x.625`, `x.875`); those are
/// rounded in integer thousandths, everything else by the formatter.
fn to_fixed_2(value: f64) -> String {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    let eighths = value * 8.0;
    if eighths >= 0.0 && eighths < EXACT_LIMIT && eighths.fract() == 0.0 {
        let eighths = eighths as u64;
        if eighths % 2 == 1 {
            let hundredths = (u128::from(eighths) * 125 + 5) / 10;
            return format!("{}.{:02}", hundredths / 100, hundredths % 100);
        }
    }
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed, Product};

    #[test]
    fn reference_stats() {
        let stats = Stats::compute(&seed::reference());
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.total_products, 5);
        assert_eq!(stats.total_posts, 5);
        // (999.99 + 699.99 + 199.99 + 89.99 + 129.99) / 5
        assert_eq!(stats.average_product_price, "423.99");
        assert_eq!(stats.total_stock, 50 + 100 + 75 + 30 + 60);
    }

    #[test]
    fn empty_catalog_averages_to_zero() {
        let catalog = Catalog::new(vec![], vec![], vec![]).unwrap();
        let stats = Stats::compute(&catalog);
        assert_eq!(stats.average_product_price, "0.00");
        assert_eq!(stats.total_stock, 0);
    }

    fn product(id: i64, price: f64, stock: u64) -> Product {
        Product {
            id,
            name: format!("p{id}"),
            price,
            category: "Misc".into(),
            stock,
        }
    }

    #[test]
    fn exact_ties_round_up() {
        let catalog = Catalog::new(vec![], vec![product(1, 0.125, 1), product(2, 0.125, 1)], vec![]).unwrap();
        assert_eq!(Stats::compute(&catalog).average_product_price, "0.13");

        assert_eq!(to_fixed_2(2.375), "2.38");
        assert_eq!(to_fixed_2(0.625), "0.63");
        assert_eq!(to_fixed_2(10.875), "10.88");
    }

    #[test]
    fn non_ties_use_nearest() {
        assert_eq!(to_fixed_2(0.0), "0.00");
        assert_eq!(to_fixed_2(0.25), "0.25");
        assert_eq!(to_fixed_2(1.005), "1.00"); // stored just below 1.005
        assert_eq!(to_fixed_2(423.99), "423.99");
        assert_eq!(to_fixed_2(50.0), "50.00");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Stats::compute(&seed::reference())).unwrap();
        assert_eq!(json["averageProductPrice"], "423.99");
        assert_eq!(json["totalStock"], 315);
    }
}
