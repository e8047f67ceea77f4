//! In-memory record catalog.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     seed.rs (compiled-in reference data)  ─┐
//!     seed.rs (optional JSON seed file)     ─┴→ Catalog::new
//!     → validate (unique ids, sane prices)
//!     → Arc<Catalog> handed to the router
//!
//! Request time:
//!     router borrows &Catalog (read-only, never mutated)
//! ```
//!
//! # Design Decisions
//! - Collections are plain `Vec`s; insertion order is the response order
//! - The catalog is constructed once and injected, never global
//! - Validation runs before the server accepts traffic

pub mod records;
pub mod seed;

use std::collections::HashSet;

pub use records::{Post, Product, Record, User};

/// Errors raised while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {collection} id {id}")]
    DuplicateId { collection: &'static str, id: i64 },

    #[error("product {id} has invalid price {price}")]
    InvalidPrice { id: i64, price: f64 },

    #[error("total product stock exceeds {}", u64::MAX)]
    StockOverflow,

    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable set of the three record collections served by the API.
#[derive(Debug, Clone)]
pub struct Catalog {
    users: Vec<User>,
    products: Vec<Product>,
    posts: Vec<Post>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, negative or non-finite
    /// prices and a stock total that does not fit in `u64`.
    pub fn new(
        users: Vec<User>,
        products: Vec<Product>,
        posts: Vec<Post>,
    ) -> Result<Self, CatalogError> {
        ensure_unique_ids(&users)?;
        ensure_unique_ids(&products)?;
        ensure_unique_ids(&posts)?;

        if let Some(bad) = products
            .iter()
            .find(|p| !p.price.is_finite() || p.price < 0.0)
        {
            return Err(CatalogError::InvalidPrice {
                id: bad.id,
                price: bad.price,
            });
        }

        products
            .iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.stock))
            .ok_or(CatalogError::StockOverflow)?;

        Ok(Self {
            users,
            products,
            posts,
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}

fn ensure_unique_ids<R: Record>(records: &[R]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id()) {
            return Err(CatalogError::DuplicateId {
                collection: R::COLLECTION,
                id: record.id(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("p{id}"),
            price,
            category: "Misc".into(),
            stock: 1,
        }
    }

    #[test]
    fn reference_catalog_is_valid() {
        let catalog = seed::reference();
        assert_eq!(catalog.users().len(), 5);
        assert_eq!(catalog.products().len(), 5);
        assert_eq!(catalog.posts().len(), 5);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![], vec![product(1, 1.0), product(1, 2.0)], vec![]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateId { collection: "products", id: 1 }
        ));
    }

    #[test]
    fn rejects_negative_and_nan_prices() {
        assert!(matches!(
            Catalog::new(vec![], vec![product(1, -0.5)], vec![]),
            Err(CatalogError::InvalidPrice { id: 1, .. })
        ));
        assert!(matches!(
            Catalog::new(vec![], vec![product(2, f64::NAN)], vec![]),
            Err(CatalogError::InvalidPrice { id: 2, .. })
        ));
    }

    #[test]
    fn rejects_stock_total_overflow() {
        let mut a = product(1, 1.0);
        let mut b = product(2, 1.0);
        a.stock = u64::MAX;
        b.stock = u64::MAX;
        assert!(matches!(
            Catalog::new(vec![], vec![a, b], vec![]),
            Err(CatalogError::StockOverflow)
        ));

        let mut max = product(3, 1.0);
        max.stock = u64::MAX;
        assert!(Catalog::new(vec![], vec![max], vec![]).is_ok());
    }

    #[test]
    fn preserves_insertion_order() {
        let catalog = Catalog::new(vec![], vec![product(3, 1.0), product(1, 1.0)], vec![]).unwrap();
        let ids: Vec<i64> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
