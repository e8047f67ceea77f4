//! Record predicates.

use crate::catalog::{Post, Product, User};
use crate::query::{PostQuery, ProductQuery, UserQuery};

/// A conjunction of predicates over one record kind.
pub trait RecordFilter<R> {
    fn accepts(&self, record: &R) -> bool;
}

/// Keep the records accepted by `query`, in their original order.
pub fn filter<'a, R, Q>(records: &'a [R], query: &Q) -> Vec<&'a R>
where
    Q: RecordFilter<R>,
{
    records.iter().filter(|r| query.accepts(r)).collect()
}

impl RecordFilter<User> for UserQuery {
    fn accepts(&self, user: &User) -> bool {
        self.role.as_deref().map_or(true, |role| user.role == role)
    }
}

impl RecordFilter<Product> for ProductQuery {
    fn accepts(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| product.category == category)
            && self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
    }
}

impl RecordFilter<Post> for PostQuery {
    fn accepts(&self, post: &Post) -> bool {
        self.author.as_deref().map_or(true, |needle| {
            post.author.to_lowercase().contains(&needle.to_lowercase())
        })
    }
}
