//! Record types exposed by the API.

use serde::{Deserialize, Serialize, Serializer};

/// Common surface of the three resource record kinds.
pub trait Record {
    /// Plural collection name, also the JSON key of list responses.
    const COLLECTION: &'static str;
    /// Singular lowercase name used in "Invalid <x> ID".
    const SINGULAR: &'static str;
    /// Capitalised name used in "<X> not found".
    const LABEL: &'static str;

    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub category: String,
    pub stock: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Calendar date, kept as text (`YYYY-MM-DD`).
    pub date: String,
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const SINGULAR: &'static str = "user";
    const LABEL: &'static str = "User";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Product {
    const COLLECTION: &'static str = "products";
    const SINGULAR: &'static str = "product";
    const LABEL: &'static str = "Product";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Post {
    const COLLECTION: &'static str = "posts";
    const SINGULAR: &'static str = "post";
    const LABEL: &'static str = "Post";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Whole prices are written as JSON integers (`50`, not `50.0`).
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    if price.fract() == 0.0 && price.abs() < EXACT_LIMIT {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}
