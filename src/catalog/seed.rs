//! Catalog sources: the compiled-in reference data and JSON seed files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{Catalog, CatalogError, Post, Product, User};

/// Shape of a JSON seed document. Missing collections are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeedFile {
    users: Vec<User>,
    products: Vec<Product>,
    posts: Vec<Post>,
}

/// Load and validate a catalog from a JSON seed file.
pub fn load_seed_file(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    let seed: SeedFile = serde_json::from_str(&content)?;
    Catalog::new(seed.users, seed.products, seed.posts)
}

/// The reference data set: five users, five products, five posts.
pub fn reference() -> Catalog {
    Catalog {
        users: vec![
            user(1, "John Doe", "john@example.com", "admin"),
            user(2, "Jane Smith", "jane@example.com", "user"),
            user(3, "Bob Johnson", "bob@example.com", "user"),
            user(4, "Alice Brown", "alice@example.com", "moderator"),
            user(5, "Charlie Wilson", "charlie@example.com", "user"),
        ],
        products: vec![
            product(1, "Laptop", 999.99, "Electronics", 50),
            product(2, "Smartphone", 699.99, "Electronics", 100),
            product(3, "Headphones", 199.99, "Audio", 75),
            product(4, "Coffee Maker", 89.99, "Kitchen", 30),
            product(5, "Running Shoes", 129.99, "Sports", 60),
        ],
        posts: vec![
            post(
                1,
                "Getting Started with HTTP/2",
                "HTTP/2 is the latest version of the HTTP protocol...",
                "John Doe",
                "2024-01-15",
            ),
            post(
                2,
                "Next.js Best Practices",
                "Next.js provides many features out of the box...",
                "Jane Smith",
                "2024-01-14",
            ),
            post(
                3,
                "TypeScript Tips and Tricks",
                "TypeScript adds static typing to JavaScript...",
                "Bob Johnson",
                "2024-01-13",
            ),
            post(
                4,
                "Express.js API Development",
                "Express.js is a minimal and flexible Node.js web application framework...",
                "Alice Brown",
                "2024-01-12",
            ),
            post(
                5,
                "Modern Web Development",
                "Modern web development involves many technologies...",
                "Charlie Wilson",
                "2024-01-11",
            ),
        ],
    }
}

fn user(id: i64, name: &str, email: &str, role: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
    }
}

fn product(id: i64, name: &str, price: f64, category: &str, stock: u64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price,
        category: category.to_string(),
        stock,
    }
}

fn post(id: i64, title: &str, content: &str, author: &str, date: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        author: author.to_string(),
        date: date.to_string(),
    }
}
