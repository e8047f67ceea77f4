//! Typed per-resource query options.

use std::num::NonZeroUsize;

use super::{QueryError, QueryParams};
use crate::catalog::{Post, Product, Record, User};

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Options of a collection query, parsed once from the raw parameters.
pub trait ResourceQuery: Sized {
    type Record: Record;

    fn from_params(params: &QueryParams) -> Result<Self, QueryError>;

    /// Pagination window requested alongside the filters.
    fn window(&self) -> PageRequest;
}

/// 1-based page number and page size. Both are non-zero by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: NonZeroUsize,
    pub limit: NonZeroUsize,
}

impl PageRequest {
    pub fn new(page: NonZeroUsize, limit: NonZeroUsize) -> Self {
        Self { page, limit }
    }

    pub fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            page: positive(params, "page", DEFAULT_PAGE)?,
            limit: positive(params, "limit", DEFAULT_LIMIT)?,
        })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: NonZeroUsize::MIN,
            limit: NonZeroUsize::new(DEFAULT_LIMIT).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub window: PageRequest,
    /// Exact, case-sensitive role match.
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub window: PageRequest,
    /// Exact, case-sensitive category match.
    pub category: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostQuery {
    pub window: PageRequest,
    /// Case-insensitive substring of the author name.
    pub author: Option<String>,
}

impl ResourceQuery for UserQuery {
    type Record = User;

    fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            window: PageRequest::from_params(params)?,
            role: params.get("role").map(str::to_string),
        })
    }

    fn window(&self) -> PageRequest {
        self.window
    }
}

impl ResourceQuery for ProductQuery {
    type Record = Product;

    fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            window: PageRequest::from_params(params)?,
            category: params.get("category").map(str::to_string),
            min_price: finite(params, "minPrice")?,
            max_price: finite(params, "maxPrice")?,
        })
    }

    fn window(&self) -> PageRequest {
        self.window
    }
}

impl ResourceQuery for PostQuery {
    type Record = Post;

    fn from_params(params: &QueryParams) -> Result<Self, QueryError> {
        Ok(Self {
            window: PageRequest::from_params(params)?,
            author: params.get("author").map(str::to_string),
        })
    }

    fn window(&self) -> PageRequest {
        self.window
    }
}

fn positive(
    params: &QueryParams,
    name: &'static str,
    default: usize,
) -> Result<NonZeroUsize, QueryError> {
    let Some(raw) = params.get(name) else {
        return NonZeroUsize::new(default).ok_or(QueryError::NotPositiveInteger(name));
    };
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(QueryError::NotPositiveInteger(name))
}

fn finite(params: &QueryParams, name: &'static str) -> Result<Option<f64>, QueryError> {
    params
        .get(name)
        .map(|raw| match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(QueryError::NotFiniteNumber(name)),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> QueryParams {
        QueryParams::parse(query).unwrap()
    }

    #[test]
    fn defaults_to_first_page_of_ten() {
        let window = PageRequest::from_params(&QueryParams::default()).unwrap();
        assert_eq!(window.page.get(), 1);
        assert_eq!(window.limit.get(), 10);
        assert_eq!(window, PageRequest::default());
    }

    #[test]
    fn rejects_zero_negative_and_non_numeric_windows() {
        for query in ["limit=0", "page=0", "page=-1", "limit=abc", "page=2x", "limit=1.5"] {
            assert!(
                PageRequest::from_params(&params(query)).is_err(),
                "{query} should be rejected"
            );
        }
        assert_eq!(
            PageRequest::from_params(&params("limit=0")),
            Err(QueryError::NotPositiveInteger("limit"))
        );
    }

    #[test]
    fn parses_product_bounds() {
        let q = ProductQuery::from_params(&params("minPrice=100&maxPrice=700.5&category=Audio")).unwrap();
        assert_eq!(q.min_price, Some(100.0));
        assert_eq!(q.max_price, Some(700.5));
        assert_eq!(q.category.as_deref(), Some("Audio"));
    }

    #[test]
    fn rejects_non_finite_prices() {
        for query in ["minPrice=cheap", "maxPrice=NaN", "maxPrice=inf"] {
            assert!(ProductQuery::from_params(&params(query)).is_err());
        }
        assert_eq!(
            ProductQuery::from_params(&params("minPrice=abc")),
            Err(QueryError::NotFiniteNumber("minPrice"))
        );
    }

    #[test]
    fn ignores_unrelated_parameters() {
        let q = UserQuery::from_params(&params("category=Audio&author=x")).unwrap();
        assert_eq!(q, UserQuery::default());
    }
}
