//! Pagination windows.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::query::PageRequest;

/// One page of a filtered collection plus the numbers needed to walk it.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Element count before slicing.
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    /// `ceil(total / limit)`; zero for an empty collection.
    pub total_pages: usize,
}

/// Slice `[(page - 1) * limit, (page - 1) * limit + limit)` clamped to the
/// bounds of `items`.
pub fn paginate<T: Clone>(items: &[T], window: PageRequest) -> Paginated<T> {
    let page = window.page.get();
    let limit = window.limit.get();
    let total = items.len();

    let start = (page - 1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);

    Paginated {
        items: items[start..end].to_vec(),
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    }
}

impl<T> Paginated<T> {
    /// JSON view with the items under `key`, followed by the counters.
    pub fn keyed(&self, key: &'static str) -> KeyedPage<'_, T> {
        KeyedPage { key, page: self }
    }
}

/// Serializes as `{<key>: [...], total, page, limit, totalPages}`.
pub struct KeyedPage<'a, T> {
    key: &'static str,
    page: &'a Paginated<T>,
}

impl<T: Serialize> Serialize for KeyedPage<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry(self.key, &self.page.items)?;
        map.serialize_entry("total", &self.page.total)?;
        map.serialize_entry("page", &self.page.page)?;
        map.serialize_entry("limit", &self.page.limit)?;
        map.serialize_entry("totalPages", &self.page.total_pages)?;
        map.end()
    }
}
