//! Query-string decoding.

use std::collections::HashMap;

use super::QueryError;

/// Decoded query parameters of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parse the portion of a request target after the first `?`.
    ///
    /// Pairs are `&`-separated and split on their first `=`. A pair whose
    /// key or value is empty is dropped. Keys and values are
    /// percent-decoded; `+` is kept literally.
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let mut values = HashMap::new();

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if key.is_empty() || value.is_empty() {
                continue;
            }
            values.insert(percent_decode(key)?, percent_decode(value)?);
        }

        Ok(Self { values })
    }

    /// Parse the query portion of a full request target (`/path?query`).
    pub fn from_target(target: &str) -> Result<Self, QueryError> {
        match split_target(target).1 {
            Some(query) => Self::parse(query),
            None => Ok(Self::default()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Split a request target into its path and optional query string.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Decode `%XX` escapes as UTF-8 bytes.
fn percent_decode(input: &str) -> Result<String, QueryError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
            let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
            match (hi, lo) {
                (Some(hi), Some(lo)) => {
                    decoded.push((hi << 4) | lo);
                    i += 3;
                }
                _ => return Err(QueryError::MalformedEscape(input.to_string())),
            }
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| QueryError::MalformedEscape(input.to_string()))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
