//! Cache key derivation for each cached use case.

use std::fmt;

/// Namespace holding distance calculation results.
pub const DISTANCE_NAMESPACE: &str = "distance";

/// Namespace holding paginated history listings.
pub const HISTORY_NAMESPACE: &str = "history";

// == Distance Key ==
/// Key for a distance calculation: `"{address1}:{address2}"`.
///
/// Addresses are normalized (trimmed, inner whitespace collapsed, lowercased)
/// so that trivially different spellings of one request share an entry.
/// The pair keeps its order since responses report the addresses positionally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DistanceKey(String);

impl DistanceKey {
    pub fn new(address1: &str, address2: &str) -> Self {
        Self(format!(
            "{}:{}",
            normalize_address(address1),
            normalize_address(address2)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == History Key ==
/// Key for one history page: `"page:{page}:size:{page_size}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    pub page: u32,
    pub page_size: u32,
}

impl HistoryKey {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    pub fn to_key(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HistoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page:{}:size:{}", self.page, self.page_size)
    }
}

fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
