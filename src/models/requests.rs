//! Request DTOs for the distance API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Maximum accepted address length, in characters
pub const MAX_ADDRESS_LENGTH: usize = 200;

/// Largest page size the history endpoint serves
pub const MAX_PAGE_SIZE: u32 = 100;

/// Request body for POST /distance/calculate
#[derive(Debug, Clone, Deserialize)]
pub struct AddressRequest {
    /// First free-text address
    pub address1: String,
    /// Second free-text address
    pub address2: String,
}

impl AddressRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_address("address1", &self.address1)
            .or_else(|| validate_address("address2", &self.address2))
    }
}

fn validate_address(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{} must not be empty or whitespace", field));
    }
    if value.chars().count() > MAX_ADDRESS_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_ADDRESS_LENGTH
        ));
    }
    None
}

/// Query string for GET /history
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HistoryQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl HistoryQuery {
    pub fn validate(&self) -> Option<String> {
        if self.page < 1 {
            return Some("page must be at least 1".to_string());
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Some(format!("page_size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        None
    }
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}
