//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::geocoding::NominatimConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables (or a `.env`
/// file) with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries per cache namespace
    pub max_entries: usize,
    /// Default TTL in seconds for cache entries without explicit TTL
    pub default_ttl: u64,
    /// TTL in seconds for cached history pages
    pub history_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Path prefix of the versioned API routes
    pub api_prefix: String,
    /// Nominatim base URL
    pub nominatim_base_url: String,
    /// User-Agent sent to Nominatim
    pub nominatim_user_agent: String,
    /// Nominatim request timeout in seconds
    pub nominatim_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// variables already set in the environment win.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum entries per namespace (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 3600)
    /// - `HISTORY_TTL` - History page TTL in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `API_PREFIX` - Route prefix (default: /api/v1)
    /// - `NOMINATIM_BASE_URL`, `NOMINATIM_USER_AGENT`, `NOMINATIM_TIMEOUT`
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            history_ttl: parse_var("HISTORY_TTL").unwrap_or(defaults.history_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            api_prefix: env::var("API_PREFIX").unwrap_or(defaults.api_prefix),
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or(defaults.nominatim_base_url),
            nominatim_user_agent: env::var("NOMINATIM_USER_AGENT")
                .unwrap_or(defaults.nominatim_user_agent),
            nominatim_timeout: parse_var("NOMINATIM_TIMEOUT").unwrap_or(defaults.nominatim_timeout),
        }
    }

    /// Geocoder settings derived from this configuration.
    pub fn nominatim(&self) -> NominatimConfig {
        NominatimConfig {
            base_url: self.nominatim_base_url.clone(),
            user_agent: self.nominatim_user_agent.clone(),
            timeout_seconds: self.nominatim_timeout,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        let nominatim = NominatimConfig::default();
        Self {
            max_entries: 1000,
            default_ttl: 3600,
            history_ttl: 3600,
            server_port: 8000,
            cleanup_interval: 60,
            api_prefix: "/api/v1".to_string(),
            nominatim_base_url: nominatim.base_url,
            nominatim_user_agent: nominatim.user_agent,
            nominatim_timeout: nominatim.timeout_seconds,
        }
    }
}
