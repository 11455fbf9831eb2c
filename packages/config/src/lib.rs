#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Startup configuration for the usuarios server.
//!
//! All values come from environment variables with fixed defaults. The
//! config is built once at process start and passed around immutably.

use std::env;

pub const DEFAULT_API_URL: &str = "https://randomuser.me/api";
pub const DEFAULT_RESULTS: u32 = 10;
pub const DEFAULT_NAT: &str = "br";
pub const DEFAULT_SEED: &str = "ipm-demo";
pub const DEFAULT_TOTAL_PAGES: u32 = 42;

/// Immutable server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the upstream random user API, without a trailing slash.
    pub api_url: String,
    /// Number of results per request when the caller omits `results`.
    pub default_results: u32,
    /// Nationality code when the caller omits `nat`.
    pub default_nat: String,
    /// Seed sent upstream for reproducible pages.
    pub seed: String,
    /// Static page count echoed in the response envelope. Not derived from
    /// data.
    pub total_pages: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_results: DEFAULT_RESULTS,
            default_nat: DEFAULT_NAT.to_string(),
            seed: DEFAULT_SEED.to_string(),
            total_pages: DEFAULT_TOTAL_PAGES,
        }
    }
}

impl ServerConfig {
    /// Builds the config from the process environment:
    /// `RANDOM_USER_API_URL`, `DEFAULT_RESULTS`, `DEFAULT_NAT`,
    /// `RANDOM_USER_SEED` and `PAGINATION_TOTAL_PAGES`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Missing or
    /// unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("RANDOM_USER_API_URL").map_or_else(
                || DEFAULT_API_URL.to_string(),
                |x| x.trim_end_matches('/').to_string(),
            ),
            default_results: parse_var(
                lookup("DEFAULT_RESULTS"),
                "DEFAULT_RESULTS",
                DEFAULT_RESULTS,
            ),
            default_nat: lookup("DEFAULT_NAT").unwrap_or_else(|| DEFAULT_NAT.to_string()),
            seed: lookup("RANDOM_USER_SEED").unwrap_or_else(|| DEFAULT_SEED.to_string()),
            total_pages: parse_var(
                lookup("PAGINATION_TOTAL_PAGES"),
                "PAGINATION_TOTAL_PAGES",
                DEFAULT_TOTAL_PAGES,
            ),
        }
    }
}

fn parse_var(value: Option<String>, name: &str, default: u32) -> u32 {
    value.map_or(default, |x| match x.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            log::warn!("Invalid {name} value '{x}', using default {default}");
            default
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test_log::test]
    fn test_defaults_when_no_vars_set() {
        let config = ServerConfig::from_lookup(|_| None);

        assert_eq!(config, ServerConfig::default());
    }

    #[test_log::test]
    fn test_reads_all_vars() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("RANDOM_USER_API_URL", "https://example.com/api"),
            ("DEFAULT_RESULTS", "25"),
            ("DEFAULT_NAT", "us"),
            ("RANDOM_USER_SEED", "test-seed"),
            ("PAGINATION_TOTAL_PAGES", "7"),
        ]));

        assert_eq!(config.api_url, "https://example.com/api");
        assert_eq!(config.default_results, 25);
        assert_eq!(config.default_nat, "us");
        assert_eq!(config.seed, "test-seed");
        assert_eq!(config.total_pages, 7);
    }

    #[test_log::test]
    fn test_trims_trailing_slash_from_api_url() {
        let config = ServerConfig::from_lookup(lookup_from(&[(
            "RANDOM_USER_API_URL",
            "https://example.com/api/",
        )]));

        assert_eq!(config.api_url, "https://example.com/api");
    }

    #[test_log::test]
    fn test_invalid_numeric_var_falls_back_to_default() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("DEFAULT_RESULTS", "lots"),
            ("PAGINATION_TOTAL_PAGES", "-3"),
        ]));

        assert_eq!(config.default_results, DEFAULT_RESULTS);
        assert_eq!(config.total_pages, DEFAULT_TOTAL_PAGES);
    }
}
