use std::{env, path::PathBuf};

use crate::errors::ConfigError;

pub const DEFAULT_INPUT_SELECTOR: &str = "#live-search";
pub const DEFAULT_RESULTS_SELECTOR: &str = "#live-search-results";
pub const DEFAULT_ENDPOINT_URL: &str = "/live-search/";
pub const DEFAULT_MIN_QUERY_LENGTH: usize = 2;

/// Where the watcher reads queries from, where it writes results, and where
/// it sends them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub input_selector: String,
    pub results_selector: String,

    /// Used when the input element carries no `search-url` data attribute.
    pub endpoint_url: String,

    /// Queries must be strictly longer than this to be sent.
    pub min_query_length: usize,
}

impl Default for SearchConfig {

    fn default() -> Self {
        Self {
            input_selector: DEFAULT_INPUT_SELECTOR.to_string(),
            results_selector: DEFAULT_RESULTS_SELECTOR.to_string(),
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
        }
    }

}

impl SearchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min_query_length = match lookup("MIN_QUERY_LENGTH") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "MIN_QUERY_LENGTH", value })?,
            None => defaults.min_query_length,
        };

        Ok(Self {
            input_selector: lookup("SEARCH_INPUT_SELECTOR").unwrap_or(defaults.input_selector),
            results_selector: lookup("SEARCH_RESULTS_SELECTOR").unwrap_or(defaults.results_selector),
            endpoint_url: lookup("SEARCH_URL").unwrap_or(defaults.endpoint_url),
            min_query_length,
        })
    }

    /// Whether a query of this length is sent to the endpoint.
    pub fn should_search(&self, query: &str) -> bool {
        query.chars().count() > self.min_query_length
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
    pub directory_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup("ADDRESS").ok_or(ConfigError::Missing { key: "ADDRESS" })?;
        let directory_path = lookup("DIRECTORY_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            address,
            directory_path,
        })
    }
}
