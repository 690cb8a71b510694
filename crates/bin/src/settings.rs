//! Environment-based configuration.

use config::{Config, ConfigError, Environment};
use hobart_data::coingecko::client::DEFAULT_BASE_URL;
use serde::Deserialize;

/// Runtime settings, read from `HOBART_*` environment variables (a local
/// `.env` file is honored).
///
/// A missing `HOBART_API_KEY` is fatal at startup: nothing in the app works
/// without provider credentials.
#[derive(Debug, Deserialize)]
pub(crate) struct Settings {
    /// CoinGecko demo API key (`HOBART_API_KEY`, required)
    pub(crate) api_key: String,
    /// Provider base URL (`HOBART_BASE_URL`, optional)
    #[serde(default = "default_base_url")]
    pub(crate) base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Settings {
    /// Load settings from the environment.
    pub(crate) fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("HOBART"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(default_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        // An empty source has no api_key, which has no default
        let result = Config::builder()
            .build()
            .unwrap()
            .try_deserialize::<Settings>();
        assert!(result.is_err());
    }
}
