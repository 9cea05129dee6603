// Process configuration read from the environment (after loading `.env`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::modules::members::adapters::outbound::in_memory_member_collection::CollectionOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub transaction_timeout: Duration,
    pub unique_active_index: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            transaction_timeout: Duration::from_millis(5000),
            unique_active_index: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let host = lookup("MEMBERS_HOST").unwrap_or(defaults.host);
        let port = match lookup("MEMBERS_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("MEMBERS_PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };
        let transaction_timeout = match lookup("MEMBERS_TRANSACTION_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.parse().with_context(|| {
                format!("MEMBERS_TRANSACTION_TIMEOUT_MS must be milliseconds, got {raw:?}")
            })?),
            None => defaults.transaction_timeout,
        };
        let unique_active_index = match lookup("MEMBERS_UNIQUE_ACTIVE_INDEX") {
            Some(raw) => raw.parse().with_context(|| {
                format!("MEMBERS_UNIQUE_ACTIVE_INDEX must be true or false, got {raw:?}")
            })?,
            None => defaults.unique_active_index,
        };
        Ok(Self {
            host,
            port,
            transaction_timeout,
            unique_active_index,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn collection_options(&self) -> CollectionOptions {
        CollectionOptions {
            transaction_timeout: self.transaction_timeout,
            unique_active_index: self.unique_active_index,
        }
    }
}

#[cfg(test)]
mod app_config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[rstest]
    fn it_should_read_every_setting() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MEMBERS_HOST", "127.0.0.1"),
            ("MEMBERS_PORT", "9090"),
            ("MEMBERS_TRANSACTION_TIMEOUT_MS", "250"),
            ("MEMBERS_UNIQUE_ACTIVE_INDEX", "true"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
        let options = config.collection_options();
        assert_eq!(options.transaction_timeout, Duration::from_millis(250));
        assert!(options.unique_active_index);
    }

    #[rstest]
    #[case("MEMBERS_PORT", "eighty")]
    #[case("MEMBERS_TRANSACTION_TIMEOUT_MS", "-1")]
    #[case("MEMBERS_UNIQUE_ACTIVE_INDEX", "yes")]
    fn it_should_reject_malformed_values(#[case] key: &str, #[case] value: &str) {
        let result = AppConfig::from_lookup(lookup_from(&[(key, value)]));
        assert!(result.unwrap_err().to_string().contains(key));
    }
}
