//! Runtime configuration, read from `STACKBLITZ_*` environment variables.
//!
//! Unset or blank variables keep their defaults; unparsable values are logged and ignored.

use stackblitz_client::ClientConfig;
use stackblitz_project::{CacheConfig, DEFAULT_HOST};
use std::str::FromStr;
use std::time::Duration;

pub const ENV_API_BASE: &str = "STACKBLITZ_API_BASE";
pub const ENV_HOST: &str = "STACKBLITZ_HOST";
pub const ENV_CACHE_TTL_SECS: &str = "STACKBLITZ_CACHE_TTL_SECS";
pub const ENV_CACHE_CAPACITY: &str = "STACKBLITZ_CACHE_CAPACITY";
pub const ENV_FETCH_TIMEOUT_MS: &str = "STACKBLITZ_FETCH_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host accepted in project URLs.
    pub host: String,
    pub client: ClientConfig,
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        let cache = CacheConfig {
            fetch_timeout: Some(client.request_timeout),
            ..CacheConfig::default()
        };
        Self {
            host: DEFAULT_HOST.to_string(),
            client,
            cache,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_base) = non_empty(&lookup, ENV_API_BASE) {
            config.client.api_base = api_base;
        }
        if let Some(host) = non_empty(&lookup, ENV_HOST) {
            config.host = host;
        }
        if let Some(secs) = parse_positive::<u64, _>(&lookup, ENV_CACHE_TTL_SECS) {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = parse_positive::<usize, _>(&lookup, ENV_CACHE_CAPACITY) {
            config.cache.capacity = capacity;
        }
        if let Some(ms) = parse_positive::<u64, _>(&lookup, ENV_FETCH_TIMEOUT_MS) {
            let timeout = Duration::from_millis(ms);
            config.client.request_timeout = timeout;
            config.cache.fetch_timeout = Some(timeout);
        }

        config
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_positive<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup, key)?;
    match raw.parse::<T>() {
        Ok(value) if value > T::default() => Some(value),
        _ => {
            log::warn!("Ignoring invalid {key}={raw:?}; expected a positive integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_match_store_and_cache_policy() {
        let config = config_from(&[]);
        assert_eq!(config.host, "stackblitz.com");
        assert_eq!(config.client.api_base, "https://stackblitz.com");
        assert_eq!(config.cache.ttl, Duration::from_secs(300));
        assert_eq!(config.cache.capacity, 50);
        assert_eq!(config.cache.fetch_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            (ENV_API_BASE, " http://127.0.0.1:9000 "),
            (ENV_HOST, "blitz.internal"),
            (ENV_CACHE_TTL_SECS, "10"),
            (ENV_CACHE_CAPACITY, "3"),
            (ENV_FETCH_TIMEOUT_MS, "1500"),
        ]);
        assert_eq!(config.client.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.host, "blitz.internal");
        assert_eq!(config.cache.ttl, Duration::from_secs(10));
        assert_eq!(config.cache.capacity, 3);
        assert_eq!(config.client.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.cache.fetch_timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            (ENV_CACHE_TTL_SECS, "soon"),
            (ENV_CACHE_CAPACITY, "0"),
            (ENV_FETCH_TIMEOUT_MS, "-5"),
            (ENV_API_BASE, "   "),
        ]);
        assert_eq!(config, ServerConfig::default());
    }
}
