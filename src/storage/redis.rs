//! Redis preference storage
//!
//! Keys are namespaced with the configured prefix, e.g. `gestalt:gestalt-language`.
//! Every operation is bounded by the configured timeout, so an unreachable
//! server surfaces as `StorageUnavailable` instead of stalling the page.

use std::time::Duration;
use redis::Commands;
use tracing::debug;
use crate::utils::errors::{LocalizationError, Result};
use super::PreferenceStorage;

/// Storage backed by a Redis server
#[derive(Debug, Clone)]
pub struct RedisStorage {
    client: redis::Client,
    prefix: String,
    timeout: Duration,
}

impl RedisStorage {
    /// Create a storage handle; no connection is made until first use
    pub fn new(url: &str, prefix: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            prefix: prefix.to_string(),
            timeout,
        })
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn connection(&self) -> Result<redis::Connection> {
        let unavailable = |e: redis::RedisError| LocalizationError::StorageUnavailable(e.to_string());

        let conn = self.client.get_connection_with_timeout(self.timeout).map_err(unavailable)?;
        conn.set_read_timeout(Some(self.timeout)).map_err(unavailable)?;
        conn.set_write_timeout(Some(self.timeout)).map_err(unavailable)?;
        Ok(conn)
    }
}

impl PreferenceStorage for RedisStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection()?;
        let value: Option<String> = conn
            .get(self.key(key))
            .map_err(|e| LocalizationError::StorageUnavailable(e.to_string()))?;
        debug!(key = %self.key(key), found = value.is_some(), "Redis GET result");
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection()?;
        conn.set::<_, _, ()>(self.key(key), value)
            .map_err(|e| LocalizationError::StorageUnavailable(e.to_string()))?;
        debug!(key = %self.key(key), "Redis SET completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::time::Instant;

    const TIMEOUT: Duration = Duration::from_millis(200);

    #[test]
    fn test_key_prefix() {
        let storage = RedisStorage::new("redis://localhost:6379", "gestalt:", TIMEOUT).unwrap();
        assert_eq!(storage.key("gestalt-language"), "gestalt:gestalt-language");
    }

    #[test]
    fn test_invalid_url() {
        assert_matches!(
            RedisStorage::new("not-a-redis-url", "gestalt:", TIMEOUT),
            Err(LocalizationError::Redis(_))
        );
    }

    #[test]
    fn test_unreachable_server_is_unavailable() {
        let storage = RedisStorage::new("redis://127.0.0.1:1", "gestalt:", TIMEOUT).unwrap();
        assert_matches!(
            storage.get_item("gestalt-language"),
            Err(LocalizationError::StorageUnavailable(_))
        );
    }

    #[test]
    fn test_unresponsive_server_fails_within_timeout() {
        // Non-routable address: connects hang until the timeout fires
        let storage = RedisStorage::new("redis://10.255.255.1:6379", "gestalt:", TIMEOUT).unwrap();

        let started = Instant::now();
        assert_matches!(
            storage.set_item("gestalt-language", "fr"),
            Err(LocalizationError::StorageUnavailable(_))
        );
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
