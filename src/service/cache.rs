//! Redis cache for scan results

use std::env;

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};

// Environment variable names
const ENV_REDIS_HOST: &str = "CONTENTSCORE_REDIS_HOST";
const ENV_REDIS_PORT: &str = "CONTENTSCORE_REDIS_PORT";
const ENV_REDIS_PASSWORD: &str = "CONTENTSCORE_REDIS_PASSWORD";
const ENV_REDIS_DB: &str = "CONTENTSCORE_REDIS_DB";
const ENV_CACHE_TTL: &str = "CONTENTSCORE_CACHE_TTL";

// Default values
const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
const DEFAULT_REDIS_PORT: &str = "6379";
const DEFAULT_REDIS_DB: &str = "0";
const DEFAULT_TTL_SECONDS: u64 = 3600; // 1 hour

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cache miss for key: {0}")]
    Miss(String),
}

// Cache key prefixes
const PREFIX_SCAN: &str = "scan:";

/// Redis-based cache of scan snapshots, keyed by `generate_scan_cache_key`
#[derive(Clone)]
pub struct ScanCache {
    client: Client,
    ttl_seconds: u64,
}

impl ScanCache {
    /// Create a new cache instance and verify connection
    ///
    /// Configuration via environment variables:
    /// - `CONTENTSCORE_REDIS_HOST` - Redis host (default: 127.0.0.1)
    /// - `CONTENTSCORE_REDIS_PORT` - Redis port (default: 6379)
    /// - `CONTENTSCORE_REDIS_PASSWORD` - Redis password (default: none)
    /// - `CONTENTSCORE_REDIS_DB` - Redis database number (default: 0)
    /// - `CONTENTSCORE_CACHE_TTL` - Snapshot freshness window in seconds (default: 3600)
    pub async fn new() -> Result<Self, CacheError> {
        let host = env::var(ENV_REDIS_HOST).unwrap_or_else(|_| DEFAULT_REDIS_HOST.to_string());
        let port = env::var(ENV_REDIS_PORT).unwrap_or_else(|_| DEFAULT_REDIS_PORT.to_string());
        let password = env::var(ENV_REDIS_PASSWORD).ok();
        let db = env::var(ENV_REDIS_DB).unwrap_or_else(|_| DEFAULT_REDIS_DB.to_string());

        let ttl_seconds = env::var(ENV_CACHE_TTL)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);

        let redis_url = redis_url(&host, &port, password.as_deref(), &db);

        tracing::debug!(host = %host, port = %port, db = %db, "Connecting to Redis");

        let client = Client::open(redis_url)?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        tracing::info!(host = %host, port = %port, ttl_seconds = ttl_seconds, "Redis connection established");

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Get a cached scan snapshot by key hash
    pub async fn get_scan<T: DeserializeOwned>(&self, key_hash: &str) -> Result<T, CacheError> {
        let full_key = format!("{}{}", PREFIX_SCAN, key_hash);
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let data: Option<String> = conn.get(&full_key).await?;

        match data {
            Some(json) => {
                serde_json::from_str(&json).map_err(|e| CacheError::Serialization(e.to_string()))
            }
            None => Err(CacheError::Miss(key_hash.to_string())),
        }
    }

    /// Cache a scan snapshot by key hash for the configured TTL
    pub async fn set_scan<T: Serialize>(&self, key_hash: &str, data: &T) -> Result<(), CacheError> {
        let full_key = format!("{}{}", PREFIX_SCAN, key_hash);
        let json =
            serde_json::to_string(data).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(&full_key, json, self.ttl_seconds).await?;

        tracing::debug!(key = %full_key, ttl = self.ttl_seconds, "Cached scan result");
        Ok(())
    }
}

/// Build a Redis URL: redis://[:password@]host:port/db
fn redis_url(host: &str, port: &str, password: Option<&str>, db: &str) -> String {
    match password {
        Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
        _ => format!("redis://{}:{}/{}", host, port, db),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_url() {
        assert_eq!(redis_url("127.0.0.1", "6379", None, "0"), "redis://127.0.0.1:6379/0");
        assert_eq!(redis_url("cache", "6380", Some(""), "2"), "redis://cache:6380/2");
        assert_eq!(
            redis_url("cache", "6380", Some("s3cret"), "1"),
            "redis://:s3cret@cache:6380/1"
        );
    }

    #[tokio::test]
    #[ignore] // Requires a running Redis
    async fn test_scan_round_trip() {
        let cache = ScanCache::new().await.unwrap();
        cache.set_scan("test-key", &vec![1, 2, 3]).await.unwrap();
        let value: Vec<i32> = cache.get_scan("test-key").await.unwrap();
        assert_eq!(value, vec![1, 2, 3]);
        assert!(matches!(
            cache.get_scan::<Vec<i32>>("absent-key").await,
            Err(CacheError::Miss(_))
        ));
    }
}
