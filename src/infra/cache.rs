//! Redis cache wrapper.
//!
//! Backs the rate-limit middleware and the health endpoint.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{Config, CACHE_PREFIX_RATE_LIMIT, DEFAULT_CACHE_TTL_SECONDS};
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
    default_ttl: u64,
}

impl Cache {
    /// Connect to Redis.
    ///
    /// # Panics
    /// Panics if the connection fails.
    pub async fn connect(config: &Config) -> Self {
        let client = Client::open(config.redis_url.as_str()).expect("Failed to create Redis client");

        let connection = ConnectionManager::new(client)
            .await
            .expect("Failed to connect to Redis");

        tracing::info!("Redis cache connected");

        Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    /// Connect, returning an error instead of panicking.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        Ok(Self {
            connection,
            default_ttl: DEFAULT_CACHE_TTL_SECONDS,
        })
    }

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json)
                    .map_err(|e| AppError::internal(format!("Cache deserialization error: {}", e)))?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with the default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        conn.set_ex::<_, _, ()>(key, json, self.default_ttl)
            .await
            .map_err(cache_error)?;

        Ok(())
    }

    /// Delete a value from cache.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }

    /// Check whether a key exists.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(cache_error)?;
        Ok(exists)
    }

    /// Check and increment a fixed-window rate limit counter.
    /// Returns (current_count, is_allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let exists: bool = conn.exists(&key).await.map_err(cache_error)?;

        if !exists {
            // First request in the window
            let _: () = conn
                .set_ex(&key, 1i64, window_seconds)
                .await
                .map_err(cache_error)?;
            return Ok((1, true));
        }

        let count: i64 = conn.incr(&key, 1).await.map_err(cache_error)?;
        let count = count as u64;
        let allowed = count <= max_requests;

        Ok((count, allowed))
    }
}

fn cache_error(e: RedisError) -> AppError {
    AppError::internal(format!("Cache error: {}", e))
}
