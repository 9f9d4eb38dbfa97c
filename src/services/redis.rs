//! Redis-backed session store

use rand::RngCore;
use redis::{AsyncCommands, Client, Expiry};

use crate::error::{AppError, AppResult};

const SESSION_PREFIX: &str = "session:";

/// Random, URL-safe session token (32 bytes, hex encoded)
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn session_key(token: &str) -> String {
    format!("{}{}", SESSION_PREFIX, token)
}

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }

    /// Store a new session for `username` and return its token
    pub async fn create_session(&self, username: &str, ttl_seconds: u64) -> AppResult<String> {
        let token = generate_token();
        let mut conn = self.connection().await?;

        conn.set_ex::<_, _, ()>(session_key(&token), username, ttl_seconds)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store session in Redis: {}", e)))?;

        Ok(token)
    }

    /// Look up a session, pushing its expiry forward (sliding expiration)
    pub async fn touch_session(&self, token: &str, ttl_seconds: u64) -> AppResult<Option<String>> {
        let mut conn = self.connection().await?;

        let username: Option<String> = conn
            .get_ex(session_key(token), Expiry::EX(ttl_seconds as usize))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read session from Redis: {}", e)))?;

        Ok(username)
    }

    /// Delete a session (logout)
    pub async fn delete_session(&self, token: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let _: () = conn
            .del(session_key(token))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete session from Redis: {}", e)))?;

        Ok(())
    }

    /// Round-trip used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis ping failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_session_key_is_namespaced() {
        assert_eq!(session_key("abc"), "session:abc");
    }
}
