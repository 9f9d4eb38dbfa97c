//! Operator authentication and sessions

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::Session,
    repository::Repository,
    services::redis::RedisService,
};

/// Hash a password with argon2 and a random salt
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored argon2 hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
    redis: RedisService,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig, redis: RedisService) -> Self {
        Self { repository, config, redis }
    }

    fn ttl_seconds(&self) -> u64 {
        self.config.session_ttl_minutes * 60
    }

    /// Verify credentials and open a session
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!(username = %username, "Failed login attempt");
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.redis.create_session(&user.username, self.ttl_seconds()).await?;
        tracing::info!(username = %user.username, "User logged in");

        Ok(Session {
            token,
            username: user.username,
        })
    }

    /// Close a session
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.redis.delete_session(token).await
    }

    /// Resolve a session token, extending its lifetime
    pub async fn session(&self, token: &str) -> AppResult<Option<Session>> {
        let username = self.redis.touch_session(token, self.ttl_seconds()).await?;
        Ok(username.map(|username| Session {
            token: token.to_string(),
            username,
        }))
    }

    /// Create the configured admin account if it does not exist yet
    pub async fn ensure_admin(&self) -> AppResult<()> {
        let username = &self.config.admin_username;
        if self.repository.users.get_by_username(username).await?.is_some() {
            tracing::info!(username = %username, "Admin user already exists");
            return Ok(());
        }

        let hash = hash_password(&self.config.admin_password)?;
        self.repository.users.create(username, &hash).await?;
        tracing::info!(username = %username, "Admin user seeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("admin@123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin@123", &hash).unwrap());
        assert!(!verify_password("admin@124", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-hash").is_err());
    }
}
