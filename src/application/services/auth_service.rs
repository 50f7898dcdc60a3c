//! Authentication service: login and bearer token validation.

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::verify_password;
use crate::utils::token_generator::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Raw bearer token. Shown to the client once and never stored.
    pub token: String,
    pub user: User,
}

/// Service for issuing and validating login tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<U: UserRepository + ?Sized, T: TokenRepository + ?Sized> {
    user_repository: Arc<U>,
    token_repository: Arc<T>,
    signing_secret: String,
    token_ttl: Duration,
}

impl<U: UserRepository + ?Sized, T: TokenRepository + ?Sized> AuthService<U, T> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key; must match the value used when tokens were issued
    /// - `token_ttl_seconds` - lifetime of issued tokens
    pub fn new(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        signing_secret: String,
        token_ttl_seconds: u64,
    ) -> Self {
        let token_ttl = i64::try_from(token_ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::seconds(MAX_TOKEN_TTL_SECONDS as i64));

        Self {
            user_repository,
            token_repository,
            signing_secret,
            token_ttl,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes()).map_err(|e| {
            AppError::internal("Invalid signing key", json!({ "reason": e.to_string() }))
        })?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Verifies credentials and issues a new bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the username is unknown or the
    /// password does not match. Both cases produce the same message.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginSession, AppError> {
        let user = self.user_repository.find_by_username(username).await?;

        let verified = match &user {
            Some(user) => verify_password(password.to_string(), user.password_hash.clone()).await?,
            None => false,
        };

        let Some(user) = user.filter(|_| verified) else {
            metrics::counter!("logins_total", "outcome" => "failure").increment(1);
            tracing::info!(username, "Rejected login");
            return Err(AppError::unauthorized(
                "Invalid username or password",
                json!({}),
            ));
        };

        let token = generate_token()?;
        let token_hash = self.hash_token(&token)?;
        let expires_at = Utc::now() + self.token_ttl;

        self.token_repository
            .create_token(user.id, &token_hash, expires_at)
            .await?;

        metrics::counter!("logins_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = user.id, %expires_at, "User logged in");

        Ok(LoginSession { token, user })
    }

    /// Resolves a raw bearer token to its user.
    ///
    /// On success, updates the token's `last_used_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, revoked or expired.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = self.hash_token(token)?;

        let user = self
            .token_repository
            .find_user_by_token(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid, revoked or expired token" }),
                )
            })?;

        if let Err(e) = self.token_repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, user_id = user.id, "Failed to update token last_used_at");
        }

        Ok(user)
    }

    /// Revokes every token of a user, logging them out everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn revoke_all(&self, user_id: i64) -> Result<u64, AppError> {
        let revoked = self.token_repository.revoke_user_tokens(user_id).await?;
        tracing::info!(user_id, revoked, "Revoked user tokens");
        Ok(revoked)
    }
}
