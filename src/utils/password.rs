//! Password hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so both operations run on tokio's blocking
//! pool instead of an async worker thread.

use crate::error::AppError;
use serde_json::json;

/// Hashes a plaintext password with the given bcrypt cost.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the blocking task panics.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password hashing task failed",
                json!({ "reason": e.to_string() }),
            )
        })?
        .map_err(|e| {
            AppError::internal(
                "Failed to hash password",
                json!({ "reason": e.to_string() }),
            )
        })
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the blocking task panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password verification task failed",
                json!({ "reason": e.to_string() }),
            )
        })?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("sekret".to_string(), TEST_COST).await.unwrap();

        assert_ne!(hash, "sekret");
        assert!(verify_password("sekret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_malformed_hash_is_mismatch() {
        let result = verify_password("sekret".to_string(), "not-a-hash".to_string()).await;
        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn test_hash_rejects_invalid_cost() {
        let result = hash_password("sekret".to_string(), 2).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
