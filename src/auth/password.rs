use crate::config::constants::BCRYPT_COST;
use crate::error::{ApiError, Result};

/// Derive a salted bcrypt hash from a raw password.
///
/// bcrypt is CPU-bound and takes tens of milliseconds at this cost factor,
/// so both helpers run on the blocking thread pool instead of a worker's
/// event loop.
pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| ApiError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {}", e)))
}

/// Compare a raw password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trip() {
        let hash = hash_password("hunter22").await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(hash.starts_with("$2"));
        assert!(verify_password("hunter22", &hash).await.unwrap());
        assert!(!verify_password("hunter23", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_hashes_differently() {
        let first = hash_password("hunter22").await.unwrap();
        let second = hash_password("hunter22").await.unwrap();
        assert_ne!(first, second);
    }
}
