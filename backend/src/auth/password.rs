//! Password hashing using argon2
//!
//! Each user gets a random salt at signup. The salt is stored next to the
//! digest, and verification recomputes the digest with that salt.
//!
//! Argon2 is CPU-intensive, so request handlers use the `_async` variants
//! which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2,
};

/// Salt and digest pair stored on the user row
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub salt: String,
    pub hash: String,
}

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password with a freshly generated salt (blocking operation)
    pub fn hash(password: &str) -> Result<HashedPassword> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::digest(password, &salt)?;
        Ok(HashedPassword {
            salt: salt.as_str().to_string(),
            hash,
        })
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<HashedPassword> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a stored salt and digest (blocking operation)
    pub fn verify(password: &str, salt: &str, hash: &str) -> Result<bool> {
        let salt = SaltString::from_b64(salt)
            .map_err(|e| anyhow::anyhow!("Invalid salt format: {}", e))?;
        let recomputed = Self::digest(password, &salt)?;

        let expected =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        let actual = PasswordHash::new(&recomputed)
            .map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;

        // Output equality is constant-time
        Ok(match (expected.hash, actual.hash) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        })
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, salt: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &salt, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Run one digest with a throwaway salt and discard it
    ///
    /// Costs the same as `verify_async`, for login attempts that have no
    /// stored hash to check against.
    pub async fn burn_async(password: String) -> Result<()> {
        Self::hash_async(password).await.map(|_| ())
    }

    fn digest(password: &str, salt: &SaltString) -> Result<String> {
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let stored = PasswordService::hash("abcdef").unwrap();

        assert!(PasswordService::verify("abcdef", &stored.salt, &stored.hash).unwrap());
        assert!(!PasswordService::verify("abcdeg", &stored.salt, &stored.hash).unwrap());
    }

    #[test]
    fn test_salt_is_random_per_hash() {
        let first = PasswordService::hash("test_password").unwrap();
        let second = PasswordService::hash("test_password").unwrap();

        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_wrong_salt_does_not_verify() {
        let stored = PasswordService::hash("abcdef").unwrap();
        let other = PasswordService::hash("abcdef").unwrap();

        assert!(!PasswordService::verify("abcdef", &other.salt, &stored.hash).unwrap());
    }

    #[test]
    fn test_corrupt_salt_is_error() {
        let stored = PasswordService::hash("abcdef").unwrap();
        assert!(PasswordService::verify("abcdef", "not valid salt!", &stored.hash).is_err());
    }

    #[tokio::test]
    async fn test_burn_async_completes_a_digest() {
        PasswordService::burn_async("no such account".to_string())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let stored = PasswordService::hash_async("async_pw".to_string()).await.unwrap();

        assert!(
            PasswordService::verify_async("async_pw".to_string(), stored.salt.clone(), stored.hash.clone())
                .await
                .unwrap()
        );
        assert!(
            !PasswordService::verify_async("wrong".to_string(), stored.salt, stored.hash)
                .await
                .unwrap()
        );
    }
}
