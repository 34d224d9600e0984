//! Bearer token signing and verification
//!
//! A token is `base64(JSON{userID, exp})` followed by `.` and an
//! HMAC-SHA256 signature over the encoded payload. The signing key is
//! derived once at startup and cloned per operation.

use anyhow::Result;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

/// Reasons a token is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Issues and verifies bearer tokens with a fixed lifetime
#[derive(Clone)]
pub struct TokenService {
    mac: HmacSha256,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a token service from the configured secret
    ///
    /// Call once at application startup and keep it in `AppState`.
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid token secret: {}", e))?;
        Ok(Self { mac, ttl_secs })
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for a user, valid from now
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String> {
        let payload = TokenPayload {
            user_id,
            exp: now.timestamp() + self.ttl_secs,
        };
        let encoded = STANDARD.encode(serde_json::to_vec(&payload)?);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(&encoded));
        Ok(format!("{}.{}", encoded, signature))
    }

    /// Verify a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, TokenError> {
        let (encoded, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        // verify_slice compares in constant time
        let mut mac = self.mac.clone();
        mac.update(encoded.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let raw = STANDARD.decode(encoded).map_err(|_| TokenError::Malformed)?;
        let payload: TokenPayload =
            serde_json::from_slice(&raw).map_err(|_| TokenError::Malformed)?;

        if now.timestamp() > payload.exp {
            return Err(TokenError::Expired);
        }

        Ok(payload.user_id)
    }

    fn sign(&self, encoded: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(encoded.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}
