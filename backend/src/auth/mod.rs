//! Authentication module
//!
//! Provides HMAC-signed bearer tokens with argon2 password hashing.

mod middleware;
mod password;
mod token;

pub use middleware::AuthUser;
pub use password::{HashedPassword, PasswordService};
pub use token::{TokenError, TokenPayload, TokenService};
