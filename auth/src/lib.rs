//! Credential and token primitives
//!
//! Reusable security building blocks for the identity service:
//! - Password hashing (Argon2id)
//! - JWT claims and HS256 encoding/decoding
//! - Access/refresh token issuing and validation
//!
//! Nothing here knows about accounts, storage or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenService, TokenSettings};
//!
//! let tokens = TokenService::new(TokenSettings::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     15,
//!     72,
//! ))
//! .unwrap();
//!
//! let access = tokens.issue_access("user123", "tenant456", "user").unwrap();
//! let claims = tokens.validate(&access).unwrap();
//! assert_eq!(claims.tenant_id.as_deref(), Some("tenant456"));
//! ```

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenPair;
pub use token::TokenService;
pub use token::TokenSettings;
