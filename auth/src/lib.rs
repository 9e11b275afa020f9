//! Authentication utilities library
//!
//! Provides the authentication building blocks for the shop service:
//! - Password hashing (Argon2id)
//! - Identity token issuance and validation (HS256 JWT)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&hash, "my_password"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningSecret, TokenService};
//!
//! let tokens = TokenService::new(SigningSecret::new("secret_key_at_least_32_bytes_long!"));
//! let token = tokens.issue("user123").unwrap();
//! let claims = tokens.validate(&token).unwrap();
//! assert_eq!(claims.subject(), Some("user123"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningSecret, TokenService};
//!
//! let auth = Authenticator::new(TokenService::new(SigningSecret::new(
//!     "secret_key_at_least_32_bytes_long!",
//! )));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Sign in: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Gate a request: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.subject(), Some("user123"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::SigningSecret;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use jwt::DEFAULT_TOKEN_VALIDITY_DAYS;
pub use password::PasswordError;
pub use password::PasswordHasher;
