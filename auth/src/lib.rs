//! Authentication utilities library
//!
//! - Password hashing (Argon2id, PHC strings)
//! - Signed, expiring access tokens (HMAC JWT)
//! - Authentication coordination
//!
//! The service defines its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::from_config("secret_key_at_least_32_bytes_long!", "HS256", 30).unwrap();
//! let token = handler.encode(&Claims::for_user(1), None).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.id, Some(1));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Claims, JwtHandler};
//!
//! let handler = JwtHandler::from_config("secret_key_at_least_32_bytes_long!", "HS256", 30).unwrap();
//! let auth = Authenticator::new(handler);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let token = auth.generate_token(&Claims::for_user(1), None).unwrap();
//!
//! // Protected request: validate token
//! let claims: Claims = auth.validate_token(&token).unwrap();
//! assert_eq!(claims.id, Some(1));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
