use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token handling.
///
/// Built once at startup from immutable configuration and shared read-only
/// between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

impl Authenticator {
    /// Create a new authenticator around a configured token handler.
    pub fn new(jwt_handler: JwtHandler) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// True on match, false otherwise
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Generate a signed token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode
    /// * `ttl` - Token lifetime, `None` for the configured expiry window
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token<T: Serialize>(
        &self,
        claims: &T,
        ttl: Option<Duration>,
    ) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims, ttl)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, algorithm, expiry or claim shape rejected
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Configured expiry window for access tokens.
    pub fn token_ttl(&self) -> Duration {
        self.jwt_handler.default_ttl()
    }
}
