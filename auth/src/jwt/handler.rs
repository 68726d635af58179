use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::errors::JwtError;

/// JWT token handler for encoding and decoding access tokens.
///
/// Holds the shared HMAC secret, the one accepted signature algorithm and the
/// default token lifetime. Generic over the claims type so callers can carry
/// their own payload.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `algorithm` - Signature algorithm used for signing and required on decode
    /// * `default_ttl` - Lifetime applied when `encode` is not given one
    ///
    /// # Security Notes
    /// - The secret should be at least as long as the digest (32 bytes for HS256)
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl,
        }
    }

    /// Create a JWT handler from configuration values.
    ///
    /// # Arguments
    /// * `secret` - Shared secret
    /// * `algorithm` - Algorithm name (`HS256`, `HS384` or `HS512`)
    /// * `expire_minutes` - Default token lifetime in minutes
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown name, or an algorithm that needs a key pair
    /// * `InvalidLifetime` - Lifetime is zero or negative
    pub fn from_config(
        secret: &str,
        algorithm: &str,
        expire_minutes: i64,
    ) -> Result<Self, JwtError> {
        let algorithm = match algorithm.parse::<Algorithm>() {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(JwtError::UnsupportedAlgorithm(algorithm.to_string())),
        };

        if expire_minutes <= 0 {
            return Err(JwtError::InvalidLifetime(expire_minutes));
        }

        Ok(Self::new(
            secret.as_bytes(),
            algorithm,
            Duration::minutes(expire_minutes),
        ))
    }

    /// Signature algorithm in use.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Lifetime applied when `encode` is called without one.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Encode claims into a signed token.
    ///
    /// The `exp` claim is set to now plus `ttl` (or the default lifetime),
    /// replacing any `exp` already present in `claims`.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode, must serialize to a JSON object
    /// * `ttl` - Token lifetime, `None` for the default
    ///
    /// # Returns
    /// Compact JWT string (header.claims.signature)
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims are not an object, or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T, ttl: Option<Duration>) -> Result<String, JwtError> {
        let mut payload = match serde_json::to_value(claims) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(JwtError::EncodingFailed(
                    "claims must serialize to a JSON object".to_string(),
                ))
            }
            Err(e) => return Err(JwtError::EncodingFailed(e.to_string())),
        };

        let expiration = Utc::now() + ttl.unwrap_or(self.default_ttl);
        payload.insert("exp".to_string(), Value::from(expiration.timestamp()));

        encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// Checks the signature, requires the header algorithm to be the
    /// configured one, and requires an `exp` claim that has not passed
    /// (no leeway).
    ///
    /// # Errors
    /// * `InvalidToken` - Any validation or deserialization failure
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| JwtError::InvalidToken)
    }
}
