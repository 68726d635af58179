use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures are deliberately not broken down: an expired token, a
/// forged signature, a foreign algorithm and a malformed claim set all surface
/// as `InvalidToken`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token lifetime must be positive, got {0} minutes")]
    InvalidLifetime(i64),
}
