use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Authentication and identity resolution failures.
///
/// `InvalidCredentials` and `InvalidToken` deliberately carry no detail so
/// callers cannot tell an unknown email from a wrong password, or a forged
/// token from a disabled account.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error(transparent)]
    User(#[from] UserError),
}
