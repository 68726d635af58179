use async_trait::async_trait;

use super::errors::AuthError;
use super::models::AccessToken;
use crate::domain::user::models::User;

/// Port for credential checks, token issuance and request identity.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check an email/password pair.
    ///
    /// # Returns
    /// The user on success, `None` when the email is unknown or the password
    /// does not match
    ///
    /// # Errors
    /// * `Password` - Stored hash is malformed
    /// * `User` - Storage failure
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AuthError>;

    /// Issue an access token for `user` with the configured expiry window.
    ///
    /// # Errors
    /// * `Token` - Token encoding failed
    fn issue_token(&self, user: &User) -> Result<AccessToken, AuthError>;

    /// Authenticate then issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// Resolve the user a bearer token speaks for.
    ///
    /// # Errors
    /// * `InvalidToken` - Token rejected, id claim missing, user missing or disabled
    /// * `User` - Storage failure
    async fn resolve_identity(&self, token: &str) -> Result<User, AuthError>;
}
