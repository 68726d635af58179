use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AccessToken;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Well-formed Argon2id hash with the default cost parameters that matches no
/// password. Verified against when the email is unknown so both login
/// failures cost one hash computation.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$cG9zdHMtYXBpLWR1bW15IQ$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Domain service for login and per-request identity resolution.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AuthError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            self.authenticator.verify_password(password, DUMMY_PASSWORD_HASH)?;
            return Ok(None);
        };

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)?
        {
            return Ok(None);
        }

        Ok(Some(user))
    }

    fn issue_token(&self, user: &User) -> Result<AccessToken, AuthError> {
        let token = self
            .authenticator
            .generate_token(&Claims::for_user(user.id.0), None)?;

        Ok(AccessToken::bearer(token))
    }

    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        let Some(user) = self.authenticate(email, password).await? else {
            tracing::warn!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        tracing::info!(user_id = %user.id, "User logged in");

        self.issue_token(&user)
    }

    async fn resolve_identity(&self, token: &str) -> Result<User, AuthError> {
        let claims: Claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        let Some(id) = claims.id else {
            tracing::warn!("Token without id claim");
            return Err(AuthError::InvalidToken);
        };

        let Some(user) = self.repository.find_by_id(UserId(id)).await? else {
            tracing::warn!(user_id = id, "Token for unknown user");
            return Err(AuthError::InvalidToken);
        };

        if user.disabled {
            tracing::warn!(user_id = id, "Token for disabled user");
            return Err(AuthError::InvalidToken);
        }

        Ok(user)
    }
}
