use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self.repository.exists_by_email(command.email.as_str()).await? {
            return Err(UserError::EmailAlreadyRegistered(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
                disabled: command.disabled,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let current = self.get_user(id).await?;

        if let Some(new_email) = &command.email {
            if *new_email != current.email
                && self.repository.exists_by_email(new_email.as_str()).await?
            {
                return Err(UserError::EmailAlreadyRegistered(
                    new_email.as_str().to_string(),
                ));
            }
        }

        let password_hash = command
            .password
            .map(|password| self.password_hasher.hash(&password))
            .transpose()?;

        self.repository
            .update_by_id(
                id,
                UserChanges {
                    name: command.name,
                    email: command.email,
                    password_hash,
                    disabled: command.disabled,
                },
            )
            .await?;

        self.get_user(id).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        self.repository.delete_by_id(id).await?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
