use async_trait::async_trait;

use super::errors::PostError;
use super::models::CreatePostCommand;
use super::models::NewPost;
use super::models::Post;
use super::models::PostChanges;
use super::models::PostId;
use super::models::PostQuery;
use super::models::UpdatePostCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for post and vote domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// Create a post owned by `author`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_post(&self, command: CreatePostCommand, author: &User)
        -> Result<Post, PostError>;

    /// List posts whose title contains `query.search` (case-insensitive).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Update a post. Only its author may do so.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - `actor` is not the author
    /// * `DatabaseError` - Database operation failed
    async fn update_post(
        &self,
        id: PostId,
        command: UpdatePostCommand,
        actor: &User,
    ) -> Result<Post, PostError>;

    /// Delete a post. Only its author may do so.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - `actor` is not the author
    /// * `DatabaseError` - Database operation failed
    async fn delete_post(&self, id: PostId, actor: &User) -> Result<(), PostError>;

    /// Add `voter` to the post's voter set if absent; no-op otherwise.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - `voter` is the author
    /// * `DatabaseError` - Database operation failed
    async fn upvote_post(&self, id: PostId, voter: &User) -> Result<(), PostError>;

    /// Remove `voter` from the post's voter set if present; no-op otherwise.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `Forbidden` - `voter` is the author
    /// * `DatabaseError` - Database operation failed
    async fn downvote_post(&self, id: PostId, voter: &User) -> Result<(), PostError>;
}

/// Repository port for post persistence and the post/voter relation.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Posts matching the query, ordered by id.
    async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn update_by_id(&self, id: PostId, changes: PostChanges) -> Result<(), PostError>;

    /// # Errors
    /// * `NotFound` - Post does not exist
    async fn delete_by_id(&self, id: PostId) -> Result<(), PostError>;

    async fn has_voter(&self, id: PostId, user_id: UserId) -> Result<bool, PostError>;

    /// Insert the membership row. Must be a no-op when it already exists.
    async fn add_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError>;

    /// Delete the membership row. Must be a no-op when it does not exist.
    async fn remove_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError>;
}
