use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostQuery;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::models::User;

/// Domain service implementation for posts and the vote ledger.
///
/// A vote is membership of the voter in the post's voter set, so both vote
/// operations are idempotent and never change the set more than once.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load the post and reject actors other than its author.
    async fn authored_post(&self, id: PostId, actor: &User) -> Result<Post, PostError> {
        let post = self.get_post(id).await?;
        if !post.is_authored_by(actor.id) {
            return Err(PostError::Forbidden);
        }
        Ok(post)
    }

    /// Load the post and reject its author as a voter.
    async fn votable_post(&self, id: PostId, voter: &User) -> Result<Post, PostError> {
        let post = self.get_post(id).await?;
        if post.is_authored_by(voter.id) {
            return Err(PostError::Forbidden);
        }
        Ok(post)
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: &User,
    ) -> Result<Post, PostError> {
        let post = self
            .repository
            .create(NewPost {
                title: command.title,
                content: command.content,
                published: command.published,
                author_id: author.id,
            })
            .await?;

        tracing::info!(post_id = %post.id, author_id = %author.id, "Post created");

        Ok(post)
    }

    async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>, PostError> {
        self.repository.search(&query).await
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn update_post(
        &self,
        id: PostId,
        command: UpdatePostCommand,
        actor: &User,
    ) -> Result<Post, PostError> {
        self.authored_post(id, actor).await?;

        self.repository.update_by_id(id, command.into()).await?;

        self.get_post(id).await
    }

    async fn delete_post(&self, id: PostId, actor: &User) -> Result<(), PostError> {
        self.authored_post(id, actor).await?;

        self.repository.delete_by_id(id).await?;

        tracing::info!(post_id = %id, "Post deleted");

        Ok(())
    }

    async fn upvote_post(&self, id: PostId, voter: &User) -> Result<(), PostError> {
        self.votable_post(id, voter).await?;

        if self.repository.has_voter(id, voter.id).await? {
            tracing::debug!(post_id = %id, user_id = %voter.id, "Already voted, upvote ignored");
            return Ok(());
        }

        self.repository.add_voter(id, voter.id).await
    }

    async fn downvote_post(&self, id: PostId, voter: &User) -> Result<(), PostError> {
        self.votable_post(id, voter).await?;

        if !self.repository.has_voter(id, voter.id).await? {
            tracing::debug!(post_id = %id, user_id = %voter.id, "No vote to remove, downvote ignored");
            return Ok(());
        }

        self.repository.remove_voter(id, voter.id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::post::models::PostChanges;
    use crate::domain::post::models::PostTitle;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, post: NewPost) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;
            async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, PostError>;
            async fn update_by_id(&self, id: PostId, changes: PostChanges) -> Result<(), PostError>;
            async fn delete_by_id(&self, id: PostId) -> Result<(), PostError>;
            async fn has_voter(&self, id: PostId, user_id: UserId) -> Result<bool, PostError>;
            async fn add_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError>;
            async fn remove_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError>;
        }
    }

    const AUTHOR: UserId = UserId(1);
    const VOTER: UserId = UserId(2);

    fn user(id: UserId) -> User {
        User {
            id,
            name: UserName::default(),
            email: EmailAddress::new(format!("user{}@example.com", id.0)).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            disabled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn post(id: i64, author_id: UserId) -> Post {
        Post {
            id: PostId(id),
            title: PostTitle::new("Hello".to_string()).unwrap(),
            content: "First post".to_string(),
            published: true,
            author_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn repository_with_post(id: i64, author_id: UserId) -> MockTestPostRepository {
        let mut repository = MockTestPostRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(PostId(id)))
            .returning(move |id| Ok(Some(post(id.0, author_id))));
        repository
    }

    #[tokio::test]
    async fn test_create_post_assigns_author() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_create()
            .withf(|post| post.author_id == AUTHOR && post.title.as_str() == "Hello")
            .times(1)
            .returning(|new_post| {
                Ok(Post {
                    id: PostId(10),
                    title: new_post.title,
                    content: new_post.content,
                    published: new_post.published,
                    author_id: new_post.author_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = PostService::new(Arc::new(repository));

        let command = CreatePostCommand {
            title: PostTitle::new("Hello".to_string()).unwrap(),
            content: "First post".to_string(),
            published: true,
        };

        let created = service.create_post(command, &user(AUTHOR)).await.unwrap();
        assert_eq!(created.id, PostId(10));
        assert_eq!(created.author_id, AUTHOR);
    }

    #[tokio::test]
    async fn test_list_posts_passes_query_through() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_search()
            .withf(|query| query.search == "rust" && query.limit == 5 && query.skip == 5)
            .times(1)
            .returning(|_| Ok(vec![post(6, AUTHOR)]));

        let service = PostService::new(Arc::new(repository));

        let query = PostQuery {
            search: "rust".to_string(),
            limit: 5,
            skip: 5,
        };

        let posts = service.list_posts(query).await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_update_post_by_non_author_is_forbidden() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository.expect_update_by_id().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service
            .update_post(PostId(1), UpdatePostCommand::default(), &user(VOTER))
            .await;
        assert!(matches!(result, Err(PostError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_post_by_author() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository
            .expect_update_by_id()
            .withf(|id, changes| *id == PostId(1) && changes.published == Some(false))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PostService::new(Arc::new(repository));

        let command = UpdatePostCommand {
            published: Some(false),
            ..Default::default()
        };

        assert!(service
            .update_post(PostId(1), command, &user(AUTHOR))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_delete_by_id().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(PostId(4), &user(AUTHOR)).await;
        assert!(matches!(result, Err(PostError::NotFound(PostId(4)))));
    }

    #[tokio::test]
    async fn test_upvote_adds_voter() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository
            .expect_has_voter()
            .with(eq(PostId(1)), eq(VOTER))
            .times(1)
            .returning(|_, _| Ok(false));
        repository
            .expect_add_voter()
            .with(eq(PostId(1)), eq(VOTER))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PostService::new(Arc::new(repository));

        assert!(service.upvote_post(PostId(1), &user(VOTER)).await.is_ok());
    }

    #[tokio::test]
    async fn test_repeated_upvote_is_noop() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository
            .expect_has_voter()
            .times(1)
            .returning(|_, _| Ok(true));
        repository.expect_add_voter().times(0);

        let service = PostService::new(Arc::new(repository));

        assert!(service.upvote_post(PostId(1), &user(VOTER)).await.is_ok());
    }

    #[tokio::test]
    async fn test_downvote_removes_voter() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository
            .expect_has_voter()
            .times(1)
            .returning(|_, _| Ok(true));
        repository
            .expect_remove_voter()
            .with(eq(PostId(1)), eq(VOTER))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = PostService::new(Arc::new(repository));

        assert!(service.downvote_post(PostId(1), &user(VOTER)).await.is_ok());
    }

    #[tokio::test]
    async fn test_downvote_without_vote_is_noop() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository
            .expect_has_voter()
            .times(1)
            .returning(|_, _| Ok(false));
        repository.expect_remove_voter().times(0);

        let service = PostService::new(Arc::new(repository));

        assert!(service.downvote_post(PostId(1), &user(VOTER)).await.is_ok());
    }

    #[tokio::test]
    async fn test_author_cannot_vote_on_own_post() {
        let mut repository = repository_with_post(1, AUTHOR);
        repository.expect_has_voter().times(0);
        repository.expect_add_voter().times(0);
        repository.expect_remove_voter().times(0);

        let service = PostService::new(Arc::new(repository));

        let upvote = service.upvote_post(PostId(1), &user(AUTHOR)).await;
        let downvote = service.downvote_post(PostId(1), &user(AUTHOR)).await;

        assert!(matches!(upvote, Err(PostError::Forbidden)));
        assert!(matches!(downvote, Err(PostError::Forbidden)));
    }

    #[tokio::test]
    async fn test_vote_on_missing_post() {
        let mut repository = MockTestPostRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_add_voter().times(0);

        let service = PostService::new(Arc::new(repository));

        let result = service.upvote_post(PostId(99), &user(VOTER)).await;
        assert!(matches!(result, Err(PostError::NotFound(PostId(99)))));
    }
}
