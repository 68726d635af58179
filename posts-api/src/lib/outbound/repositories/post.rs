use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostChanges;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostQuery;
use crate::domain::post::models::PostTitle;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

const POST_COLUMNS: &str = "id, title, content, published, author_id, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    published: bool,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId(row.id),
            title: PostTitle::new(row.title)?,
            content: row.content,
            published: row.published,
            author_id: UserId(row.author_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> PostError {
    tracing::error!(error = %e, "Post query failed");
    PostError::DatabaseError(e.to_string())
}

/// Build an ILIKE pattern matching `search` as a literal substring.
pub(crate) fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (title, content, published, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.title.as_str())
        .bind(&post.content)
        .bind(post.published)
        .bind(post.author_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        row.try_into()
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Post::try_from).transpose()
    }

    async fn search(&self, query: &PostQuery) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM posts
            WHERE title ILIKE $1 ESCAPE '\'
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(contains_pattern(&query.search))
        .bind(i64::from(query.limit))
        .bind(i64::from(query.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn update_by_id(&self, id: PostId, changes: PostChanges) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                published = COALESCE($4, published),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.content.as_deref())
        .bind(changes.published)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id));
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: PostId) -> Result<(), PostError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id));
        }

        Ok(())
    }

    async fn has_voter(&self, id: PostId, user_id: UserId) -> Result<bool, PostError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM post_votes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(id.0)
        .bind(user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(exists)
    }

    async fn add_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError> {
        sqlx::query(
            r#"
            INSERT INTO post_votes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(id.0)
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn remove_voter(&self, id: PostId, user_id: UserId) -> Result<(), PostError> {
        sqlx::query("DELETE FROM post_votes WHERE post_id = $1 AND user_id = $2")
            .bind(id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}
