use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::post::errors::PostTitleError;
use crate::domain::user::models::UserId;

/// Post entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub content: String,
    pub published: bool,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

/// Post unique identifier type, assigned by storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post title value type, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Title is empty or whitespace
    /// * `TooLong` - Title longer than 100 characters
    pub fn new(title: String) -> Result<Self, PostTitleError> {
        if title.trim().is_empty() {
            return Err(PostTitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PostTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a post with domain types
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: PostTitle,
    pub content: String,
    pub published: bool,
}

/// Command to update a post. Only provided fields will be updated.
#[derive(Debug, Default)]
pub struct UpdatePostCommand {
    pub title: Option<PostTitle>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

/// Fields for a row about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: String,
    pub published: bool,
    pub author_id: UserId,
}

/// Partial update applied by id. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl From<UpdatePostCommand> for PostChanges {
    fn from(command: UpdatePostCommand) -> Self {
        Self {
            title: command.title,
            content: command.content,
            published: command.published,
        }
    }
}

/// Listing filter: case-insensitive title substring plus offset paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub search: String,
    pub limit: u32,
    pub skip: u32,
}

impl PostQuery {
    pub const DEFAULT_LIMIT: u32 = 10;
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            limit: Self::DEFAULT_LIMIT,
            skip: 0,
        }
    }
}
