use thiserror::Error;

use super::models::PostId;

/// Error type for PostTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostTitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for post and vote operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] PostTitleError),

    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Not allowed")]
    Forbidden,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
