use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostResponseData;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::PostTitle;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for creating a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    title: String,
    content: String,
    #[serde(default)]
    published: bool,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, PostError> {
        Ok(CreatePostCommand {
            title: PostTitle::new(self.title)?,
            content: self.content,
            published: self.published,
        })
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(body): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostResponseData>, ApiError> {
    state
        .post_service
        .create_post(body.try_into_command()?, &user)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}
