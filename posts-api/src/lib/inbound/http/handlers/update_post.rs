use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostResponseData;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::domain::post::models::PostTitle;
use crate::domain::post::models::UpdatePostCommand;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a post (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}

impl UpdatePostRequest {
    fn try_into_command(self) -> Result<UpdatePostCommand, PostError> {
        Ok(UpdatePostCommand {
            title: self.title.map(PostTitle::new).transpose()?,
            content: self.content,
            published: self.published,
        })
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<ApiSuccess<PostResponseData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .post_service
        .update_post(PostId(post_id), command, &user)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::OK, post.into()))
}
