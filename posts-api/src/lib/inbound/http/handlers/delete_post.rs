use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .post_service
        .delete_post(PostId(post_id), &user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
