use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PostResponseData;
use crate::domain::post::models::PostQuery;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParams {
    limit: Option<u32>,
    skip: Option<u32>,
    search: Option<String>,
}

impl From<ListPostsParams> for PostQuery {
    fn from(params: ListPostsParams) -> Self {
        let defaults = PostQuery::default();
        Self {
            search: params.search.unwrap_or(defaults.search),
            limit: params.limit.unwrap_or(defaults.limit),
            skip: params.skip.unwrap_or(defaults.skip),
        }
    }
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<ApiSuccess<Vec<PostResponseData>>, ApiError> {
    state
        .post_service
        .list_posts(params.into())
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(
                StatusCode::OK,
                posts.iter().map(PostResponseData::from).collect(),
            )
        })
}
