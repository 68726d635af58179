use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::AccessToken;
use crate::inbound::http::router::AppState;

/// OAuth2 password-flow form. `username` carries the email address; other
/// fields of the flow (`grant_type`, `scope`, ...) are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    state
        .auth_service
        .login(&form.username, &form.password)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}
