use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

/// Extension holding the user resolved from the bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware resolving `Authorization: Bearer <token>` into a `CurrentUser`.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?.to_string();

    let user = state.auth_service.resolve_identity(&token).await?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let not_authenticated = || ApiError::Unauthorized("Not authenticated".to_string());

    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(not_authenticated)?
        .to_str()
        .map_err(|_| not_authenticated())?;

    let (scheme, token) = value.split_once(' ').ok_or_else(not_authenticated)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(not_authenticated());
    }

    Ok(token)
}
