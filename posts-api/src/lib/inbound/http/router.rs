use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_post::create_post;
use super::handlers::create_user::create_user;
use super::handlers::delete_me::delete_me;
use super::handlers::delete_post::delete_post;
use super::handlers::get_me::get_me;
use super::handlers::get_post::get_post;
use super::handlers::get_user::get_user;
use super::handlers::list_posts::list_posts;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::root::root;
use super::handlers::update_me::update_me;
use super::handlers::update_post::update_post;
use super::handlers::vote_post::downvote_post;
use super::handlers::vote_post::upvote_post;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    post_service: Arc<dyn PostServicePort>,
    auth_service: Arc<dyn AuthServicePort>,
) -> Router {
    let state = AppState {
        user_service,
        post_service,
        auth_service,
    };

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/login", post(login))
        .route("/users", post(create_user));

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route("/users/:user_id", get(get_user))
        .route("/me", get(get_me).put(update_me).delete(delete_me))
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:post_id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/:post_id/upvote", post(upvote_post))
        .route("/posts/:post_id/downvote", post(downvote_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
