//! # api-adapters
//!
//! The axum routing and orchestration layer for Quillpress: router assembly,
//! the access-gate middleware, handlers, and the askama page types.

pub mod context;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod method_override;
pub mod pages;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower::Layer;
use tower_http::trace::TraceLayer;

use domains::ports::AccountRepo;
use services::{ContentService, IdentityService, SessionManager};

/// State shared across all handlers. Services are behind `Arc` so the state
/// stays cheaply cloneable per request.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub sessions: Arc<SessionManager>,
    pub content: Arc<ContentService>,
    pub accounts: Arc<dyn AccountRepo>,
    pub cookie_name: String,
}

/// Builds the full application router. Every request passes through the
/// access-gate middleware, which populates the request context exactly once.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::public::home))
        .route("/login", get(handlers::sessions::login_form))
        .route("/sessions", post(handlers::sessions::create))
        .route(
            "/logout",
            delete(handlers::sessions::destroy).post(handlers::sessions::destroy),
        )
        .route("/admin", get(handlers::posts::index))
        .route(
            "/posts",
            get(handlers::posts::index).post(handlers::posts::create),
        )
        .route("/posts/new", get(handlers::posts::new_form))
        .route(
            "/posts/{slug}",
            get(handlers::public::show)
                .patch(handlers::posts::update)
                .delete(handlers::posts::discard),
        )
        .route("/posts/{slug}/edit", get(handlers::posts::edit_form))
        .route("/posts/{slug}/restore", patch(handlers::posts::restore))
        .route(
            "/categories",
            get(handlers::categories::index).post(handlers::categories::create),
        )
        .route("/categories/{id}", delete(handlers::categories::destroy))
        .layer(middleware::from_fn_with_state(state.clone(), context::gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // `Router::layer` distributes middleware into each method router's
    // per-method handlers, after method dispatch has already happened; the
    // override must instead wrap the assembled router so the rewrite lands
    // before routing.
    Router::new().fallback_service(
        middleware::from_fn(method_override::method_override).layer(routes),
    )
}
