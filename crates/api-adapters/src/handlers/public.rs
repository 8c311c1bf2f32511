//! Public read-side handlers. The post page is the single place a view is
//! counted; the home listing never touches counts.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Extension;

use crate::context::RequestContext;
use crate::error::{render, ApiError};
use crate::pages::{HomePage, PostPage};
use crate::AppState;

pub async fn home(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let posts = state.content.list_published().await?;
    Ok(render(HomePage {
        signed_in: ctx.signed_in(),
        posts,
    }))
}

/// Published, non-discarded posts only; drafts and discarded posts 404 here
/// exactly like slugs that never existed.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let (post, categories) = state.content.read_published(&slug).await?;
    Ok(render(PostPage {
        signed_in: ctx.signed_in(),
        post,
        categories,
    }))
}
