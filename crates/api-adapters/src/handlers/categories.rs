//! Category management. Authenticated but not ownership-scoped: the category
//! list is shared by every author.

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

use services::ServiceError;

use crate::context::RequestContext;
use crate::error::{render, render_with_status, ApiError};
use crate::pages::CategoriesPage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    if ctx.account().is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let categories = state.content.list_categories().await?;
    Ok(render(CategoriesPage {
        signed_in: true,
        errors: Vec::new(),
        name: String::new(),
        categories,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, ApiError> {
    if ctx.account().is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    match state.content.create_category(&form.name).await {
        Ok(_) => Ok(Redirect::to("/categories").into_response()),
        Err(ServiceError::Validation(errors)) => {
            let categories = state.content.list_categories().await?;
            Ok(render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                CategoriesPage {
                    signed_in: true,
                    errors: errors.messages(),
                    name: form.name,
                    categories,
                },
            ))
        }
        Err(err) => Err(err.into()),
    }
}

/// Removes the category everywhere; posts keep their other categories.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    if ctx.account().is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    state.content.delete_category(id).await?;
    Ok(Redirect::to("/categories").into_response())
}
