//! Owner-scoped post management: listing, forms, create/update, and the
//! discard/restore transitions. Every lookup here goes through the
//! owner-scoped repository path, so foreign slugs are plain 404s.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use axum_extra::extract::Form;
use serde::Deserialize;
use uuid::Uuid;

use domains::models::Category;
use domains::validate::PostInput;
use services::ServiceError;

use crate::context::RequestContext;
use crate::error::{render, render_with_status, ApiError};
use crate::pages::{AdminPage, CategoryOption, PostFormPage, PostFormValues};
use crate::AppState;

/// The raw submitted form. `category_ids` arrives as repeated keys, which is
/// why this module uses axum-extra's Form extractor.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image_url: Option<String>,
    /// Checkbox: present ("true"/"on") when checked, absent otherwise.
    #[serde(default)]
    pub is_published: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl PostForm {
    fn values(&self) -> PostFormValues {
        PostFormValues {
            title: self.title.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone().unwrap_or_default(),
            featured_image_url: self.featured_image_url.clone().unwrap_or_default(),
            is_published: self.published(),
        }
    }

    fn published(&self) -> bool {
        matches!(self.is_published.as_deref(), Some("true" | "on" | "1"))
    }

    fn into_input(self) -> PostInput {
        PostInput {
            is_published: self.published(),
            title: self.title.trim().to_string(),
            content: self.content,
            excerpt: blank_to_none(self.excerpt),
            featured_image_url: blank_to_none(self.featured_image_url),
            category_ids: self.category_ids,
        }
    }
}

fn category_options(all: Vec<Category>, selected: &[Uuid]) -> Vec<CategoryOption> {
    all.into_iter()
        .map(|category| CategoryOption {
            checked: selected.contains(&category.id),
            id: category.id,
            name: category.name,
        })
        .collect()
}

/// GET /posts and GET /admin: everything the owner has, discarded included.
pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let Some(account) = ctx.account() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let posts = state.content.list_owned(account.id).await?;
    Ok(render(AdminPage {
        signed_in: true,
        posts,
    }))
}

pub async fn new_form(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    if ctx.account().is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let all = state.content.list_categories().await?;
    Ok(render(PostFormPage {
        signed_in: true,
        heading: "New post".to_string(),
        action: "/posts".to_string(),
        errors: Vec::new(),
        form: PostFormValues::default(),
        categories: category_options(all, &[]),
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PostForm>,
) -> Result<Response, ApiError> {
    let Some(account) = ctx.account() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let values = form.values();
    let input = form.into_input();
    let selected = input.category_ids.clone();

    match state.content.create_post(account.id, input).await {
        Ok(_) => Ok(Redirect::to("/posts").into_response()),
        Err(ServiceError::Validation(errors)) => {
            let all = state.content.list_categories().await?;
            Ok(render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                PostFormPage {
                    signed_in: true,
                    heading: "New post".to_string(),
                    action: "/posts".to_string(),
                    errors: errors.messages(),
                    form: values,
                    categories: category_options(all, &selected),
                },
            ))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let Some(account) = ctx.account() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let (post, post_categories) = state.content.find_owned(account.id, &slug).await?;
    let all = state.content.list_categories().await?;
    let selected: Vec<Uuid> = post_categories.iter().map(|c| c.id).collect();

    Ok(render(PostFormPage {
        signed_in: true,
        heading: "Edit post".to_string(),
        action: format!("/posts/{}?_method=patch", post.slug),
        errors: Vec::new(),
        form: PostFormValues {
            title: post.title,
            content: post.content,
            excerpt: post.excerpt.unwrap_or_default(),
            featured_image_url: post.featured_image_url.unwrap_or_default(),
            is_published: post.is_published,
        },
        categories: category_options(all, &selected),
    }))
}

pub async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(ctx): Extension<RequestContext>,
    Form(form): Form<PostForm>,
) -> Result<Response, ApiError> {
    let Some(account) = ctx.account() else {
        return Ok(Redirect::to("/login").into_response());
    };
    let values = form.values();
    let input = form.into_input();
    let selected = input.category_ids.clone();

    match state.content.update_post(account.id, &slug, input).await {
        Ok(_) => Ok(Redirect::to("/posts").into_response()),
        Err(ServiceError::Validation(errors)) => {
            let all = state.content.list_categories().await?;
            Ok(render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                PostFormPage {
                    signed_in: true,
                    heading: "Edit post".to_string(),
                    action: format!("/posts/{slug}?_method=patch"),
                    errors: errors.messages(),
                    form: values,
                    categories: category_options(all, &selected),
                },
            ))
        }
        Err(err) => Err(err.into()),
    }
}

/// DELETE /posts/{slug}: soft delete. The post drops out of public queries
/// immediately; its published flag is untouched.
pub async fn discard(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let Some(account) = ctx.account() else {
        return Ok(Redirect::to("/login").into_response());
    };
    state.content.discard(account.id, &slug).await?;
    Ok(Redirect::to("/posts").into_response())
}

/// PATCH /posts/{slug}/restore: back to whichever of draft/published the
/// post was when discarded.
pub async fn restore(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let Some(account) = ctx.account() else {
        return Ok(Redirect::to("/login").into_response());
    };
    state.content.restore(account.id, &slug).await?;
    Ok(Redirect::to("/posts").into_response())
}
