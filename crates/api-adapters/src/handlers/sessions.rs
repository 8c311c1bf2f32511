//! Login and logout.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use chrono::Utc;
use serde::Deserialize;

use crate::context::RequestContext;
use crate::cookies;
use crate::error::{render, render_with_status, ApiError};
use crate::pages::LoginPage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub expired: Option<String>,
}

pub async fn login_form(
    Query(query): Query<LoginQuery>,
    Extension(ctx): Extension<RequestContext>,
) -> Response {
    let notice = query
        .expired
        .is_some()
        .then(|| "Your session has expired. Please log in again.".to_string());
    render(LoginPage {
        signed_in: ctx.signed_in(),
        error: None,
        notice,
        email: String::new(),
    })
}

/// Successful authentication issues a brand-new session token (the one the
/// client held before, if any, is never valid afterwards) and redirects to
/// the admin listing. Failure re-renders the form with one deliberately vague
/// message.
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match state.identity.authenticate(&form.email, &form.password).await? {
        Some(account) => {
            let (token, _) = state.sessions.login(account.id, Utc::now());
            let mut response = Redirect::to("/posts").into_response();
            cookies::set_session(response.headers_mut(), &state.cookie_name, &token);
            Ok(response)
        }
        None => Ok(render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            LoginPage {
                signed_in: false,
                error: Some("Invalid email or password.".to_string()),
                notice: None,
                email: form.email,
            },
        )),
    }
}

/// Clears the whole session cookie — identity, expiry, everything — and
/// sends the visitor home.
pub async fn destroy(State(state): State<AppState>) -> Response {
    let mut response = Redirect::to("/").into_response();
    cookies::clear_session(response.headers_mut(), &state.cookie_name);
    response
}
