//! Mapping from service errors to HTTP responses.
//!
//! Validation errors are normally intercepted by the submitting handler for
//! a form re-render; everything that reaches this type takes the generic
//! path: 404 for misses (including "exists but not yours"), 500 for the rest.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use services::ServiceError;

pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

pub fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html("<h1>404 Not Found</h1>".to_string()),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::NotFound(_) => not_found(),
            ServiceError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(format!("<h1>422 Unprocessable</h1><p>{errors}</p>")),
            )
                .into_response(),
            ServiceError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>500 Internal Server Error</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Renders an askama page, downgrading a template failure to a 500 instead
/// of panicking.
pub fn render(template: impl askama::Template) -> Response {
    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Same as [`render`] but with an explicit status, for 422 form re-renders.
pub fn render_with_status(status: StatusCode, template: impl askama::Template) -> Response {
    let mut response = render(template);
    if response.status() == StatusCode::OK {
        *response.status_mut() = status;
    }
    response
}
