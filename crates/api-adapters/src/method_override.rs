//! Browser-compatibility method override.
//!
//! HTML forms can only submit GET and POST. Forms that target the PATCH and
//! DELETE routes declare the real method in a `_method` query parameter and
//! submit as POST; this middleware rewrites the method before routing, so
//! the routing table keeps its honest verbs.

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;

pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST {
        if let Some(declared) = declared_method(req.uri().query()) {
            *req.method_mut() = declared;
        }
    }
    next.run(req).await
}

/// Only the two methods forms actually need; anything else declared in
/// `_method` is ignored and the request stays a POST.
fn declared_method(query: Option<&str>) -> Option<Method> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "_method" {
            return None;
        }
        match value.to_ascii_lowercase().as_str() {
            "patch" => Some(Method::PATCH),
            "delete" => Some(Method::DELETE),
            _ => None,
        }
    })
}
