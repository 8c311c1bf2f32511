//! The access gate: which routes are public, and what to do when a
//! protected route is hit without an authenticated session.
//!
//! Public access is declared per route (method + path shape), not by path
//! prefix. A prefix rule like "everything under /posts is public" would also
//! admit the new-post form and the creation endpoint that live under the same
//! prefix; the explicit table below cannot over-admit that way.

use domains::session::SessionState;

/// What the gate decided for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// Redirect to the login form; `expired` marks the case where a session
    /// was present but past its expiry, so the form can say so once.
    RequireLogin { expired: bool },
}

/// True iff this (method, path) pair is reachable without a session.
pub fn is_public(method: &str, path: &str) -> bool {
    let segments: Vec<&str> = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
    match (method, segments.as_slice()) {
        ("GET", []) => true,                       // home
        ("GET", ["login"]) => true,                // login form
        ("POST", ["sessions"]) => true,            // authenticate
        // HTML forms can only POST, so logout answers both.
        ("DELETE" | "POST", ["logout"]) => true,   // clear session
        // A single published post. "new" is the creation form, which shares
        // the /posts prefix but is very much not public.
        ("GET", ["posts", slug]) => *slug != "new",
        _ => false,
    }
}

/// Pure decision: evaluated once per request, before any handler runs.
pub fn decide(method: &str, path: &str, session: &SessionState) -> GateDecision {
    if is_public(method, path) || session.is_authenticated() {
        GateDecision::Allow
    } else {
        GateDecision::RequireLogin {
            expired: matches!(session, SessionState::Expired),
        }
    }
}
