//! Per-request context and the access-gate middleware.
//!
//! The gate runs before every handler: it validates the session token once,
//! resolves the current account once, and either admits the request (with the
//! context stored in request extensions) or redirects to the login form.
//! Handlers never re-query the identity store for "who is this".

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;

use domains::models::Account;
use domains::session::SessionState;
use services::gate::{self, GateDecision};

use crate::cookies;
use crate::AppState;

/// Explicit request-scoped context, populated exactly once by the gate.
#[derive(Clone)]
pub struct RequestContext {
    account: Option<Account>,
    /// True when a session token was presented but had expired; used to show
    /// a one-time notice.
    pub expired: bool,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self {
            account: None,
            expired: false,
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn signed_in(&self) -> bool {
        self.account.is_some()
    }
}

pub async fn gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = cookies::read_session(req.headers(), &state.cookie_name);
    let session = state.sessions.validate(token.as_deref(), Utc::now());

    let mut ctx = RequestContext::anonymous();
    ctx.expired = matches!(session, SessionState::Expired);
    // A stale cookie (expired, or orphaned by a deleted account) is cleared
    // on the way out instead of being re-validated on every request.
    let mut stale_token = ctx.expired;

    // Resolve the account behind an authenticated session. A token whose
    // account has since vanished degrades to anonymous.
    let effective = match &session {
        SessionState::Authenticated(claims) => {
            match state.accounts.find_by_id(claims.account_id).await {
                Ok(Some(account)) => {
                    ctx.account = Some(account);
                    session.clone()
                }
                Ok(None) => {
                    stale_token = true;
                    SessionState::Anonymous
                }
                Err(err) => {
                    tracing::error!(error = %err, "account lookup failed in gate");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        }
        other => other.clone(),
    };

    match gate::decide(req.method().as_str(), req.uri().path(), &effective) {
        GateDecision::Allow => {
            req.extensions_mut().insert(ctx);
            let mut response = next.run(req).await;
            if stale_token {
                cookies::clear_session(response.headers_mut(), &state.cookie_name);
            }
            response
        }
        GateDecision::RequireLogin { expired } => {
            let target = if expired { "/login?expired=1" } else { "/login" };
            let mut response = Redirect::to(target).into_response();
            if stale_token {
                cookies::clear_session(response.headers_mut(), &state.cookie_name);
            }
            response
        }
    }
}
