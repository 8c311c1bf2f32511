//! Session claims and the three-state session model.
//!
//! Sessions are not persisted: the whole session is a signed, client-held
//! token. Discarding the cookie therefore discards every piece of
//! session-scoped state at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The payload carried inside a session token.
///
/// `session_id` is regenerated at every login, which is what makes a token
/// presented before login worthless afterwards (anti-fixation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Fresh per login.
    pub session_id: Uuid,
    pub account_id: Uuid,
    /// Absolute: fixed at login, never extended by activity.
    pub expires_at: DateTime<Utc>,
}

/// Outcome of validating an inbound request's session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No token, or a token that failed signature/decoding checks.
    Anonymous,
    Authenticated(SessionClaims),
    /// Structurally valid token whose expiry instant has passed. Kept
    /// distinguishable from `Anonymous` so the caller can show a one-time
    /// "session expired" notice before treating the request as anonymous.
    Expired,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}
