//! Session lifecycle: issue at login, validate per request.
//!
//! The session lives entirely in the signed token; the manager is stateless.
//! Logout is therefore the HTTP layer dropping the whole cookie — there is
//! no partial "null the identity pointer" state that could leak anything to
//! the next occupant of the cookie slot.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use domains::ports::SessionCodec;
use domains::session::{SessionClaims, SessionState};

pub struct SessionManager {
    codec: Arc<dyn SessionCodec>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(codec: Arc<dyn SessionCodec>, ttl: Duration) -> Self {
        Self { codec, ttl }
    }

    /// Issues a token for a fresh session.
    ///
    /// `session_id` is newly generated on every call, so whatever token the
    /// client presented before this login is never valid afterwards — the
    /// anti-fixation contract. Expiry is absolute from `now`; activity never
    /// extends it.
    pub fn login(&self, account_id: Uuid, now: DateTime<Utc>) -> (String, SessionClaims) {
        let claims = SessionClaims {
            session_id: Uuid::new_v4(),
            account_id,
            expires_at: now + self.ttl,
        };
        (self.codec.encode(&claims), claims)
    }

    /// Classifies an inbound token. Expiry is checked against the supplied
    /// clock: authenticated strictly before the expiry instant, expired at or
    /// after it.
    pub fn validate(&self, token: Option<&str>, now: DateTime<Utc>) -> SessionState {
        let Some(token) = token else {
            return SessionState::Anonymous;
        };
        match self.codec.decode(token) {
            None => SessionState::Anonymous,
            Some(claims) if now >= claims.expires_at => SessionState::Expired,
            Some(claims) => SessionState::Authenticated(claims),
        }
    }
}
