//! Session cookie plumbing. The cookie is the session: setting it logs in,
//! clearing it wipes every piece of session-scoped state at once.

use axum::http::{header, HeaderMap, HeaderValue};

pub fn read_session(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

pub fn set_session(headers: &mut HeaderMap, name: &str, token: &str) {
    let cookie = format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_session(headers: &mut HeaderMap, name: &str) {
    let cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.append(header::SET_COOKIE, value);
    }
}
