//! Typed configuration for Quillpress.
//!
//! Sources, in precedence order: environment variables prefixed `QUILLPRESS`
//! (separator `__`, e.g. `QUILLPRESS__SESSION__SECRET`), then an optional
//! `quillpress.toml`, then built-in development defaults. `.env` files are
//! honored via dotenvy before the environment is read.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Development fallback only; `load` warns when it is still in use.
const DEV_SESSION_SECRET: &str = "dev-only-session-secret-change-me";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Invalid(#[from] config::ConfigError),

    #[error("session secret must not be empty")]
    EmptySessionSecret,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Listen address, e.g. `127.0.0.1:8080`.
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx SQLite URL, e.g. `sqlite:quillpress.db`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// HMAC signing key for session tokens.
    pub secret: SecretString,
    /// Absolute session lifetime in days, fixed at login.
    pub ttl_days: i64,
    pub cookie_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("http.bind", "127.0.0.1:8080")?
            .set_default("database.url", "sqlite:quillpress.db")?
            .set_default("session.secret", DEV_SESSION_SECRET)?
            .set_default("session.ttl_days", 14)?
            .set_default("session.cookie_name", "quillpress_session")?
            .add_source(config::File::with_name("quillpress").required(false))
            .add_source(
                config::Environment::with_prefix("QUILLPRESS").separator("__"),
            )
            .build()?;

        let app: AppConfig = settings.try_deserialize()?;
        if app.session.secret.expose_secret().is_empty() {
            return Err(ConfigError::EmptySessionSecret);
        }
        if app.session.secret.expose_secret() == DEV_SESSION_SECRET {
            tracing::warn!("using the built-in development session secret");
        }
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let app = AppConfig::load().expect("defaults should load");
        assert_eq!(app.session.ttl_days, 14);
        assert_eq!(app.session.cookie_name, "quillpress_session");
        assert!(!app.session.secret.expose_secret().is_empty());
        assert!(app.database.url.starts_with("sqlite:"));
    }
}
