//! Shared harness for the HTTP-level tests: an app wired against an
//! in-memory SQLite database, plus request helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::Duration;
use sqlx::SqlitePool;
use tower::ServiceExt;

use api_adapters::{build_router, AppState};
use auth_adapters::{Argon2Hasher, HmacSessionCodec};
use domains::models::Account;
use services::{ContentService, IdentityService, SessionManager};
use storage_adapters::{SqliteAccountRepo, SqliteCategoryRepo, SqlitePostRepo};

pub const COOKIE_NAME: &str = "quillpress_session";
pub const PASSWORD: &str = "hunter2hunter2";

pub struct TestApp {
    pub router: Router,
    pub identity: Arc<IdentityService>,
    pub content: Arc<ContentService>,
    pub pool: SqlitePool,
}

pub async fn app() -> TestApp {
    let pool = storage_adapters::connect_in_memory()
        .await
        .expect("in-memory database");

    let accounts = Arc::new(SqliteAccountRepo::new(pool.clone()));
    let posts = Arc::new(SqlitePostRepo::new(pool.clone()));
    let categories = Arc::new(SqliteCategoryRepo::new(pool.clone()));

    let identity = Arc::new(IdentityService::new(accounts.clone(), Arc::new(Argon2Hasher)));
    let content = Arc::new(ContentService::new(posts, categories));
    let state = AppState {
        identity: identity.clone(),
        sessions: Arc::new(SessionManager::new(
            Arc::new(HmacSessionCodec::new(b"integration-test-secret")),
            Duration::days(14),
        )),
        content: content.clone(),
        accounts,
        cookie_name: COOKIE_NAME.to_string(),
    };

    TestApp {
        router: build_router(state),
        identity,
        content,
        pool,
    }
}

impl TestApp {
    pub async fn register(&self, email: &str) -> Account {
        self.identity
            .register(email, PASSWORD)
            .await
            .expect("register account")
    }

    /// Logs in over HTTP and returns the `name=token` cookie pair.
    pub async fn login(&self, email: &str) -> String {
        let res = self
            .post_form("/sessions", None, &format!("email={email}&password={PASSWORD}"))
            .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "login should redirect");
        session_cookie(&res).expect("login should set the session cookie")
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        self.send("GET", path, cookie, None).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &str,
    ) -> Response<Body> {
        self.send("POST", path, cookie, Some(body)).await
    }

    pub async fn patch_form(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &str,
    ) -> Response<Body> {
        self.send("PATCH", path, cookie, Some(body)).await
    }

    pub async fn delete(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        self.send("DELETE", path, cookie, None).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
        form: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match form {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.router.clone().oneshot(request).await.expect("response")
    }
}

/// The `name=value` pair from the response's Set-Cookie header, if any.
pub fn session_cookie(res: &Response<Body>) -> Option<String> {
    let raw = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(|pair| pair.trim().to_string())
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
