//! Category management over HTTP.

mod support;

use axum::http::{header, StatusCode};

use support::body_text;

#[tokio::test]
async fn categories_require_a_session() {
    let app = support::app().await;

    let res = app.get("/categories", None).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn create_list_and_delete_a_category() {
    let app = support::app().await;
    app.register("ada@example.com").await;
    let cookie = app.login("ada@example.com").await;

    let res = app
        .post_form("/categories", Some(&cookie), "name=Rust")
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/categories");

    let html = body_text(app.get("/categories", Some(&cookie)).await).await;
    assert!(html.contains("Rust"));

    let category = &app.content.list_categories().await.expect("list")[0];
    let res = app
        .delete(&format!("/categories/{}", category.id), Some(&cookie))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let html = body_text(app.get("/categories", Some(&cookie)).await).await;
    assert!(!html.contains("Rust"));
}

#[tokio::test]
async fn duplicate_and_blank_names_rerender_with_422() {
    let app = support::app().await;
    app.register("ada@example.com").await;
    let cookie = app.login("ada@example.com").await;

    app.post_form("/categories", Some(&cookie), "name=Rust")
        .await;
    let res = app
        .post_form("/categories", Some(&cookie), "name=Rust")
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = app.post_form("/categories", Some(&cookie), "name=").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(res).await;
    assert!(html.contains("blank"));
}

#[tokio::test]
async fn deleting_an_unknown_category_is_a_404() {
    let app = support::app().await;
    app.register("ada@example.com").await;
    let cookie = app.login("ada@example.com").await;

    let res = app
        .delete(
            "/categories/00000000-0000-0000-0000-000000000000",
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
