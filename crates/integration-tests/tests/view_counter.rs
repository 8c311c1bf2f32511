//! The view counter: increments on public reads only, atomically.

mod support;

use std::sync::Arc;

use domains::validate::PostInput;
use sqlx::Row;

use support::body_text;

fn published(title: &str) -> PostInput {
    PostInput {
        title: title.to_string(),
        content: "Body text long enough to validate.".to_string(),
        excerpt: None,
        featured_image_url: None,
        is_published: true,
        category_ids: Vec::new(),
    }
}

async fn views_in_db(pool: &sqlx::SqlitePool, slug: &str) -> i64 {
    sqlx::query("SELECT views_count FROM posts WHERE slug = ?")
        .bind(slug)
        .fetch_one(pool)
        .await
        .expect("row")
        .get("views_count")
}

#[tokio::test]
async fn each_public_read_counts_one_view() {
    let app = support::app().await;
    let owner = app.register("ada@example.com").await;
    app.content
        .create_post(owner.id, published("Counted"))
        .await
        .expect("create");

    let first = body_text(app.get("/posts/counted", None).await).await;
    assert!(first.contains("1 views"));
    let second = body_text(app.get("/posts/counted", None).await).await;
    assert!(second.contains("2 views"));

    assert_eq!(views_in_db(&app.pool, "counted").await, 2);
}

#[tokio::test]
async fn owner_reads_do_not_count() {
    let app = support::app().await;
    let owner = app.register("ada@example.com").await;
    app.content
        .create_post(owner.id, published("Counted"))
        .await
        .expect("create");
    let cookie = app.login("ada@example.com").await;

    app.get("/admin", Some(&cookie)).await;
    app.get("/posts/counted/edit", Some(&cookie)).await;
    assert_eq!(views_in_db(&app.pool, "counted").await, 0);

    // A signed-in visit to the public page still counts.
    app.get("/posts/counted", Some(&cookie)).await;
    assert_eq!(views_in_db(&app.pool, "counted").await, 1);
}

#[tokio::test]
async fn failed_reads_do_not_count() {
    let app = support::app().await;
    let owner = app.register("ada@example.com").await;
    let draft = app
        .content
        .create_post(
            owner.id,
            PostInput {
                is_published: false,
                ..published("Hidden")
            },
        )
        .await
        .expect("create");

    app.get("/posts/hidden", None).await;
    assert_eq!(views_in_db(&app.pool, &draft.slug).await, 0);
}

#[tokio::test]
async fn concurrent_reads_never_lose_an_increment() {
    let app = Arc::new(support::app().await);
    let owner = app.register("ada@example.com").await;
    app.content
        .create_post(owner.id, published("Popular"))
        .await
        .expect("create");

    let mut handles = Vec::new();
    for _ in 0..25 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.content.read_published("popular").await.expect("read");
        }));
    }
    for handle in handles {
        handle.await.expect("task");
    }

    assert_eq!(views_in_db(&app.pool, "popular").await, 25);
}
