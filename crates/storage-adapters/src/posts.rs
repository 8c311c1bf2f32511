//! SQLite implementation of `PostRepo`.
//!
//! Slug uniqueness among active posts is enforced by the partial unique index
//! `posts_slug_active`; the view counter is a single server-side UPDATE.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use domains::error::RepoError;
use domains::models::{Category, NewPost, Post, PostChanges, PostWithCategories};
use domains::ports::PostRepo;

use crate::categories::category_from_row;
use crate::map_sqlx_error;

pub struct SqlitePostRepo {
    pool: SqlitePool,
}

impl SqlitePostRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &SqliteRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        content: row.get("content"),
        excerpt: row.get("excerpt"),
        featured_image_url: row.get("featured_image_url"),
        views_count: row.get("views_count"),
        is_published: row.get("is_published"),
        discarded_at: row.get("discarded_at"),
        account_id: row.get("account_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Writes the join rows for one post. Unknown category ids are skipped via
/// the SELECT guard; duplicate pairs collapse via INSERT OR IGNORE.
async fn insert_join_rows(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    post_id: Uuid,
    category_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    for category_id in category_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO post_categories (id, post_id, category_id) \
             SELECT ?, ?, id FROM categories WHERE id = ?",
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(category_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl PostRepo for SqlitePostRepo {
    /// Post row and join rows land in one transaction — no post without its
    /// categories, no join rows without their post.
    async fn insert(&self, post: NewPost, category_ids: Vec<Uuid>) -> Result<Post, RepoError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            "INSERT INTO posts (id, title, slug, content, excerpt, featured_image_url, \
             views_count, is_published, discarded_at, account_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, 0, ?, NULL, ?, ?, ?)",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.featured_image_url)
        .bind(post.is_published)
        .bind(post.account_id)
        .bind(post.created_at)
        .bind(post.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        insert_join_rows(&mut tx, post.id, &category_ids)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(Post {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            featured_image_url: post.featured_image_url,
            views_count: 0,
            is_published: post.is_published,
            discarded_at: None,
            account_id: post.account_id,
            created_at: post.created_at,
            updated_at: post.created_at,
        })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        category_ids: Vec<Uuid>,
    ) -> Result<Post, RepoError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            "UPDATE posts SET title = ?, slug = ?, content = ?, excerpt = ?, \
             featured_image_url = ?, is_published = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.content)
        .bind(&changes.excerpt)
        .bind(&changes.featured_image_url)
        .bind(changes.is_published)
        .bind(changes.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        // The category set is replaced wholesale.
        sqlx::query("DELETE FROM post_categories WHERE post_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        insert_join_rows(&mut tx, id, &category_ids)
            .await
            .map_err(map_sqlx_error)?;

        let row = sqlx::query("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(post_from_row(&row))
    }

    async fn list_published(&self, limit: i64) -> Result<Vec<Post>, RepoError> {
        let rows = sqlx::query(
            "SELECT * FROM posts WHERE is_published = 1 AND discarded_at IS NULL \
             ORDER BY created_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn list_owned(
        &self,
        owner_id: Uuid,
        include_discarded: bool,
    ) -> Result<Vec<PostWithCategories>, RepoError> {
        let sql = if include_discarded {
            "SELECT * FROM posts WHERE account_id = ? ORDER BY created_at DESC"
        } else {
            "SELECT * FROM posts WHERE account_id = ? AND discarded_at IS NULL \
             ORDER BY created_at DESC"
        };
        let rows = sqlx::query(sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        let posts: Vec<Post> = rows.iter().map(post_from_row).collect();
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        // One batch query for every post's categories — not one per post.
        let placeholders = vec!["?"; posts.len()].join(", ");
        let sql = format!(
            "SELECT pc.post_id AS post_id, c.id AS id, c.name AS name, c.slug AS slug \
             FROM post_categories pc JOIN categories c ON c.id = pc.category_id \
             WHERE pc.post_id IN ({placeholders}) ORDER BY c.name",
        );
        let mut query = sqlx::query(&sql);
        for post in &posts {
            query = query.bind(post.id);
        }
        let join_rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let mut by_post: HashMap<Uuid, Vec<Category>> = HashMap::new();
        for row in &join_rows {
            let post_id: Uuid = row.get("post_id");
            by_post.entry(post_id).or_default().push(category_from_row(row));
        }

        Ok(posts
            .into_iter()
            .map(|post| {
                let categories = by_post.remove(&post.id).unwrap_or_default();
                PostWithCategories { post, categories }
            })
            .collect())
    }

    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let row = sqlx::query(
            "SELECT * FROM posts WHERE slug = ? AND is_published = 1 AND discarded_at IS NULL",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn find_owned_by_slug(
        &self,
        owner_id: Uuid,
        slug: &str,
        include_discarded: bool,
    ) -> Result<Option<Post>, RepoError> {
        let sql = if include_discarded {
            "SELECT * FROM posts WHERE account_id = ? AND slug = ?"
        } else {
            "SELECT * FROM posts WHERE account_id = ? AND slug = ? AND discarded_at IS NULL"
        };
        let row = sqlx::query(sql)
            .bind(owner_id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.as_ref().map(post_from_row))
    }

    async fn categories_of(&self, post_id: Uuid) -> Result<Vec<Category>, RepoError> {
        let rows = sqlx::query(
            "SELECT c.id AS id, c.name AS name, c.slug AS slug \
             FROM post_categories pc JOIN categories c ON c.id = pc.category_id \
             WHERE pc.post_id = ? ORDER BY c.name",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;
        Ok(rows.iter().map(category_from_row).collect())
    }

    async fn set_discarded(
        &self,
        id: Uuid,
        discarded_at: Option<DateTime<Utc>>,
    ) -> Result<(), RepoError> {
        sqlx::query("UPDATE posts SET discarded_at = ? WHERE id = ?")
            .bind(discarded_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// `views_count = views_count + 1` executed by the database — never a
    /// read-then-write-back from application memory.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        sqlx::query("UPDATE posts SET views_count = views_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
