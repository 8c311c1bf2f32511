//! SQLite implementation of `CategoryRepo`.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use domains::error::RepoError;
use domains::models::Category;
use domains::ports::CategoryRepo;

use crate::map_sqlx_error;

pub struct SqliteCategoryRepo {
    pool: SqlitePool,
}

impl SqliteCategoryRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

pub(crate) fn category_from_row(row: &SqliteRow) -> Category {
    Category {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
    }
}

#[async_trait]
impl CategoryRepo for SqliteCategoryRepo {
    async fn insert(&self, category: Category) -> Result<Category, RepoError> {
        sqlx::query("INSERT INTO categories (id, name, slug) VALUES (?, ?, ?)")
            .bind(category.id)
            .bind(&category.name)
            .bind(&category.slug)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(category)
    }

    /// Join rows cascade via the foreign key; posts themselves are untouched.
    async fn delete(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let rows = sqlx::query("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.iter().map(category_from_row).collect())
    }
}
