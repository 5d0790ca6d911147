//! Repository for the `news_articles` table.

use sqlx::PgPool;

use addonforge_core::types::DbId;

use crate::models::news::{CreateNewsArticle, NewsArticle, UpdateNewsArticle};

/// Column list for `news_articles` queries.
const COLUMNS: &str =
    "id, title, content, published, user_id, user_name, created_at, updated_at";

/// Provides CRUD operations for news articles.
pub struct NewsRepo;

impl NewsRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        user_name: &str,
        input: &CreateNewsArticle,
    ) -> Result<NewsArticle, sqlx::Error> {
        let query = format!(
            "INSERT INTO news_articles (title, content, published, user_id, user_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.published.unwrap_or(false))
            .bind(user_id)
            .bind(user_name)
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news_articles WHERE id = $1");
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All articles, newest first (admin listing).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<NewsArticle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news_articles ORDER BY created_at DESC");
        sqlx::query_as::<_, NewsArticle>(&query).fetch_all(pool).await
    }

    /// Published articles, newest first, capped at `limit` (public listing).
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<NewsArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM news_articles
             WHERE published = TRUE
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNewsArticle,
    ) -> Result<Option<NewsArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE news_articles SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                published = COALESCE($4, published),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NewsArticle>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.published)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news_articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
