//! Repository for the `comments` table.

use sqlx::PgPool;

use addonforge_core::types::DbId;

use crate::models::comment::{Comment, InsertComment};

/// Column list for `comments` queries.
const COLUMNS: &str = "\
    id, request_id, user_id, user_name, user_avatar, text, \
    is_admin, parent_id, reply_to_user_name, created_at";

/// Provides append and read operations for comments. Comments are never
/// edited or deleted individually; they go away with their request.
pub struct CommentRepo;

impl CommentRepo {
    /// Append a comment and refresh the parent request's `updated_at` in
    /// one transaction.
    pub async fn create(pool: &PgPool, input: &InsertComment) -> Result<Comment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO comments \
                (request_id, user_id, user_name, user_avatar, text, \
                 is_admin, parent_id, reply_to_user_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(input.request_id)
            .bind(input.user_id)
            .bind(&input.user_name)
            .bind(&input.user_avatar)
            .bind(&input.text)
            .bind(input.is_admin)
            .bind(input.parent_id)
            .bind(&input.reply_to_user_name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE requests SET updated_at = NOW() WHERE id = $1")
            .bind(input.request_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment)
    }

    /// Find a reply target: the comment must belong to `request_id` and be
    /// top-level (one-level threading, enforced at write time).
    pub async fn find_reply_target(
        pool: &PgPool,
        request_id: DbId,
        comment_id: DbId,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE id = $1 AND request_id = $2 AND parent_id IS NULL"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(comment_id)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }

    /// All comments of a request in posting order.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE request_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }

    /// Total number of comments across all requests (admin dashboard).
    pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
