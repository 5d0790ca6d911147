//! News article entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use addonforge_core::types::{DbId, Timestamp};

/// A row from the `news_articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NewsArticle {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub user_id: DbId,
    pub user_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-supplied fields for creating a news article.
#[derive(Debug, Deserialize)]
pub struct CreateNewsArticle {
    pub title: String,
    pub content: String,
    /// Defaults to a draft (unpublished) when absent.
    pub published: Option<bool>,
}

/// DTO for updating a news article. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateNewsArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}
