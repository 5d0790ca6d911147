//! Handlers for news articles: a public published feed and admin CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use addonforge_core::error::CoreError;
use addonforge_core::news as news_rules;
use addonforge_core::types::DbId;
use addonforge_db::models::news::{CreateNewsArticle, NewsArticle, UpdateNewsArticle};
use addonforge_db::repositories::{NewsRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /news
// ---------------------------------------------------------------------------

/// Published articles, newest first, capped for the public feed.
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NewsArticle>>>> {
    let articles = NewsRepo::list_published(&state.pool, news_rules::PUBLIC_NEWS_LIMIT).await?;
    Ok(Json(DataResponse { data: articles }))
}

// ---------------------------------------------------------------------------
// GET /admin/news
// ---------------------------------------------------------------------------

/// All articles including drafts. Admin only.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NewsArticle>>>> {
    let articles = NewsRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: articles }))
}

// ---------------------------------------------------------------------------
// POST /admin/news
// ---------------------------------------------------------------------------

/// Create an article (draft unless `published` is set). Admin only.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNewsArticle>,
) -> AppResult<impl IntoResponse> {
    let title = input.title.trim().to_string();
    let content = input.content.trim().to_string();
    news_rules::validate_title(&title)?;
    news_rules::validate_content(&content)?;

    let author = UserRepo::find_by_id(&state.pool, admin.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let create = CreateNewsArticle {
        title,
        content,
        published: input.published,
    };
    let article = NewsRepo::create(&state.pool, author.id, &author.display_name, &create).await?;

    tracing::info!(
        news_id = article.id,
        user_id = admin.user_id,
        published = article.published,
        "News article created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

// ---------------------------------------------------------------------------
// PUT /admin/news/{id}
// ---------------------------------------------------------------------------

/// Update an article's title, content, or published flag. Admin only.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNewsArticle>,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    let title = match input.title {
        Some(t) => {
            let t = t.trim().to_string();
            news_rules::validate_title(&t)?;
            Some(t)
        }
        None => None,
    };
    let content = match input.content {
        Some(c) => {
            let c = c.trim().to_string();
            news_rules::validate_content(&c)?;
            Some(c)
        }
        None => None,
    };

    let update = UpdateNewsArticle {
        title,
        content,
        published: input.published,
    };

    let article = NewsRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "NewsArticle",
            id,
        }))?;

    tracing::info!(news_id = id, user_id = admin.user_id, "News article updated");

    Ok(Json(DataResponse { data: article }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/news/{id}
// ---------------------------------------------------------------------------

/// Delete an article. Admin only.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "NewsArticle",
            id,
        }));
    }

    tracing::info!(news_id = id, user_id = admin.user_id, "News article deleted");

    Ok(StatusCode::NO_CONTENT)
}
