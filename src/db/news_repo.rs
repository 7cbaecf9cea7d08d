use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::NewsItem;

pub async fn create(db: &PgPool, author_id: Uuid, title: &str, body: &str) -> Result<NewsItem> {
    sqlx::query_as::<_, NewsItem>(
        r#"INSERT INTO news_items (author_id, title, body)
           VALUES ($1, $2, $3)
           RETURNING *"#,
    )
    .bind(author_id)
    .bind(title)
    .bind(body)
    .fetch_one(db)
    .await
    .context("creating news item")
}

pub async fn update(
    db: &PgPool,
    news_id: Uuid,
    title: Option<&str>,
    body: Option<&str>,
) -> Result<Option<NewsItem>> {
    sqlx::query_as::<_, NewsItem>(
        r#"UPDATE news_items
              SET title = COALESCE($2, title),
                  body  = COALESCE($3, body)
            WHERE id = $1
        RETURNING *"#,
    )
    .bind(news_id)
    .bind(title)
    .bind(body)
    .fetch_optional(db)
    .await
    .context("updating news item")
}

pub async fn delete(db: &PgPool, news_id: Uuid) -> Result<bool> {
    let rows = sqlx::query("DELETE FROM news_items WHERE id = $1")
        .bind(news_id)
        .execute(db)
        .await
        .context("deleting news item")?
        .rows_affected();
    Ok(rows > 0)
}

/// Newest first.
pub async fn list(db: &PgPool, limit: i64) -> Result<Vec<NewsItem>> {
    sqlx::query_as::<_, NewsItem>(
        "SELECT * FROM news_items ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("listing news")
}
