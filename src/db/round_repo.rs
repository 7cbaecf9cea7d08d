use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Round;
use crate::game::gates;

pub async fn create(
    db: &PgPool,
    name: &str,
    deadline: DateTime<Utc>,
    joker_limit: i32,
) -> Result<Round> {
    sqlx::query_as::<_, Round>(
        r#"INSERT INTO rounds (name, deadline, joker_limit)
           VALUES ($1, $2, $3)
           RETURNING *"#,
    )
    .bind(name)
    .bind(deadline)
    .bind(joker_limit)
    .fetch_one(db)
    .await
    .context("creating round")
}

pub async fn get(db: &PgPool, round_id: Uuid) -> Result<Option<Round>> {
    sqlx::query_as::<_, Round>("SELECT * FROM rounds WHERE id = $1")
        .bind(round_id)
        .fetch_optional(db)
        .await
        .context("fetching round")
}

/// Newest deadline first.
pub async fn list(db: &PgPool) -> Result<Vec<Round>> {
    sqlx::query_as::<_, Round>("SELECT * FROM rounds ORDER BY deadline DESC")
        .fetch_all(db)
        .await
        .context("listing rounds")
}

/// The open round with the nearest future deadline, if any.
pub async fn current(db: &PgPool) -> Result<Option<Round>> {
    sqlx::query_as::<_, Round>(
        r#"SELECT * FROM rounds
            WHERE status = 'open' AND deadline > NOW()
            ORDER BY deadline
            LIMIT 1"#,
    )
    .fetch_optional(db)
    .await
    .context("fetching current round")
}

pub async fn update(
    db: &PgPool,
    round_id: Uuid,
    name: Option<&str>,
    deadline: Option<DateTime<Utc>>,
    joker_limit: Option<i32>,
) -> Result<Option<Round>> {
    sqlx::query_as::<_, Round>(
        r#"UPDATE rounds
              SET name        = COALESCE($2, name),
                  deadline    = COALESCE($3, deadline),
                  joker_limit = COALESCE($4, joker_limit)
            WHERE id = $1
        RETURNING *"#,
    )
    .bind(round_id)
    .bind(name)
    .bind(deadline)
    .bind(joker_limit)
    .fetch_optional(db)
    .await
    .context("updating round")
}

pub async fn set_status(db: &PgPool, round_id: Uuid, status: &str) -> Result<bool> {
    let rows = sqlx::query("UPDATE rounds SET status = $2 WHERE id = $1")
        .bind(round_id)
        .bind(status)
        .execute(db)
        .await
        .context("updating round status")?
        .rows_affected();
    Ok(rows > 0)
}

/// Whether a round still takes predictions. False for unknown rounds.
pub async fn accepting_predictions(db: &PgPool, round_id: Uuid) -> Result<bool> {
    let round: Option<(String, DateTime<Utc>)> =
        sqlx::query_as("SELECT status, deadline FROM rounds WHERE id = $1")
            .bind(round_id)
            .fetch_optional(db)
            .await
            .context("checking round deadline")?;

    Ok(round.map_or(false, |(status, deadline)| {
        gates::accepts_predictions(&status, deadline, Utc::now())
    }))
}
