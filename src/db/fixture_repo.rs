use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Fixture;
use crate::game::scoring;

pub async fn create(
    db: &PgPool,
    round_id: Uuid,
    home_team: &str,
    away_team: &str,
    kickoff: DateTime<Utc>,
) -> Result<Fixture> {
    sqlx::query_as::<_, Fixture>(
        r#"INSERT INTO fixtures (round_id, home_team, away_team, kickoff)
           VALUES ($1, $2, $3, $4)
           RETURNING id, round_id, home_team, away_team, kickoff,
                     home_score, away_score, status"#,
    )
    .bind(round_id)
    .bind(home_team)
    .bind(away_team)
    .bind(kickoff)
    .fetch_one(db)
    .await
    .context("creating fixture")
}

pub async fn get(db: &PgPool, fixture_id: Uuid) -> Result<Option<Fixture>> {
    sqlx::query_as::<_, Fixture>(
        r#"SELECT id, round_id, home_team, away_team, kickoff,
                  home_score, away_score, status
             FROM fixtures WHERE id = $1"#,
    )
    .bind(fixture_id)
    .fetch_optional(db)
    .await
    .context("fetching fixture")
}

pub async fn list_by_round(db: &PgPool, round_id: Uuid) -> Result<Vec<Fixture>> {
    sqlx::query_as::<_, Fixture>(
        r#"SELECT id, round_id, home_team, away_team, kickoff,
                  home_score, away_score, status
             FROM fixtures
            WHERE round_id = $1
            ORDER BY kickoff, home_team"#,
    )
    .bind(round_id)
    .fetch_all(db)
    .await
    .context("listing fixtures")
}

pub async fn update(
    db: &PgPool,
    fixture_id: Uuid,
    home_team: Option<&str>,
    away_team: Option<&str>,
    kickoff: Option<DateTime<Utc>>,
) -> Result<Option<Fixture>> {
    sqlx::query_as::<_, Fixture>(
        r#"UPDATE fixtures
              SET home_team = COALESCE($2, home_team),
                  away_team = COALESCE($3, away_team),
                  kickoff   = COALESCE($4, kickoff)
            WHERE id = $1
        RETURNING id, round_id, home_team, away_team, kickoff,
                  home_score, away_score, status"#,
    )
    .bind(fixture_id)
    .bind(home_team)
    .bind(away_team)
    .bind(kickoff)
    .fetch_optional(db)
    .await
    .context("updating fixture")
}

pub async fn delete(db: &PgPool, fixture_id: Uuid) -> Result<bool> {
    let rows = sqlx::query("DELETE FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .execute(db)
        .await
        .context("deleting fixture")?
        .rows_affected();
    Ok(rows > 0)
}

/// Record (or correct) a final score and award points to every prediction of
/// the fixture in the same transaction. Safe to call again after a score
/// correction: each prediction is re-scored from scratch.
pub async fn record_result(
    db: &PgPool,
    fixture_id: Uuid,
    home_score: i32,
    away_score: i32,
) -> Result<bool> {
    let mut tx = db.begin().await?;

    let rows = sqlx::query(
        r#"UPDATE fixtures
              SET home_score = $2,
                  away_score = $3,
                  status     = 'finished'
            WHERE id = $1"#,
    )
    .bind(fixture_id)
    .bind(home_score)
    .bind(away_score)
    .execute(&mut *tx)
    .await
    .context("storing result")?
    .rows_affected();

    if rows == 0 {
        return Ok(false);
    }

    let predictions = sqlx::query_as::<_, (Uuid, i32, i32, bool)>(
        "SELECT id, home_goals, away_goals, is_joker FROM predictions WHERE fixture_id = $1",
    )
    .bind(fixture_id)
    .fetch_all(&mut *tx)
    .await
    .context("fetching predictions to score")?;

    for (pid, home_goals, away_goals, is_joker) in predictions {
        let points =
            scoring::fixture_points(home_goals, away_goals, home_score, away_score, is_joker);
        sqlx::query("UPDATE predictions SET points_awarded = $2 WHERE id = $1")
            .bind(pid)
            .bind(points)
            .execute(&mut *tx)
            .await
            .context("awarding points")?;
    }

    tx.commit().await?;
    Ok(true)
}
