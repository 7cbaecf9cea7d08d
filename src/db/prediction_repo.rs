use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Prediction;
use crate::db::round_repo;
use crate::game::gates;

/// Result of a prediction submit; the handler maps these to HTTP statuses.
#[derive(Debug)]
pub enum SubmitOutcome {
    Saved(Prediction),
    NoSuchFixture,
    /// Round closed or deadline passed.
    Locked,
    /// Round's joker allowance already spent on other fixtures.
    JokerLimitReached(i32),
}

/// A fixture's predictions as seen by other users.
#[derive(Debug)]
pub enum RevealOutcome {
    NoSuchFixture,
    /// Round still accepting predictions; picks stay hidden.
    Hidden,
    Revealed(Vec<(String, Prediction)>),
}

/// Insert or update the caller's prediction for one fixture.
///
/// Runs inside a transaction so the deadline check, the joker count and the
/// upsert see a consistent snapshot.
pub async fn submit(
    db: &PgPool,
    user_id: Uuid,
    fixture_id: Uuid,
    home_goals: i32,
    away_goals: i32,
    is_joker: bool,
) -> Result<SubmitOutcome> {
    let mut tx = db.begin().await?;

    let round: Option<(Uuid, i32, String, DateTime<Utc>)> = sqlx::query_as(
        r#"SELECT r.id, r.joker_limit, r.status, r.deadline
             FROM fixtures f
             JOIN rounds r ON r.id = f.round_id
            WHERE f.id = $1"#,
    )
    .bind(fixture_id)
    .fetch_optional(&mut *tx)
    .await
    .context("resolving fixture round")?;

    let (round_id, joker_limit, status, deadline) = match round {
        Some(r) => r,
        None => return Ok(SubmitOutcome::NoSuchFixture),
    };
    if !gates::accepts_predictions(&status, deadline, Utc::now()) {
        return Ok(SubmitOutcome::Locked);
    }

    if is_joker {
        // Jokers already placed on the round's *other* fixtures.
        let used: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM predictions p
                 JOIN fixtures f ON f.id = p.fixture_id
                WHERE p.user_id = $1
                  AND f.round_id = $2
                  AND p.is_joker
                  AND p.fixture_id <> $3"#,
        )
        .bind(user_id)
        .bind(round_id)
        .bind(fixture_id)
        .fetch_one(&mut *tx)
        .await
        .context("counting jokers")?;

        if !gates::joker_allowed(is_joker, used, joker_limit) {
            return Ok(SubmitOutcome::JokerLimitReached(joker_limit));
        }
    }

    let saved = sqlx::query_as::<_, Prediction>(
        r#"INSERT INTO predictions (user_id, fixture_id, home_goals, away_goals, is_joker)
           VALUES ($1, $2, $3, $4, $5)
           ON CONFLICT (user_id, fixture_id)
           DO UPDATE SET home_goals = EXCLUDED.home_goals,
                         away_goals = EXCLUDED.away_goals,
                         is_joker   = EXCLUDED.is_joker,
                         updated_at = NOW()
           RETURNING id, user_id, fixture_id, home_goals, away_goals,
                     is_joker, points_awarded"#,
    )
    .bind(user_id)
    .bind(fixture_id)
    .bind(home_goals)
    .bind(away_goals)
    .bind(is_joker)
    .fetch_one(&mut *tx)
    .await
    .context("upserting prediction")?;

    tx.commit().await?;
    Ok(SubmitOutcome::Saved(saved))
}

/// The caller's predictions for every fixture of a round.
pub async fn for_user_round(db: &PgPool, user_id: Uuid, round_id: Uuid) -> Result<Vec<Prediction>> {
    sqlx::query_as::<_, Prediction>(
        r#"SELECT p.id, p.user_id, p.fixture_id, p.home_goals, p.away_goals,
                  p.is_joker, p.points_awarded
             FROM predictions p
             JOIN fixtures f ON f.id = p.fixture_id
            WHERE p.user_id = $1 AND f.round_id = $2
            ORDER BY f.kickoff"#,
    )
    .bind(user_id)
    .bind(round_id)
    .fetch_all(db)
    .await
    .context("listing round predictions")
}

/// Everyone's predictions for one fixture, revealed once the round no longer
/// accepts predictions.
pub async fn for_fixture_revealed(db: &PgPool, fixture_id: Uuid) -> Result<RevealOutcome> {
    let round_id: Option<Uuid> =
        sqlx::query_scalar("SELECT round_id FROM fixtures WHERE id = $1")
            .bind(fixture_id)
            .fetch_optional(db)
            .await
            .context("resolving fixture")?;

    let Some(round_id) = round_id else {
        return Ok(RevealOutcome::NoSuchFixture);
    };
    if round_repo::accepting_predictions(db, round_id).await? {
        return Ok(RevealOutcome::Hidden);
    }

    let rows = sqlx::query_as::<_, (String, Uuid, Uuid, Uuid, i32, i32, bool, Option<i32>)>(
        r#"SELECT u.display_name, p.id, p.user_id, p.fixture_id,
                  p.home_goals, p.away_goals, p.is_joker, p.points_awarded
             FROM predictions p
             JOIN users u ON u.id = p.user_id
            WHERE p.fixture_id = $1
            ORDER BY u.display_name"#,
    )
    .bind(fixture_id)
    .fetch_all(db)
    .await
    .context("listing fixture predictions")?;

    Ok(RevealOutcome::Revealed(
        rows.into_iter()
            .map(|(name, id, user_id, fixture_id, hg, ag, joker, pts)| {
                (
                    name,
                    Prediction {
                        id,
                        user_id,
                        fixture_id,
                        home_goals: hg,
                        away_goals: ag,
                        is_joker: joker,
                        points_awarded: pts,
                    },
                )
            })
            .collect(),
    ))
}
