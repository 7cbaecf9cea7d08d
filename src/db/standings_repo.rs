use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::game::standings::{assign_ranks, movement};

#[derive(Debug, Serialize, FromRow)]
pub struct StandingRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub total_points: i64,
    /// Fixtures this user has been scored on.
    pub scored: i64,
}

#[derive(Debug, Serialize)]
pub struct RankedRow {
    pub rank: i64,
    pub user_id: Uuid,
    pub display_name: String,
    pub total_points: i64,
    pub scored: i64,
}

#[derive(Debug, Serialize)]
pub struct SnapshotRow {
    pub rank: i64,
    pub user_id: Uuid,
    pub display_name: String,
    pub total_points: i64,
    /// Rank delta against the previous round's snapshot; None for debutants.
    pub movement: Option<i64>,
    pub movement_indicator: String,
}

fn rank_rows(rows: Vec<StandingRow>) -> Vec<RankedRow> {
    let points: Vec<i64> = rows.iter().map(|r| r.total_points).collect();
    let ranks = assign_ranks(&points);
    rows.into_iter()
        .zip(ranks)
        .map(|(r, rank)| RankedRow {
            rank,
            user_id: r.user_id,
            display_name: r.display_name,
            total_points: r.total_points,
            scored: r.scored,
        })
        .collect()
}

/// Overall standings across every scored fixture. Every registered user
/// appears, including those yet to earn a point.
pub async fn overall(db: &PgPool, limit: i64) -> Result<Vec<RankedRow>> {
    let rows = sqlx::query_as::<_, StandingRow>(
        r#"SELECT u.id AS user_id, u.display_name,
                  COALESCE(SUM(p.points_awarded), 0)::BIGINT AS total_points,
                  COUNT(p.points_awarded)::BIGINT AS scored
             FROM users u
             LEFT JOIN predictions p
               ON p.user_id = u.id AND p.points_awarded IS NOT NULL
            GROUP BY u.id
            ORDER BY total_points DESC, u.display_name
            LIMIT $1"#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
    .context("querying overall standings")?;

    Ok(rank_rows(rows))
}

/// Standings restricted to one league's members.
pub async fn league(db: &PgPool, league_id: Uuid) -> Result<Vec<RankedRow>> {
    let rows = sqlx::query_as::<_, StandingRow>(
        r#"SELECT u.id AS user_id, u.display_name,
                  COALESCE(SUM(p.points_awarded), 0)::BIGINT AS total_points,
                  COUNT(p.points_awarded)::BIGINT AS scored
             FROM league_members m
             JOIN users u ON u.id = m.user_id
             LEFT JOIN predictions p
               ON p.user_id = u.id AND p.points_awarded IS NOT NULL
            WHERE m.league_id = $1
            GROUP BY u.id
            ORDER BY total_points DESC, u.display_name"#,
    )
    .bind(league_id)
    .fetch_all(db)
    .await
    .context("querying league standings")?;

    Ok(rank_rows(rows))
}

/// Freeze the overall table into `round_standings` for one round.
/// Replaces any earlier snapshot of the same round.
pub async fn snapshot_round(db: &PgPool, round_id: Uuid) -> Result<usize> {
    let rows = sqlx::query_as::<_, StandingRow>(
        r#"SELECT u.id AS user_id, u.display_name,
                  COALESCE(SUM(p.points_awarded), 0)::BIGINT AS total_points,
                  COUNT(p.points_awarded)::BIGINT AS scored
             FROM users u
             LEFT JOIN predictions p
               ON p.user_id = u.id AND p.points_awarded IS NOT NULL
            GROUP BY u.id
            ORDER BY total_points DESC, u.display_name"#,
    )
    .fetch_all(db)
    .await
    .context("querying standings for snapshot")?;

    let points: Vec<i64> = rows.iter().map(|r| r.total_points).collect();
    let ranks = assign_ranks(&points);

    let mut tx = db.begin().await?;
    sqlx::query("DELETE FROM round_standings WHERE round_id = $1")
        .bind(round_id)
        .execute(&mut *tx)
        .await
        .context("clearing old snapshot")?;

    let count = rows.len();
    for (row, rank) in rows.into_iter().zip(ranks) {
        sqlx::query(
            r#"INSERT INTO round_standings (round_id, user_id, rank, total_points)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(round_id)
        .bind(row.user_id)
        .bind(rank)
        .bind(row.total_points)
        .execute(&mut *tx)
        .await
        .context("writing snapshot row")?;
    }
    tx.commit().await?;
    Ok(count)
}

/// One round's snapshot, with movement relative to the snapshot of the round
/// whose deadline most recently preceded it.
pub async fn round_with_movement(db: &PgPool, round_id: Uuid) -> Result<Vec<SnapshotRow>> {
    let rows = sqlx::query_as::<_, (Uuid, String, i64, i64, Option<i64>)>(
        r#"SELECT s.user_id, u.display_name, s.rank, s.total_points, prev.rank
             FROM round_standings s
             JOIN users u ON u.id = s.user_id
             JOIN rounds r ON r.id = s.round_id
             LEFT JOIN round_standings prev
               ON prev.user_id = s.user_id
              AND prev.round_id = (
                      SELECT r2.id FROM rounds r2
                       WHERE r2.deadline < r.deadline
                         AND EXISTS (SELECT 1 FROM round_standings rs
                                      WHERE rs.round_id = r2.id)
                       ORDER BY r2.deadline DESC
                       LIMIT 1)
            WHERE s.round_id = $1
            ORDER BY s.rank, u.display_name"#,
    )
    .bind(round_id)
    .fetch_all(db)
    .await
    .context("querying round snapshot")?;

    Ok(rows
        .into_iter()
        .map(|(user_id, display_name, rank, total_points, prev_rank)| {
            let mv = movement(prev_rank, rank);
            SnapshotRow {
                rank,
                user_id,
                display_name,
                total_points,
                movement: mv,
                movement_indicator: crate::display::movement_indicator(mv),
            }
        })
        .collect())
}
