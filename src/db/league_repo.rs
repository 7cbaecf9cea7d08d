use anyhow::{anyhow, Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::League;

/// Invite codes are short, case-insensitive and derived from a UUID, so a
/// collision retry loop is enough.
fn new_invite_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

/// Create a league and enrol the owner in one transaction.
pub async fn create(db: &PgPool, name: &str, owner_id: Uuid) -> Result<League> {
    for _ in 0..3 {
        let code = new_invite_code();
        let mut tx = db.begin().await?;

        let league = sqlx::query_as::<_, League>(
            r#"INSERT INTO leagues (name, invite_code, owner_id)
               VALUES ($1, $2, $3)
               ON CONFLICT (invite_code) DO NOTHING
               RETURNING *"#,
        )
        .bind(name)
        .bind(&code)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await
        .context("creating league")?;

        let Some(league) = league else {
            continue; // code collision, try another
        };

        sqlx::query("INSERT INTO league_members (league_id, user_id) VALUES ($1, $2)")
            .bind(league.id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await
            .context("enrolling owner")?;

        tx.commit().await?;
        return Ok(league);
    }
    Err(anyhow!("could not allocate a unique invite code"))
}

/// Join via invite code; idempotent for existing members.
pub async fn join(db: &PgPool, invite_code: &str, user_id: Uuid) -> Result<Option<League>> {
    let league = sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE invite_code = $1")
        .bind(invite_code.to_uppercase())
        .fetch_optional(db)
        .await
        .context("resolving invite code")?;

    let Some(league) = league else {
        return Ok(None);
    };

    sqlx::query(
        r#"INSERT INTO league_members (league_id, user_id)
           VALUES ($1, $2)
           ON CONFLICT DO NOTHING"#,
    )
    .bind(league.id)
    .bind(user_id)
    .execute(db)
    .await
    .context("joining league")?;

    Ok(Some(league))
}

/// Leave a league. The owner may not leave; they anchor the invite code.
pub async fn leave(db: &PgPool, league_id: Uuid, user_id: Uuid) -> Result<()> {
    let owner: Option<Uuid> = sqlx::query_scalar("SELECT owner_id FROM leagues WHERE id = $1")
        .bind(league_id)
        .fetch_optional(db)
        .await
        .context("fetching league owner")?;

    match owner {
        None => return Err(anyhow!("no such league")),
        Some(o) if o == user_id => return Err(anyhow!("owner cannot leave their own league")),
        Some(_) => {}
    }

    let rows = sqlx::query("DELETE FROM league_members WHERE league_id = $1 AND user_id = $2")
        .bind(league_id)
        .bind(user_id)
        .execute(db)
        .await
        .context("leaving league")?
        .rows_affected();

    if rows == 0 {
        Err(anyhow!("not a member"))
    } else {
        Ok(())
    }
}

pub async fn is_member(db: &PgPool, league_id: Uuid, user_id: Uuid) -> Result<bool> {
    Ok(sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(
               SELECT 1 FROM league_members
                WHERE league_id = $1 AND user_id = $2
           )"#,
    )
    .bind(league_id)
    .bind(user_id)
    .fetch_one(db)
    .await
    .context("checking league membership")?)
}

pub async fn get(db: &PgPool, league_id: Uuid) -> Result<Option<League>> {
    sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE id = $1")
        .bind(league_id)
        .fetch_optional(db)
        .await
        .context("fetching league")
}

pub async fn members(db: &PgPool, league_id: Uuid) -> Result<Vec<(Uuid, String)>> {
    sqlx::query_as::<_, (Uuid, String)>(
        r#"SELECT u.id, u.display_name
             FROM league_members m
             JOIN users u ON u.id = m.user_id
            WHERE m.league_id = $1
            ORDER BY u.display_name"#,
    )
    .bind(league_id)
    .fetch_all(db)
    .await
    .context("listing league members")
}

pub async fn leagues_of(db: &PgPool, user_id: Uuid) -> Result<Vec<League>> {
    sqlx::query_as::<_, League>(
        r#"SELECT l.* FROM leagues l
             JOIN league_members m ON m.league_id = l.id
            WHERE m.user_id = $1
            ORDER BY l.created_at"#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("listing user's leagues")
}
