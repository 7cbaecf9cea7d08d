use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize, FromRow)]
pub struct FriendRow {
    pub friendship_id: Uuid,
    pub user_id: Uuid,
    pub display_name: String,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct PendingRow {
    pub friendship_id: Uuid,
    pub requester_id: Uuid,
    pub display_name: String,
    pub requested_at: DateTime<Utc>,
}

/// File a friend request. Rejects self-requests and any existing
/// relationship in either direction (the pair index enforces the latter).
pub async fn request(db: &PgPool, requester: Uuid, addressee: Uuid) -> Result<Uuid> {
    if requester == addressee {
        return Err(anyhow!("cannot befriend yourself"));
    }

    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(addressee)
        .fetch_one(db)
        .await
        .context("checking addressee")?;
    if !exists {
        return Err(anyhow!("no such user"));
    }

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO friendships (requester_id, addressee_id)
           VALUES ($1, $2)
           RETURNING id"#,
    )
    .bind(requester)
    .bind(addressee)
    .fetch_one(db)
    .await;

    match id {
        Ok(id) => Ok(id),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
            Err(anyhow!("friendship already exists or is pending"))
        }
        Err(e) => Err(e).context("creating friend request"),
    }
}

/// Accept a pending request. Only the addressee may accept.
pub async fn accept(db: &PgPool, friendship_id: Uuid, user_id: Uuid) -> Result<()> {
    let rows = sqlx::query(
        r#"UPDATE friendships
              SET status = 'accepted'
            WHERE id = $1
              AND addressee_id = $2
              AND status = 'pending'"#,
    )
    .bind(friendship_id)
    .bind(user_id)
    .execute(db)
    .await
    .context("accepting friend request")?
    .rows_affected();

    if rows == 0 {
        Err(anyhow!("no pending request addressed to you"))
    } else {
        Ok(())
    }
}

/// Remove a friendship or withdraw/decline a request. Either side may call.
pub async fn remove(db: &PgPool, friendship_id: Uuid, user_id: Uuid) -> Result<()> {
    let rows = sqlx::query(
        r#"DELETE FROM friendships
            WHERE id = $1
              AND (requester_id = $2 OR addressee_id = $2)"#,
    )
    .bind(friendship_id)
    .bind(user_id)
    .execute(db)
    .await
    .context("removing friendship")?
    .rows_affected();

    if rows == 0 {
        Err(anyhow!("no such friendship"))
    } else {
        Ok(())
    }
}

/// Accepted friends of a user, either direction.
pub async fn friends_of(db: &PgPool, user_id: Uuid) -> Result<Vec<FriendRow>> {
    sqlx::query_as::<_, FriendRow>(
        r#"SELECT f.id AS friendship_id,
                  u.id AS user_id,
                  u.display_name,
                  f.created_at AS since
             FROM friendships f
             JOIN users u
               ON u.id = CASE WHEN f.requester_id = $1
                              THEN f.addressee_id
                              ELSE f.requester_id END
            WHERE (f.requester_id = $1 OR f.addressee_id = $1)
              AND f.status = 'accepted'
            ORDER BY u.display_name"#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("listing friends")
}

/// Incoming requests awaiting this user's decision.
pub async fn pending_for(db: &PgPool, user_id: Uuid) -> Result<Vec<PendingRow>> {
    sqlx::query_as::<_, PendingRow>(
        r#"SELECT f.id AS friendship_id,
                  f.requester_id,
                  u.display_name,
                  f.created_at AS requested_at
             FROM friendships f
             JOIN users u ON u.id = f.requester_id
            WHERE f.addressee_id = $1
              AND f.status = 'pending'
            ORDER BY f.created_at"#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("listing pending requests")
}
