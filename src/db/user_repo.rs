use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::User;

/// Insert a new account; None when the email is already registered.
pub async fn create(
    db: &PgPool,
    email: &str,
    display_name: &str,
    password_hash: &str,
) -> Result<Option<Uuid>> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO users (email, display_name, password_hash)
           VALUES ($1, $2, $3)
           RETURNING id"#,
    )
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .fetch_one(db)
    .await;

    match id {
        Ok(id) => Ok(Some(id)),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => Ok(None),
        Err(e) => Err(e).context("creating user"),
    }
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await
        .context("fetching user by email")
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("fetching user")
}

/// Admin listing, oldest accounts first.
pub async fn list(db: &PgPool) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
        .fetch_all(db)
        .await
        .context("listing users")
}

/// Set a user's role; returns false when the user does not exist.
pub async fn set_role(db: &PgPool, user_id: Uuid, role: &str) -> Result<bool> {
    let rows = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
        .bind(user_id)
        .bind(role)
        .execute(db)
        .await
        .context("updating role")?
        .rows_affected();
    Ok(rows > 0)
}

pub async fn set_notification_flags(
    db: &PgPool,
    user_id: Uuid,
    notify_deadlines: bool,
    notify_results: bool,
) -> Result<()> {
    sqlx::query(
        "UPDATE users
            SET notify_deadlines = $2,
                notify_results   = $3
          WHERE id = $1",
    )
    .bind(user_id)
    .bind(notify_deadlines)
    .bind(notify_results)
    .execute(db)
    .await
    .context("updating notification flags")?;
    Ok(())
}

/// Delete a user; predictions, memberships and friendships cascade.
pub async fn delete(db: &PgPool, user_id: Uuid) -> Result<bool> {
    let rows = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(db)
        .await
        .context("deleting user")?
        .rows_affected();
    Ok(rows > 0)
}
