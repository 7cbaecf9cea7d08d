//! Standings: overall (Redis-cached), per-round with movement, per-league.

use actix_web::{get, web, HttpResponse, Responder};
use redis::{AsyncCommands, Client as RedisClient};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings;
use crate::db::{league_repo, standings_repo};
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct StandingsParams {
    /// Maximum number of entries to return.
    pub limit: Option<i64>,
}

/// GET /api/standings
#[get("/standings")]
pub async fn overall(
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
    web::Query(params): web::Query<StandingsParams>,
) -> impl Responder {
    let limit = params.limit.unwrap_or(100).clamp(1, 1000);

    // 1) Try the Redis cache; Postgres can still serve when Redis is down
    let key = format!("standings:overall:{limit}");
    let mut conn = match redis.get_multiplexed_async_connection().await {
        Ok(c) => Some(c),
        Err(e) => {
            log::warn!("redis unavailable, serving standings uncached: {e:?}");
            None
        }
    };
    if let Some(conn) = conn.as_mut() {
        if let Ok(cached) = conn.get::<_, String>(&key).await {
            return HttpResponse::Ok()
                .content_type("application/json")
                .body(cached);
        }
    }

    // 2) Query the database
    let rows = match standings_repo::overall(&db, limit).await {
        Ok(r) => r,
        Err(e) => {
            log::error!("standings query failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // 3) Serialize and cache the result
    let body = match serde_json::to_string(&rows) {
        Ok(b) => b,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };
    if let Some(conn) = conn.as_mut() {
        let _: () = conn
            .set_ex(&key, &body, settings().standings_cache_ttl)
            .await
            .unwrap_or(());
    }

    HttpResponse::Ok().content_type("application/json").body(body)
}

/// GET /api/standings/round/{id} — the frozen snapshot with movement arrows.
#[get("/standings/round/{id}")]
pub async fn round(path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    let round_id = path.into_inner();
    match standings_repo::round_with_movement(&db, round_id).await {
        Ok(rows) if rows.is_empty() => HttpResponse::NotFound()
            .json(json!({ "message": "round has no standings snapshot yet" })),
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("round standings failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/standings/league/{id} — members only.
#[get("/standings/league/{id}")]
pub async fn league(auth: JwtAuth, path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    let league_id = path.into_inner();

    match league_repo::is_member(&db, league_id, auth.user_id).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Forbidden().json(json!({ "message": "not a league member" }))
        }
        Err(e) => {
            log::error!("membership check failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match standings_repo::league(&db, league_id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("league standings failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(overall).service(round).service(league);
}
