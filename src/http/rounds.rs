//! Round lifecycle: public reads plus admin create / update / finalize.

use actix_web::{get, patch, post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings;
use crate::db::models::{Fixture, Round};
use crate::db::{fixture_repo, round_repo, standings_repo};
use crate::display::format_kickoff;
use crate::http::auth::AdminAuth;

//////////////////////////////////////////////////
// DTOs
//////////////////////////////////////////////////

#[derive(Serialize)]
pub struct FixtureRow {
    #[serde(flatten)]
    pub fixture: Fixture,
    /// Pre-formatted en-GB kickoff string for display.
    pub kickoff_display: String,
}

#[derive(Serialize)]
pub struct RoundDetail {
    #[serde(flatten)]
    pub round: Round,
    pub deadline_display: String,
    pub fixtures: Vec<FixtureRow>,
}

#[derive(Deserialize)]
pub struct CreateReq {
    pub name: String,
    pub deadline: DateTime<Utc>,
    pub joker_limit: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateReq {
    pub name: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub joker_limit: Option<i32>,
}

#[derive(Deserialize)]
pub struct StatusReq {
    pub status: String,
}

fn fixture_row(f: Fixture) -> FixtureRow {
    let display = format_kickoff(Some(&f.kickoff.to_rfc3339()));
    FixtureRow {
        fixture: f,
        kickoff_display: display,
    }
}

//////////////////////////////////////////////////
// Public reads
//////////////////////////////////////////////////

/// GET /api/rounds
#[get("/rounds")]
pub async fn list(db: web::Data<PgPool>) -> impl Responder {
    match round_repo::list(&db).await {
        Ok(rounds) => HttpResponse::Ok().json(rounds),
        Err(e) => {
            log::error!("round listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/rounds/current
#[get("/rounds/current")]
pub async fn current(db: web::Data<PgPool>) -> impl Responder {
    match round_repo::current(&db).await {
        Ok(Some(round)) => HttpResponse::Ok().json(round),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "no open round" })),
        Err(e) => {
            log::error!("current round lookup failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/rounds/{id} — round plus its fixtures.
#[get("/rounds/{id}")]
pub async fn detail(path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    let round_id = path.into_inner();
    let round = match round_repo::get(&db, round_id).await {
        Ok(Some(r)) => r,
        Ok(None) => return HttpResponse::NotFound().json(json!({ "message": "no such round" })),
        Err(e) => {
            log::error!("round fetch failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let fixtures = match fixture_repo::list_by_round(&db, round_id).await {
        Ok(f) => f,
        Err(e) => {
            log::error!("fixture listing failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let deadline_display = format_kickoff(Some(&round.deadline.to_rfc3339()));
    HttpResponse::Ok().json(RoundDetail {
        round,
        deadline_display,
        fixtures: fixtures.into_iter().map(fixture_row).collect(),
    })
}

//////////////////////////////////////////////////
// Admin
//////////////////////////////////////////////////

/// POST /api/admin/rounds
#[post("/admin/rounds")]
pub async fn create(
    _admin: AdminAuth,
    info: web::Json<CreateReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if info.name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "round name required" }));
    }
    let joker_limit = info.joker_limit.unwrap_or(settings().default_joker_limit);
    if joker_limit < 0 {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "joker limit cannot be negative" }));
    }

    match round_repo::create(&db, info.name.trim(), info.deadline, joker_limit).await {
        Ok(round) => HttpResponse::Created().json(round),
        Err(e) => {
            log::error!("round create failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// PATCH /api/admin/rounds/{id}
#[patch("/admin/rounds/{id}")]
pub async fn update(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<UpdateReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if matches!(info.joker_limit, Some(l) if l < 0) {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "joker limit cannot be negative" }));
    }

    match round_repo::update(
        &db,
        path.into_inner(),
        info.name.as_deref(),
        info.deadline,
        info.joker_limit,
    )
    .await
    {
        Ok(Some(round)) => HttpResponse::Ok().json(round),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "no such round" })),
        Err(e) => {
            log::error!("round update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/admin/rounds/{id}/status
#[post("/admin/rounds/{id}/status")]
pub async fn set_status(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<StatusReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if !matches!(info.status.as_str(), "open" | "closed" | "completed") {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "status must be open, closed or completed" }));
    }

    match round_repo::set_status(&db, path.into_inner(), &info.status).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "status": info.status.clone() })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "no such round" })),
        Err(e) => {
            log::error!("round status update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/admin/rounds/{id}/finalize
///
/// Marks the round completed and freezes the standings snapshot that later
/// rounds compute movement against. Every fixture must have a result first.
#[post("/admin/rounds/{id}/finalize")]
pub async fn finalize(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let round_id = path.into_inner();

    match round_repo::get(&db, round_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().json(json!({ "message": "no such round" })),
        Err(e) => {
            log::error!("round fetch failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    let unfinished: i64 = match sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM fixtures WHERE round_id = $1 AND status <> 'finished'",
    )
    .bind(round_id)
    .fetch_one(&**db)
    .await
    {
        Ok(n) => n,
        Err(e) => {
            log::error!("fixture count failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    if unfinished > 0 {
        return HttpResponse::Conflict().json(json!({
            "message": format!("{unfinished} fixture(s) still without a result")
        }));
    }

    let snapshot = match standings_repo::snapshot_round(&db, round_id).await {
        Ok(n) => n,
        Err(e) => {
            log::error!("snapshot failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = round_repo::set_status(&db, round_id, "completed").await {
        log::error!("completing round failed: {e:?}");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().json(json!({ "status": "completed", "snapshot_rows": snapshot }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(current)
        .service(create)
        .service(update)
        .service(set_status)
        .service(finalize)
        // `{id}` last so it cannot shadow /rounds/current
        .service(detail);
}
