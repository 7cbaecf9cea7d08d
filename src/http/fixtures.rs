//! Admin fixture CRUD and result entry.

use actix_web::{delete, patch, post, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{fixture_repo, round_repo};
use crate::http::auth::AdminAuth;

#[derive(Deserialize)]
pub struct CreateReq {
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct UpdateReq {
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub kickoff: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct ResultReq {
    pub home_score: i32,
    pub away_score: i32,
}

/// POST /api/admin/rounds/{id}/fixtures
#[post("/admin/rounds/{id}/fixtures")]
pub async fn create(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<CreateReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let round_id = path.into_inner();
    if info.home_team.trim().is_empty() || info.away_team.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "both team names required" }));
    }

    match round_repo::get(&db, round_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().json(json!({ "message": "no such round" })),
        Err(e) => {
            log::error!("round fetch failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    }

    match fixture_repo::create(
        &db,
        round_id,
        info.home_team.trim(),
        info.away_team.trim(),
        info.kickoff,
    )
    .await
    {
        Ok(fixture) => HttpResponse::Created().json(fixture),
        Err(e) => {
            log::error!("fixture create failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// PATCH /api/admin/fixtures/{id}
#[patch("/admin/fixtures/{id}")]
pub async fn update(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<UpdateReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match fixture_repo::update(
        &db,
        path.into_inner(),
        info.home_team.as_deref(),
        info.away_team.as_deref(),
        info.kickoff,
    )
    .await
    {
        Ok(Some(fixture)) => HttpResponse::Ok().json(fixture),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "no such fixture" })),
        Err(e) => {
            log::error!("fixture update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// DELETE /api/admin/fixtures/{id} — predictions cascade away with it.
#[delete("/admin/fixtures/{id}")]
pub async fn delete(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match fixture_repo::delete(&db, path.into_inner()).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "no such fixture" })),
        Err(e) => {
            log::error!("fixture delete failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/admin/fixtures/{id}/result
///
/// Stores the final score and awards points to every prediction of the
/// fixture. Re-submitting corrects the score and re-scores everyone.
#[post("/admin/fixtures/{id}/result")]
pub async fn record_result(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<ResultReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if info.home_score < 0 || info.away_score < 0 {
        return HttpResponse::BadRequest().json(json!({ "message": "scores cannot be negative" }));
    }

    match fixture_repo::record_result(&db, path.into_inner(), info.home_score, info.away_score)
        .await
    {
        Ok(true) => HttpResponse::Ok().json(json!({
            "home_score": info.home_score,
            "away_score": info.away_score,
            "status": "finished",
        })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "no such fixture" })),
        Err(e) => {
            log::error!("result entry failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(update)
        .service(delete)
        .service(record_result);
}
