//! Prediction submission and reads.

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::Prediction;
use crate::db::prediction_repo::{self, RevealOutcome, SubmitOutcome};
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct SubmitReq {
    pub fixture_id: Uuid,
    pub home_goals: i32,
    pub away_goals: i32,
    #[serde(default)]
    pub is_joker: bool,
}

#[derive(Serialize)]
pub struct RevealedRow {
    pub display_name: String,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// POST /api/predictions — create or replace the caller's prediction.
#[post("/predictions")]
pub async fn submit(
    auth: JwtAuth,
    info: web::Json<SubmitReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    if info.home_goals < 0 || info.away_goals < 0 {
        return HttpResponse::BadRequest().json(json!({ "message": "goals cannot be negative" }));
    }

    match prediction_repo::submit(
        &db,
        auth.user_id,
        info.fixture_id,
        info.home_goals,
        info.away_goals,
        info.is_joker,
    )
    .await
    {
        Ok(SubmitOutcome::Saved(p)) => HttpResponse::Ok().json(p),
        Ok(SubmitOutcome::NoSuchFixture) => {
            HttpResponse::NotFound().json(json!({ "message": "no such fixture" }))
        }
        Ok(SubmitOutcome::Locked) => HttpResponse::Conflict()
            .json(json!({ "message": "round is closed for predictions" })),
        Ok(SubmitOutcome::JokerLimitReached(limit)) => HttpResponse::BadRequest().json(json!({
            "message": format!("joker limit of {limit} for this round already used")
        })),
        Err(e) => {
            log::error!("prediction submit failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/predictions/round/{round_id} — the caller's own picks.
#[get("/predictions/round/{round_id}")]
pub async fn my_round(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match prediction_repo::for_user_round(&db, auth.user_id, path.into_inner()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("prediction listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/predictions/fixture/{fixture_id} — everyone's picks, only once
/// the round has stopped accepting predictions.
#[get("/predictions/fixture/{fixture_id}")]
pub async fn fixture_all(
    _auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match prediction_repo::for_fixture_revealed(&db, path.into_inner()).await {
        Ok(RevealOutcome::Revealed(rows)) => {
            let rows: Vec<RevealedRow> = rows
                .into_iter()
                .map(|(display_name, prediction)| RevealedRow {
                    display_name,
                    prediction,
                })
                .collect();
            HttpResponse::Ok().json(rows)
        }
        Ok(RevealOutcome::NoSuchFixture) => {
            HttpResponse::NotFound().json(json!({ "message": "no such fixture" }))
        }
        Ok(RevealOutcome::Hidden) => HttpResponse::Forbidden()
            .json(json!({ "message": "predictions are hidden until the deadline" })),
        Err(e) => {
            log::error!("fixture predictions failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(submit).service(my_round).service(fixture_all);
}
