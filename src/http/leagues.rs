//! Private leagues (create / join via invite code / leave / info)

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::league_repo;
use crate::db::models::League;
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct CreateReq {
    pub name: String,
}

#[derive(Deserialize)]
pub struct JoinReq {
    pub invite_code: String,
}

#[derive(Serialize)]
pub struct MemberRow {
    pub user_id: Uuid,
    pub display_name: String,
}

#[derive(Serialize)]
pub struct LeagueInfo {
    #[serde(flatten)]
    pub league: League,
    pub members: Vec<MemberRow>,
}

/// POST /api/leagues
#[post("/leagues")]
pub async fn create(auth: JwtAuth, body: web::Json<CreateReq>, db: web::Data<PgPool>) -> impl Responder {
    let name = body.name.trim();
    if name.is_empty() || name.len() > 60 {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "league name length 1-60 required" }));
    }

    match league_repo::create(&db, name, auth.user_id).await {
        Ok(league) => HttpResponse::Created().json(league),
        Err(e) => {
            log::error!("league create failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/leagues/join
#[post("/leagues/join")]
pub async fn join(auth: JwtAuth, body: web::Json<JoinReq>, db: web::Data<PgPool>) -> impl Responder {
    match league_repo::join(&db, body.invite_code.trim(), auth.user_id).await {
        Ok(Some(league)) => HttpResponse::Ok().json(league),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "unknown invite code" })),
        Err(e) => {
            log::error!("league join failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/leagues/{id}/leave
#[post("/leagues/{id}/leave")]
pub async fn leave(auth: JwtAuth, path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    match league_repo::leave(&db, path.into_inner(), auth.user_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => HttpResponse::BadRequest().json(json!({ "message": e.to_string() })),
    }
}

/// GET /api/leagues/mine
#[get("/leagues/mine")]
pub async fn mine(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match league_repo::leagues_of(&db, auth.user_id).await {
        Ok(leagues) => HttpResponse::Ok().json(leagues),
        Err(e) => {
            log::error!("league listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/leagues/{id} — members only; includes the member roster.
#[get("/leagues/{id}")]
pub async fn info(auth: JwtAuth, path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
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

    let league = match league_repo::get(&db, league_id).await {
        Ok(Some(l)) => l,
        Ok(None) => return HttpResponse::NotFound().json(json!({ "message": "no such league" })),
        Err(e) => {
            log::error!("league fetch failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match league_repo::members(&db, league_id).await {
        Ok(members) => HttpResponse::Ok().json(LeagueInfo {
            league,
            members: members
                .into_iter()
                .map(|(user_id, display_name)| MemberRow {
                    user_id,
                    display_name,
                })
                .collect(),
        }),
        Err(e) => {
            log::error!("member listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create)
        .service(join)
        .service(leave)
        .service(mine)
        // `{id}` last so it cannot shadow /leagues/mine
        .service(info);
}
