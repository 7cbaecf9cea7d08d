//! Friendships: request / accept / remove / list.

use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::friend_repo;
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct RequestReq {
    pub user_id: Uuid,
}

/// POST /api/friends/request
#[post("/friends/request")]
pub async fn request(
    auth: JwtAuth,
    info: web::Json<RequestReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match friend_repo::request(&db, auth.user_id, info.user_id).await {
        Ok(id) => HttpResponse::Created().json(json!({ "friendship_id": id })),
        Err(e) => HttpResponse::BadRequest().json(json!({ "message": e.to_string() })),
    }
}

/// POST /api/friends/{id}/accept
#[post("/friends/{id}/accept")]
pub async fn accept(auth: JwtAuth, path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    match friend_repo::accept(&db, path.into_inner(), auth.user_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "accepted" })),
        Err(e) => HttpResponse::BadRequest().json(json!({ "message": e.to_string() })),
    }
}

/// DELETE /api/friends/{id} — decline, withdraw or unfriend.
#[delete("/friends/{id}")]
pub async fn remove(auth: JwtAuth, path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    match friend_repo::remove(&db, path.into_inner(), auth.user_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => HttpResponse::NotFound().json(json!({ "message": e.to_string() })),
    }
}

/// GET /api/friends
#[get("/friends")]
pub async fn list(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match friend_repo::friends_of(&db, auth.user_id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("friend listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/friends/requests — incoming, awaiting the caller's decision.
#[get("/friends/requests")]
pub async fn requests(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match friend_repo::pending_for(&db, auth.user_id).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("pending listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(request)
        .service(accept)
        .service(remove)
        .service(list)
        .service(requests);
}
