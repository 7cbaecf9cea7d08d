//! Admin-authored announcements.

use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::news_repo;
use crate::http::auth::AdminAuth;

#[derive(Deserialize)]
pub struct CreateReq {
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
pub struct UpdateReq {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// GET /api/news
#[get("/news")]
pub async fn list(db: web::Data<PgPool>, web::Query(params): web::Query<ListParams>) -> impl Responder {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    match news_repo::list(&db, limit).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => {
            log::error!("news listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// POST /api/admin/news
#[post("/admin/news")]
pub async fn create(admin: AdminAuth, info: web::Json<CreateReq>, db: web::Data<PgPool>) -> impl Responder {
    if info.title.trim().is_empty() || info.body.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "title and body required" }));
    }

    match news_repo::create(&db, admin.user_id, info.title.trim(), info.body.trim()).await {
        Ok(item) => HttpResponse::Created().json(item),
        Err(e) => {
            log::error!("news create failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// PATCH /api/admin/news/{id}
#[patch("/admin/news/{id}")]
pub async fn update(
    _admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<UpdateReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match news_repo::update(&db, path.into_inner(), info.title.as_deref(), info.body.as_deref())
        .await
    {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "no such news item" })),
        Err(e) => {
            log::error!("news update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// DELETE /api/admin/news/{id}
#[delete("/admin/news/{id}")]
pub async fn delete(_admin: AdminAuth, path: web::Path<Uuid>, db: web::Data<PgPool>) -> impl Responder {
    match news_repo::delete(&db, path.into_inner()).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "no such news item" })),
        Err(e) => {
            log::error!("news delete failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(create)
        .service(update)
        .service(delete);
}
