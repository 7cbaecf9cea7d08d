//! Profile endpoints plus admin user management.

use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::http::auth::{AdminAuth, JwtAuth};

#[derive(Serialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub notify_deadlines: bool,
    pub notify_results: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct NotificationsReq {
    pub notify_deadlines: bool,
    pub notify_results: bool,
}

#[derive(Deserialize)]
pub struct RoleReq {
    pub role: String,
}

fn profile(u: crate::db::models::User) -> ProfileRow {
    ProfileRow {
        id: u.id,
        email: u.email,
        display_name: u.display_name,
        role: u.role,
        notify_deadlines: u.notify_deadlines,
        notify_results: u.notify_results,
        created_at: u.created_at,
    }
}

/// GET /api/users/me
#[get("/users/me")]
pub async fn me(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    match user_repo::get(&db, auth.user_id).await {
        Ok(Some(u)) => HttpResponse::Ok().json(profile(u)),
        Ok(None) => HttpResponse::Unauthorized().json(json!({ "message": "account removed" })),
        Err(e) => {
            log::error!("profile fetch failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// PATCH /api/users/me/notifications
#[patch("/users/me/notifications")]
pub async fn set_notifications(
    auth: JwtAuth,
    info: web::Json<NotificationsReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    match user_repo::set_notification_flags(
        &db,
        auth.user_id,
        info.notify_deadlines,
        info.notify_results,
    )
    .await
    {
        Ok(()) => HttpResponse::Ok().json(json!({
            "notify_deadlines": info.notify_deadlines,
            "notify_results": info.notify_results,
        })),
        Err(e) => {
            log::error!("notification update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/admin/users
#[get("/admin/users")]
pub async fn list_users(_admin: AdminAuth, db: web::Data<PgPool>) -> impl Responder {
    match user_repo::list(&db).await {
        Ok(users) => {
            let rows: Vec<ProfileRow> = users.into_iter().map(profile).collect();
            HttpResponse::Ok().json(rows)
        }
        Err(e) => {
            log::error!("user listing failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// PATCH /api/admin/users/{id}/role
#[patch("/admin/users/{id}/role")]
pub async fn set_role(
    admin: AdminAuth,
    path: web::Path<Uuid>,
    info: web::Json<RoleReq>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let target = path.into_inner();
    if !matches!(info.role.as_str(), "user" | "admin") {
        return HttpResponse::BadRequest().json(json!({ "message": "role must be user or admin" }));
    }
    // An admin demoting themselves would lock the last key in the door.
    if target == admin.user_id && info.role == "user" {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "cannot demote your own account" }));
    }

    match user_repo::set_role(&db, target, &info.role).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "id": target, "role": info.role.clone() })),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "no such user" })),
        Err(e) => {
            log::error!("role update failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// DELETE /api/admin/users/{id}
#[delete("/admin/users/{id}")]
pub async fn delete_user(
    admin: AdminAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> impl Responder {
    let target = path.into_inner();
    if target == admin.user_id {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "cannot delete your own account" }));
    }

    match user_repo::delete(&db, target).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(json!({ "message": "no such user" })),
        Err(e) => {
            log::error!("user delete failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me)
        .service(set_notifications)
        .service(list_users)
        .service(set_role)
        .service(delete_user);
}
