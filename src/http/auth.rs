//! Password authentication (JWT access + rotating refresh tokens)

use actix_web::{post, web, HttpResponse, Responder};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

use crate::config::settings;
use crate::db::user_repo;

//////////////////////////////////////////////////
// Data structs
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,  // user_id
    role: String, // 'user' | 'admin'
    exp: usize,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

//////////////////////////////////////////////////
// ─────────────  JwtAuth extractor  ─────────────
//////////////////////////////////////////////////

pub mod extractor {
    use super::Claims;
    use actix_web::{
        dev::Payload, error::ErrorForbidden, error::ErrorUnauthorized, FromRequest, HttpRequest,
        Result as ActixResult,
    };
    use futures_util::future::{ready, Ready};
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use std::env;
    use uuid::Uuid;

    /// Extracts and validates a Bearer-JWT, exposing the caller's identity.
    #[derive(Debug, Clone)]
    pub struct JwtAuth {
        pub user_id: Uuid,
        pub role: String,
    }

    fn decode_bearer(req: &HttpRequest) -> ActixResult<JwtAuth> {
        // Expect:  Authorization: Bearer <JWT>
        let hdr = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ErrorUnauthorized("missing Authorization header"))?;

        let token = hdr
            .strip_prefix("Bearer ")
            .ok_or_else(|| ErrorUnauthorized("malformed Authorization header"))?;

        let secret = env::var("JWT_SECRET").map_err(|_| ErrorUnauthorized("server mis-config"))?;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ErrorUnauthorized("invalid / expired token"))?;

        let user_id =
            Uuid::parse_str(&data.claims.sub).map_err(|_| ErrorUnauthorized("bad sub"))?;

        Ok(JwtAuth {
            user_id,
            role: data.claims.role,
        })
    }

    impl FromRequest for JwtAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            ready(decode_bearer(req))
        }
    }

    /// Same token, but the claims must carry the admin role (401 vs 403).
    #[derive(Debug, Clone)]
    pub struct AdminAuth {
        pub user_id: Uuid,
    }

    impl FromRequest for AdminAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            let res = decode_bearer(req).and_then(|auth| {
                if auth.role == "admin" {
                    Ok(AdminAuth {
                        user_id: auth.user_id,
                    })
                } else {
                    Err(ErrorForbidden("admin role required"))
                }
            });
            ready(res)
        }
    }
}
pub use extractor::{AdminAuth, JwtAuth};

fn issue_access_token(user_id: Uuid, role: &str) -> Option<(String, i64)> {
    let secret = env::var("JWT_SECRET").ok()?;
    let ttl = settings().access_ttl_min;
    let exp = Utc::now()
        .checked_add_signed(Duration::minutes(ttl))?
        .timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .ok()?;
    Some((token, ttl * 60))
}

/// Mint a refresh token and park it in Redis against the user id.
async fn store_refresh(redis: &RedisClient, user_id: Uuid) -> Option<String> {
    let refresh_token = Uuid::new_v4().to_string();
    let mut conn = redis.get_multiplexed_async_connection().await.ok()?;
    let key = format!("refresh:{refresh_token}");
    let ttl = settings().refresh_ttl_days * 24 * 3_600;
    let _: () = conn.set_ex(&key, user_id.to_string(), ttl).await.ok()?;
    Some(refresh_token)
}

//////////////////////////////////////////////////
// POST /api/auth/register
//////////////////////////////////////////////////
#[post("/auth/register")]
pub async fn register(
    info: web::Json<RegisterRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> impl Responder {
    let email = info.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return HttpResponse::BadRequest().json(json!({ "message": "valid email required" }));
    }
    if info.display_name.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({ "message": "display name required" }));
    }
    if info.password.len() < 8 {
        return HttpResponse::BadRequest()
            .json(json!({ "message": "password must be at least 8 characters" }));
    }

    let password_hash = match hash(&info.password, DEFAULT_COST) {
        Ok(h) => h,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    let user_id =
        match user_repo::create(&db, &email, info.display_name.trim(), &password_hash).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                return HttpResponse::Conflict()
                    .json(json!({ "message": "email already registered" }))
            }
            Err(e) => {
                log::error!("register failed: {e:?}");
                return HttpResponse::InternalServerError().finish();
            }
        };

    let Some((access_token, expires_in)) = issue_access_token(user_id, "user") else {
        return HttpResponse::InternalServerError().finish();
    };
    let Some(refresh_token) = store_refresh(&redis, user_id).await else {
        return HttpResponse::InternalServerError()
            .json(json!({ "message": "Redis unavailable" }));
    };

    HttpResponse::Created().json(TokenResponse {
        access_token,
        refresh_token,
        expires_in,
    })
}

//////////////////////////////////////////////////
// POST /api/auth/login
//////////////////////////////////////////////////
#[post("/auth/login")]
pub async fn login(
    info: web::Json<LoginRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> impl Responder {
    let email = info.email.trim().to_lowercase();
    let user = match user_repo::find_by_email(&db, &email).await {
        Ok(u) => u,
        Err(e) => {
            log::error!("login lookup failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Same response for unknown email and wrong password.
    let Some(user) = user else {
        return HttpResponse::Unauthorized().json(json!({ "message": "invalid credentials" }));
    };
    if !verify(&info.password, &user.password_hash).unwrap_or(false) {
        return HttpResponse::Unauthorized().json(json!({ "message": "invalid credentials" }));
    }

    let Some((access_token, expires_in)) = issue_access_token(user.id, &user.role) else {
        return HttpResponse::InternalServerError().finish();
    };
    let Some(refresh_token) = store_refresh(&redis, user.id).await else {
        return HttpResponse::InternalServerError()
            .json(json!({ "message": "Redis unavailable" }));
    };

    HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        expires_in,
    })
}

//////////////////////////////////////////////////
// POST /api/auth/refresh
//////////////////////////////////////////////////
#[post("/auth/refresh")]
pub async fn refresh(
    info: web::Json<RefreshRequest>,
    redis: web::Data<RedisClient>,
    db: web::Data<PgPool>,
) -> impl Responder {
    // 1) consume old refresh → user_id (single-use)
    let user_id_str = match redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let key = format!("refresh:{}", info.refresh_token);
            if let Ok(Some(uid)) = conn.get::<_, Option<String>>(&key).await {
                let _: () = conn.del(&key).await.unwrap_or(());
                uid
            } else {
                return HttpResponse::Unauthorized()
                    .json(json!({ "message": "invalid refresh token" }));
            }
        }
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };
    let Ok(user_id) = Uuid::parse_str(&user_id_str) else {
        return HttpResponse::Unauthorized().json(json!({ "message": "invalid refresh token" }));
    };

    // 2) role may have changed since the token was minted
    let role: String = match sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&**db)
        .await
    {
        Ok(Some(r)) => r,
        Ok(None) => {
            return HttpResponse::Unauthorized().json(json!({ "message": "account removed" }))
        }
        Err(e) => {
            log::error!("refresh role lookup failed: {e:?}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // 3) new access + rotated refresh
    let Some((access_token, expires_in)) = issue_access_token(user_id, &role) else {
        return HttpResponse::InternalServerError().finish();
    };
    let Some(refresh_token) = store_refresh(&redis, user_id).await else {
        return HttpResponse::InternalServerError()
            .json(json!({ "message": "Redis unavailable" }));
    };

    HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        expires_in,
    })
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(refresh);
}
