use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::auth::init_routes)
            .configure(http::users::init_routes)
            .configure(http::rounds::init_routes)
            .configure(http::fixtures::init_routes)
            .configure(http::predictions::init_routes)
            .configure(http::standings::init_routes)
            .configure(http::leagues::init_routes)
            .configure(http::friends::init_routes)
            .configure(http::news::init_routes)
            .configure(http::health::init_routes),
    );
}
