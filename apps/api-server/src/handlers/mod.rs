//! HTTP handlers and route configuration.

mod form;
mod health;
mod users;

use actix_web::{HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::resource("/users")
                .route(web::post().to(users::create_user))
                .route(web::get().to(users::list_users))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(users::get_user))
                .default_service(web::to(method_not_allowed)),
        );
}

/// Fallback for paths no route matches.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Not found".to_string()))
}

async fn method_not_allowed() -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed)
}
