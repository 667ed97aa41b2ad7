// src/api/routes.rs
use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{http::header, web, HttpResponse};

use super::handlers;
use crate::models::TranspileResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/transpile", web::post().to(handlers::transpile));
}

/// CORS policy admitting a single origin.
pub fn cors_policy(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

/// JSON extractor settings. Unreadable bodies are still answered with
/// 200 and `success: false`, like every other transpile failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::warn!("Rejected request body: {}", err);
            let response = HttpResponse::Ok().json(TranspileResponse::failure(err.to_string()));
            InternalError::from_response(err, response).into()
        })
}
