// src/api/handlers/transpile.rs
use actix_web::{web, HttpResponse, Result};

use crate::api::AppState;
use crate::models::{BuildRequest, TranspileResponse};

/// `POST /transpile`. Always 200; callers inspect `success`.
pub async fn transpile(
    state: web::Data<AppState>,
    req: web::Json<BuildRequest>,
) -> Result<HttpResponse> {
    let req_body = req.into_inner();
    log::info!("Transpile request with {} bytes of code", req_body.code.len());

    let result = state.transpiler.transpile(&req_body.code).await;
    if !result.is_success() {
        log::info!("Transpile request finished with a build error");
    }

    Ok(HttpResponse::Ok().json(TranspileResponse::from(result)))
}
