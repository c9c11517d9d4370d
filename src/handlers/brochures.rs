use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::ContentService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/brochures",
    tag = "content",
    responses(
        (status = 200, description = "All brochures, newest first", body = [Brochure])
    )
)]
pub async fn list_brochures(content_service: web::Data<ContentService>) -> Result<HttpResponse> {
    match content_service.list_brochures().await {
        Ok(brochures) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": brochures
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/brochures",
    tag = "content",
    request_body = CreateBrochureRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Brochure created", body = Brochure)
    )
)]
pub async fn create_brochure(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    request: web::Json<CreateBrochureRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.create_brochure(request.into_inner()).await {
        Ok(brochure) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": brochure
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/brochures/{id}",
    tag = "content",
    params(("id" = i64, Path, description = "Brochure id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Brochure deleted")
    )
)]
pub async fn delete_brochure(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.delete_brochure(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Brochure deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn brochures_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/brochures")
            .route("", web::get().to(list_brochures))
            .route("", web::post().to(create_brochure))
            .route("/{id}", web::delete().to(delete_brochure)),
    );
}
