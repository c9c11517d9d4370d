use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::ContentService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/info-pages",
    tag = "content",
    responses(
        (status = 200, description = "Active informational pages", body = [InfoPage])
    )
)]
pub async fn list_info_pages(content_service: web::Data<ContentService>) -> Result<HttpResponse> {
    match content_service.active_info_pages().await {
        Ok(pages) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": pages
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/info-pages/{slug}",
    tag = "content",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "Page content", body = InfoPage),
        (status = 404, description = "Page not found")
    )
)]
pub async fn get_info_page(
    content_service: web::Data<ContentService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match content_service.info_page_by_slug(&path.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": page
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/info-pages/{id}",
    tag = "content",
    params(("id" = i64, Path, description = "Page id")),
    request_body = UpdateInfoPageRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page updated"),
        (status = 404, description = "Page not found")
    )
)]
pub async fn update_info_page(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateInfoPageRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service
        .update_info_page(path.into_inner(), request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Page updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn info_pages_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/info-pages")
            .route("", web::get().to(list_info_pages))
            .route("/{slug}", web::get().to(get_info_page))
            .route("/{id}", web::put().to(update_info_page)),
    );
}
