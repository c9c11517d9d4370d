use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::ContentService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/instagram",
    tag = "content",
    responses(
        (status = 200, description = "Instagram feed tiles, newest first", body = [InstagramItem])
    )
)]
pub async fn list_instagram(content_service: web::Data<ContentService>) -> Result<HttpResponse> {
    match content_service.list_instagram().await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": items
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/instagram",
    tag = "content",
    request_body = CreateInstagramItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Feed tile added"),
        (status = 400, description = "Image required")
    )
)]
pub async fn add_instagram(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    request: web::Json<CreateInstagramItemRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.add_instagram(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Instagram item added".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/instagram/{id}",
    tag = "content",
    params(("id" = i64, Path, description = "Feed item id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Feed tile deleted")
    )
)]
pub async fn delete_instagram(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.delete_instagram(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Instagram item deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn instagram_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/instagram")
            .route("", web::get().to(list_instagram))
            .route("", web::post().to(add_instagram))
            .route("/{id}", web::delete().to(delete_instagram)),
    );
}
