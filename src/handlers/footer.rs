use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::ContentService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/footer/links",
    tag = "content",
    responses(
        (status = 200, description = "Active footer links in display order", body = [FooterLink])
    )
)]
pub async fn footer_links(content_service: web::Data<ContentService>) -> Result<HttpResponse> {
    match content_service.active_footer_links().await {
        Ok(links) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": links
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/footer/links/all",
    tag = "content",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All footer links including inactive", body = [FooterLink]),
        (status = 403, description = "Admin only")
    )
)]
pub async fn all_footer_links(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.all_footer_links().await {
        Ok(links) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": links
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/footer/links",
    tag = "content",
    request_body = CreateFooterLinkRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Footer link created", body = FooterLink)
    )
)]
pub async fn create_footer_link(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    request: web::Json<CreateFooterLinkRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.create_footer_link(request.into_inner()).await {
        Ok(link) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": link
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/footer/links/{id}",
    tag = "content",
    params(("id" = i64, Path, description = "Footer link id")),
    request_body = UpdateFooterLinkRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Footer link updated", body = FooterLink),
        (status = 404, description = "Footer link not found")
    )
)]
pub async fn update_footer_link(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateFooterLinkRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service
        .update_footer_link(path.into_inner(), request.into_inner())
        .await
    {
        Ok(link) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": link
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/footer/links/{id}",
    tag = "content",
    params(("id" = i64, Path, description = "Footer link id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Footer link deleted"),
        (status = 404, description = "Footer link not found")
    )
)]
pub async fn delete_footer_link(
    content_service: web::Data<ContentService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match content_service.delete_footer_link(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Footer link deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn footer_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/footer")
            .route("/links", web::get().to(footer_links))
            .route("/links", web::post().to(create_footer_link))
            .route("/links/all", web::get().to(all_footer_links))
            .route("/links/{id}", web::put().to(update_footer_link))
            .route("/links/{id}", web::delete().to(delete_footer_link)),
    );
}
