use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::CatalogService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "All categories", body = [Category])
    )
)]
pub async fn list_categories(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match catalog_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": categories
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "catalog",
    request_body = CreateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category created", body = Category),
        (status = 400, description = "Category exists")
    )
)]
pub async fn create_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match catalog_service.create_category(request.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": category
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match catalog_service
        .update_category(path.into_inner(), request.into_inner())
        .await
    {
        Ok(category) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": category
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Category id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category deleted")
    )
)]
pub async fn delete_category(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match catalog_service.delete_category(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Category deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn categories_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
}
