use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::CatalogService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/products",
    tag = "catalog",
    params(ProductQuery),
    responses(
        (status = 200, description = "Active products matching the filters", body = [Product])
    )
)]
pub async fn list_products(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
    match catalog_service.list_products(&query).await {
        Ok(products) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": products
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match catalog_service.get_product(path.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "catalog",
    request_body = CreateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match catalog_service.create_product(request.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match catalog_service
        .update_product(path.into_inner(), request.into_inner())
        .await
    {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": product
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "catalog",
    params(("id" = i64, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deactivated"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    catalog_service: web::Data<CatalogService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match catalog_service.delete_product(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Product deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn products_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
