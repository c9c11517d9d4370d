use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::DiscountService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/discounts",
    tag = "discounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All coupon rules", body = [Discount]),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_discounts(
    discount_service: web::Data<DiscountService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match discount_service.list_all().await {
        Ok(discounts) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": discounts
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/discounts",
    tag = "discounts",
    request_body = CreateDiscountRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coupon created"),
        (status = 400, description = "Invalid type or duplicate code")
    )
)]
pub async fn create_discount(
    discount_service: web::Data<DiscountService>,
    req: HttpRequest,
    request: web::Json<CreateDiscountRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match discount_service.create(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Coupon created".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/discounts/{id}",
    tag = "discounts",
    params(("id" = i64, Path, description = "Coupon id")),
    request_body = UpdateDiscountRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coupon updated"),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn update_discount(
    discount_service: web::Data<DiscountService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateDiscountRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match discount_service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Coupon updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/discounts/{id}",
    tag = "discounts",
    params(("id" = i64, Path, description = "Coupon id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Coupon deleted"),
        (status = 404, description = "Coupon not found")
    )
)]
pub async fn delete_discount(
    discount_service: web::Data<DiscountService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match discount_service.delete(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Coupon deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn discounts_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/discounts")
            .route("", web::get().to(list_discounts))
            .route("", web::post().to(create_discount))
            .route("/{id}", web::put().to(update_discount))
            .route("/{id}", web::delete().to(delete_discount)),
    );
}
