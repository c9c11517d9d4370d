use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::{AuthService, OrderService};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin accounts", body = [AdminUserRow]),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_admin_users(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match auth_service.list_admins().await {
        Ok(admins) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": admins
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "admin",
    request_body = CreateAdminRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin account created"),
        (status = 400, description = "Missing fields or duplicate email")
    )
)]
pub async fn create_admin_user(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    request: web::Json<CreateAdminRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match auth_service.create_admin(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Admin created".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Admin user id")),
    request_body = UpdateAdminRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin account updated"),
        (status = 404, description = "Admin user not found")
    )
)]
pub async fn update_admin_user(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateAdminRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match auth_service
        .update_admin(path.into_inner(), request.into_inner())
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Admin updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Admin user id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Admin account deleted"),
        (status = 400, description = "Cannot delete your own account")
    )
)]
pub async fn delete_admin_user(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let acting = match require_admin(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match auth_service.delete_admin(path.into_inner(), acting.id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Admin deleted".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders, newest first", body = [Order]),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match order_service.list_all().await {
        Ok(orders) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": orders
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/orders/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order with parsed snapshot and address", body = OrderDetails),
        (status = 404, description = "Order not found")
    )
)]
pub async fn order_details(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match order_service.get_details(path.into_inner()).await {
        Ok(details) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": details
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/orders/{id}/status",
    tag = "admin",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order status updated"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match order_service
        .update_order_status(path.into_inner(), &request.status)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Order status updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/admin/orders/{id}/payment-status",
    tag = "admin",
    params(("id" = i64, Path, description = "Order id")),
    request_body = UpdatePaymentStatusRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment status updated"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_payment_status(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdatePaymentStatusRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match order_service
        .update_payment_status(path.into_inner(), &request.payment_status)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Payment status updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(list_admin_users))
            .route("/users", web::post().to(create_admin_user))
            .route("/users/{id}", web::put().to(update_admin_user))
            .route("/users/{id}", web::delete().to(delete_admin_user))
            .route("/orders", web::get().to(list_orders))
            .route("/orders/{id}", web::get().to(order_details))
            .route("/orders/{id}/status", web::put().to(update_order_status))
            .route(
                "/orders/{id}/payment-status",
                web::put().to(update_payment_status),
            ),
    );
}
