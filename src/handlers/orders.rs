use crate::middlewares::require_user;
use crate::models::*;
use crate::services::OrderService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/orders",
    tag = "orders",
    request_body = CreateOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order placed; includes the gateway order for ONLINE payment", body = CreateOrderResponse),
        (status = 401, description = "Login required"),
        (status = 503, description = "Payment gateway not configured")
    )
)]
pub async fn create_order(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.create_order(&user, request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders/verify-payment",
    tag = "orders",
    request_body = VerifyPaymentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Signature verified; order marked PAID"),
        (status = 400, description = "Signature mismatch"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn verify_payment(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    request: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_user(&req) {
        return Ok(e.error_response());
    }

    let order_id = request.order_id;
    match order_service.verify_payment(request.into_inner()).await {
        Ok(true) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "orderId": order_id
        }))),
        Ok(false) => Ok(HttpResponse::BadRequest().json(json!({
            "status": "failure"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/my-orders",
    tag = "orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's orders, newest first", body = [Order]),
        (status = 401, description = "Login required")
    )
)]
pub async fn my_orders(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service.my_orders(user.id).await {
        Ok(orders) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": orders
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn orders_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("/verify-payment", web::post().to(verify_payment))
            .route("/my-orders", web::get().to(my_orders)),
    );
}
