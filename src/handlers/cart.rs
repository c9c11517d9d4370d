use crate::error::AppError;
use crate::middlewares::{current_user, require_user, session_id};
use crate::models::*;
use crate::services::CartService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

fn resolve_owner(req: &HttpRequest) -> Result<CartOwner, AppError> {
    CartOwner::resolve(current_user(req).map(|u| u.id), session_id(req))
        .ok_or_else(|| AppError::ValidationError("Session id or login required".to_string()))
}

#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    params(CartQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart with subtotal, discount, and total", body = CartResponse),
        (status = 400, description = "No session id and no token")
    )
)]
pub async fn get_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    query: web::Query<CartQuery>,
) -> Result<HttpResponse> {
    let owner = match resolve_owner(&req) {
        Ok(owner) => owner,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service
        .get_cart_view(&owner, query.coupon.as_deref())
        .await
    {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/add",
    tag = "cart",
    request_body = AddItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item added"),
        (status = 400, description = "Insufficient stock or invalid quantity"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_to_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<AddItemRequest>,
) -> Result<HttpResponse> {
    let owner = match resolve_owner(&req) {
        Ok(owner) => owner,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service
        .add_item(&owner, request.product_id, request.quantity)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Item added to cart".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cart/update/{itemId}",
    tag = "cart",
    params(("itemId" = i64, Path, description = "Cart item id")),
    request_body = UpdateQuantityRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Quantity updated; zero removes the line")
    )
)]
pub async fn update_cart_item(
    cart_service: web::Data<CartService>,
    path: web::Path<i64>,
    request: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse> {
    match cart_service
        .update_item_quantity(path.into_inner(), request.quantity)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Cart updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/merge",
    tag = "cart",
    request_body = MergeCartRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Guest cart folded into the user's cart"),
        (status = 401, description = "Login required")
    )
)]
pub async fn merge_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<MergeCartRequest>,
) -> Result<HttpResponse> {
    let user = match require_user(&req) {
        Ok(user) => user,
        Err(e) => return Ok(e.error_response()),
    };

    match cart_service
        .merge_guest_cart(&request.session_id, user.id)
        .await
    {
        Ok(merged) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": json!({
                "merged": merged,
                "message": if merged { "Cart merged" } else { "No guest cart to merge" }
            })
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(get_cart))
            .route("/add", web::post().to(add_to_cart))
            .route("/update/{itemId}", web::put().to(update_cart_item))
            .route("/merge", web::post().to(merge_cart)),
    );
}
