use crate::error::AppError;
use crate::middlewares::{current_user, session_id};
use crate::models::*;
use crate::services::WishlistService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

fn resolve_owner(req: &HttpRequest) -> Result<CartOwner, AppError> {
    CartOwner::resolve(current_user(req).map(|u| u.id), session_id(req))
        .ok_or_else(|| AppError::ValidationError("Session id or login required".to_string()))
}

#[utoipa::path(
    get,
    path = "/wishlist",
    tag = "wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wishlist entries with product details", body = [WishlistItemView]),
        (status = 400, description = "No session id and no token")
    )
)]
pub async fn get_wishlist(
    wishlist_service: web::Data<WishlistService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let owner = match resolve_owner(&req) {
        Ok(owner) => owner,
        Err(e) => return Ok(e.error_response()),
    };

    match wishlist_service.list(&owner).await {
        Ok(items) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": items
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/wishlist/{productId}",
    tag = "wishlist",
    params(("productId" = i64, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Toggled; `liked` reports the new state", body = ToggleWishlistResponse)
    )
)]
pub async fn toggle_wishlist(
    wishlist_service: web::Data<WishlistService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let owner = match resolve_owner(&req) {
        Ok(owner) => owner,
        Err(e) => return Ok(e.error_response()),
    };

    match wishlist_service.toggle(&owner, path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn wishlist_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wishlist")
            .route("", web::get().to(get_wishlist))
            .route("/{productId}", web::post().to(toggle_wishlist)),
    );
}
