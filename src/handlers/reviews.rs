use crate::middlewares::require_admin;
use crate::models::*;
use crate::services::ReviewService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/reviews/featured",
    tag = "reviews",
    responses(
        (status = 200, description = "The featured trio, or the latest approved as fallback", body = FeaturedReviewsResponse)
    )
)]
pub async fn featured_reviews(review_service: web::Data<ReviewService>) -> Result<HttpResponse> {
    match review_service.featured().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = SubmitReviewRequest,
    responses(
        (status = 200, description = "Review submitted for moderation"),
        (status = 400, description = "Name or review text out of bounds")
    )
)]
pub async fn submit_review(
    review_service: web::Data<ReviewService>,
    request: web::Json<SubmitReviewRequest>,
) -> Result<HttpResponse> {
    match review_service.submit(request.into_inner()).await {
        Ok(id) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": json!({
                "id": id,
                "message": "Review submitted"
            })
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/reviews/all",
    tag = "reviews",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All reviews with moderation flags", body = [Review]),
        (status = 403, description = "Admin only")
    )
)]
pub async fn list_reviews(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match review_service.list_all().await {
        Ok(reviews) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": reviews
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/reviews/{id}/approve",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review id")),
    request_body = ApproveReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Approval flag updated")
    )
)]
pub async fn approve_review(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<ApproveReviewRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match review_service
        .set_approved(path.into_inner(), request.is_approved)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Review updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/reviews/featured",
    tag = "reviews",
    request_body = SetFeaturedRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Featured trio replaced"),
        (status = 400, description = "Not exactly three approved reviews")
    )
)]
pub async fn set_featured_reviews(
    review_service: web::Data<ReviewService>,
    req: HttpRequest,
    request: web::Json<SetFeaturedRequest>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match review_service
        .set_featured(request.into_inner().featured_ids)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Featured reviews updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn reviews_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::post().to(submit_review))
            .route("/featured", web::get().to(featured_reviews))
            .route("/featured", web::put().to(set_featured_reviews))
            .route("/all", web::get().to(list_reviews))
            .route("/{id}/approve", web::put().to(approve_review)),
    );
}
