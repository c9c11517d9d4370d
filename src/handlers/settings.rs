use crate::middlewares::require_admin;
use crate::models::MessageResponse;
use crate::services::SettingsService;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError, Result};
use serde_json::json;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses(
        (status = 200, description = "All site settings as a key/value map")
    )
)]
pub async fn get_settings(settings_service: web::Data<SettingsService>) -> Result<HttpResponse> {
    match settings_service.get_all().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": settings
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Settings upserted"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn update_settings(
    settings_service: web::Data<SettingsService>,
    req: HttpRequest,
    request: web::Json<HashMap<String, String>>,
) -> Result<HttpResponse> {
    if let Err(e) = require_admin(&req) {
        return Ok(e.error_response());
    }

    match settings_service.update(request.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": MessageResponse {
                message: "Settings updated".to_string()
            }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn settings_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .route("", web::get().to(get_settings))
            .route("", web::put().to(update_settings)),
    );
}
