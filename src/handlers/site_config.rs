use crate::config::Config;
use actix_web::{web, HttpResponse, Result};
use serde_json::json;

/// Public bootstrap for the storefront frontend: branding, feature
/// toggles, theme, and the gateway's publishable key. Never secrets.
#[utoipa::path(
    get,
    path = "/config",
    tag = "settings",
    responses(
        (status = 200, description = "Per-brand site configuration")
    )
)]
pub async fn get_site_config(config: web::Data<Config>) -> Result<HttpResponse> {
    let site = &config.site;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "appName": site.app_name,
            "currencySymbol": site.currency_symbol,
            "supportEmail": site.support_email,
            "supportPhone": site.support_phone,
            "whatsappNumber": site.whatsapp_number,
            "enableCod": site.enable_cod,
            "enableOnlinePayment": site.enable_online_payment,
            "enableDiscounts": site.enable_discounts,
            "theme": {
                "primary": site.theme.primary,
                "secondary": site.theme.secondary,
                "text": site.theme.text,
                "accent": site.theme.accent
            },
            "razorpayKeyId": config.razorpay.key_id
        }
    })))
}

pub fn site_config_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/config", web::get().to(get_site_config));
}
