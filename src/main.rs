use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use storefront_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::RazorpayClient,
    handlers,
    middlewares::{create_cors, AuthMiddleware},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.user_token_expires_in,
        config.jwt.admin_token_expires_in,
    );

    // Online payment stays disabled until gateway keys are configured;
    // COD checkout works either way.
    let razorpay_client = if config.razorpay.is_configured() {
        Some(RazorpayClient::new(config.razorpay.clone()))
    } else {
        log::warn!("Razorpay keys not configured; online payment disabled");
        None
    };

    let discount_service = DiscountService::new(pool.clone());
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let cart_service = CartService::new(pool.clone(), discount_service.clone());
    let catalog_service = CatalogService::new(pool.clone());
    let wishlist_service = WishlistService::new(pool.clone());
    let order_service = OrderService::new(pool.clone(), razorpay_client);
    let review_service = ReviewService::new(pool.clone());
    let content_service = ContentService::new(pool.clone());
    let settings_service = SettingsService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(wishlist_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(discount_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(content_service.clone()))
            .app_data(web::Data::new(settings_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api")
                    .configure(handlers::auth_config)
                    .configure(handlers::products_config)
                    .configure(handlers::categories_config)
                    .configure(handlers::cart_config)
                    .configure(handlers::wishlist_config)
                    .configure(handlers::orders_config)
                    .configure(handlers::discounts_config)
                    .configure(handlers::reviews_config)
                    .configure(handlers::admin_config)
                    .configure(handlers::footer_config)
                    .configure(handlers::info_pages_config)
                    .configure(handlers::brochures_config)
                    .configure(handlers::instagram_config)
                    .configure(handlers::settings_config)
                    .configure(handlers::site_config_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
