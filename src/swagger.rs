use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::admin_login,
        handlers::auth::me,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,
        handlers::cart::get_cart,
        handlers::cart::add_to_cart,
        handlers::cart::update_cart_item,
        handlers::cart::merge_cart,
        handlers::wishlist::get_wishlist,
        handlers::wishlist::toggle_wishlist,
        handlers::orders::create_order,
        handlers::orders::verify_payment,
        handlers::orders::my_orders,
        handlers::discounts::list_discounts,
        handlers::discounts::create_discount,
        handlers::discounts::update_discount,
        handlers::discounts::delete_discount,
        handlers::reviews::featured_reviews,
        handlers::reviews::submit_review,
        handlers::reviews::list_reviews,
        handlers::reviews::approve_review,
        handlers::reviews::set_featured_reviews,
        handlers::admin::list_admin_users,
        handlers::admin::create_admin_user,
        handlers::admin::update_admin_user,
        handlers::admin::delete_admin_user,
        handlers::admin::list_orders,
        handlers::admin::order_details,
        handlers::admin::update_order_status,
        handlers::admin::update_payment_status,
        handlers::footer::footer_links,
        handlers::footer::all_footer_links,
        handlers::footer::create_footer_link,
        handlers::footer::update_footer_link,
        handlers::footer::delete_footer_link,
        handlers::info_pages::list_info_pages,
        handlers::info_pages::get_info_page,
        handlers::info_pages::update_info_page,
        handlers::brochures::list_brochures,
        handlers::brochures::create_brochure,
        handlers::brochures::delete_brochure,
        handlers::instagram::list_instagram,
        handlers::instagram::add_instagram,
        handlers::instagram::delete_instagram,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::site_config::get_site_config,
    ),
    components(
        schemas(
            User,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateAdminRequest,
            UpdateAdminRequest,
            AdminUserRow,
            Product,
            ProductQuery,
            CreateProductRequest,
            UpdateProductRequest,
            Category,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            Cart,
            CartItem,
            CartItemView,
            CartResponse,
            CartQuery,
            AddItemRequest,
            UpdateQuantityRequest,
            MergeCartRequest,
            WishlistItemView,
            ToggleWishlistResponse,
            Discount,
            DiscountResult,
            CreateDiscountRequest,
            UpdateDiscountRequest,
            PaymentMethod,
            Order,
            OrderDetails,
            CreateOrderRequest,
            CreateOrderResponse,
            VerifyPaymentRequest,
            UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
            Review,
            PublicReview,
            SubmitReviewRequest,
            FeaturedReviewsResponse,
            ApproveReviewRequest,
            SetFeaturedRequest,
            Brochure,
            CreateBrochureRequest,
            FooterLink,
            CreateFooterLinkRequest,
            UpdateFooterLinkRequest,
            InfoPage,
            UpdateInfoPageRequest,
            InstagramItem,
            CreateInstagramItemRequest,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication API"),
        (name = "catalog", description = "Products and categories"),
        (name = "cart", description = "Guest and user carts"),
        (name = "wishlist", description = "Wishlist API"),
        (name = "orders", description = "Checkout and payment"),
        (name = "discounts", description = "Coupon management"),
        (name = "reviews", description = "Customer reviews"),
        (name = "admin", description = "Back-office API"),
        (name = "content", description = "Site content management"),
        (name = "settings", description = "Site settings and configuration"),
    ),
    info(
        title = "Storefront Backend API",
        version = "1.0.0",
        description = "Multi-brand storefront REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
