pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod content_service;
pub mod discount_service;
pub mod order_service;
pub mod review_service;
pub mod settings_service;
pub mod wishlist_service;

pub use auth_service::AuthService;
pub use cart_service::CartService;
pub use catalog_service::CatalogService;
pub use content_service::ContentService;
pub use discount_service::DiscountService;
pub use order_service::OrderService;
pub use review_service::ReviewService;
pub use settings_service::SettingsService;
pub use wishlist_service::WishlistService;
