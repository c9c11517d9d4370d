pub mod admin;
pub mod auth;
pub mod brochures;
pub mod cart;
pub mod categories;
pub mod discounts;
pub mod footer;
pub mod info_pages;
pub mod instagram;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod settings;
pub mod site_config;
pub mod wishlist;

pub use admin::admin_config;
pub use auth::auth_config;
pub use brochures::brochures_config;
pub use cart::cart_config;
pub use categories::categories_config;
pub use discounts::discounts_config;
pub use footer::footer_config;
pub use info_pages::info_pages_config;
pub use instagram::instagram_config;
pub use orders::orders_config;
pub use products::products_config;
pub use reviews::reviews_config;
pub use settings::settings_config;
pub use site_config::site_config_config;
pub use wishlist::wishlist_config;
