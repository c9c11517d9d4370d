use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A wishlist entry joined with its product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WishlistItemView {
    pub wishlist_id: i64,
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleWishlistResponse {
    pub liked: bool,
    pub message: String,
}
