use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::discount::DiscountResult;

/// A cart belongs to exactly one owner: an authenticated user or an
/// anonymous guest session. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOwner {
    User(i64),
    Guest(String),
}

impl CartOwner {
    /// Resolves an owner from the request context, preferring the
    /// authenticated identity over the session header.
    pub fn resolve(user_id: Option<i64>, session_id: Option<String>) -> Option<Self> {
        match (user_id, session_id) {
            (Some(id), _) => Some(CartOwner::User(id)),
            (None, Some(sid)) => Some(CartOwner::Guest(sid)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Cart {
    pub id: i64,
    pub user_id: Option<i64>,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

/// A cart line joined with its product details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CartItemView {
    pub id: i64,
    pub quantity: i32,
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: i64,
    pub items: Vec<CartItemView>,
    pub subtotal: f64,
    pub discount: DiscountResult,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct CartQuery {
    /// Coupon code to evaluate against the current subtotal.
    pub coupon: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MergeCartRequest {
    pub session_id: String,
}
