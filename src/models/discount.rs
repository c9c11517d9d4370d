use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const DISCOUNT_TYPE_PERCENTAGE: &str = "PERCENTAGE";
pub const DISCOUNT_TYPE_FIXED: &str = "FIXED";

/// An admin-defined coupon rule. `kind` is the wire/database `type` column:
/// PERCENTAGE or FIXED.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Discount {
    pub id: i64,
    pub code: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub min_order_value: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Outcome of evaluating a coupon against a cart subtotal. Never an error:
/// every failure mode degrades to a zero discount with a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    pub discount_amount: f64,
    pub final_total: f64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<i64>,
}

impl DiscountResult {
    pub fn none(subtotal: f64) -> Self {
        Self {
            discount_amount: 0.0,
            final_total: subtotal,
            message: String::new(),
            rule_id: None,
        }
    }

    pub fn rejected(subtotal: f64, message: impl Into<String>) -> Self {
        Self {
            discount_amount: 0.0,
            final_total: subtotal,
            message: message.into(),
            rule_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDiscountRequest {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub min_order_value: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateDiscountRequest {
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<f64>,
    pub min_order_value: Option<f64>,
    pub is_active: Option<bool>,
}
