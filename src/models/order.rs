use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::external::razorpay::RazorpayOrder;

pub const PAYMENT_STATUS_PENDING: &str = "PENDING";
pub const PAYMENT_STATUS_PAID: &str = "PAID";
pub const ORDER_STATUS_PLACED: &str = "PLACED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentMethod {
    #[serde(rename = "COD")]
    Cod,
    #[serde(rename = "ONLINE")]
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "COD",
            PaymentMethod::Online => "ONLINE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub user_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub total_amount: f64,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub order_status: String,
    pub coupon_code: Option<String>,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    /// Immutable copy of the cart lines taken at checkout.
    #[schema(value_type = Object)]
    pub items_snapshot: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub shipping_address: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    /// Line items as shown to the customer; stored verbatim as the order
    /// snapshot.
    #[schema(value_type = Object)]
    pub items: serde_json::Value,
    pub payment_method: PaymentMethod,
    pub total_amount: f64,
    pub coupon_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_order: Option<RazorpayOrder>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "orderId")]
    pub order_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
}

/// Admin order detail: the stored row plus the parsed snapshot and a
/// best-effort structured shipping address.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    #[schema(value_type = Object)]
    pub items: serde_json::Value,
    pub shipping_address_line1: String,
    pub shipping_address_line2: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_pincode: String,
}
