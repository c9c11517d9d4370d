use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use utoipa::ToSchema;

use crate::config::RazorpayConfig;
use crate::error::{AppError, AppResult};

const RAZORPAY_API_BASE: &str = "https://api.razorpay.com/v1";

type HmacSha256 = Hmac<Sha256>;

/// Gateway order as returned by the orders API; forwarded to the frontend
/// so it can open the checkout widget.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RazorpayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a gateway order. `amount_minor` is in the currency's minor
    /// unit (paise for INR).
    pub async fn create_order(&self, amount_minor: i64, receipt: &str) -> AppResult<RazorpayOrder> {
        let url = format!("{RAZORPAY_API_BASE}/orders");
        let body = CreateOrderBody {
            amount: amount_minor,
            currency: &self.config.currency,
            receipt,
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("Razorpay order creation failed: {status} {text}");
            return Err(AppError::ExternalApiError(format!(
                "Payment gateway rejected order creation ({status})"
            )));
        }

        let order: RazorpayOrder = response.json().await?;
        Ok(order)
    }

    /// Checks the checkout callback signature: HMAC-SHA256 over
    /// `"{order_id}|{payment_id}"` keyed with the API secret.
    pub fn verify_payment_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> bool {
        verify_signature(&self.config.key_secret, order_id, payment_id, signature)
    }
}

pub fn sign_payment(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let expected = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    // Constant-time comparison.
    mac.verify_slice(&expected).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_round_trip() {
        let sig = sign_payment("secret", "order_abc", "pay_xyz");
        assert!(verify_signature("secret", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_rejects_tampered_payment_id() {
        let sig = sign_payment("secret", "order_abc", "pay_xyz");
        assert!(!verify_signature("secret", "order_abc", "pay_other", &sig));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let sig = sign_payment("secret", "order_abc", "pay_xyz");
        assert!(!verify_signature("other", "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_rejects_non_hex_signature() {
        assert!(!verify_signature("secret", "order_abc", "pay_xyz", "not hex!"));
    }
}
