use crate::error::{AppError, AppResult};
use crate::external::RazorpayClient;
use crate::middlewares::AuthUser;
use crate::models::*;
use sqlx::PgPool;

const ORDER_COLUMNS: &str = "id, user_id, customer_name, customer_email, customer_phone, \
     shipping_address, total_amount, payment_method, payment_status, order_status, \
     coupon_code, razorpay_order_id, razorpay_payment_id, items_snapshot, created_at";

/// Best-effort parse of a structured shipping address stored as JSON text.
/// Plain-text addresses land unchanged in line1.
fn parse_shipping_address(raw: &str) -> (String, String, String, String, String) {
    if raw.contains('{') {
        if let Ok(addr) = serde_json::from_str::<serde_json::Value>(raw) {
            let get = |keys: &[&str]| {
                keys.iter()
                    .find_map(|k| addr.get(*k).and_then(|v| v.as_str()))
                    .unwrap_or_default()
                    .to_string()
            };
            let line1 = {
                let v = get(&["line1", "address"]);
                if v.is_empty() { raw.to_string() } else { v }
            };
            return (
                line1,
                get(&["line2"]),
                get(&["city"]),
                get(&["state"]),
                get(&["pincode", "zip"]),
            );
        }
    }
    (
        raw.to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
    )
}

#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
    gateway: Option<RazorpayClient>,
}

impl OrderService {
    pub fn new(pool: PgPool, gateway: Option<RazorpayClient>) -> Self {
        Self { pool, gateway }
    }

    /// Checkout. The order row (with its immutable items snapshot, stored
    /// exactly as supplied by the client) and the cart clear commit in one
    /// transaction; the gateway order is created afterwards, so a gateway
    /// failure leaves a PENDING order without a gateway id.
    pub async fn create_order(
        &self,
        user: &AuthUser,
        request: CreateOrderRequest,
    ) -> AppResult<CreateOrderResponse> {
        if request.shipping_address.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Shipping address is required".to_string(),
            ));
        }

        let gateway = match request.payment_method {
            PaymentMethod::Online => Some(self.gateway.as_ref().ok_or_else(|| {
                AppError::ServiceUnavailable("Payment gateway not configured".to_string())
            })?),
            PaymentMethod::Cod => None,
        };

        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders
                (user_id, customer_name, customer_email, customer_phone, shipping_address,
                 total_amount, payment_method, payment_status, order_status, coupon_code,
                 items_snapshot)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(user.id)
        .bind(&request.customer_name)
        .bind(&user.email)
        .bind(&request.customer_phone)
        .bind(&request.shipping_address)
        .bind(request.total_amount)
        .bind(request.payment_method.as_str())
        .bind(PAYMENT_STATUS_PENDING)
        .bind(ORDER_STATUS_PLACED)
        .bind(&request.coupon_code)
        .bind(&request.items)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM cart_items
             WHERE cart_id = (SELECT id FROM carts WHERE user_id = $1)",
        )
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut razorpay_order = None;
        if let Some(gateway) = gateway {
            // Gateway amounts are in the currency's minor unit.
            let amount_minor = (request.total_amount * 100.0).round() as i64;
            let receipt = format!("order_{order_id}");
            let created = gateway.create_order(amount_minor, &receipt).await?;

            sqlx::query("UPDATE orders SET razorpay_order_id = $1 WHERE id = $2")
                .bind(&created.id)
                .bind(order_id)
                .execute(&self.pool)
                .await?;

            razorpay_order = Some(created);
        }

        log::info!(
            "Order {order_id} created for user {} ({})",
            user.id,
            request.payment_method.as_str()
        );

        Ok(CreateOrderResponse {
            order_id,
            razorpay_order,
            message: "Order Created".to_string(),
        })
    }

    /// Returns true when the callback signature checks out; the order is
    /// then marked PAID. A mismatch leaves the order untouched.
    pub async fn verify_payment(&self, request: VerifyPaymentRequest) -> AppResult<bool> {
        let gateway = self.gateway.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("Payment gateway not configured".to_string())
        })?;

        let valid = gateway.verify_payment_signature(
            &request.razorpay_order_id,
            &request.razorpay_payment_id,
            &request.razorpay_signature,
        );

        if !valid {
            log::warn!(
                "Payment signature mismatch for order {}",
                request.order_id
            );
            return Ok(false);
        }

        let result = sqlx::query(
            "UPDATE orders SET payment_status = $1, razorpay_payment_id = $2 WHERE id = $3",
        )
        .bind(PAYMENT_STATUS_PAID)
        .bind(&request.razorpay_payment_id)
        .bind(request.order_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        Ok(true)
    }

    pub async fn my_orders(&self, user_id: i64) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn get_details(&self, order_id: i64) -> AppResult<OrderDetails> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let items = order
            .items_snapshot
            .clone()
            .unwrap_or_else(|| serde_json::Value::Array(vec![]));

        let (line1, line2, city, state, pincode) =
            parse_shipping_address(&order.shipping_address);

        Ok(OrderDetails {
            order,
            items,
            shipping_address_line1: line1,
            shipping_address_line2: line2,
            shipping_city: city,
            shipping_state: state,
            shipping_pincode: pincode,
        })
    }

    pub async fn update_order_status(&self, order_id: i64, status: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE orders SET order_status = $1 WHERE id = $2")
            .bind(status)
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }
        Ok(())
    }

    pub async fn update_payment_status(&self, order_id: i64, payment_status: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE orders SET payment_status = $1 WHERE id = $2")
            .bind(payment_status)
            .bind(order_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_address_stays_in_line1() {
        let (line1, line2, city, state, pincode) =
            parse_shipping_address("12 MG Road, Bengaluru");
        assert_eq!(line1, "12 MG Road, Bengaluru");
        assert!(line2.is_empty());
        assert!(city.is_empty());
        assert!(state.is_empty());
        assert!(pincode.is_empty());
    }

    #[test]
    fn test_structured_address_is_split() {
        let raw = r#"{"line1":"12 MG Road","line2":"Flat 4","city":"Bengaluru","state":"KA","pincode":"560001"}"#;
        let (line1, line2, city, state, pincode) = parse_shipping_address(raw);
        assert_eq!(line1, "12 MG Road");
        assert_eq!(line2, "Flat 4");
        assert_eq!(city, "Bengaluru");
        assert_eq!(state, "KA");
        assert_eq!(pincode, "560001");
    }

    #[test]
    fn test_zip_falls_back_for_pincode() {
        let raw = r#"{"address":"12 MG Road","zip":"560001"}"#;
        let (line1, _, _, _, pincode) = parse_shipping_address(raw);
        assert_eq!(line1, "12 MG Road");
        assert_eq!(pincode, "560001");
    }
}
