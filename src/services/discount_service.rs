use crate::error::{AppError, AppResult};
use crate::models::*;
use sqlx::PgPool;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Evaluates a looked-up coupon rule against a subtotal. Pure so the
/// pricing rules stay testable without a database.
fn compute_discount(rule: Option<&Discount>, subtotal: f64) -> DiscountResult {
    let rule = match rule {
        Some(rule) => rule,
        None => return DiscountResult::rejected(subtotal, "Invalid Coupon"),
    };

    if subtotal < rule.min_order_value {
        return DiscountResult::rejected(
            subtotal,
            format!("Min order value is {}", rule.min_order_value),
        );
    }

    let mut discount_amount = match rule.kind.as_str() {
        DISCOUNT_TYPE_PERCENTAGE => (subtotal * rule.value) / 100.0,
        DISCOUNT_TYPE_FIXED => rule.value,
        _ => 0.0,
    };

    // Never push the total below zero.
    if discount_amount > subtotal {
        discount_amount = subtotal;
    }

    DiscountResult {
        discount_amount: round2(discount_amount),
        final_total: round2(subtotal - discount_amount),
        message: "Coupon Applied".to_string(),
        rule_id: Some(rule.id),
    }
}

#[derive(Clone)]
pub struct DiscountService {
    pool: PgPool,
}

impl DiscountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Evaluates a coupon code. Lookup failures degrade to a zero discount
    /// with an error message; this never fails the surrounding request.
    pub async fn apply_discount(&self, coupon_code: Option<&str>, subtotal: f64) -> DiscountResult {
        let code = match coupon_code.map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => code.to_uppercase(),
            None => return DiscountResult::none(subtotal),
        };

        let lookup = sqlx::query_as::<_, Discount>(
            r#"
            SELECT id, code, type, value, min_order_value, is_active, created_at
            FROM discounts
            WHERE code = $1 AND is_active = TRUE
            "#,
        )
        .bind(&code)
        .fetch_optional(&self.pool)
        .await;

        match lookup {
            Ok(rule) => compute_discount(rule.as_ref(), subtotal),
            Err(e) => {
                log::error!("Discount lookup failed for {code}: {e}");
                DiscountResult::rejected(subtotal, "Error checking discount")
            }
        }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Discount>> {
        let discounts = sqlx::query_as::<_, Discount>(
            "SELECT id, code, type, value, min_order_value, is_active, created_at
             FROM discounts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(discounts)
    }

    pub async fn create(&self, request: CreateDiscountRequest) -> AppResult<()> {
        let code = request.code.trim().to_uppercase();
        let kind = request.kind.trim().to_uppercase();

        if code.is_empty() {
            return Err(AppError::ValidationError("Code is required".to_string()));
        }
        if kind != DISCOUNT_TYPE_PERCENTAGE && kind != DISCOUNT_TYPE_FIXED {
            return Err(AppError::ValidationError(
                "Type must be PERCENTAGE or FIXED".to_string(),
            ));
        }

        sqlx::query(
            "INSERT INTO discounts (code, type, value, min_order_value, is_active)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&code)
        .bind(&kind)
        .bind(request.value)
        .bind(request.min_order_value.unwrap_or(0.0))
        .bind(request.is_active.unwrap_or(true))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::or_conflict(e, "Coupon code already exists"))?;

        Ok(())
    }

    pub async fn update(&self, id: i64, request: UpdateDiscountRequest) -> AppResult<()> {
        let mut builder = sqlx::QueryBuilder::new("UPDATE discounts SET ");
        let mut fields = builder.separated(", ");
        let mut has_fields = false;

        if let Some(code) = &request.code {
            fields.push("code = ");
            fields.push_bind_unseparated(code.trim().to_uppercase());
            has_fields = true;
        }
        if let Some(kind) = &request.kind {
            fields.push("type = ");
            fields.push_bind_unseparated(kind.trim().to_uppercase());
            has_fields = true;
        }
        if let Some(value) = request.value {
            fields.push("value = ");
            fields.push_bind_unseparated(value);
            has_fields = true;
        }
        if let Some(min_order_value) = request.min_order_value {
            fields.push("min_order_value = ");
            fields.push_bind_unseparated(min_order_value);
            has_fields = true;
        }
        if let Some(is_active) = request.is_active {
            fields.push("is_active = ");
            fields.push_bind_unseparated(is_active);
            has_fields = true;
        }

        if !has_fields {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::or_conflict(e, "Coupon code already exists"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Discount not found".to_string()));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM discounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rule(kind: &str, value: f64, min_order_value: f64) -> Discount {
        Discount {
            id: 7,
            code: "SAVE10".to_string(),
            kind: kind.to_string(),
            value,
            min_order_value,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_percentage_discount() {
        let rule = rule(DISCOUNT_TYPE_PERCENTAGE, 10.0, 500.0);
        let result = compute_discount(Some(&rule), 1000.0);

        assert_eq!(result.discount_amount, 100.00);
        assert_eq!(result.final_total, 900.00);
        assert_eq!(result.message, "Coupon Applied");
        assert_eq!(result.rule_id, Some(7));
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let rule = rule(DISCOUNT_TYPE_FIXED, 200.0, 0.0);
        let result = compute_discount(Some(&rule), 150.0);

        assert_eq!(result.discount_amount, 150.00);
        assert_eq!(result.final_total, 0.00);
    }

    #[test]
    fn test_below_min_order_value_names_minimum() {
        let rule = rule(DISCOUNT_TYPE_PERCENTAGE, 10.0, 500.0);
        let result = compute_discount(Some(&rule), 300.0);

        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.final_total, 300.0);
        assert_eq!(result.message, "Min order value is 500");
    }

    #[test]
    fn test_unknown_coupon() {
        let result = compute_discount(None, 300.0);

        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.final_total, 300.0);
        assert_eq!(result.message, "Invalid Coupon");
        assert_eq!(result.rule_id, None);
    }

    #[test]
    fn test_no_code_means_no_discount() {
        let result = DiscountResult::none(42.5);
        assert_eq!(result.discount_amount, 0.0);
        assert_eq!(result.final_total, 42.5);
        assert!(result.message.is_empty());
    }

    #[test]
    fn test_amounts_rounded_to_two_decimals() {
        let rule = rule(DISCOUNT_TYPE_PERCENTAGE, 33.0, 0.0);
        let result = compute_discount(Some(&rule), 99.99);

        assert_eq!(result.discount_amount, 33.0);
        assert_eq!(result.final_total, 66.99);
    }
}
