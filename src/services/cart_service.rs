use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::DiscountService;
use sqlx::PgPool;

/// Stock is checked at add-time only; quantity updates intentionally skip
/// the re-check.
fn ensure_stock_available(stock: i32, in_cart: i32, requested: i32) -> AppResult<()> {
    if in_cart + requested > stock {
        let available = (stock - in_cart).max(0);
        return Err(AppError::ValidationError(format!(
            "Insufficient stock: only {available} available"
        )));
    }
    Ok(())
}

/// Final line quantities after folding a guest cart into a user cart:
/// one entry per guest line, summed with the user's existing quantity for
/// the same product. User-only lines are untouched and not listed.
fn merge_cart_lines(user_items: &[CartItem], guest_items: &[CartItem]) -> Vec<(i64, i32)> {
    guest_items
        .iter()
        .map(|guest| {
            let existing = user_items
                .iter()
                .find(|user| user.product_id == guest.product_id)
                .map(|user| user.quantity)
                .unwrap_or(0);
            (guest.product_id, existing + guest.quantity)
        })
        .collect()
}

#[derive(Clone)]
pub struct CartService {
    pool: PgPool,
    discounts: DiscountService,
}

impl CartService {
    pub fn new(pool: PgPool, discounts: DiscountService) -> Self {
        Self { pool, discounts }
    }

    async fn find_cart<'e, E>(executor: E, owner: &CartOwner) -> AppResult<Option<Cart>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let query = match owner {
            CartOwner::User(_) => {
                "SELECT id, user_id, session_id, created_at, updated_at
                 FROM carts WHERE user_id = $1"
            }
            CartOwner::Guest(_) => {
                "SELECT id, user_id, session_id, created_at, updated_at
                 FROM carts WHERE session_id = $1"
            }
        };

        let mut q = sqlx::query_as::<_, Cart>(query);
        q = match owner {
            CartOwner::User(id) => q.bind(*id),
            CartOwner::Guest(sid) => q.bind(sid.clone()),
        };

        Ok(q.fetch_optional(executor).await?)
    }

    async fn create_cart<'e, E>(executor: E, owner: &CartOwner) -> AppResult<Cart>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let cart = match owner {
            CartOwner::User(id) => {
                sqlx::query_as::<_, Cart>(
                    "INSERT INTO carts (user_id) VALUES ($1)
                     RETURNING id, user_id, session_id, created_at, updated_at",
                )
                .bind(*id)
                .fetch_one(executor)
                .await?
            }
            CartOwner::Guest(sid) => {
                sqlx::query_as::<_, Cart>(
                    "INSERT INTO carts (session_id) VALUES ($1)
                     RETURNING id, user_id, session_id, created_at, updated_at",
                )
                .bind(sid.clone())
                .fetch_one(executor)
                .await?
            }
        };
        Ok(cart)
    }

    /// Carts are created lazily on first access; a unique index per owner
    /// column keeps this idempotent.
    pub async fn get_or_create_cart(&self, owner: &CartOwner) -> AppResult<Cart> {
        if let Some(cart) = Self::find_cart(&self.pool, owner).await? {
            return Ok(cart);
        }
        Self::create_cart(&self.pool, owner).await
    }

    /// The cart as the storefront renders it: joined lines, subtotal, and
    /// an optional coupon evaluation.
    pub async fn get_cart_view(
        &self,
        owner: &CartOwner,
        coupon_code: Option<&str>,
    ) -> AppResult<CartResponse> {
        let cart = self.get_or_create_cart(owner).await?;

        let items = sqlx::query_as::<_, CartItemView>(
            r#"
            SELECT ci.id, ci.quantity, p.id AS product_id, p.name, p.price, p.image_url
            FROM cart_items ci
            JOIN products p ON ci.product_id = p.id
            WHERE ci.cart_id = $1
            "#,
        )
        .bind(cart.id)
        .fetch_all(&self.pool)
        .await?;

        let subtotal: f64 = items
            .iter()
            .map(|item| item.price * item.quantity as f64)
            .sum();

        let discount = match coupon_code {
            Some(code) => self.discounts.apply_discount(Some(code), subtotal).await,
            None => DiscountResult::none(subtotal),
        };
        let total = discount.final_total;

        Ok(CartResponse {
            cart_id: cart.id,
            items,
            subtotal,
            discount,
            total,
        })
    }

    pub async fn add_item(
        &self,
        owner: &CartOwner,
        product_id: i64,
        quantity: i32,
    ) -> AppResult<()> {
        if quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, category, image_url, stock,
                    is_active, is_trending, created_at
             FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if !product.is_active {
            return Err(AppError::ValidationError(
                "Product is no longer available".to_string(),
            ));
        }

        let cart = self.get_or_create_cart(owner).await?;

        let in_cart: Option<i32> = sqlx::query_scalar(
            "SELECT quantity FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart.id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        ensure_stock_available(product.stock, in_cart.unwrap_or(0), quantity)?;

        sqlx::query(
            "INSERT INTO cart_items (cart_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT (cart_id, product_id)
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
        )
        .bind(cart.id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Zero or negative quantity removes the line instead of keeping an
    /// empty row.
    pub async fn update_item_quantity(&self, item_id: i64, quantity: i32) -> AppResult<()> {
        if quantity <= 0 {
            sqlx::query("DELETE FROM cart_items WHERE id = $1")
                .bind(item_id)
                .execute(&self.pool)
                .await?;
        } else {
            sqlx::query("UPDATE cart_items SET quantity = $1 WHERE id = $2")
                .bind(quantity)
                .bind(item_id)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Folds a guest cart into the user's cart on login: shared products
    /// sum their quantities, the rest move over, and the guest cart goes
    /// away. One transaction so a crash cannot leave a half-merged pair.
    /// Returns false when there was no guest cart to merge.
    pub async fn merge_guest_cart(&self, session_id: &str, user_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let guest_owner = CartOwner::Guest(session_id.to_string());
        let guest_cart = match Self::find_cart(&mut *tx, &guest_owner).await? {
            Some(cart) => cart,
            None => return Ok(false),
        };

        let user_owner = CartOwner::User(user_id);
        let user_cart = match Self::find_cart(&mut *tx, &user_owner).await? {
            Some(cart) => cart,
            None => Self::create_cart(&mut *tx, &user_owner).await?,
        };

        let guest_items = sqlx::query_as::<_, CartItem>(
            "SELECT id, cart_id, product_id, quantity FROM cart_items WHERE cart_id = $1",
        )
        .bind(guest_cart.id)
        .fetch_all(&mut *tx)
        .await?;

        let user_items = sqlx::query_as::<_, CartItem>(
            "SELECT id, cart_id, product_id, quantity FROM cart_items WHERE cart_id = $1",
        )
        .bind(user_cart.id)
        .fetch_all(&mut *tx)
        .await?;

        for (product_id, quantity) in merge_cart_lines(&user_items, &guest_items) {
            sqlx::query(
                "INSERT INTO cart_items (cart_id, product_id, quantity)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (cart_id, product_id)
                 DO UPDATE SET quantity = EXCLUDED.quantity",
            )
            .bind(user_cart.id)
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        // Cascades to any remaining guest cart_items.
        sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(guest_cart.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_when_requested_exceeds_stock() {
        let err = ensure_stock_available(2, 0, 3).unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert_eq!(msg, "Insufficient stock: only 2 available")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_counts_quantity_already_in_cart() {
        assert!(ensure_stock_available(5, 3, 2).is_ok());
        assert!(ensure_stock_available(5, 3, 3).is_err());
    }

    #[test]
    fn test_sold_out_reports_zero_available() {
        let err = ensure_stock_available(2, 2, 1).unwrap_err();
        match err {
            AppError::ValidationError(msg) => {
                assert_eq!(msg, "Insufficient stock: only 0 available")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn item(product_id: i64, quantity: i32) -> CartItem {
        CartItem {
            id: 0,
            cart_id: 0,
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_merge_sums_shared_product_quantities() {
        let user = vec![item(1, 1)];
        let guest = vec![item(1, 2)];
        assert_eq!(merge_cart_lines(&user, &guest), vec![(1, 3)]);
    }

    #[test]
    fn test_merge_moves_guest_only_lines_unchanged() {
        let user = vec![item(1, 1), item(2, 4)];
        let guest = vec![item(1, 2), item(3, 5)];
        assert_eq!(merge_cart_lines(&user, &guest), vec![(1, 3), (3, 5)]);
    }

    #[test]
    fn test_merge_into_empty_cart_keeps_guest_quantities() {
        let guest = vec![item(7, 2)];
        assert_eq!(merge_cart_lines(&[], &guest), vec![(7, 2)]);
    }

    #[test]
    fn test_owner_resolution_prefers_user() {
        let owner = CartOwner::resolve(Some(9), Some("sess".to_string()));
        assert_eq!(owner, Some(CartOwner::User(9)));

        let owner = CartOwner::resolve(None, Some("sess".to_string()));
        assert_eq!(owner, Some(CartOwner::Guest("sess".to_string())));

        assert_eq!(CartOwner::resolve(None, None), None);
    }
}
