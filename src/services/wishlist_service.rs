use crate::error::AppResult;
use crate::models::*;
use sqlx::PgPool;

/// The toggle state machine: present flips to absent and vice versa.
fn toggle_transition(already_liked: bool) -> ToggleWishlistResponse {
    if already_liked {
        ToggleWishlistResponse {
            liked: false,
            message: "Removed from wishlist".to_string(),
        }
    } else {
        ToggleWishlistResponse {
            liked: true,
            message: "Added to wishlist".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct WishlistService {
    pool: PgPool,
}

impl WishlistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, owner: &CartOwner) -> AppResult<Vec<WishlistItemView>> {
        let query = match owner {
            CartOwner::User(_) => {
                r#"
                SELECT w.id AS wishlist_id, p.id, p.name, p.description, p.price,
                       p.category, p.image_url, p.stock, p.is_active, p.created_at
                FROM wishlist w
                JOIN products p ON w.product_id = p.id
                WHERE w.user_id = $1
                ORDER BY w.created_at DESC
                "#
            }
            CartOwner::Guest(_) => {
                r#"
                SELECT w.id AS wishlist_id, p.id, p.name, p.description, p.price,
                       p.category, p.image_url, p.stock, p.is_active, p.created_at
                FROM wishlist w
                JOIN products p ON w.product_id = p.id
                WHERE w.session_id = $1 AND w.user_id IS NULL
                ORDER BY w.created_at DESC
                "#
            }
        };

        let mut q = sqlx::query_as::<_, WishlistItemView>(query);
        q = match owner {
            CartOwner::User(id) => q.bind(*id),
            CartOwner::Guest(sid) => q.bind(sid.clone()),
        };

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Like/unlike flip, scoped strictly to one owner. Guest entries do not
    /// migrate to the user on login; that asymmetry with the cart merge is
    /// deliberate product behavior.
    pub async fn toggle(&self, owner: &CartOwner, product_id: i64) -> AppResult<ToggleWishlistResponse> {
        let existing: Option<i64> = match owner {
            CartOwner::User(id) => {
                sqlx::query_scalar(
                    "SELECT id FROM wishlist WHERE product_id = $1 AND user_id = $2",
                )
                .bind(product_id)
                .bind(*id)
                .fetch_optional(&self.pool)
                .await?
            }
            CartOwner::Guest(sid) => {
                sqlx::query_scalar(
                    "SELECT id FROM wishlist
                     WHERE product_id = $1 AND session_id = $2 AND user_id IS NULL",
                )
                .bind(product_id)
                .bind(sid.clone())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        if let Some(entry_id) = existing {
            sqlx::query("DELETE FROM wishlist WHERE id = $1")
                .bind(entry_id)
                .execute(&self.pool)
                .await?;

            return Ok(toggle_transition(true));
        }

        // Exclusive ownership: exactly one of user_id / session_id is set.
        match owner {
            CartOwner::User(id) => {
                sqlx::query("INSERT INTO wishlist (product_id, user_id, session_id) VALUES ($1, $2, NULL)")
                    .bind(product_id)
                    .bind(*id)
                    .execute(&self.pool)
                    .await?;
            }
            CartOwner::Guest(sid) => {
                sqlx::query("INSERT INTO wishlist (product_id, user_id, session_id) VALUES ($1, NULL, $2)")
                    .bind(product_id)
                    .bind(sid.clone())
                    .execute(&self.pool)
                    .await?;
            }
        }

        Ok(toggle_transition(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_then_unlike_returns_to_absent() {
        let liked = toggle_transition(false);
        assert!(liked.liked);
        assert_eq!(liked.message, "Added to wishlist");

        let unliked = toggle_transition(liked.liked);
        assert!(!unliked.liked);
        assert_eq!(unliked.message, "Removed from wishlist");
    }

    #[test]
    fn test_double_toggle_is_an_involution() {
        for start in [false, true] {
            let after = toggle_transition(toggle_transition(start).liked);
            assert_eq!(after.liked, start);
        }
    }
}
