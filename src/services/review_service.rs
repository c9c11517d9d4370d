use crate::error::{AppError, AppResult};
use crate::models::*;
use sqlx::PgPool;

const FEATURED_COUNT: usize = 3;

fn clamp_rating(value: Option<f64>) -> Option<i16> {
    let n = value?;
    if !n.is_finite() {
        return None;
    }
    let r = n.round() as i64;
    if !(1..=5).contains(&r) {
        return None;
    }
    Some(r as i16)
}

fn validate_submission(request: &SubmitReviewRequest) -> AppResult<(String, String)> {
    let name = request.author_name.trim().to_string();
    let text = request.content.trim().to_string();

    if name.len() < 2 {
        return Err(AppError::ValidationError("Name is required".to_string()));
    }
    if name.len() > 255 {
        return Err(AppError::ValidationError("Name is too long".to_string()));
    }
    if text.len() < 10 {
        return Err(AppError::ValidationError("Review is too short".to_string()));
    }
    if text.len() > 2000 {
        return Err(AppError::ValidationError("Review is too long".to_string()));
    }
    Ok((name, text))
}

#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The homepage trio. Falls back to the latest approved reviews while
    /// the admin has fewer than three featured.
    pub async fn featured(&self) -> AppResult<FeaturedReviewsResponse> {
        let featured = sqlx::query_as::<_, PublicReview>(
            "SELECT id, author_name, rating, content, created_at
             FROM reviews
             WHERE is_approved = TRUE AND is_featured = TRUE
             ORDER BY featured_order ASC, created_at DESC
             LIMIT 3",
        )
        .fetch_all(&self.pool)
        .await?;

        if featured.len() == FEATURED_COUNT {
            return Ok(FeaturedReviewsResponse {
                reviews: featured,
                fallback: None,
            });
        }

        let approved = sqlx::query_as::<_, PublicReview>(
            "SELECT id, author_name, rating, content, created_at
             FROM reviews
             WHERE is_approved = TRUE
             ORDER BY created_at DESC
             LIMIT 3",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(FeaturedReviewsResponse {
            reviews: approved,
            fallback: Some(true),
        })
    }

    /// New reviews enter unapproved and invisible.
    pub async fn submit(&self, request: SubmitReviewRequest) -> AppResult<i64> {
        let (name, text) = validate_submission(&request)?;
        let rating = clamp_rating(request.rating);

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO reviews (author_name, rating, content, source, is_approved, is_featured, featured_order)
             VALUES ($1, $2, $3, 'website', FALSE, FALSE, 0)
             RETURNING id",
        )
        .bind(&name)
        .bind(rating)
        .bind(&text)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, author_name, rating, content, source, is_approved,
                    is_featured, featured_order, created_at
             FROM reviews ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    pub async fn set_approved(&self, id: i64, is_approved: bool) -> AppResult<()> {
        sqlx::query("UPDATE reviews SET is_approved = $1 WHERE id = $2")
            .bind(is_approved)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Replaces the featured trio atomically: clear all flags, then mark
    /// the three picks in order. Rolls back if any id is not an approved
    /// review.
    pub async fn set_featured(&self, featured_ids: Vec<i64>) -> AppResult<()> {
        let mut unique = featured_ids.clone();
        unique.sort_unstable();
        unique.dedup();

        if featured_ids.len() != FEATURED_COUNT || unique.len() != FEATURED_COUNT {
            return Err(AppError::ValidationError(
                "Select exactly 3 reviews to feature".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let approved: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews WHERE id = ANY($1) AND is_approved = TRUE",
        )
        .bind(unique.clone())
        .fetch_one(&mut *tx)
        .await?;

        if approved as usize != FEATURED_COUNT {
            return Err(AppError::ValidationError(
                "All featured reviews must be approved".to_string(),
            ));
        }

        sqlx::query("UPDATE reviews SET is_featured = FALSE, featured_order = 0")
            .execute(&mut *tx)
            .await?;

        for (position, id) in featured_ids.iter().enumerate() {
            sqlx::query("UPDATE reviews SET is_featured = TRUE, featured_order = $1 WHERE id = $2")
                .bind((position + 1) as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_clamped_to_one_through_five() {
        assert_eq!(clamp_rating(Some(4.4)), Some(4));
        assert_eq!(clamp_rating(Some(5.0)), Some(5));
        assert_eq!(clamp_rating(Some(0.4)), None);
        assert_eq!(clamp_rating(Some(6.0)), None);
        assert_eq!(clamp_rating(Some(f64::NAN)), None);
        assert_eq!(clamp_rating(None), None);
    }

    #[test]
    fn test_submission_bounds() {
        let ok = SubmitReviewRequest {
            author_name: "  Jane  ".to_string(),
            rating: Some(5.0),
            content: "Lovely craftsmanship!".to_string(),
        };
        let (name, text) = validate_submission(&ok).unwrap();
        assert_eq!(name, "Jane");
        assert_eq!(text, "Lovely craftsmanship!");

        let short_name = SubmitReviewRequest {
            author_name: "J".to_string(),
            rating: None,
            content: "Lovely craftsmanship!".to_string(),
        };
        assert!(validate_submission(&short_name).is_err());

        let short_review = SubmitReviewRequest {
            author_name: "Jane".to_string(),
            rating: None,
            content: "Nice".to_string(),
        };
        assert!(validate_submission(&short_review).is_err());
    }
}
