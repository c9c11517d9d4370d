use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i64,
    pub author_name: String,
    pub rating: Option<i16>,
    pub content: String,
    pub source: String,
    pub is_approved: bool,
    pub is_featured: bool,
    pub featured_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Public projection without moderation flags.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PublicReview {
    pub id: i64,
    pub author_name: String,
    pub rating: Option<i16>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub author_name: String,
    pub rating: Option<f64>,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeaturedReviewsResponse {
    pub reviews: Vec<PublicReview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApproveReviewRequest {
    pub is_approved: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetFeaturedRequest {
    pub featured_ids: Vec<i64>,
}
