use crate::error::{AppError, AppResult};
use crate::models::*;
use sqlx::PgPool;

#[derive(Clone)]
pub struct ContentService {
    pool: PgPool,
}

impl ContentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Footer links

    pub async fn active_footer_links(&self) -> AppResult<Vec<FooterLink>> {
        let links = sqlx::query_as::<_, FooterLink>(
            "SELECT id, title, url, display_order, is_active, created_at
             FROM footer_links WHERE is_active = TRUE ORDER BY display_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    pub async fn all_footer_links(&self) -> AppResult<Vec<FooterLink>> {
        let links = sqlx::query_as::<_, FooterLink>(
            "SELECT id, title, url, display_order, is_active, created_at
             FROM footer_links ORDER BY display_order ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    pub async fn create_footer_link(
        &self,
        request: CreateFooterLinkRequest,
    ) -> AppResult<FooterLink> {
        if request.title.trim().is_empty() || request.url.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title and URL are required".to_string(),
            ));
        }

        let link = sqlx::query_as::<_, FooterLink>(
            "INSERT INTO footer_links (title, url, display_order, is_active)
             VALUES ($1, $2, $3, $4)
             RETURNING id, title, url, display_order, is_active, created_at",
        )
        .bind(&request.title)
        .bind(&request.url)
        .bind(request.display_order.unwrap_or(0))
        .bind(request.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn update_footer_link(
        &self,
        id: i64,
        request: UpdateFooterLinkRequest,
    ) -> AppResult<FooterLink> {
        sqlx::query_as::<_, FooterLink>(
            "UPDATE footer_links
             SET title = $1, url = $2, display_order = $3, is_active = $4
             WHERE id = $5
             RETURNING id, title, url, display_order, is_active, created_at",
        )
        .bind(&request.title)
        .bind(&request.url)
        .bind(request.display_order)
        .bind(request.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Footer link not found".to_string()))
    }

    pub async fn delete_footer_link(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM footer_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Footer link not found".to_string()));
        }
        Ok(())
    }

    // Info pages

    pub async fn active_info_pages(&self) -> AppResult<Vec<InfoPage>> {
        let pages = sqlx::query_as::<_, InfoPage>(
            "SELECT id, title, slug, content, display_order, is_active, created_at, updated_at
             FROM info_pages WHERE is_active = TRUE ORDER BY display_order",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(pages)
    }

    pub async fn info_page_by_slug(&self, slug: &str) -> AppResult<InfoPage> {
        sqlx::query_as::<_, InfoPage>(
            "SELECT id, title, slug, content, display_order, is_active, created_at, updated_at
             FROM info_pages WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))
    }

    pub async fn update_info_page(&self, id: i64, request: UpdateInfoPageRequest) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE info_pages SET title = $1, content = $2, updated_at = now() WHERE id = $3",
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Page not found".to_string()));
        }
        Ok(())
    }

    // Brochures

    pub async fn list_brochures(&self) -> AppResult<Vec<Brochure>> {
        let brochures = sqlx::query_as::<_, Brochure>(
            "SELECT id, title, link, thumbnail_url, created_at
             FROM brochures ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(brochures)
    }

    pub async fn create_brochure(&self, request: CreateBrochureRequest) -> AppResult<Brochure> {
        if request.title.trim().is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }

        let brochure = sqlx::query_as::<_, Brochure>(
            "INSERT INTO brochures (title, link, thumbnail_url)
             VALUES ($1, $2, $3)
             RETURNING id, title, link, thumbnail_url, created_at",
        )
        .bind(&request.title)
        .bind(&request.link)
        .bind(&request.thumbnail_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(brochure)
    }

    pub async fn delete_brochure(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM brochures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Instagram feed

    pub async fn list_instagram(&self) -> AppResult<Vec<InstagramItem>> {
        let items = sqlx::query_as::<_, InstagramItem>(
            "SELECT id, image_url, link, created_at
             FROM instagram_feed ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn add_instagram(&self, request: CreateInstagramItemRequest) -> AppResult<()> {
        if request.image_url.trim().is_empty() {
            return Err(AppError::ValidationError("Image required".to_string()));
        }

        sqlx::query("INSERT INTO instagram_feed (image_url, link) VALUES ($1, $2)")
            .bind(&request.image_url)
            .bind(request.link.as_deref().unwrap_or("#"))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete_instagram(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM instagram_feed WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
