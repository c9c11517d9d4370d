use crate::error::{AppError, AppResult};
use crate::models::*;
use sqlx::PgPool;

const PRODUCT_COLUMNS: &str = "id, name, description, price, category, image_url, stock, \
     is_active, is_trending, created_at";

#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public listing: active products only, with optional category,
    /// search, and price-range filters. Filters are bound parameters,
    /// never interpolated.
    pub async fn list_products(&self, query: &ProductQuery) -> AppResult<Vec<Product>> {
        let mut builder = sqlx::QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = TRUE"
        ));

        if let Some(cat) = query.cat.as_deref().filter(|s| !s.is_empty()) {
            builder.push(" AND category ILIKE ");
            builder.push_bind(format!("%{cat}%"));
        }
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{search}%");
            builder.push(" AND (name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR description ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
        if let Some(min_price) = query.min_price {
            builder.push(" AND price >= ");
            builder.push_bind(min_price);
        }
        if let Some(max_price) = query.max_price {
            builder.push(" AND price <= ");
            builder.push_bind(max_price);
        }
        if query.trending == Some(true) {
            builder.push(" AND is_trending = TRUE");
        }

        builder.push(" ORDER BY created_at DESC");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn create_product(&self, request: CreateProductRequest) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, category, image_url, stock)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(&request.category)
        .bind(&request.image_url)
        .bind(request.stock.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    /// Partial update: absent fields keep their stored values.
    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                category = COALESCE($4, category),
                image_url = COALESCE($5, image_url),
                stock = COALESCE($6, stock),
                is_active = COALESCE($7, is_active),
                is_trending = COALESCE($8, is_trending)
             WHERE id = $9
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(&request.category)
        .bind(&request.image_url)
        .bind(request.stock)
        .bind(request.is_active)
        .bind(request.is_trending)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    /// Soft delete: keeps the row (orders and carts reference it) but
    /// drops it from public listings.
    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("UPDATE products SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, image_url, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, image_url) VALUES ($1, $2)
             RETURNING id, name, image_url, created_at",
        )
        .bind(&request.name)
        .bind(&request.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::or_conflict(e, "Category exists"))
    }

    pub async fn update_category(
        &self,
        id: i64,
        request: UpdateCategoryRequest,
    ) -> AppResult<Category> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        sqlx::query_as::<_, Category>(
            "UPDATE categories
             SET name = $1, image_url = COALESCE($2, image_url)
             WHERE id = $3
             RETURNING id, name, image_url, created_at",
        )
        .bind(&request.name)
        .bind(&request.image_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::or_conflict(e, "Category exists"))?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn delete_category(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
