use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::jwt::{JwtService, ROLE_ADMIN};
use crate::utils::{hash_password, verify_password};
use regex::Regex;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, phone, created_at";

fn email_is_valid(email: &str) -> bool {
    // Shape check only; deliverability is not our problem.
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));
    re.is_match(email)
}

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }
        if !email_is_valid(&request.email) {
            return Err(AppError::ValidationError("Invalid email".to_string()));
        }
        if request.password.is_empty() {
            return Err(AppError::ValidationError(
                "Password is required".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(request.name.trim())
        .bind(&request.email)
        .bind(&password_hash)
        .bind(&request.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::or_conflict(e, "Email already exists"))?;

        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, &user.role)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::ValidationError("User not found".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::ValidationError("Invalid password".to_string()));
        }

        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, &user.role)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    /// Same credential flow as `login` but only admin rows qualify, and
    /// the issued token is shorter-lived.
    pub async fn admin_login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND role = $2"
        ))
        .bind(&request.email)
        .bind(ROLE_ADMIN)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid admin credentials".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::AuthError("Invalid password".to_string()));
        }

        let token = self
            .jwt_service
            .generate_token(user.id, &user.email, &user.role)?;

        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }

    pub async fn me(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    pub async fn list_admins(&self) -> AppResult<Vec<AdminUserRow>> {
        let admins = sqlx::query_as::<_, AdminUserRow>(
            "SELECT id, name, email, phone, created_at
             FROM users WHERE role = $1 ORDER BY created_at DESC",
        )
        .bind(ROLE_ADMIN)
        .fetch_all(&self.pool)
        .await?;
        Ok(admins)
    }

    pub async fn create_admin(&self, request: CreateAdminRequest) -> AppResult<()> {
        if request.name.trim().is_empty() || request.email.is_empty() || request.password.is_empty()
        {
            return Err(AppError::ValidationError(
                "Name, email, and password are required".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        sqlx::query(
            "INSERT INTO users (name, email, password_hash, role, phone)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(request.name.trim())
        .bind(&request.email)
        .bind(&password_hash)
        .bind(ROLE_ADMIN)
        .bind(&request.phone)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::or_conflict(e, "Email already exists"))?;

        Ok(())
    }

    pub async fn update_admin(&self, id: i64, request: UpdateAdminRequest) -> AppResult<()> {
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 AND role = $2")
                .bind(id)
                .bind(ROLE_ADMIN)
                .fetch_optional(&self.pool)
                .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Admin user not found".to_string()));
        }

        sqlx::query("UPDATE users SET name = $1, email = $2, phone = $3 WHERE id = $4")
            .bind(&request.name)
            .bind(&request.email)
            .bind(&request.phone)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::or_conflict(e, "Email already exists"))?;

        if let Some(password) = request.password.as_deref().filter(|p| !p.trim().is_empty()) {
            let password_hash = hash_password(password)?;
            sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
                .bind(&password_hash)
                .bind(id)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    pub async fn delete_admin(&self, id: i64, acting_admin_id: i64) -> AppResult<()> {
        if id == acting_admin_id {
            return Err(AppError::ValidationError(
                "You cannot delete your own account".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
            .bind(id)
            .bind(ROLE_ADMIN)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Admin user not found".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_check() {
        assert!(email_is_valid("jane@example.com"));
        assert!(email_is_valid("a.b+c@sub.domain.org"));
        assert!(!email_is_valid("not-an-email"));
        assert!(!email_is_valid("two@@example.com"));
        assert!(!email_is_valid("spaces in@example.com"));
        assert!(!email_is_valid("nodot@example"));
    }
}
