use crate::config::DatabaseConfig;
use crate::error::AppResult;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub type DbPool = PgPool;

const MAX_BACKOFF_MS: u64 = 8_000;

/// Retry only connection-class failures; auth and configuration errors
/// surface immediately.
fn is_transient(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)
    )
}

fn backoff_delay(base_delay_ms: u64, attempt: u32) -> Duration {
    let exp = base_delay_ms.saturating_mul(1u64 << attempt.min(16));
    Duration::from_millis(exp.min(MAX_BACKOFF_MS))
}

/// Creates the connection pool, retrying transient startup failures with
/// bounded exponential backoff. This is startup-only behavior; in-request
/// queries are never retried.
pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DbPool> {
    let attempts = config.connect_retry_attempts.max(1);
    let mut attempt = 0;

    loop {
        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
        {
            Ok(pool) => {
                // Startup health check through the pool itself.
                sqlx::query("SELECT 1").execute(&pool).await?;
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;
                if !is_transient(&e) || attempt == attempts {
                    return Err(e.into());
                }
                let delay = backoff_delay(config.connect_retry_base_delay_ms, attempt - 1);
                log::warn!(
                    "Database connection attempt {attempt}/{attempts} failed ({e}), retrying in {delay:?}"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

pub async fn run_migrations(pool: &DbPool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(500, 0), Duration::from_millis(500));
        assert_eq!(backoff_delay(500, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(500, 2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(500, 4), Duration::from_millis(8000));
        assert_eq!(backoff_delay(500, 10), Duration::from_millis(8000));
    }

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
    }
}
