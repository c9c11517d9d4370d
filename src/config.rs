use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub razorpay: RazorpayConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_retry_attempts")]
    pub connect_retry_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub connect_retry_base_delay_ms: u64,
}

fn default_retry_attempts() -> u32 {
    10
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub user_token_expires_in: i64,  // seconds
    pub admin_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RazorpayConfig {
    #[serde(default)]
    pub key_id: String,
    #[serde(default)]
    pub key_secret: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl RazorpayConfig {
    pub fn is_configured(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.is_empty()
    }
}

/// Per-brand storefront settings. Both brand instances run this same
/// binary; only this section (and the secrets) differ between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub app_name: String,
    pub currency_symbol: String,
    pub support_email: String,
    pub support_phone: String,
    pub whatsapp_number: String,
    pub enable_cod: bool,
    pub enable_online_payment: bool,
    pub enable_discounts: bool,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub primary: String,
    pub secondary: String,
    pub text: String,
    pub accent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            app_name: "Storefront".to_string(),
            currency_symbol: "₹".to_string(),
            support_email: String::new(),
            support_phone: String::new(),
            whatsapp_number: String::new(),
            enable_cod: true,
            enable_online_payment: true,
            enable_discounts: true,
            theme: ThemeConfig {
                primary: "#d4af37".to_string(),
                secondary: "#fbf6e5".to_string(),
                text: "#333333".to_string(),
                accent: "#c9a12c".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => toml::from_str(&config_str)
                .with_context(|| format!("failed to parse config file {config_path}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // No config file: build from environment and defaults.
                let database_url = env::var("DATABASE_URL").context(
                    "DATABASE_URL is required when no config.toml is present",
                )?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        connect_retry_attempts: get_env_parse(
                            "DB_RETRY_ATTEMPTS",
                            default_retry_attempts(),
                        ),
                        connect_retry_base_delay_ms: get_env_parse(
                            "DB_RETRY_DELAY_MS",
                            default_retry_base_delay_ms(),
                        ),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        user_token_expires_in: get_env_parse("JWT_USER_EXPIRES_IN", 604_800i64),
                        admin_token_expires_in: get_env_parse("JWT_ADMIN_EXPIRES_IN", 86_400i64),
                    },
                    razorpay: RazorpayConfig {
                        key_id: get_env("RAZORPAY_KEY_ID").unwrap_or_default(),
                        key_secret: get_env("RAZORPAY_KEY_SECRET").unwrap_or_default(),
                        currency: get_env("RAZORPAY_CURRENCY").unwrap_or_else(default_currency),
                    },
                    site: SiteConfig::default(),
                }
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read config file {config_path}"));
            }
        };

        // Environment variables win even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Some(p) = get_env("SERVER_PORT").and_then(|v| v.parse().ok()) {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Some(mc) = get_env("DB_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            config.database.max_connections = mc;
        }
        if let Some(n) = get_env("DB_RETRY_ATTEMPTS").and_then(|v| v.parse().ok()) {
            config.database.connect_retry_attempts = n;
        }
        if let Some(n) = get_env("DB_RETRY_DELAY_MS").and_then(|v| v.parse().ok()) {
            config.database.connect_retry_base_delay_ms = n;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Some(n) = get_env("JWT_USER_EXPIRES_IN").and_then(|v| v.parse().ok()) {
            config.jwt.user_token_expires_in = n;
        }
        if let Some(n) = get_env("JWT_ADMIN_EXPIRES_IN").and_then(|v| v.parse().ok()) {
            config.jwt.admin_token_expires_in = n;
        }
        if let Ok(v) = env::var("RAZORPAY_KEY_ID") {
            config.razorpay.key_id = v;
        }
        if let Ok(v) = env::var("RAZORPAY_KEY_SECRET") {
            config.razorpay.key_secret = v;
        }
        if let Ok(v) = env::var("RAZORPAY_CURRENCY") {
            config.razorpay.currency = v;
        }
        if let Ok(v) = env::var("SITE_APP_NAME") {
            config.site.app_name = v;
        }

        Ok(config)
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_defaults() {
        let site = SiteConfig::default();
        assert!(site.enable_cod);
        assert!(site.enable_online_payment);
        assert_eq!(site.theme.primary, "#d4af37");
    }

    #[test]
    fn test_razorpay_is_configured() {
        let mut rp = RazorpayConfig::default();
        assert!(!rp.is_configured());
        rp.key_id = "rzp_test_key".to_string();
        assert!(!rp.is_configured());
        rp.key_secret = "secret".to_string();
        assert!(rp.is_configured());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let cfg: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "postgres://localhost/storefront"
            max_connections = 5

            [jwt]
            secret = "s"
            user_token_expires_in = 604800
            admin_token_expires_in = 86400
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.database.connect_retry_attempts, 10);
        assert_eq!(cfg.database.connect_retry_base_delay_ms, 500);
        assert!(!cfg.razorpay.is_configured());
        assert_eq!(cfg.site.app_name, "Storefront");
    }
}
