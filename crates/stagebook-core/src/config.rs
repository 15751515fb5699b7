//! Configuration module
//!
//! Environment-driven configuration for the API process: server, database,
//! mail transport, authentication, and upload handling settings.

use std::env;
use std::path::PathBuf;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 25;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration, loaded once at process start.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    /// Sender mailbox; defaults to the SMTP account itself.
    pub smtp_from: String,
    pub smtp_tls: bool,
    /// Recipient of submission notifications.
    pub admin_email: String,
    /// Directory for staged upload files.
    pub upload_dir: PathBuf,
    pub max_upload_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(DEFAULT_SERVER_PORT);

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let db_timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_CONNECTION_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS);

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let smtp_host = env::var("SMTP_HOST")
            .map_err(|_| anyhow::anyhow!("SMTP_HOST environment variable not set"))?;

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| DEFAULT_SMTP_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(DEFAULT_SMTP_PORT);

        let smtp_user = env::var("SMTP_USER")
            .map_err(|_| anyhow::anyhow!("SMTP_USER environment variable not set"))?;

        let smtp_password = env::var("SMTP_PASSWORD")
            .map_err(|_| anyhow::anyhow!("SMTP_PASSWORD environment variable not set"))?;

        let smtp_from = env::var("SMTP_FROM").unwrap_or_else(|_| smtp_user.clone());

        let smtp_tls = env::var("SMTP_TLS")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let admin_email = env::var("ADMIN_EMAIL")
            .map_err(|_| anyhow::anyhow!("ADMIN_EMAIL environment variable not set"))?;

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("stagebook-uploads"));

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            database_url,
            db_max_connections,
            db_timeout_seconds,
            jwt_secret,
            smtp_host,
            smtp_port,
            smtp_user,
            smtp_password,
            smtp_from,
            smtp_tls,
            admin_email,
            upload_dir,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        })
    }

    /// Fail-fast checks applied at startup.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if self.is_production() && self.cors_origins.contains(&"*".to_string()) {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.admin_email.contains('@') {
            return Err(anyhow::anyhow!(
                "ADMIN_EMAIL does not look like an email address"
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_required_env() {
        std::env::set_var("ENVIRONMENT", "development");
        std::env::set_var("DATABASE_URL", "postgresql://localhost/stagebook_test");
        std::env::set_var("JWT_SECRET", "test-secret-key-min-32-characters-long");
        std::env::set_var("SMTP_HOST", "smtp.example.com");
        std::env::set_var("SMTP_USER", "notifier@example.com");
        std::env::set_var("SMTP_PASSWORD", "hunter2hunter2");
        std::env::set_var("ADMIN_EMAIL", "admin@example.com");
    }

    #[test]
    fn from_env_applies_defaults() {
        set_required_env();
        std::env::remove_var("PORT");
        std::env::remove_var("SMTP_PORT");
        std::env::remove_var("SMTP_FROM");
        std::env::remove_var("MAX_UPLOAD_SIZE_MB");

        let config = Config::from_env().expect("config from env");
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert_eq!(config.smtp_port, DEFAULT_SMTP_PORT);
        assert_eq!(config.smtp_from, "notifier@example.com");
        assert_eq!(
            config.max_upload_size_bytes,
            DEFAULT_MAX_UPLOAD_SIZE_MB * 1024 * 1024
        );
        assert!(!config.is_production());
        config.validate().expect("valid config");
    }

    #[test]
    fn validate_rejects_short_jwt_secret() {
        set_required_env();
        let mut config = Config::from_env().expect("config from env");
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_wildcard_cors_in_production() {
        set_required_env();
        let mut config = Config::from_env().expect("config from env");
        config.environment = "production".to_string();
        config.cors_origins = vec!["*".to_string()];
        assert!(config.validate().is_err());
    }
}
