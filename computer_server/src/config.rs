//! Application configuration — loaded from environment variables.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Secret for signing flash cookies.
    pub flash_secret: String,
    /// Upper bound for a whole HTTP request.
    pub request_timeout_secs: u64,
    /// Upper bound for a single database query.
    pub query_timeout_secs: u64,
    /// Maximum pooled database connections.
    pub pool_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let flash_secret = std::env::var("FLASH_SECRET").unwrap_or_default();
        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);
        let query_timeout_secs = std::env::var("QUERY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let pool_size = std::env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let flash_secret = if flash_secret.is_empty() {
            tracing::warn!("FLASH_SECRET not set -- using a random per-process secret");
            uuid::Uuid::new_v4().to_string()
        } else {
            flash_secret
        };

        Self {
            flash_secret,
            request_timeout_secs,
            query_timeout_secs,
            pool_size,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}
