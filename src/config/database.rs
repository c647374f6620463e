//! Database configuration
//!
//! The whole section is optional. Without it the service keeps accounts
//! and plans in memory.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_run_migrations() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            url: url.to_string(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: true,
        }
    }

    #[test]
    fn test_valid_urls() {
        assert!(config("postgres://localhost/lessons").validate().is_ok());
        assert!(config("postgresql://user@localhost/lessons").validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert_eq!(
            config("mysql://localhost/lessons").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn test_pool_size_constraints() {
        let mut c = config("postgres://localhost/lessons");
        c.min_connections = 20;
        assert_eq!(c.validate(), Err(ValidationError::InvalidPoolSize));

        c.min_connections = 1;
        c.max_connections = 101;
        assert_eq!(c.validate(), Err(ValidationError::PoolSizeTooLarge));
    }

    #[test]
    fn test_acquire_timeout_duration() {
        assert_eq!(
            config("postgres://x").acquire_timeout(),
            Duration::from_secs(30)
        );
    }
}
