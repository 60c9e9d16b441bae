//! # Core Configuration Module
//!
//! Builder-pattern configuration for the composition root.
//!
//! ## Overview
//!
//! `CoreConfig` holds everything [`crate::CoreService::init`] needs to build
//! the dependency graph: where the database lives, which API root to talk
//! to, and how the shared HTTP client behaves. The builder enforces
//! fail-fast validation so a misconfigured host gets an actionable error at
//! startup rather than a broken service later.
//!
//! ## Usage
//!
//! ```ignore
//! use core_service::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .database_path("/data/catalog.db")
//!     .build()?;
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, Result};

/// Default remote service root
pub const DEFAULT_API_BASE_URL: &str = provider_rickmorty::DEFAULT_BASE_URL;

/// Default HTTP request timeout
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum number of pooled database connections
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Core configuration for the catalog service.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Path to the SQLite database file (`:memory:` allowed for tests)
    pub database_path: PathBuf,

    /// Remote API root; must end with a trailing slash
    pub api_base_url: String,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// User agent sent with every request
    pub user_agent: String,

    /// Maximum number of pooled database connections
    pub max_connections: u32,
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CoreError::Config(
                "Database path cannot be empty".to_string(),
            ));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(CoreError::Config(format!(
                "API base URL must be http(s), got '{}'",
                self.api_base_url
            )));
        }

        if !self.api_base_url.ends_with('/') {
            return Err(CoreError::Config(
                "API base URL must end with a trailing slash so endpoint paths \
                 join below it"
                    .to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(CoreError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.max_connections == 0 {
            return Err(CoreError::Config(
                "Connection pool size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    database_path: Option<PathBuf>,
    api_base_url: Option<String>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    max_connections: Option<u32>,
}

impl CoreConfigBuilder {
    /// Sets the database path (required).
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Overrides the remote API root. Mostly useful for tests pointing the
    /// core at a local stub server.
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets the HTTP request timeout.
    ///
    /// Default: 30 seconds.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the user agent sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the maximum number of pooled database connections.
    ///
    /// Default: 5.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// Builds the final `CoreConfig`, validating required fields.
    pub fn build(self) -> Result<CoreConfig> {
        let database_path = self.database_path.ok_or_else(|| {
            CoreError::Config(
                "Database path is required. Use .database_path() to set it.".to_string(),
            )
        })?;

        let config = CoreConfig {
            database_path,
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("rmapi-core/{}", env!("CARGO_PKG_VERSION"))),
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_database_path() {
        let result = CoreConfig::builder().build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Database path is required"));
    }

    #[test]
    fn test_builder_applies_defaults() {
        let config = CoreConfig::builder()
            .database_path("/data/catalog.db")
            .build()
            .unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_connections, 5);
        assert!(config.user_agent.starts_with("rmapi-core/"));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let result = CoreConfig::builder()
            .database_path("/data/catalog.db")
            .api_base_url("ftp://example.com/")
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http(s)"));
    }

    #[test]
    fn test_validate_rejects_base_url_without_trailing_slash() {
        let result = CoreConfig::builder()
            .database_path("/data/catalog.db")
            .api_base_url("https://rickandmortyapi.com/api")
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("trailing slash"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let result = CoreConfig::builder()
            .database_path("/data/catalog.db")
            .request_timeout(Duration::ZERO)
            .build();

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("greater than zero"));
    }

    #[test]
    fn test_validate_rejects_zero_pool_size() {
        let result = CoreConfig::builder()
            .database_path("/data/catalog.db")
            .max_connections(0)
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_builder_accepts_overrides() {
        let config = CoreConfig::builder()
            .database_path("/data/catalog.db")
            .api_base_url("http://127.0.0.1:8080/api/")
            .request_timeout(Duration::from_secs(5))
            .user_agent("test-agent/1.0")
            .max_connections(2)
            .build()
            .unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.max_connections, 2);
    }
}
