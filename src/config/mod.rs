use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    pub enable_query_logging: bool,
    pub enable_slow_query_warning: bool,
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_QUERY_LOGGING") {
            self.database.enable_query_logging = v.parse().unwrap_or(self.database.enable_query_logging);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_SLOW_QUERY_WARNING") {
            self.database.enable_slow_query_warning = v.parse().unwrap_or(self.database.enable_slow_query_warning);
        }
        if let Ok(v) = env::var("DATABASE_SLOW_QUERY_THRESHOLD_MS") {
            self.database.slow_query_threshold_ms = v.parse().unwrap_or(self.database.slow_query_threshold_ms);
        }

        // API overrides
        if let Ok(v) = env::var("API_DEFAULT_PAGE_SIZE") {
            self.api.default_page_size = v.parse().unwrap_or(self.api.default_page_size);
        }
        if let Ok(v) = env::var("API_MAX_PAGE_SIZE") {
            self.api.max_page_size = v.parse().unwrap_or(self.api.max_page_size);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // A page larger than the cap would be silently truncated
        if self.api.default_page_size > self.api.max_page_size {
            self.api.default_page_size = self.api.max_page_size;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                enable_query_logging: true,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 100,
            },
            api: ApiConfig {
                default_page_size: 50,
                max_page_size: 1000,
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                enable_query_logging: true,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 500,
            },
            api: ApiConfig {
                default_page_size: 50,
                max_page_size: 500,
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                enable_query_logging: false,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 1000,
            },
            api: ApiConfig {
                default_page_size: 20,
                max_page_size: 100,
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.max_page_size, 1000);
        assert!(config.database.enable_query_logging);
        assert_eq!(config.security.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.api.max_page_size, 100);
        assert!(!config.database.enable_query_logging);
        assert!(config.api.default_page_size <= config.api.max_page_size);
    }

    #[test]
    fn test_every_environment_keeps_page_size_within_cap() {
        for config in [AppConfig::development(), AppConfig::staging(), AppConfig::production()] {
            assert!(config.api.default_page_size <= config.api.max_page_size);
        }
    }
}
