use std::env;

use serde::{Deserialize, Serialize};

use crate::config::constants::*;

/// Runtime environment, controls how much failure detail is exposed to
/// callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Get current environment from the ENVIRONMENT variable
    pub fn current() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Main configuration container for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration settings
    pub server: ServerConfig,
    /// Database configuration settings
    pub database: DatabaseConfig,
    /// Authentication configuration settings
    pub auth: AuthConfig,
    /// Logging configuration settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables or use defaults
    pub fn load() -> Self {
        Self {
            server: ServerConfig::load(),
            database: DatabaseConfig::load(),
            auth: AuthConfig::load(),
            logging: LoggingConfig::load(),
        }
    }
}

/// Server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to listen on
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Number of worker threads
    pub worker_threads: usize,
    /// Origin allowed to make cross-origin calls
    pub cors_allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            worker_threads: DEFAULT_WORKER_THREADS,
            cors_allowed_origin: DEFAULT_CORS_ALLOWED_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables or use defaults
    pub fn load() -> Self {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HTTP_HOST.to_string());
        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);
        let worker_threads = env::var("WORKER_THREADS")
            .ok()
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(DEFAULT_WORKER_THREADS);
        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_CORS_ALLOWED_ORIGIN.to_string());

        Self {
            host,
            port,
            worker_threads,
            cors_allowed_origin,
        }
    }
}

/// Database configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL, takes precedence over the individual parts
    pub url: Option<String>,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Database name
    pub name: String,
    /// Database host; unset means no database is configured
    pub host: Option<String>,
    /// Database port
    pub port: u16,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASS.to_string(),
            name: DEFAULT_DB_NAME.to_string(),
            host: None,
            port: DEFAULT_DB_PORT,
            max_connections: DEFAULT_DB_POOL,
            connection_timeout: DEFAULT_DB_CONN_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment variables or use defaults
    pub fn load() -> Self {
        let url = env::var("DATABASE_URL").ok();
        let user = env::var("DB_USER").unwrap_or_else(|_| DEFAULT_DB_USER.to_string());
        let password = env::var("DB_PASS").unwrap_or_else(|_| DEFAULT_DB_PASS.to_string());
        let name = env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());
        let host = env::var("DB_HOST").ok();
        let port = env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_DB_PORT);
        let max_connections = env::var("DB_POOL")
            .ok()
            .and_then(|c| c.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DB_POOL);
        let connection_timeout = env::var("DATABASE_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DB_CONN_TIMEOUT_SECS);

        Self {
            url,
            user,
            password,
            name,
            host,
            port,
            max_connections,
            connection_timeout,
        }
    }

    /// Effective connection URL, if a database is configured at all
    pub fn connection_url(&self) -> Option<String> {
        if let Some(url) = &self.url {
            return Some(url.clone());
        }
        self.host.as_ref().map(|host| {
            format!(
                "mysql://{}:{}@{}:{}/{}",
                self.user, self.password, host, self.port, self.name
            )
        })
    }
}

/// Authentication configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Server-side token signing secret; must be provided, never hard-coded
    pub jwt_secret: String,
    /// Session token expiration time in hours
    pub token_expiry_hours: i64,
    /// Failed login attempts allowed before the limiter blocks
    pub max_login_failures: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
            max_login_failures: DEFAULT_MAX_LOGIN_FAILURES,
        }
    }
}

impl AuthConfig {
    /// Load authentication configuration from environment variables
    pub fn load() -> Self {
        let jwt_secret = env::var("AUTH_JWT_SECRET").unwrap_or_default();
        let token_expiry_hours = env::var("AUTH_TOKEN_EXPIRY_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_HOURS);
        let max_login_failures = env::var("AUTH_MAX_LOGIN_FAILURES")
            .ok()
            .and_then(|m| m.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_LOGIN_FAILURES);

        Self {
            jwt_secret,
            token_expiry_hours,
            max_login_failures,
        }
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON formatted logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from environment variables or use defaults
    pub fn load() -> Self {
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        let json_format = env::var("LOG_FORMAT")
            .map(|v| v.to_lowercase() == "json")
            .unwrap_or(false);

        Self { level, json_format }
    }
}
