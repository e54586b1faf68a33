// Centralized configuration constants

// HTTP server
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 5000;
pub const DEFAULT_WORKER_THREADS: usize = 4;
pub const HTTP_KEEPALIVE_SECS: u64 = 75;
pub const HTTP_CLIENT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const HTTP_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// Authentication
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 1;
pub const DEFAULT_MAX_LOGIN_FAILURES: u32 = 50;
/// bcrypt work factor, parity with the reference implementation
pub const BCRYPT_COST: u32 = 10;

// Database (MySQL)
pub const DEFAULT_DB_USER: &str = "user";
pub const DEFAULT_DB_PASS: &str = "password";
pub const DEFAULT_DB_NAME: &str = "taskhub";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_POOL: u32 = 5;
pub const DEFAULT_DB_CONN_TIMEOUT_SECS: u64 = 30;

// Pagination
pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// CORS
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_CORS_MAX_AGE_SECS: usize = 3600;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
