// Core module definitions
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

// Unified error handling
pub use error::{ApiError, Result};
pub type AppResult<T> = Result<T>;

// Essential re-exports for convenience
pub use server::{
    app_state::AppState,
    startup::{configure_routes, start_server, start_server_with_storage},
};

pub use config::settings::{AuthConfig, Config, DatabaseConfig, ServerConfig};

// Storage abstractions
pub use storage::{
    init_storage, init_storage_or_memory, memory::MemoryStorage, mysql::MySqlStorage, Storage,
    StorageError,
};

// Model exports
pub use models::{Task, TaskChanges, TaskDraft, User, UserProfile};

// Authentication components
pub use auth::{AuthenticatedUser, LoginRateLimiter, TokenManager};

// Version and build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ApiError, AppResult, AppState, Config, Result, Storage, Task, TaskDraft, User,
        UserProfile, NAME, VERSION,
    };

    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, instrument, warn};
}
