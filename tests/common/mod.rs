// Shared helpers for integration tests
// These tests use MemoryStorage to avoid MySQL side effects

use std::sync::Arc;

use taskhub_server::config::settings::Config;
use taskhub_server::server::app_state::AppState;
use taskhub_server::storage::memory::MemoryStorage;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

pub fn test_state() -> AppState {
    test_state_with_config(test_config())
}

pub fn test_state_with_config(config: Config) -> AppState {
    AppState::new(config, Arc::new(MemoryStorage::new())).expect("failed to build app state")
}
