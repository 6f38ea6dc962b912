//! Test helpers: build the router over an in-memory storage for integration tests.
//!
//! Run from workspace root: `cargo test -p filegate-api`.

pub mod storage;

use axum_test::TestServer;
use filegate_api::setup::routes;
use filegate_api::state::AppState;
use filegate_core::Config;
use std::collections::HashMap;
use std::sync::Arc;

pub use storage::{encode_key, MemoryStorage};

pub const TEST_BUCKET: &str = "filegate-test";

pub fn test_config(vars: &[(&str, &str)]) -> Config {
    let mut env: HashMap<String, String> = HashMap::from([
        ("BUCKET_NAME".to_string(), TEST_BUCKET.to_string()),
        ("AWS_REGION".to_string(), "us-east-1".to_string()),
    ]);
    for (name, value) in vars {
        env.insert(name.to_string(), value.to_string());
    }
    Config::from_vars(|name| env.get(name).cloned()).expect("Failed to build test config")
}

/// Test application: server plus a handle on the storage behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(&[])
}

/// Setup test app with extra configuration variables (e.g. `SEPARATE_NOT_FOUND_STATUS`).
pub fn setup_test_app_with(vars: &[(&str, &str)]) -> TestApp {
    let config = test_config(vars);
    let storage = Arc::new(MemoryStorage::new(TEST_BUCKET));
    let state = Arc::new(AppState::new(config.clone(), storage.clone()));

    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, storage }
}
