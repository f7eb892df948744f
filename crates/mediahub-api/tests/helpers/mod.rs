//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p mediahub-api --test media_test`.

use axum_test::TestServer;
use mediahub_api::setup::routes;
use mediahub_api::state::AppState;
use mediahub_core::{Config, MediaCategory};
use mediahub_storage::{IdGenerator, MediaStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the storage directory it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn path(&self, category: MediaCategory, file_name: &str) -> PathBuf {
        self.temp_dir
            .path()
            .join(category.dir_name())
            .join(file_name)
    }

    /// Place a file directly in storage, bypassing the upload route.
    pub fn put(&self, category: MediaCategory, file_name: &str, data: &[u8]) {
        std::fs::write(self.path(category, file_name), data).unwrap();
    }
}

/// Identifiers `upload-0`, `upload-1`, ... in request order.
pub fn sequential_ids() -> Arc<dyn IdGenerator> {
    let counter = AtomicUsize::new(0);
    Arc::new(move || format!("upload-{}", counter.fetch_add(1, Ordering::SeqCst)))
}

/// Setup test app with local storage in a fresh temporary directory.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config = Config {
        base_dir: temp_dir.path().to_path_buf(),
        public_base_url: "http://media.test".to_string(),
        ..Config::default()
    };

    let registry = Arc::new(
        config
            .content_type_registry()
            .expect("Default registry is valid"),
    );
    let store = MediaStore::init(config.base_dir())
        .await
        .expect("Failed to init storage");

    let state = Arc::new(AppState::new(
        config.clone(),
        registry,
        store,
        sequential_ids(),
    ));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, temp_dir }
}

/// Deterministic non-repeating test payload.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
