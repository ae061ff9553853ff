//! Shared setup for the end-to-end tests.
//!
//! Every test spawns its own server on a random port with fresh in-memory
//! stores, so tests never see each other's records.
#![allow(dead_code)]

use cd_collection_server::{make_app, AppStores, RequestsLoggingLevel, ServerConfig};
use tracing_subscriber::EnvFilter;

pub const AUTH_PATH_TEMPLATE: &str = "auth/{username}/{password}";
pub const TEST_USER: &str = "tester";
pub const TEST_PASS: &str = "s3cret";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("LOG_LEVEL"))
        .with_test_writer()
        .try_init();
}

pub fn open_config() -> ServerConfig {
    ServerConfig {
        requests_logging_level: RequestsLoggingLevel::None,
        ..ServerConfig::default()
    }
}

pub fn secured_config() -> ServerConfig {
    ServerConfig {
        require_auth: true,
        username: TEST_USER.to_string(),
        password: TEST_PASS.to_string(),
        ..open_config()
    }
}

/// Starts the server on a background thread and returns its base URL.
pub fn spawn_server(config: ServerConfig) -> String {
    init_tracing();

    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let app = make_app(&config, AppStores::in_memory());
            cd_collection_server::run(listener, app).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// A base URL on which nothing is listening.
pub fn dead_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
