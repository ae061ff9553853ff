//! Reference CRUD service for a CD collection (artists and albums).
//!
//! # Design
//! - Every collection is served by the same generic handlers in `routes`,
//!   parameterized over an `Entity` kind.
//! - Storage is injected through `EntityStore` trait objects. `make_app`
//!   takes the stores explicitly so each test can own a fresh, isolated set.
//! - When `ServerConfig::require_auth` is set, entity routes sit behind a
//!   cookie session issued by `GET /auth/{username}/{password}`.

pub mod auth;
pub mod config;
pub mod logging;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;

pub use auth::{AuthState, SESSION_COOKIE};
pub use config::ServerConfig;
pub use logging::RequestsLoggingLevel;
pub use models::{Album, Artist, Entity};
pub use store::{EntityStore, MemoryStore};

#[derive(Clone)]
pub struct AppStores {
    pub artists: Arc<dyn EntityStore<Artist>>,
    pub albums: Arc<dyn EntityStore<Album>>,
}

impl AppStores {
    pub fn in_memory() -> Self {
        Self {
            artists: Arc::new(MemoryStore::<Artist>::new()),
            albums: Arc::new(MemoryStore::<Album>::new()),
        }
    }
}

/// App with default configuration and empty in-memory stores.
pub fn app() -> Router {
    make_app(&ServerConfig::default(), AppStores::in_memory())
}

pub fn make_app(config: &ServerConfig, stores: AppStores) -> Router {
    let mut resources = Router::new()
        .merge(routes::resource_router(stores.artists))
        .merge(routes::resource_router(stores.albums));

    let auth = AuthState::new(&config.username, &config.password);
    if config.require_auth {
        resources = resources.route_layer(middleware::from_fn_with_state(
            auth.clone(),
            auth::require_session,
        ));
    }

    Router::new()
        .merge(resources)
        .merge(auth::auth_router(auth))
        .layer(middleware::from_fn_with_state(
            config.requests_logging_level,
            logging::log_requests,
        ))
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}
