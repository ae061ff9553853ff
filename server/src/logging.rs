//! Request logging middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::info;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    #[default]
    Path,
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub async fn log_requests(
    State(level): State<RequestsLoggingLevel>,
    request: Request,
    next: Next,
) -> Response {
    if level == RequestsLoggingLevel::None {
        return next.run(request).await;
    }

    let start = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    info!(">>> {} {}", method, uri);

    let response = next.run(request).await;

    info!(
        "<<< {} {} {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
