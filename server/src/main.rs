use anyhow::{Context, Result};
use cd_collection_server::{make_app, run, AppStores, RequestsLoggingLevel, ServerConfig};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
struct CliArgs {
    /// The port to listen on.
    #[clap(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Require a session cookie on every artist/album route.
    #[clap(long)]
    pub require_auth: bool,

    /// Account accepted by the login endpoint.
    #[clap(long, default_value = "admin")]
    pub username: String,

    #[clap(long, default_value = "admin")]
    pub password: String,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let args = CliArgs::parse();
    let config = ServerConfig {
        port: args.port,
        require_auth: args.require_auth,
        username: args.username,
        password: args.password,
        requests_logging_level: args.logging_level,
    };

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on {addr} (require_auth: {})", config.require_auth);

    let app = make_app(&config, AppStores::in_memory());
    run(listener, app).await.context("Server stopped")
}
