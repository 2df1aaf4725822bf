//! Chirpy API server binary.
//!
//! Reads configuration from flags, environment and an optional `.env` file,
//! then serves the Chirpy HTTP API until interrupted.

use chirpy_api::config::ApiConfig;
use chirpy_core::store::{MemoryStore, PgStore};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "chirpy_server", about = "Chirpy API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    bind: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/chirpy"
    )]
    database_url: String,

    /// Secret used to sign access tokens.
    #[arg(long, env = "JWT_SECRET", default_value = "", hide_env_values = true)]
    jwt_secret: String,

    /// API key Polka presents on webhook calls.
    #[arg(long, env = "POLKA_KEY", default_value = "", hide_env_values = true)]
    polka_key: String,

    /// Deployment platform. `dev` enables `/admin/reset`.
    #[arg(long, env = "PLATFORM", default_value = "")]
    platform: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Keep all data in process memory instead of PostgreSQL.
    #[arg(long, default_value_t = false)]
    memory_store: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,chirpy_api=debug,chirpy_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind,
        database_url: args.database_url,
        jwt_secret: args.jwt_secret,
        polka_key: args.polka_key,
        platform: args.platform,
    };
    if let Err(e) = config.validate() {
        error!(%e, "invalid configuration");
        return Err(e.into());
    }

    info!(?config, memory_store = args.memory_store, "starting chirpy_server");
    if config.is_dev() {
        warn!("dev platform: /admin/reset is enabled");
    }

    let state = if args.memory_store {
        chirpy_api::AppState::new(MemoryStore::new(), config.clone())
    } else {
        info!(
            max_connections = args.max_connections,
            "configuring connection pool"
        );
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&config.database_url)
            .await?;
        chirpy_api::AppState::new(PgStore::new(pool), config.clone())
    };

    let app = chirpy_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
            }
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
