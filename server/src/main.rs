use anyhow::Result;
use clap::Parser;
use movie_server::build_app;
use movie_server::config::{EnvVars, Environment, ServerConfig};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Movie snapshot file (defaults to $MOVIES_FILE, then ./movies_metadata.json)
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Pre-built client bundle served when NODE_ENV=production
    #[arg(long, default_value = "./build")]
    build_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let env = EnvVars::from_process();
    tracing::info!(node_env = ?env.node_env, "resolving environment");

    let config = ServerConfig::resolve(args.host, args.snapshot, args.build_dir, &env)?;
    match config.environment {
        Environment::Production => {
            tracing::info!(build_dir = %config.build_dir.display(), "serving static bundle")
        }
        Environment::Development => {
            tracing::warn!(port = config.port, "development mode, static bundle is not served")
        }
    }
    let app = build_app(&config);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, snapshot = %config.snapshot.file.display(), "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
