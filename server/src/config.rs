use anyhow::{Context, Result};
use movie_core::SnapshotPaths;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEV_PORT: u16 = 3001;
pub const DEFAULT_PRODUCTION_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Only the exact value `production` selects production mode.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Process environment variables the server reads. Kept as plain data so
/// resolution can be tested without touching the real environment.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    pub node_env: Option<String>,
    pub port: Option<String>,
    pub movies_file: Option<String>,
    pub cors_allow_origin: Option<String>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        Self {
            node_env: std::env::var("NODE_ENV").ok(),
            port: std::env::var("PORT").ok(),
            movies_file: std::env::var("MOVIES_FILE").ok(),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN").ok(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub snapshot: SnapshotPaths,
    /// Pre-built client bundle. Only served in production.
    pub build_dir: PathBuf,
    pub cors_allow_origin: Option<String>,
}

impl ServerConfig {
    /// Combine command line values with the environment.
    ///
    /// Production listens on `PORT` (or 3000) and serves `build_dir`; every
    /// other mode listens on 3001 and ignores `PORT`. The snapshot path comes
    /// from the command line, then `MOVIES_FILE`, then the default file name
    /// in the working directory.
    pub fn resolve(host: String, snapshot: Option<PathBuf>, build_dir: PathBuf, env: &EnvVars) -> Result<Self> {
        let environment = Environment::from_node_env(env.node_env.as_deref());
        let port = match environment {
            Environment::Production => match env.port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
                Some(p) => p.parse().with_context(|| format!("invalid PORT value {p:?}"))?,
                None => DEFAULT_PRODUCTION_PORT,
            },
            Environment::Development => DEV_PORT,
        };
        let snapshot = snapshot
            .or_else(|| env.movies_file.as_ref().map(PathBuf::from))
            .map(SnapshotPaths::new)
            .unwrap_or_default();
        Ok(Self {
            environment,
            host,
            port,
            snapshot,
            build_dir,
            cors_allow_origin: env.cors_allow_origin.clone(),
        })
    }

    /// Development config over an explicit snapshot, for embedding and tests.
    pub fn development(snapshot: SnapshotPaths) -> Self {
        Self {
            environment: Environment::Development,
            host: "127.0.0.1".into(),
            port: DEV_PORT,
            snapshot,
            build_dir: PathBuf::from("build"),
            cors_allow_origin: None,
        }
    }

    /// Listen address; `host` must be an IPv4 or IPv6 literal.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().with_context(|| format!("invalid host {:?}", self.host))?;
        Ok((ip, self.port).into())
    }

    pub fn serves_static(&self) -> bool {
        self.environment == Environment::Production
    }
}
