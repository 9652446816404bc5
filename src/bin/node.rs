//! Storage node binary

use anyhow::Context;
use clap::Parser;
use minidfs::common::{ClusterConfig, Config, StorageConfig};
use minidfs::StorageServer;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "minidfs-node")]
#[command(about = "minidfs storage node - ingests uploads and stores chunks")]
struct Args {
    /// gRPC address to listen on
    #[arg(long, default_value = "127.0.0.1:7000")]
    bind: SocketAddr,

    /// Address under which this node appears in the membership list
    /// (defaults to the bind address)
    #[arg(long)]
    advertise: Option<String>,

    /// Directory where chunk files are stored
    #[arg(long, default_value = "./chunks")]
    chunk_dir: PathBuf,

    /// Coordinator address (host:port)
    #[arg(long, default_value = "127.0.0.1:7001")]
    coordinator: String,

    /// Cluster members (comma-separated host:port)
    #[arg(long, value_delimiter = ',')]
    members: Vec<String>,

    /// TOML config file; replaces the other flags when set
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let (storage, cluster) = match &args.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            let storage = config
                .storage
                .with_context(|| format!("no [storage] section in {}", path.display()))?;
            (storage, config.cluster)
        }
        None => {
            let storage = StorageConfig {
                bind_addr: args.bind,
                advertise_addr: args.advertise.unwrap_or_else(|| args.bind.to_string()),
                chunk_dir: args.chunk_dir,
                coordinator_addr: args.coordinator,
            };
            (storage, ClusterConfig::new(args.members))
        }
    };

    StorageServer::new(storage, cluster).serve().await?;

    Ok(())
}
