//! Coordinator binary

use anyhow::Context;
use clap::Parser;
use minidfs::common::{ClusterConfig, Config, CoordinatorConfig};
use minidfs::Coordinator;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "minidfs-coord")]
#[command(about = "minidfs coordinator - filters placement proposals by liveness")]
struct Args {
    /// gRPC address to listen on
    #[arg(long, default_value = "127.0.0.1:7001")]
    bind: SocketAddr,

    /// Address this process is known by in the cluster
    /// (defaults to the bind address)
    #[arg(long)]
    advertise: Option<String>,

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

    let (coordinator, cluster) = match &args.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            let coordinator = config
                .coordinator
                .with_context(|| format!("no [coordinator] section in {}", path.display()))?;
            (coordinator, config.cluster)
        }
        None => {
            let coordinator = CoordinatorConfig {
                bind_addr: args.bind,
                advertise_addr: args.advertise.unwrap_or_else(|| args.bind.to_string()),
            };
            (coordinator, ClusterConfig::new(args.members))
        }
    };

    Coordinator::new(coordinator, cluster).serve().await?;

    Ok(())
}
