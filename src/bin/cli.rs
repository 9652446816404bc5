//! CLI for talking to the cluster

use clap::{Parser, Subcommand};
use minidfs::client::Uploader;
use minidfs::common::ClientConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minidfs")]
#[command(about = "minidfs distributed file store CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file to a primary storage node
    Upload {
        /// File to upload
        file: PathBuf,

        /// Target storage node address (host:port)
        #[arg(long, default_value = "127.0.0.1:7000")]
        node: String,

        /// Maximum chunk size in bytes
        #[arg(long, default_value = "250000")]
        chunk_size: usize,

        /// Upload session deadline in milliseconds
        #[arg(long, default_value = "10000")]
        timeout_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Upload {
            file,
            node,
            chunk_size,
            timeout_ms,
        } => {
            let config = ClientConfig {
                chunk_size,
                upload_timeout_ms: timeout_ms,
            };
            let report = Uploader::new(node, config).upload(&file).await?;
            println!("Uploaded {}:", file.display());
            println!("  Chunks sent: {}", report.chunks_sent);
            println!("  Bytes sent: {}", report.bytes_sent);
        }
    }

    Ok(())
}
