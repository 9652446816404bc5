//! Configuration for minidfs components

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Coordinator-specific config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<CoordinatorConfig>,

    /// Storage-node-specific config
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    /// Cluster membership and RPC deadlines, shared by every role
    pub cluster: ClusterConfig,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

/// Cluster-wide settings: the static membership list and RPC deadlines.
///
/// The membership list is loaded once at startup and immutable for the
/// process lifetime; there is no join/leave protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Storage node addresses (host:port), in placement order
    pub members: Vec<String>,

    /// Liveness probe deadline
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,

    /// Proposal call deadline
    #[serde(default = "default_proposal_timeout")]
    pub proposal_timeout_ms: u64,

    /// Per-chunk forward call deadline
    #[serde(default = "default_forward_timeout")]
    pub forward_timeout_ms: u64,
}

fn default_probe_timeout() -> u64 {
    3_000
}
fn default_proposal_timeout() -> u64 {
    10_000
}
fn default_forward_timeout() -> u64 {
    10_000
}

impl ClusterConfig {
    pub fn new(members: Vec<String>) -> Self {
        Self {
            members,
            probe_timeout_ms: default_probe_timeout(),
            proposal_timeout_ms: default_proposal_timeout(),
            forward_timeout_ms: default_forward_timeout(),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn proposal_timeout(&self) -> Duration {
        Duration::from_millis(self.proposal_timeout_ms)
    }

    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.forward_timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.members.is_empty() {
            return Err(Error::InvalidConfig("cluster members list is empty".into()));
        }
        Ok(())
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Bind address for gRPC
    pub bind_addr: SocketAddr,

    /// Address under which this process appears in the membership list;
    /// never probed
    pub advertise_addr: String,
}

/// Storage node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bind address for gRPC
    pub bind_addr: SocketAddr,

    /// Address under which this node appears in the membership list;
    /// excluded from its own placement candidates
    pub advertise_addr: String,

    /// Directory where chunk files are written
    pub chunk_dir: PathBuf,

    /// Coordinator address (host:port)
    pub coordinator_addr: String,
}

/// Uploader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Maximum chunk size in bytes; the last chunk of a file may be shorter
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Deadline for the whole upload session
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_ms: u64,
}

fn default_chunk_size() -> usize {
    250_000 // 250 KB
}
fn default_upload_timeout() -> u64 {
    10_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            upload_timeout_ms: default_upload_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_millis(self.upload_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_defaults() {
        let cluster = ClusterConfig::new(vec!["10.0.0.2:7000".into()]);
        assert_eq!(cluster.probe_timeout(), Duration::from_secs(3));
        assert_eq!(cluster.proposal_timeout(), Duration::from_secs(10));
        assert_eq!(cluster.forward_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_members_rejected() {
        let cluster = ClusterConfig::new(vec![]);
        assert!(cluster.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minidfs.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"

[cluster]
members = ["10.0.0.2:7000", "10.0.0.3:7000"]
probe_timeout_ms = 1000

[storage]
bind_addr = "0.0.0.0:7000"
advertise_addr = "10.0.0.2:7000"
chunk_dir = "./chunks"
coordinator_addr = "10.0.0.1:7001"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cluster.members.len(), 2);
        assert_eq!(config.cluster.probe_timeout_ms, 1_000);
        // Unset fields fall back to defaults
        assert_eq!(config.cluster.proposal_timeout_ms, 10_000);

        let storage = config.storage.unwrap();
        assert_eq!(storage.advertise_addr, "10.0.0.2:7000");
        assert!(config.coordinator.is_none());
    }
}
