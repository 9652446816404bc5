//! Common utilities and types shared across minidfs

pub mod config;
pub mod error;
pub mod liveness;

pub use config::{ClientConfig, ClusterConfig, Config, CoordinatorConfig, StorageConfig};
pub use error::{Error, Result};
pub use liveness::{probe_node, LivenessTracker};
