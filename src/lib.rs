//! # minidfs
//!
//! A small distributed file store:
//! - Files are split into fixed-size chunks by the client
//! - One storage node (the primary) ingests the whole chunk stream
//! - A coordinator filters placement candidates by liveness
//! - The primary keeps its share and fans the rest out to peers
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────┐
//!                 │ Coordinator  │  liveness view over the
//!                 │  (Proposal)  │  static membership list
//!                 └──────▲───────┘
//!                        │ gRPC
//!  ┌────────┐  stream ┌──┴─────────┐  Receive  ┌──────────┐
//!  │ Client ├────────►│  Primary   ├──────────►│  Peer(s) │
//!  │ upload │         │  storage   │           │  storage │
//!  └────────┘         └────────────┘           └──────────┘
//! ```
//!
//! ## Usage
//!
//! ### Start the coordinator
//! ```bash
//! minidfs-coord \
//!   --bind 0.0.0.0:7001 \
//!   --advertise 10.0.0.1:7001 \
//!   --members 10.0.0.2:7000,10.0.0.3:7000,10.0.0.4:7000
//! ```
//!
//! ### Start a storage node
//! ```bash
//! minidfs-node \
//!   --bind 0.0.0.0:7000 \
//!   --advertise 10.0.0.2:7000 \
//!   --chunk-dir ./chunks \
//!   --coordinator 10.0.0.1:7001 \
//!   --members 10.0.0.2:7000,10.0.0.3:7000,10.0.0.4:7000
//! ```
//!
//! ### Upload a file
//! ```bash
//! minidfs upload ./book.pdf --node 10.0.0.2:7000
//! ```

pub mod client;
pub mod common;
pub mod coordinator;
pub mod storage;

// Re-export commonly used types
pub use common::{Config, Error, Result};
pub use coordinator::Coordinator;
pub use storage::StorageServer;

// Generated protobuf code
pub mod proto {
    tonic::include_proto!("minidfs");
}

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
