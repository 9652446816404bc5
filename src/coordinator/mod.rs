//! Coordinator implementation
//!
//! The coordinator is responsible for:
//! - Holding the static cluster membership list
//! - Re-probing member liveness on every proposal
//! - Filtering placement candidates down to reachable nodes

pub mod grpc;
pub mod server;

pub use server::Coordinator;
