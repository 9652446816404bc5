//! Error types for minidfs
//!
//! I/O, transport, and timeout failures are all fatal for the operation
//! they occur in and propagate out as `Err`; the binaries turn them into a
//! logged non-zero exit. A node probed as dead is not an error at all, it
//! is a `false` in the liveness view.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Network Errors ===
    #[error("gRPC error: {0}")]
    Grpc(#[from] tonic::Status),

    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Operation timeout: {0}")]
    Timeout(String),

    // === Replication Errors ===
    #[error("Forward to {peer} failed: {reason}")]
    Forward { peer: String, reason: String },

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Convert to gRPC status for RPC responses
    pub fn to_grpc_status(&self) -> tonic::Status {
        use tonic::Code;
        match self {
            Error::InvalidConfig(_) => tonic::Status::new(Code::InvalidArgument, self.to_string()),
            Error::Timeout(_) => tonic::Status::new(Code::DeadlineExceeded, self.to_string()),
            Error::ConnectionFailed(_) => tonic::Status::new(Code::Unavailable, self.to_string()),
            Error::Grpc(status) => status.clone(),
            _ => tonic::Status::new(Code::Internal, self.to_string()),
        }
    }
}

// Implement From for common error types
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Other(e.to_string())
    }
}
