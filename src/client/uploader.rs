//! Client-side upload: split a file into fixed-size chunks and stream them
//! to a primary storage node in one session.
//!
//! Any file-open, read, or send failure is fatal for the whole upload;
//! there is no retry and no partial resend. Callers get the error back and
//! the CLI turns it into a non-zero exit.

use crate::common::{ClientConfig, Error, Result};
use crate::proto::storage_node_client::StorageNodeClient;
use crate::proto::UploadRequest;
use std::path::Path;
use tonic::transport::Endpoint;

/// Split a byte buffer into consecutive blocks of at most `chunk_size`
/// bytes; the final block may be shorter.
pub fn split_into_chunks(data: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
    data.chunks(chunk_size).map(|c| c.to_vec()).collect()
}

/// Per-chunk name sent with each stream message; encodes the chunk's
/// sequence position.
pub fn derived_chunk_name(stem: &str, index: usize) -> String {
    format!("{}_{}", stem, index)
}

/// Outcome of a completed upload session.
#[derive(Debug)]
pub struct UploadReport {
    pub file_name: String,
    pub chunks_sent: usize,
    pub bytes_sent: usize,
}

pub struct Uploader {
    node_addr: String,
    config: ClientConfig,
}

impl Uploader {
    pub fn new(node_addr: String, config: ClientConfig) -> Self {
        Self { node_addr, config }
    }

    /// Upload one file: split, stream every chunk in order, close the send
    /// side, and block on the primary's single acknowledgment.
    pub async fn upload(&self, path: &Path) -> Result<UploadReport> {
        let data = tokio::fs::read(path).await?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Other(format!("unusable file name: {}", path.display())))?
            .to_string();

        let chunks = split_into_chunks(&data, self.config.chunk_size);
        tracing::info!("Splitting {} into {} pieces", path.display(), chunks.len());

        let requests: Vec<UploadRequest> = chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk_data)| UploadRequest {
                file_name: derived_chunk_name(&stem, i),
                chunk_data,
            })
            .collect();
        let chunks_sent = requests.len();

        let endpoint = Endpoint::from_shared(format!("http://{}", self.node_addr))
            .map_err(|e| Error::ConnectionFailed(format!("{}: {}", self.node_addr, e)))?;
        let mut client = StorageNodeClient::new(endpoint.connect_lazy());

        let request = tonic::Request::new(tokio_stream::iter(requests));
        tokio::time::timeout(self.config.upload_timeout(), client.upload(request))
            .await
            .map_err(|_| Error::Timeout(format!("upload to {}", self.node_addr)))??;

        tracing::info!("Upload acknowledged by {}", self.node_addr);

        Ok(UploadReport {
            file_name: stem,
            chunks_sent,
            bytes_sent: data.len(),
        })
    }
}
