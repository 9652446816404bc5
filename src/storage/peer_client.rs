//! Typed client for forwarding chunks to a peer storage node

use crate::common::{Error, Result};
use crate::proto::storage_node_client::StorageNodeClient;
use crate::proto::ReceiveRequest;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

pub struct PeerClient {
    client: StorageNodeClient<Channel>,
    addr: String,
}

impl PeerClient {
    pub fn connect(addr: &str) -> Result<Self> {
        let endpoint = Endpoint::from_shared(format!("http://{}", addr))
            .map_err(|e| Error::ConnectionFailed(format!("{}: {}", addr, e)))?;
        Ok(Self {
            client: StorageNodeClient::new(endpoint.connect_lazy()),
            addr: addr.to_string(),
        })
    }

    /// Deliver one chunk, blocking until the peer has persisted it.
    pub async fn receive(
        &mut self,
        file_name: String,
        chunk_data: Vec<u8>,
        timeout: Duration,
    ) -> Result<()> {
        tracing::debug!("Forwarding chunk {} to {}", file_name, self.addr);

        let request = tonic::Request::new(ReceiveRequest {
            file_name: file_name.clone(),
            chunk_data,
        });
        tokio::time::timeout(timeout, self.client.receive(request))
            .await
            .map_err(|_| Error::Timeout(format!("forward {} to {}", file_name, self.addr)))?
            .map_err(|status| Error::Forward {
                peer: self.addr.clone(),
                reason: status.to_string(),
            })?;

        Ok(())
    }
}
