//! Typed client for the coordinator's Proposal call

use crate::common::{Error, Result};
use crate::proto::coordinator_client::CoordinatorClient;
use crate::proto::ProposalRequest;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

pub struct CoordClient {
    client: CoordinatorClient<Channel>,
    addr: String,
}

impl CoordClient {
    pub fn connect(addr: &str) -> Result<Self> {
        let endpoint = Endpoint::from_shared(format!("http://{}", addr))
            .map_err(|e| Error::ConnectionFailed(format!("{}: {}", addr, e)))?;
        Ok(Self {
            client: CoordinatorClient::new(endpoint.connect_lazy()),
            addr: addr.to_string(),
        })
    }

    /// Submit a candidate list, get back the liveness-filtered subset.
    pub async fn propose(&mut self, ip_list: Vec<String>, timeout: Duration) -> Result<Vec<String>> {
        tracing::info!("Sending proposal to coordinator {}", self.addr);

        let request = tonic::Request::new(ProposalRequest { ip_list });
        let response = tokio::time::timeout(timeout, self.client.proposal(request))
            .await
            .map_err(|_| Error::Timeout(format!("proposal to {}", self.addr)))??;

        Ok(response.into_inner().ip_list)
    }
}
