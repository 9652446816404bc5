//! Coordinator gRPC service
//!
//! A stateless filter layered over a process-lifetime liveness view: each
//! proposal re-probes the whole membership, then prunes the caller's
//! candidate list down to the addresses still alive. No quorum, no
//! persistence, no cross-request coordination guarantee.

use crate::common::LivenessTracker;
use crate::proto::coordinator_server::{Coordinator, CoordinatorServer};
use crate::proto::{ProposalRequest, ProposalResponse};
use std::sync::Arc;
use tonic::{Request, Response, Status};

pub struct CoordGrpcService {
    liveness: Arc<LivenessTracker>,
}

impl CoordGrpcService {
    pub fn new(liveness: Arc<LivenessTracker>) -> Self {
        Self { liveness }
    }

    /// Converts this service into a gRPC server instance.
    pub fn into_server(self) -> CoordinatorServer<Self> {
        CoordinatorServer::new(self)
    }
}

#[tonic::async_trait]
impl Coordinator for CoordGrpcService {
    /// Re-probe the membership, then return the order-preserving subset of
    /// the proposed candidates currently alive.
    async fn proposal(
        &self,
        request: Request<ProposalRequest>,
    ) -> Result<Response<ProposalResponse>, Status> {
        let candidates = request.into_inner().ip_list;
        tracing::info!("Proposal received for {} candidates", candidates.len());

        self.liveness
            .refresh()
            .await
            .map_err(|e| e.to_grpc_status())?;
        let ip_list = self.liveness.filter(&candidates);

        tracing::info!("Proposal answered: {} of {} candidates alive", ip_list.len(), candidates.len());
        Ok(Response::new(ProposalResponse { ip_list }))
    }
}
