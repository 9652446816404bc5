//! Storage node gRPC service
//!
//! Every node serves the same three calls. A node acts as primary for the
//! upload streams it receives and as peer for chunks forwarded to it; the
//! two roles are the same process in different call paths.

use crate::common::{ClusterConfig, LivenessTracker, Result};
use crate::proto::storage_node_server::{StorageNode, StorageNodeServer};
use crate::proto::{
    AliveRequest, AliveResponse, ReceiveRequest, ReceiveResponse, UploadRequest, UploadResponse,
};
use crate::storage::coord_client::CoordClient;
use crate::storage::peer_client::PeerClient;
use crate::storage::placement::PlacementPlan;
use crate::storage::session::UploadSession;
use crate::storage::store::{chunk_file_name, ChunkStore};
use std::sync::Arc;
use tonic::{Request, Response, Status, Streaming};

pub struct StorageGrpcService {
    store: ChunkStore,
    liveness: Arc<LivenessTracker>,
    cluster: ClusterConfig,
    coordinator_addr: String,
}

impl StorageGrpcService {
    pub fn new(
        store: ChunkStore,
        liveness: Arc<LivenessTracker>,
        cluster: ClusterConfig,
        coordinator_addr: String,
    ) -> Self {
        Self {
            store,
            liveness,
            cluster,
            coordinator_addr,
        }
    }

    /// Converts this service into a gRPC server instance.
    pub fn into_server(self) -> StorageNodeServer<Self> {
        StorageNodeServer::new(self)
    }

    /// End-of-stream: decide placement, persist the local share, forward the
    /// rest. The client is acknowledged only after every step succeeds.
    ///
    /// Local chunks written before a failed forward are not rolled back;
    /// there is no atomicity across the local-write/forward boundary.
    async fn finalize(&self, session: UploadSession) -> Result<()> {
        if session.is_empty() {
            tracing::info!("Empty upload session, nothing to place");
            return Ok(());
        }

        // Own view first, then the coordinator re-probes and prunes.
        self.liveness.refresh().await?;
        let candidates = self.liveness.alive_members();

        let mut coord = CoordClient::connect(&self.coordinator_addr)?;
        let peers = coord
            .propose(candidates, self.cluster.proposal_timeout())
            .await?;

        let plan = PlacementPlan::compute(session.len(), &peers);
        tracing::info!(
            "Placing {} chunks: {} local, {} peers with {} each",
            session.len(),
            plan.local_count,
            plan.blocks.len(),
            plan.blocks.first().map(|b| b.count).unwrap_or(0)
        );

        let name = session.file_name();
        let chunks = session.chunks();

        for i in 0..plan.local_count {
            self.store.write(&chunk_file_name(name, i), &chunks[i])?;
        }

        for block in &plan.blocks {
            if block.count == 0 {
                continue;
            }
            let mut peer = PeerClient::connect(&block.addr)?;
            for i in block.indices() {
                peer.receive(
                    chunk_file_name(name, i),
                    chunks[i].clone(),
                    self.cluster.forward_timeout(),
                )
                .await?;
            }
        }

        Ok(())
    }
}

#[tonic::async_trait]
impl StorageNode for StorageGrpcService {
    /// Client-streamed upload: buffer chunks in arrival order, then place
    /// them once the client closes its side of the stream.
    async fn upload(
        &self,
        request: Request<Streaming<UploadRequest>>,
    ) -> std::result::Result<Response<UploadResponse>, Status> {
        tracing::info!("Upload stream opened");

        let mut stream = request.into_inner();
        let mut session = UploadSession::new();
        while let Some(msg) = stream.message().await? {
            session.push(msg.file_name, msg.chunk_data);
        }

        tracing::info!("Upload stream closed after {} chunks", session.len());
        self.finalize(session).await.map_err(|e| e.to_grpc_status())?;

        Ok(Response::new(UploadResponse {}))
    }

    async fn alive(
        &self,
        _request: Request<AliveRequest>,
    ) -> std::result::Result<Response<AliveResponse>, Status> {
        Ok(Response::new(AliveResponse {}))
    }

    /// Persist one forwarded chunk. Duplicate names silently overwrite.
    async fn receive(
        &self,
        request: Request<ReceiveRequest>,
    ) -> std::result::Result<Response<ReceiveResponse>, Status> {
        let req = request.into_inner();
        self.store
            .write(&req.file_name, &req.chunk_data)
            .map_err(|e| e.to_grpc_status())?;
        Ok(Response::new(ReceiveResponse {}))
    }
}
