//! Storage node server

use crate::common::{ClusterConfig, LivenessTracker, Result, StorageConfig};
use crate::storage::grpc::StorageGrpcService;
use crate::storage::store::ChunkStore;
use std::sync::Arc;

pub struct StorageServer {
    config: StorageConfig,
    cluster: ClusterConfig,
}

impl StorageServer {
    pub fn new(config: StorageConfig, cluster: ClusterConfig) -> Self {
        Self { config, cluster }
    }

    pub async fn serve(self) -> Result<()> {
        self.cluster.validate()?;

        tracing::info!("Starting storage node: {}", self.config.advertise_addr);
        tracing::info!("  gRPC API: {}", self.config.bind_addr);
        tracing::info!("  Chunk dir: {}", self.config.chunk_dir.display());
        tracing::info!("  Coordinator: {}", self.config.coordinator_addr);
        tracing::info!("  Cluster members: {}", self.cluster.members.join(", "));

        let store = ChunkStore::open(&self.config.chunk_dir)?;
        let liveness = Arc::new(LivenessTracker::new(
            self.cluster.members.clone(),
            self.config.advertise_addr.clone(),
            self.cluster.probe_timeout(),
        ));

        let service = StorageGrpcService::new(
            store,
            liveness,
            self.cluster.clone(),
            self.config.coordinator_addr.clone(),
        );

        tracing::info!("✓ Storage node ready");

        tonic::transport::Server::builder()
            .add_service(service.into_server())
            .serve(self.config.bind_addr)
            .await?;

        Ok(())
    }
}
