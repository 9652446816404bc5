//! Coordinator server

use crate::common::{ClusterConfig, CoordinatorConfig, LivenessTracker, Result};
use crate::coordinator::grpc::CoordGrpcService;
use std::sync::Arc;

pub struct Coordinator {
    config: CoordinatorConfig,
    cluster: ClusterConfig,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig, cluster: ClusterConfig) -> Self {
        Self { config, cluster }
    }

    pub async fn serve(self) -> Result<()> {
        self.cluster.validate()?;

        tracing::info!("Starting coordinator: {}", self.config.advertise_addr);
        tracing::info!("  gRPC API: {}", self.config.bind_addr);
        tracing::info!("  Cluster members: {}", self.cluster.members.join(", "));

        let liveness = Arc::new(LivenessTracker::new(
            self.cluster.members.clone(),
            self.config.advertise_addr.clone(),
            self.cluster.probe_timeout(),
        ));

        let service = CoordGrpcService::new(liveness);

        tracing::info!("✓ Coordinator ready");

        tonic::transport::Server::builder()
            .add_service(service.into_server())
            .serve(self.config.bind_addr)
            .await?;

        Ok(())
    }
}
