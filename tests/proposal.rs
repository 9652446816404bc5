//! Coordinator proposal filtering against live and dead members
//!
//! The coordinator re-probes the whole membership on every proposal, so a
//! candidate that went down after the primary's own probe is dropped from
//! the answer even though the primary proposed it.

use minidfs::common::{ClusterConfig, CoordinatorConfig, StorageConfig};
use minidfs::coordinator::Coordinator;
use minidfs::proto::coordinator_client::CoordinatorClient;
use minidfs::proto::ProposalRequest;
use minidfs::storage::StorageServer;
use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;

fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn wait_until_serving(addr: &SocketAddr) {
    for _ in 0..250 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {} never came up", addr);
}

struct Fixture {
    coord: SocketAddr,
    alive: Vec<SocketAddr>,
    dead: SocketAddr,
    _dirs: Vec<TempDir>,
}

/// Coordinator plus two live storage nodes and one member that is down.
async fn start_fixture() -> Fixture {
    let coord = free_addr();
    let alive = vec![free_addr(), free_addr()];
    let dead = free_addr(); // never started

    let members: Vec<String> = alive
        .iter()
        .chain(std::iter::once(&dead))
        .map(|a| a.to_string())
        .collect();
    let mut cluster = ClusterConfig::new(members);
    cluster.probe_timeout_ms = 1_000;

    let coord_config = CoordinatorConfig {
        bind_addr: coord,
        advertise_addr: coord.to_string(),
    };
    let coord_cluster = cluster.clone();
    tokio::spawn(async move {
        Coordinator::new(coord_config, coord_cluster)
            .serve()
            .await
            .unwrap();
    });

    let mut dirs = Vec::new();
    for addr in &alive {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            bind_addr: *addr,
            advertise_addr: addr.to_string(),
            chunk_dir: dir.path().to_path_buf(),
            coordinator_addr: coord.to_string(),
        };
        let cluster = cluster.clone();
        tokio::spawn(async move {
            StorageServer::new(config, cluster).serve().await.unwrap();
        });
        dirs.push(dir);
    }

    wait_until_serving(&coord).await;
    for addr in &alive {
        wait_until_serving(addr).await;
    }

    Fixture {
        coord,
        alive,
        dead,
        _dirs: dirs,
    }
}

async fn propose(coord: SocketAddr, ip_list: Vec<String>) -> Vec<String> {
    let mut client = CoordinatorClient::connect(format!("http://{}", coord))
        .await
        .unwrap();
    client
        .proposal(ProposalRequest { ip_list })
        .await
        .unwrap()
        .into_inner()
        .ip_list
}

#[tokio::test]
async fn test_candidate_down_at_reprobe_is_excluded() {
    let fx = start_fixture().await;

    // The dead member sits in the middle of the candidate list, as if the
    // proposing primary had still believed it alive.
    let candidates = vec![
        fx.alive[0].to_string(),
        fx.dead.to_string(),
        fx.alive[1].to_string(),
    ];
    let filtered = propose(fx.coord, candidates).await;

    assert_eq!(
        filtered,
        vec![fx.alive[0].to_string(), fx.alive[1].to_string()]
    );
}

#[tokio::test]
async fn test_filter_preserves_candidate_order() {
    let fx = start_fixture().await;

    let candidates = vec![fx.alive[1].to_string(), fx.alive[0].to_string()];
    let filtered = propose(fx.coord, candidates.clone()).await;

    assert_eq!(filtered, candidates);
}

#[tokio::test]
async fn test_unknown_candidate_is_excluded() {
    let fx = start_fixture().await;

    let filtered = propose(fx.coord, vec!["127.0.0.1:1".to_string()]).await;
    assert!(filtered.is_empty());
}

#[tokio::test]
async fn test_empty_proposal_stays_empty() {
    let fx = start_fixture().await;

    let filtered = propose(fx.coord, vec![]).await;
    assert!(filtered.is_empty());
}
