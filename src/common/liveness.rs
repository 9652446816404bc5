//! Liveness probing and the per-process liveness view
//!
//! Both the coordinator and every storage node keep their own view of which
//! cluster members are currently reachable. The view is recomputed in full
//! before each placement decision, never incrementally, and never persisted.

use crate::common::{Error, Result};
use crate::proto::storage_node_client::StorageNodeClient;
use crate::proto::AliveRequest;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tonic::transport::Endpoint;

/// Probe a single node with a bounded-timeout `Alive` call.
///
/// Endpoint construction failure is a fatal error at the call site. A call
/// that errors or runs past the deadline on a constructed channel is the
/// normal negative result: the node is dead.
pub async fn probe_node(addr: &str, timeout: Duration) -> Result<bool> {
    let endpoint = Endpoint::from_shared(format!("http://{}", addr))
        .map_err(|e| Error::ConnectionFailed(format!("{}: {}", addr, e)))?;
    let mut client = StorageNodeClient::new(endpoint.connect_lazy());

    let request = tonic::Request::new(AliveRequest {});
    match tokio::time::timeout(timeout, client.alive(request)).await {
        Ok(Ok(_)) => {
            tracing::debug!("Node {} is alive", addr);
            Ok(true)
        }
        Ok(Err(status)) => {
            tracing::warn!("Node {} is not available: {}", addr, status);
            Ok(false)
        }
        Err(_) => {
            tracing::warn!("Node {} did not answer within {:?}", addr, timeout);
            Ok(false)
        }
    }
}

/// Membership list plus a guarded alive/dead map.
///
/// The membership list is immutable for the process lifetime. The map is the
/// only mutable shared state in the system; concurrent sessions share one
/// tracker behind an `Arc`, so access goes through a mutex.
pub struct LivenessTracker {
    members: Vec<String>,
    self_addr: String,
    probe_timeout: Duration,
    alive: Mutex<HashMap<String, bool>>,
}

impl LivenessTracker {
    /// Every member starts out marked alive; the first refresh corrects that.
    pub fn new(members: Vec<String>, self_addr: String, probe_timeout: Duration) -> Self {
        let alive = members.iter().map(|m| (m.clone(), true)).collect();
        Self {
            members,
            self_addr,
            probe_timeout,
            alive: Mutex::new(alive),
        }
    }

    /// Re-probe every member except this process and replace the view.
    pub async fn refresh(&self) -> Result<()> {
        let mut probed = Vec::with_capacity(self.members.len());
        for member in &self.members {
            if member == &self.self_addr {
                continue;
            }
            let up = probe_node(member, self.probe_timeout).await?;
            probed.push((member.clone(), up));
        }

        let mut alive = self.alive.lock().unwrap();
        for (member, up) in probed {
            alive.insert(member, up);
        }
        Ok(())
    }

    /// Members currently marked alive, in membership order, excluding self.
    pub fn alive_members(&self) -> Vec<String> {
        let alive = self.alive.lock().unwrap();
        self.members
            .iter()
            .filter(|m| *m != &self.self_addr && alive.get(*m).copied().unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Order-preserving subset of `candidates` currently marked alive.
    ///
    /// Addresses outside the membership list count as dead.
    pub fn filter(&self, candidates: &[String]) -> Vec<String> {
        let alive = self.alive.lock().unwrap();
        candidates
            .iter()
            .filter(|c| alive.get(*c).copied().unwrap_or(false))
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub fn set_alive(&self, addr: &str, up: bool) {
        self.alive.lock().unwrap().insert(addr.to_string(), up);
    }
}
