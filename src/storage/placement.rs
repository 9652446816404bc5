//! Placement arithmetic for one upload session
//!
//! Given the total chunk count and the coordinator-filtered peer list, the
//! primary keeps a contiguous prefix and assigns one contiguous block per
//! peer. The split is deterministic: with `n = peers + 1`,
//! `division = total / n` and `remainder = total % n`, the primary keeps
//! `division + remainder` chunks and each peer gets exactly `division`.

/// One contiguous block of chunk indices assigned to a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerBlock {
    pub addr: String,
    pub start: usize,
    pub count: usize,
}

impl PeerBlock {
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.count
    }
}

/// Exhaustive, non-overlapping partition of `0..total` into the primary's
/// local prefix and the per-peer blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    pub local_count: usize,
    pub blocks: Vec<PeerBlock>,
}

impl PlacementPlan {
    pub fn compute(total: usize, peers: &[String]) -> Self {
        let n = peers.len() + 1;
        let division = total / n;
        let remainder = total % n;
        let local_count = division + remainder;

        let blocks = peers
            .iter()
            .enumerate()
            .map(|(j, addr)| PeerBlock {
                addr: addr.clone(),
                start: local_count + j * division,
                count: division,
            })
            .collect();

        Self { local_count, blocks }
    }

    /// Total chunks covered by the plan.
    pub fn total(&self) -> usize {
        self.local_count + self.blocks.iter().map(|b| b.count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peers(k: usize) -> Vec<String> {
        (0..k).map(|i| format!("10.0.0.{}:7000", i + 2)).collect()
    }

    #[test]
    fn test_ten_chunks_two_peers() {
        // n=3, division=3, remainder=1: primary keeps 4, each peer gets 3
        let plan = PlacementPlan::compute(10, &peers(2));
        assert_eq!(plan.local_count, 4);
        assert_eq!(plan.blocks[0].indices(), 4..7);
        assert_eq!(plan.blocks[1].indices(), 7..10);
        assert_eq!(plan.total(), 10);
    }

    #[test]
    fn test_no_peers_keeps_everything() {
        let plan = PlacementPlan::compute(7, &peers(0));
        assert_eq!(plan.local_count, 7);
        assert!(plan.blocks.is_empty());
    }

    #[test]
    fn test_empty_session() {
        let plan = PlacementPlan::compute(0, &peers(3));
        assert_eq!(plan.local_count, 0);
        assert!(plan.blocks.iter().all(|b| b.count == 0));
        assert_eq!(plan.total(), 0);
    }

    #[test]
    fn test_fewer_chunks_than_nodes() {
        // division=0: primary keeps the remainder, peers get nothing
        let plan = PlacementPlan::compute(2, &peers(4));
        assert_eq!(plan.local_count, 2);
        assert!(plan.blocks.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        for total in 0..64 {
            for k in 0..6 {
                let plan = PlacementPlan::compute(total, &peers(k));
                assert_eq!(plan.total(), total, "total={} k={}", total, k);

                let mut covered = vec![false; total];
                for i in 0..plan.local_count {
                    assert!(!covered[i]);
                    covered[i] = true;
                }
                for block in &plan.blocks {
                    for i in block.indices() {
                        assert!(!covered[i], "overlap at {} (total={} k={})", i, total, k);
                        covered[i] = true;
                    }
                }
                assert!(covered.iter().all(|c| *c));
            }
        }
    }

    #[test]
    fn test_blocks_follow_peer_order() {
        let p = peers(3);
        let plan = PlacementPlan::compute(12, &p);
        let assigned: Vec<&str> = plan.blocks.iter().map(|b| b.addr.as_str()).collect();
        assert_eq!(assigned, p.iter().map(|s| s.as_str()).collect::<Vec<_>>());
    }
}
