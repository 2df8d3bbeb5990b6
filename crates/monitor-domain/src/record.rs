use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{HealthStatus, NodeId, PeerStatus, UNAVAILABLE_NAME};

/// One reconciled observation of a roster entry.
///
/// Built once per roster entry per cycle and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    id: NodeId,
    name: String,
    address: Option<Address>,
    /// Wins (upstream `score`).
    primary_score: f64,
    /// Rewards (upstream `reward`).
    secondary_score: f64,
    online: bool,
    last_activity_minutes: Option<u64>,
    observed_at: DateTime<Utc>,
}

impl NodeRecord {
    pub fn new(
        id: NodeId,
        status: PeerStatus,
        address: Option<Address>,
        last_activity_minutes: Option<u64>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: status.name,
            address,
            primary_score: status.primary_score,
            secondary_score: status.secondary_score,
            online: status.online,
            last_activity_minutes,
            observed_at,
        }
    }

    /// Record for a node whose status API call failed; activity is never probed.
    pub fn unavailable(id: NodeId, address: Option<Address>, observed_at: DateTime<Utc>) -> Self {
        let status = PeerStatus {
            name: UNAVAILABLE_NAME.to_string(),
            ..PeerStatus::default()
        };
        Self::new(id, status, address, None, observed_at)
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn primary_score(&self) -> f64 {
        self.primary_score
    }

    pub fn secondary_score(&self) -> f64 {
        self.secondary_score
    }

    pub fn online(&self) -> bool {
        self.online
    }

    pub fn last_activity_minutes(&self) -> Option<u64> {
        self.last_activity_minutes
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::classify(self.last_activity_minutes)
    }

    /// Same record with `observed_at` masked out, for comparing two cycles.
    pub fn without_timestamp(&self) -> Self {
        Self {
            observed_at: DateTime::<Utc>::UNIX_EPOCH,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn unavailable_record_uses_defaults() {
        let record = NodeRecord::unavailable(NodeId::from("QmPeer"), None, Utc::now());

        assert_eq!(record.name(), "UNKNOWN");
        assert_eq!(record.primary_score(), 0.0);
        assert_eq!(record.secondary_score(), 0.0);
        assert!(!record.online());
        assert_eq!(record.last_activity_minutes(), None);
        assert_eq!(record.health(), HealthStatus::Unknown);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let status = PeerStatus {
            name: "tall-swift-otter".to_string(),
            primary_score: 12.0,
            secondary_score: 340.0,
            online: true,
        };
        let record = NodeRecord::new(
            NodeId::from("QmPeer"),
            status,
            None,
            Some(4),
            DateTime::<Utc>::UNIX_EPOCH,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "QmPeer");
        assert_eq!(json["name"], "tall-swift-otter");
        assert_eq!(json["primary_score"], 12.0);
        assert_eq!(json["secondary_score"], 340.0);
        assert_eq!(json["last_activity_minutes"], 4);
        assert!(json["address"].is_null());
    }
}
