use monitor_domain::{HealthStatus, NodeRecord};

/// Aggregate view of one cycle's records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CycleSummary {
    pub nodes: usize,
    pub healthy: usize,
    pub warning: usize,
    pub stale: usize,
    pub unknown: usize,
    pub online: usize,
    pub with_address: usize,
}

impl CycleSummary {
    pub(crate) fn from_records(records: &[NodeRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                summary.nodes += 1;
                match record.health() {
                    HealthStatus::Healthy => summary.healthy += 1,
                    HealthStatus::Warning => summary.warning += 1,
                    HealthStatus::Stale => summary.stale += 1,
                    HealthStatus::Unknown => summary.unknown += 1,
                }
                if record.online() {
                    summary.online += 1;
                }
                if record.address().is_some() {
                    summary.with_address += 1;
                }
                summary
            })
    }

    pub(crate) fn count(&self, health: HealthStatus) -> usize {
        match health {
            HealthStatus::Healthy => self.healthy,
            HealthStatus::Warning => self.warning,
            HealthStatus::Stale => self.stale,
            HealthStatus::Unknown => self.unknown,
        }
    }

    pub(crate) fn record_metrics(&self) {
        for health in HealthStatus::ALL {
            monitor_observability::record_node_health(health.as_str(), self.count(health));
        }
        monitor_observability::record_nodes_online(self.online);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use monitor_domain::{Address, NodeId, PeerStatus};

    use super::*;

    fn record(minutes: Option<u64>, online: bool, address: Option<Address>) -> NodeRecord {
        let status = PeerStatus {
            online,
            ..PeerStatus::default()
        };
        NodeRecord::new(NodeId::from("QmPeer"), status, address, minutes, Utc::now())
    }

    #[test]
    fn counts_each_health_level() {
        let records = vec![
            record(Some(3), true, Some(Address::repeat_byte(1))),
            record(Some(15), true, Some(Address::repeat_byte(2))),
            record(Some(16), false, Some(Address::repeat_byte(3))),
            record(Some(31), true, None),
            record(None, false, None),
        ];

        let summary = CycleSummary::from_records(&records);

        assert_eq!(
            summary,
            CycleSummary {
                nodes: 5,
                healthy: 2,
                warning: 1,
                stale: 1,
                unknown: 1,
                online: 3,
                with_address: 3,
            }
        );
        assert_eq!(summary.count(HealthStatus::Healthy), 2);
    }

    #[test]
    fn empty_cycle_is_all_zero() {
        assert_eq!(CycleSummary::from_records(&[]), CycleSummary::default());
    }
}
