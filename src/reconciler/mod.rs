//! One reconciliation cycle: a single batched address lookup, then a paced
//! serial walk over the roster producing exactly one record per entry.

mod sources;
mod summary;
#[cfg(test)]
pub(crate) mod testing;

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use monitor_domain::{Address, NodeId, NodeRecord};
use monitor_http::StatusOutcome;

pub(crate) use sources::{ActivitySource, AddressSource, StatusSource};
pub(crate) use summary::CycleSummary;

pub(crate) struct NodeReconciler {
    addresses: Arc<dyn AddressSource>,
    statuses: Arc<dyn StatusSource>,
    activity: Arc<dyn ActivitySource>,
    pacing_delay: Duration,
}

impl NodeReconciler {
    pub(crate) fn new(
        addresses: Arc<dyn AddressSource>,
        statuses: Arc<dyn StatusSource>,
        activity: Arc<dyn ActivitySource>,
        pacing_delay: Duration,
    ) -> Self {
        Self {
            addresses,
            statuses,
            activity,
            pacing_delay,
        }
    }

    /// Returns one record per roster entry, in roster order.
    ///
    /// Upstream failures only degrade individual fields; nothing here fails.
    #[tracing::instrument(
        name = "reconciler.reconcile",
        skip(self, roster),
        fields(nodes = roster.len(), resolved = tracing::field::Empty)
    )]
    pub(crate) async fn reconcile(&self, roster: &[NodeId]) -> Vec<NodeRecord> {
        let resolution = self.addresses.resolve(roster).await;
        tracing::Span::current().record("resolved", resolution.resolved_count());

        let mut records = Vec::with_capacity(roster.len());
        let mut last_observed = DateTime::<Utc>::UNIX_EPOCH;

        for (index, node_id) in roster.iter().enumerate() {
            if index > 0 && !self.pacing_delay.is_zero() {
                tokio::time::sleep(self.pacing_delay).await;
            }

            tracing::debug!(
                node_id = %node_id,
                position = index + 1,
                total = roster.len(),
                "Reconciling node"
            );

            let record = self
                .reconcile_node(node_id, resolution.get(index), &mut last_observed)
                .await;
            log_record(&record);
            records.push(record);
        }

        records
    }

    async fn reconcile_node(
        &self,
        node_id: &NodeId,
        address: Option<Address>,
        last_observed: &mut DateTime<Utc>,
    ) -> NodeRecord {
        let status = match self.statuses.fetch(node_id).await {
            StatusOutcome::Available(status) => status,
            StatusOutcome::Unavailable(_) => {
                return NodeRecord::unavailable(
                    node_id.clone(),
                    address,
                    observation_time(last_observed),
                );
            }
        };

        let last_activity_minutes = match address {
            Some(address) => {
                let outcome = self.activity.probe(&address).await;
                if outcome.minutes().is_none() {
                    tracing::debug!(
                        node_id = %node_id,
                        address = %address,
                        outcome = outcome.label(),
                        "No activity timestamp for node"
                    );
                }
                outcome.minutes()
            }
            None => None,
        };

        NodeRecord::new(
            node_id.clone(),
            status,
            address,
            last_activity_minutes,
            observation_time(last_observed),
        )
    }
}

/// Wall-clock time, held non-decreasing across a cycle.
fn observation_time(last_observed: &mut DateTime<Utc>) -> DateTime<Utc> {
    *last_observed = Utc::now().max(*last_observed);
    *last_observed
}

fn log_record(record: &NodeRecord) {
    tracing::info!(
        node_id = %record.id(),
        name = record.name(),
        health = %record.health(),
        last_activity_minutes = ?record.last_activity_minutes(),
        wins = record.primary_score(),
        rewards = record.secondary_score(),
        online = record.online(),
        "Node reconciled"
    );
}
