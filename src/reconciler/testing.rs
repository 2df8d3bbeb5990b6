//! In-memory sources for exercising the reconciler without network access.

#![allow(clippy::unwrap_used)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use monitor_chain::AddressResolution;
use monitor_domain::{Address, NodeId, PeerStatus};
use monitor_http::{ActivityOutcome, StatusOutcome, StatusUnavailable};

use super::{ActivitySource, AddressSource, StatusSource};

pub(crate) struct FakeAddresses {
    resolution: Box<dyn Fn(usize) -> AddressResolution + Send + Sync>,
    pub(crate) calls: Mutex<Vec<Vec<NodeId>>>,
}

impl FakeAddresses {
    pub(crate) fn positional(addresses: Vec<Option<Address>>) -> Self {
        Self {
            resolution: Box::new(move |_| AddressResolution::resolved(addresses.clone())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            resolution: Box::new(|len| AddressResolution::degraded(len, "rpc unreachable")),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AddressSource for FakeAddresses {
    async fn resolve(&self, node_ids: &[NodeId]) -> AddressResolution {
        self.calls.lock().unwrap().push(node_ids.to_vec());
        (self.resolution)(node_ids.len())
    }
}

/// Ids without an entry are reported unavailable.
#[derive(Default)]
pub(crate) struct FakeStatuses {
    statuses: HashMap<String, PeerStatus>,
    pub(crate) calls: AtomicUsize,
}

impl FakeStatuses {
    pub(crate) fn with(
        mut self,
        id: &str,
        name: &str,
        score: f64,
        reward: f64,
        online: bool,
    ) -> Self {
        self.statuses.insert(
            id.to_string(),
            PeerStatus {
                name: name.to_string(),
                primary_score: score,
                secondary_score: reward,
                online,
            },
        );
        self
    }
}

#[async_trait]
impl StatusSource for FakeStatuses {
    async fn fetch(&self, node_id: &NodeId) -> StatusOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.statuses.get(node_id.as_str()) {
            Some(status) => StatusOutcome::Available(status.clone()),
            None => StatusOutcome::Unavailable(StatusUnavailable::Status(502)),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeActivity {
    minutes: HashMap<Address, u64>,
    probed: Mutex<Vec<Address>>,
}

impl FakeActivity {
    pub(crate) fn with(mut self, address: Address, minutes: u64) -> Self {
        self.minutes.insert(address, minutes);
        self
    }

    pub(crate) fn probed(&self) -> Vec<Address> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivitySource for FakeActivity {
    async fn probe(&self, address: &Address) -> ActivityOutcome {
        self.probed.lock().unwrap().push(*address);
        match self.minutes.get(address) {
            Some(minutes) => ActivityOutcome::Observed {
                endpoint: 0,
                latest: DateTime::<Utc>::UNIX_EPOCH,
                minutes: *minutes,
            },
            None => ActivityOutcome::Unavailable {
                failures: Vec::new(),
            },
        }
    }
}
