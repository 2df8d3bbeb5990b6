use serde::{Deserialize, Serialize};

/// Name used when the status API answered but omitted `peerName`.
pub const UNKNOWN_NAME: &str = "Unknown";
/// Name used for a node whose status could not be fetched at all.
pub const UNAVAILABLE_NAME: &str = "UNKNOWN";

/// Snapshot of a node as reported by the peer status API.
///
/// The upstream field names are cross-wired: the API's `score` is the number of
/// wins and lands in `primary_score`, the API's `reward` lands in `secondary_score`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeerStatus {
    pub name: String,
    /// Upstream `score` (wins).
    pub primary_score: f64,
    /// Upstream `reward` (rewards).
    pub secondary_score: f64,
    pub online: bool,
}

impl Default for PeerStatus {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            primary_score: 0.0,
            secondary_score: 0.0,
            online: false,
        }
    }
}
