mod health;
mod node_id;
mod peer_status;
mod record;

pub use alloy::primitives::Address;
pub use health::{HealthStatus, STALE_AFTER_MINUTES, WARNING_AFTER_MINUTES};
pub use node_id::NodeId;
pub use peer_status::{PeerStatus, UNAVAILABLE_NAME, UNKNOWN_NAME};
pub use record::NodeRecord;
