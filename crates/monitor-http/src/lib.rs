mod activity;
mod config;
mod error;
mod status;

pub use activity::{
    ActivityEndpoint, ActivityOutcome, ActivityProbe, ExplorerEndpoint, TIMESTAMP_FIELDS,
    TRANSACTION_LIST_KEYS, extract_transactions, latest_activity, minutes_since,
    parse_timestamp,
};
pub use config::{
    ADDRESS_PLACEHOLDER, ExplorerConfig, ExplorerConfigRaw, HttpConfigError, ORIGIN_PLACEHOLDER,
    PeerApiConfig, PeerApiConfigRaw,
};
pub use error::{EndpointFailure, StatusUnavailable};
pub use status::{PeerStatusClient, StatusOutcome, parse_peer_status};
