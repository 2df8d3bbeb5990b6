use thiserror::Error;

/// Why the status API could not provide a usable status for a node.
#[derive(Error, Debug)]
pub enum StatusUnavailable {
    #[error("status request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status API returned HTTP {0}")]
    Status(u16),

    #[error("status body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("status body is not a JSON object")]
    NotAnObject,

    #[error("status body is an empty object")]
    Empty,
}

impl StatusUnavailable {
    pub fn kind(&self) -> &'static str {
        match self {
            StatusUnavailable::Transport(e) if e.is_timeout() => "timeout",
            StatusUnavailable::Transport(_) => "transport",
            StatusUnavailable::Status(_) => "http_status",
            StatusUnavailable::InvalidJson(_) => "invalid_json",
            StatusUnavailable::NotAnObject => "not_an_object",
            StatusUnavailable::Empty => "empty",
        }
    }
}

/// Why a single activity endpoint did not yield a transaction list.
#[derive(Error, Debug)]
pub enum EndpointFailure {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} returned invalid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{url} returned no recognizable transaction list")]
    UnrecognizedShape { url: String },
}

impl EndpointFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            EndpointFailure::Transport { source, .. } if source.is_timeout() => "timeout",
            EndpointFailure::Transport { .. } => "transport",
            EndpointFailure::Status { .. } => "http_status",
            EndpointFailure::InvalidJson { .. } => "invalid_json",
            EndpointFailure::UnrecognizedShape { .. } => "unrecognized_shape",
        }
    }
}
