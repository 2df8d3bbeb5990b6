use serde::{Deserialize, Serialize};

/// Activity older than this many minutes is stale.
pub const STALE_AFTER_MINUTES: u64 = 30;
/// Activity older than this many minutes (and not stale) is a warning.
pub const WARNING_AFTER_MINUTES: u64 = 15;

/// Four-level health label derived from the minutes since last on-chain activity.
///
/// Always recomputed from the observation; never persisted as state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Stale,
    Unknown,
}

impl HealthStatus {
    pub fn classify(last_activity_minutes: Option<u64>) -> Self {
        match last_activity_minutes {
            None => HealthStatus::Unknown,
            Some(minutes) if minutes > STALE_AFTER_MINUTES => HealthStatus::Stale,
            Some(minutes) if minutes > WARNING_AFTER_MINUTES => HealthStatus::Warning,
            Some(_) => HealthStatus::Healthy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Warning => "warning",
            HealthStatus::Stale => "stale",
            HealthStatus::Unknown => "unknown",
        }
    }

    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Healthy,
        HealthStatus::Warning,
        HealthStatus::Stale,
        HealthStatus::Unknown,
    ];
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
