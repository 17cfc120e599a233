//! Connectivity tracking for the degraded (sample data) path.
//!
//! Degraded data is served exactly like live data; this state only records
//! what happened, for logs and diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connectivity state of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    /// Nothing has been fetched yet.
    #[default]
    Unknown,
    /// The last remote call succeeded.
    Online,
    /// The last remote call failed and sample data was served.
    Offline,
}

/// Offline mode state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OfflineMode {
    state: ConnectivityState,
    degraded_responses: u64,
    last_degraded_at: Option<DateTime<Utc>>,
}

impl OfflineMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Record a successful remote call.
    pub fn set_online(&mut self) {
        self.state = ConnectivityState::Online;
    }

    /// Record that a degraded response was served.
    pub fn set_offline(&mut self) {
        self.state = ConnectivityState::Offline;
        self.degraded_responses += 1;
        self.last_degraded_at = Some(Utc::now());
    }

    pub fn is_offline(&self) -> bool {
        self.state == ConnectivityState::Offline
    }

    /// Number of responses answered from sample data so far.
    pub fn degraded_responses(&self) -> u64 {
        self.degraded_responses
    }

    pub fn last_degraded_at(&self) -> Option<DateTime<Utc>> {
        self.last_degraded_at
    }
}
