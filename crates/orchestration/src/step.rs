//! Recorded units of orchestration work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const INVENTORY_AGENT: &str = "InventoryAgent";
pub const MATCHMAKING_AGENT: &str = "MatchmakingAgent";
pub const LOCATION_AGENT: &str = "LocationAgent";
pub const NAVIGATION_AGENT: &str = "NavigationAgent";

/// One step of a run: who acted, what it was asked, what it reported.
///
/// The timestamp is taken when the step is recorded and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub agent_label: String,
    pub action: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

impl Step {
    /// Records a step stamped with the current time.
    pub fn record(
        agent_label: impl Into<String>,
        action: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            agent_label: agent_label.into(),
            action: action.into(),
            result: result.into(),
            timestamp: Utc::now(),
        }
    }
}
