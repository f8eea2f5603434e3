//! Specialist service traits and implementations.

mod location;
mod matchmaking;
mod navigation;
mod search;

use std::sync::{Arc, Mutex};
use std::time::Duration;

pub use location::{HttpLocationService, InMemoryLocationService, LocationService};
pub use matchmaking::{HttpMatchmakingService, InMemoryMatchmakingService, MatchmakingService};
pub use navigation::{HttpNavigationService, InMemoryNavigationService, NavigationService};
pub use search::{HttpSearchService, InMemorySearchService, SearchService};

use crate::error::{Result, SpecialistError};
use crate::kind::SpecialistKind;

#[derive(Debug, Default)]
struct BehaviorState {
    fail: bool,
    latency: Option<Duration>,
    calls: usize,
}

/// Failure injection, simulated latency and call counting shared by the
/// in-memory services.
#[derive(Debug, Clone, Default)]
struct InjectedBehavior {
    state: Arc<Mutex<BehaviorState>>,
}

impl InjectedBehavior {
    fn set_fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    fn set_latency(&self, latency: Option<Duration>) {
        self.state.lock().unwrap().latency = latency;
    }

    fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    /// Records the call, sleeps for the configured latency, then fails if
    /// failure is switched on. The lock is released before sleeping.
    async fn enter(&self, specialist: SpecialistKind) -> Result<()> {
        let (fail, latency) = {
            let mut state = self.state.lock().unwrap();
            state.calls += 1;
            (state.fail, state.latency)
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if fail {
            return Err(SpecialistError::Unavailable {
                specialist,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}
