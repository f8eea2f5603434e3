//! The single catch-log-substitute boundary around every specialist call.

use std::future::Future;
use std::time::Duration;

use specialists::{SpecialistError, SpecialistKind};
use tokio_util::sync::CancellationToken;

/// Per-run limits applied to every specialist call.
#[derive(Debug, Clone)]
pub struct CallPolicy {
    pub timeout: Duration,
    pub cancel: CancellationToken,
}

impl CallPolicy {
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// A specialist answer, marked with whether it is live or substituted.
///
/// Both variants carry the same type, so downstream code never has to care
/// which one it got unless it wants to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Live(T),
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Outcome::Live(value) | Outcome::Fallback(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Live(value) | Outcome::Fallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }

    /// The value, only if the specialist actually answered.
    pub fn live(&self) -> Option<&T> {
        match self {
            Outcome::Live(value) => Some(value),
            Outcome::Fallback(_) => None,
        }
    }

    /// Step text: `live` applied to a live answer, otherwise the marker.
    pub fn narrate(&self, live: impl FnOnce(&T) -> String, marker: &str) -> String {
        match self {
            Outcome::Live(value) => live(value),
            Outcome::Fallback(_) => marker.to_string(),
        }
    }
}

/// Runs one specialist call under the policy's timeout and cancellation.
///
/// Any failure (error, timeout, cancellation) is logged, counted and replaced
/// by `fallback()`. Once the run is cancelled the call is not started at all.
pub async fn call_with_fallback<T, F, Fb>(
    policy: &CallPolicy,
    specialist: SpecialistKind,
    call: F,
    fallback: Fb,
) -> Outcome<T>
where
    F: Future<Output = specialists::error::Result<T>>,
    Fb: FnOnce() -> T,
{
    let result = if policy.is_cancelled() {
        Err(SpecialistError::Cancelled { specialist })
    } else {
        tokio::select! {
            biased;
            _ = policy.cancel.cancelled() => Err(SpecialistError::Cancelled { specialist }),
            answered = tokio::time::timeout(policy.timeout, call) => match answered {
                Ok(result) => result,
                Err(_) => Err(SpecialistError::Timeout {
                    specialist,
                    timeout_ms: u64::try_from(policy.timeout.as_millis()).unwrap_or(u64::MAX),
                }),
            },
        }
    };

    match result {
        Ok(value) => Outcome::Live(value),
        Err(err) => {
            let failed = err.specialist();
            tracing::warn!(
                specialist = %failed,
                reason = err.reason(),
                error = %err,
                "specialist call failed, substituting fallback"
            );
            metrics::counter!(
                "specialist_fallbacks_total",
                "specialist" => failed.as_str(),
                "reason" => err.reason()
            )
            .increment(1);
            Outcome::Fallback(fallback())
        }
    }
}
