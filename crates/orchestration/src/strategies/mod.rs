//! The five coordination strategies.
//!
//! Every strategy takes the same [`RunContext`] and produces a
//! [`StrategyOutcome`]: the ordered steps plus the data the façade needs to
//! build the response. Specialist calls always go through
//! [`call_with_fallback`](crate::fallback::call_with_fallback), so a strategy
//! only fails on an engine defect.

pub mod concurrent;
pub mod group_chat;
pub mod handoff;
pub mod magentic;
pub mod sequential;

use common::GeoPoint;
use specialists::{MatchmakingResult, NavigationInstructions};

use crate::clients::Specialists;
use crate::error::Result;
use crate::fallback::{CallPolicy, Outcome};
use crate::request::{Request, StrategyKind};
use crate::step::Step;

/// Where navigation routes lead. Specialists resolve the product position
/// themselves; the engine only supplies the origin.
pub const PRODUCT_DESTINATION: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };

/// Everything a strategy needs for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub request: &'a Request,
    pub specialists: &'a Specialists,
    pub policy: &'a CallPolicy,
}

impl<'a> RunContext<'a> {
    pub fn query(&self) -> &'a str {
        &self.request.product_query
    }
}

/// What a strategy hands back to the façade.
#[derive(Debug, Clone, Default)]
pub struct StrategyOutcome {
    pub steps: Vec<Step>,
    /// The most recent live matchmaking answer, if any.
    pub matchmaking: Option<MatchmakingResult>,
    /// Directions produced by the navigation step, if it ran.
    pub navigation: Option<NavigationInstructions>,
}

/// Dispatches to the selected strategy.
pub async fn execute(kind: StrategyKind, ctx: RunContext<'_>) -> Result<StrategyOutcome> {
    match kind {
        StrategyKind::Sequential => Ok(sequential::run(ctx).await),
        StrategyKind::Concurrent => concurrent::run(ctx).await,
        StrategyKind::Handoff => Ok(handoff::run(ctx).await),
        StrategyKind::GroupChat => Ok(group_chat::run(ctx).await),
        StrategyKind::Magentic => Ok(magentic::run(ctx).await),
    }
}

/// Fixed narrative describing how a strategy coordinates the specialists.
pub fn describe(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::Sequential => {
            "Agents executed sequentially, with each agent building upon the results of the previous agent's work."
        }
        StrategyKind::Concurrent => {
            "All agents executed concurrently in parallel, providing independent analysis without dependencies."
        }
        StrategyKind::Handoff => {
            "Agents executed using dynamic handoff logic, with each agent determining the next agent based on analysis results."
        }
        StrategyKind::GroupChat => {
            "Agents participated in a collaborative group chat with multiple rounds of discussion to build consensus."
        }
        StrategyKind::Magentic => {
            "Complex generalist multi-agent collaboration inspired by MagenticOne, featuring adaptive orchestration, specialist coordination, and iterative refinement."
        }
    }
}

/// Keeps the latest live matchmaking answer; fallbacks never replace it.
fn remember_live(slot: &mut Option<MatchmakingResult>, outcome: &Outcome<MatchmakingResult>) {
    if let Some(result) = outcome.live() {
        *slot = Some(result.clone());
    }
}
