//! Handoff strategy: each specialist's result decides who acts next.

use std::collections::HashMap;

use common::GeoPoint;
use specialists::{SpecialistKind, fallback};

use super::{PRODUCT_DESTINATION, RunContext, StrategyOutcome, remember_live};
use crate::fallback::call_with_fallback;
use crate::step::{INVENTORY_AGENT, LOCATION_AGENT, MATCHMAKING_AGENT, NAVIGATION_AGENT, Step};

/// The run stops once this many steps have been recorded.
///
/// In-stock queries whose location and alternatives both come back empty
/// keep cycling Matchmaking and Location until they hit this cap.
pub const MAX_STEPS: usize = 10;

pub const SEARCH_FALLBACK: &str = "Handoff inventory failed - escalating";
pub const MATCHMAKING_FALLBACK: &str = "Handoff alternatives failed";
pub const LOCATION_FALLBACK: &str = "Handoff location failed";
pub const NAVIGATION_FALLBACK: &str = "Handoff navigation failed";

/// The next specialist to act. Navigation carries its origin, so it can only
/// be scheduled when the request has a location.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Turn {
    Search,
    Matchmaking,
    Location,
    Navigation(GeoPoint),
}

impl Turn {
    fn agent(self) -> SpecialistKind {
        match self {
            Turn::Search => SpecialistKind::Search,
            Turn::Matchmaking => SpecialistKind::Matchmaking,
            Turn::Location => SpecialistKind::Location,
            Turn::Navigation(_) => SpecialistKind::Navigation,
        }
    }
}

/// Working state for one run, dropped when the run ends.
#[derive(Debug)]
struct HandoffState<'a> {
    product_query: &'a str,
    user_id: &'a str,
    location: Option<GeoPoint>,
    /// Result text of the latest step per specialist that produced usable
    /// data. An empty live answer is not recorded.
    last_result_by_agent: HashMap<SpecialistKind, String>,
}

impl HandoffState<'_> {
    fn has_result(&self, agent: SpecialistKind) -> bool {
        self.last_result_by_agent.contains_key(&agent)
    }

    fn record(&mut self, agent: SpecialistKind, step: &Step, usable: bool) {
        if usable {
            self.last_result_by_agent.insert(agent, step.result.clone());
        }
    }
}

/// Picks the next specialist after `last` reported `result`; `None` completes the run.
fn next_agent(last: Turn, result: &str, state: &HandoffState<'_>) -> Option<Turn> {
    let navigate_or_complete = state.location.map(Turn::Navigation);

    match last {
        Turn::Search => {
            if result.contains("0 products") || result.contains("not found") {
                Some(Turn::Matchmaking)
            } else {
                Some(Turn::Location)
            }
        }
        Turn::Matchmaking => {
            if !state.has_result(SpecialistKind::Location) {
                Some(Turn::Location)
            } else {
                navigate_or_complete
            }
        }
        Turn::Location => {
            if result.contains("not found") && !state.has_result(SpecialistKind::Matchmaking) {
                Some(Turn::Matchmaking)
            } else {
                navigate_or_complete
            }
        }
        Turn::Navigation(_) => None,
    }
}

/// Inventory first, then follows the handoff rules until completion or
/// [`MAX_STEPS`].
#[tracing::instrument(skip_all, fields(strategy = "Handoff"))]
pub async fn run(ctx: RunContext<'_>) -> StrategyOutcome {
    let mut state = HandoffState {
        product_query: ctx.query(),
        user_id: &ctx.request.user_id,
        location: ctx.request.location,
        last_result_by_agent: HashMap::new(),
    };
    let mut outcome = StrategyOutcome::default();

    let mut current = Some(Turn::Search);
    while let Some(turn) = current {
        if outcome.steps.len() >= MAX_STEPS {
            tracing::warn!(
                steps = outcome.steps.len(),
                pending = %turn.agent(),
                "handoff step cap reached, stopping run"
            );
            metrics::counter!("handoff_step_cap_reached_total").increment(1);
            break;
        }

        let step = match turn {
            Turn::Search => inventory(ctx, &mut state).await,
            Turn::Matchmaking => alternatives(ctx, &mut state, &mut outcome).await,
            Turn::Location => locate(ctx, &mut state).await,
            Turn::Navigation(from) => navigate(ctx, &mut state, &mut outcome, from).await,
        };

        current = next_agent(turn, &step.result, &state);
        tracing::debug!(from = %turn.agent(), next = ?current.map(Turn::agent), "handoff decision");
        outcome.steps.push(step);
    }

    outcome
}

async fn inventory(ctx: RunContext<'_>, state: &mut HandoffState<'_>) -> Step {
    let query = state.product_query;
    let search = call_with_fallback(
        ctx.policy,
        SpecialistKind::Search,
        ctx.specialists.search.search_products(query),
        || fallback::search(query),
    )
    .await;

    let step = Step::record(
        INVENTORY_AGENT,
        format!("Handoff search {query}"),
        search.narrate(
            |r| {
                format!(
                    "Handoff inventory check: {} products found: {}",
                    r.total_count,
                    r.product_names()
                )
            },
            SEARCH_FALLBACK,
        ),
    );
    let usable = search.is_fallback() || !search.value().products_found.is_empty();
    state.record(SpecialistKind::Search, &step, usable);
    step
}

async fn alternatives(
    ctx: RunContext<'_>,
    state: &mut HandoffState<'_>,
    outcome: &mut StrategyOutcome,
) -> Step {
    let query = state.product_query;
    let matchmaking = call_with_fallback(
        ctx.policy,
        SpecialistKind::Matchmaking,
        ctx.specialists
            .matchmaking
            .find_alternatives(query, state.user_id),
        || fallback::matchmaking(query),
    )
    .await;
    remember_live(&mut outcome.matchmaking, &matchmaking);

    let step = Step::record(
        MATCHMAKING_AGENT,
        format!("Handoff alternatives {query}"),
        matchmaking.narrate(
            |r| {
                format!(
                    "Handoff alternatives: {} options found after inventory analysis",
                    r.alternatives.len()
                )
            },
            MATCHMAKING_FALLBACK,
        ),
    );
    let usable = matchmaking.is_fallback() || !matchmaking.value().alternatives.is_empty();
    state.record(SpecialistKind::Matchmaking, &step, usable);
    step
}

async fn locate(ctx: RunContext<'_>, state: &mut HandoffState<'_>) -> Step {
    let query = state.product_query;
    let location = call_with_fallback(
        ctx.policy,
        SpecialistKind::Location,
        ctx.specialists.location.find_product_location(query),
        || fallback::location(query),
    )
    .await;

    let step = Step::record(
        LOCATION_AGENT,
        format!("Handoff locate {query}"),
        location.narrate(
            |r| match r.primary() {
                Some(place) => format!("Handoff location: {} Aisle {}", place.section, place.aisle),
                None => "Handoff location not found - may need alternatives".to_string(),
            },
            LOCATION_FALLBACK,
        ),
    );
    let usable = location.is_fallback() || location.value().primary().is_some();
    state.record(SpecialistKind::Location, &step, usable);
    step
}

async fn navigate(
    ctx: RunContext<'_>,
    state: &mut HandoffState<'_>,
    outcome: &mut StrategyOutcome,
    from: GeoPoint,
) -> Step {
    let directions = call_with_fallback(
        ctx.policy,
        SpecialistKind::Navigation,
        ctx.specialists
            .navigation
            .generate_directions(from, PRODUCT_DESTINATION),
        || fallback::navigation(from, PRODUCT_DESTINATION),
    )
    .await;

    let action = if directions.is_fallback() {
        "Handoff navigate"
    } else {
        "Handoff navigate to product"
    };
    let step = Step::record(
        NAVIGATION_AGENT,
        action,
        directions.narrate(
            |r| format!("Handoff navigation: {} steps based on context analysis", r.steps.len()),
            NAVIGATION_FALLBACK,
        ),
    );
    let usable = directions.is_fallback() || !directions.value().steps.is_empty();
    state.record(SpecialistKind::Navigation, &step, usable);
    outcome.navigation = Some(directions.into_value());
    step
}
