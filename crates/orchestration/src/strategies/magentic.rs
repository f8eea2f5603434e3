//! Magentic strategy: an orchestrator coordinates specialists, keeps a
//! knowledge ledger of their findings and refines it before finalizing.

use specialists::{SpecialistKind, fallback};

use super::{PRODUCT_DESTINATION, RunContext, StrategyOutcome, remember_live};
use crate::fallback::call_with_fallback;
use crate::step::Step;

pub const ORCHESTRATOR: &str = "Orchestrator";
pub const INVENTORY_SPECIALIST: &str = "Inventory Specialist";
pub const MATCHMAKING_SPECIALIST: &str = "Matchmaking Specialist";
pub const LOCATION_COORDINATOR: &str = "Location Coordinator";
pub const NAVIGATION_COORDINATOR: &str = "Navigation Coordinator";
pub const ADAPTIVE_REFINER: &str = "Adaptive Refiner";

pub const SEARCH_FALLBACK: &str =
    "MagenticOne adaptive fallback: Inventory specialist adapting to constraints";
pub const MATCHMAKING_FALLBACK: &str =
    "MagenticOne recovery: Specialist adapting algorithm parameters";
pub const LOCATION_FALLBACK: &str =
    "MagenticOne resilience: Coordinator switching to backup location algorithms";
pub const NAVIGATION_FALLBACK: &str =
    "MagenticOne adaptability: Navigation coordinator implementing alternative routing strategies";

/// Append-only record of what each participant contributed.
#[derive(Debug, Default)]
struct KnowledgeLedger {
    entries: Vec<String>,
}

impl KnowledgeLedger {
    fn append(&mut self, entry: String) {
        self.entries.push(entry);
    }

    fn append_step(&mut self, step: &Step) {
        self.append(format!("{}: {}", step.agent_label, step.result));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// The earliest `n` entries joined with "; ".
    fn head(&self, n: usize) -> String {
        self.entries
            .iter()
            .take(n)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[tracing::instrument(skip_all, fields(strategy = "Magentic"))]
pub async fn run(ctx: RunContext<'_>) -> StrategyOutcome {
    let query = ctx.query();
    let mut outcome = StrategyOutcome::default();
    let mut ledger = KnowledgeLedger::default();

    outcome.steps.push(Step::record(
        ORCHESTRATOR,
        "Initialize MagenticOne collaboration",
        format!(
            "Beginning complex multi-agent analysis for '{query}' using MagenticOne-inspired approach with adaptive planning."
        ),
    ));
    ledger.append(format!(
        "Orchestrator initialized complex collaboration for: {query}"
    ));

    let search = call_with_fallback(
        ctx.policy,
        SpecialistKind::Search,
        ctx.specialists.search.search_products(query),
        || fallback::search(query),
    )
    .await;
    let step = Step::record(
        INVENTORY_SPECIALIST,
        "Complex inventory analysis",
        search.narrate(
            |r| {
                format!(
                    "MagenticOne Inventory Specialist: Deep analysis reveals {} products. Cross-referencing with supply chain data: {}",
                    r.total_count,
                    r.product_names()
                )
            },
            SEARCH_FALLBACK,
        ),
    );
    ledger.append_step(&step);
    outcome.steps.push(step);

    let matchmaking = call_with_fallback(
        ctx.policy,
        SpecialistKind::Matchmaking,
        ctx.specialists
            .matchmaking
            .find_alternatives(query, &ctx.request.user_id),
        || fallback::matchmaking(query),
    )
    .await;
    remember_live(&mut outcome.matchmaking, &matchmaking);
    let step = Step::record(
        MATCHMAKING_SPECIALIST,
        "Advanced customer analysis",
        matchmaking.narrate(
            |r| {
                format!(
                    "MagenticOne Matchmaking Specialist: Advanced customer profiling identified {} personalized alternatives with behavioral prediction modeling",
                    r.alternatives.len()
                )
            },
            MATCHMAKING_FALLBACK,
        ),
    );
    ledger.append_step(&step);
    outcome.steps.push(step);

    outcome.steps.push(Step::record(
        ORCHESTRATOR,
        "Synthesize specialist findings",
        "Analyzing specialist inputs to determine optimal collaboration strategy. Adapting plan based on initial findings.",
    ));

    let location = call_with_fallback(
        ctx.policy,
        SpecialistKind::Location,
        ctx.specialists.location.find_product_location(query),
        || fallback::location(query),
    )
    .await;
    let step = Step::record(
        LOCATION_COORDINATOR,
        "Integrated spatial analysis",
        location.narrate(
            |r| match r.primary() {
                Some(place) => format!(
                    "MagenticOne Location Coordinator: Integrated spatial analysis confirms optimal location: {} Aisle {}. Coordinating with navigation systems.",
                    place.section, place.aisle
                ),
                None => "MagenticOne Location Coordinator: Spatial analysis complete. Coordinating alternative location strategies with team.".to_string(),
            },
            LOCATION_FALLBACK,
        ),
    );
    ledger.append_step(&step);
    outcome.steps.push(step);

    if let Some(from) = ctx.request.location {
        let directions = call_with_fallback(
            ctx.policy,
            SpecialistKind::Navigation,
            ctx.specialists
                .navigation
                .generate_directions(from, PRODUCT_DESTINATION),
            || fallback::navigation(from, PRODUCT_DESTINATION),
        )
        .await;
        let step = Step::record(
            NAVIGATION_COORDINATOR,
            "Multi-modal route optimization",
            directions.narrate(
                |r| {
                    format!(
                        "MagenticOne Navigation Coordinator: Multi-modal route optimization complete. Generated {} steps with real-time adaptation capabilities.",
                        r.steps.len()
                    )
                },
                NAVIGATION_FALLBACK,
            ),
        );
        ledger.append_step(&step);
        outcome.steps.push(step);
        outcome.navigation = Some(directions.into_value());
    }

    outcome.steps.push(Step::record(
        ORCHESTRATOR,
        "Build multi-agent consensus",
        "Facilitating consensus among specialists. Evaluating conflicting recommendations and building unified solution.",
    ));

    outcome.steps.push(Step::record(
        ADAPTIVE_REFINER,
        "Multi-agent synthesis and refinement",
        format!(
            "MagenticOne Adaptive Refinement: Synthesizing insights from {} specialist inputs. Key findings: {}. Applying iterative improvement algorithms.",
            ledger.len(),
            ledger.head(3)
        ),
    ));

    outcome.steps.push(Step::record(
        ORCHESTRATOR,
        "Finalize MagenticOne solution",
        "Completed complex multi-agent collaboration with adaptive refinement. Delivering comprehensive solution based on specialist consensus.",
    ));

    outcome
}
