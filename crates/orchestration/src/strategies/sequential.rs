//! Sequential strategy: one specialist at a time, each step folding in the
//! previous step's result text.

use specialists::{SpecialistKind, fallback};

use super::{PRODUCT_DESTINATION, RunContext, StrategyOutcome, remember_live};
use crate::fallback::call_with_fallback;
use crate::step::{INVENTORY_AGENT, LOCATION_AGENT, MATCHMAKING_AGENT, NAVIGATION_AGENT, Step};

pub const SEARCH_FALLBACK: &str = "Fallback inventory result";
pub const MATCHMAKING_FALLBACK: &str = "Fallback alternatives";
pub const LOCATION_FALLBACK: &str = "Fallback location";
pub const NAVIGATION_FALLBACK: &str = "Fallback navigation";

/// Search → Matchmaking → Location → Navigation (only with a location).
#[tracing::instrument(skip_all, fields(strategy = "Sequential"))]
pub async fn run(ctx: RunContext<'_>) -> StrategyOutcome {
    let query = ctx.query();
    let user_id = ctx.request.user_id.as_str();
    let mut outcome = StrategyOutcome::default();

    let search = call_with_fallback(
        ctx.policy,
        SpecialistKind::Search,
        ctx.specialists.search.search_products(query),
        || fallback::search(query),
    )
    .await;
    let inventory = Step::record(
        INVENTORY_AGENT,
        format!("Search {query}"),
        search.narrate(
            |r| format!("Found {} products: {}", r.total_count, r.product_names()),
            SEARCH_FALLBACK,
        ),
    );

    let matchmaking = call_with_fallback(
        ctx.policy,
        SpecialistKind::Matchmaking,
        ctx.specialists.matchmaking.find_alternatives(query, user_id),
        || fallback::matchmaking(query),
    )
    .await;
    remember_live(&mut outcome.matchmaking, &matchmaking);
    let alternatives = Step::record(
        MATCHMAKING_AGENT,
        format!("Find alternatives {query}"),
        matchmaking.narrate(
            |r| {
                format!(
                    "{} alternatives found based on inventory results: {}",
                    r.alternatives.len(),
                    inventory.result
                )
            },
            MATCHMAKING_FALLBACK,
        ),
    );

    let location = call_with_fallback(
        ctx.policy,
        SpecialistKind::Location,
        ctx.specialists.location.find_product_location(query),
        || fallback::location(query),
    )
    .await;
    let located = Step::record(
        LOCATION_AGENT,
        format!("Locate {query}"),
        location.narrate(
            |r| match r.primary() {
                Some(place) => format!(
                    "Located in {} Aisle {} (verified against inventory: {})",
                    place.section, place.aisle, inventory.result
                ),
                None => "Location not found".to_string(),
            },
            LOCATION_FALLBACK,
        ),
    );

    let navigated = match ctx.request.location {
        Some(from) => {
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
                "Navigate"
            } else {
                "Navigate to product"
            };
            let step = Step::record(
                NAVIGATION_AGENT,
                action,
                directions.narrate(
                    |r| {
                        format!(
                            "{} navigation steps based on location: {}",
                            r.steps.len(),
                            located.result
                        )
                    },
                    NAVIGATION_FALLBACK,
                ),
            );
            outcome.navigation = Some(directions.into_value());
            Some(step)
        }
        None => None,
    };

    outcome.steps = [Some(inventory), Some(alternatives), Some(located), navigated]
        .into_iter()
        .flatten()
        .collect();
    outcome
}
