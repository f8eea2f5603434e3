//! Concurrent strategy: every specialist runs as its own task, joined at a
//! single barrier.

use std::sync::Arc;

use futures_util::future::OptionFuture;
use specialists::{SpecialistKind, fallback};

use super::{PRODUCT_DESTINATION, RunContext, StrategyOutcome, remember_live};
use crate::error::Result;
use crate::fallback::{CallPolicy, call_with_fallback};
use crate::step::{INVENTORY_AGENT, LOCATION_AGENT, MATCHMAKING_AGENT, NAVIGATION_AGENT, Step};

pub const SEARCH_FALLBACK: &str = "Concurrent fallback inventory result";
pub const MATCHMAKING_FALLBACK: &str = "Concurrent fallback alternatives";
pub const LOCATION_FALLBACK: &str = "Concurrent fallback location";
pub const NAVIGATION_FALLBACK: &str = "Concurrent fallback navigation";

/// Fans out Search, Matchmaking, Location (and Navigation with a location).
///
/// Steps come back in registration order regardless of which branch
/// finished first. A panicking branch is an engine error. Dropping the
/// returned future cancels the branches still in flight.
#[tracing::instrument(skip_all, fields(strategy = "Concurrent"))]
pub async fn run(ctx: RunContext<'_>) -> Result<StrategyOutcome> {
    let query = ctx.query().to_string();

    let branches = ctx.policy.cancel.child_token();
    let _cancel_on_drop = branches.clone().drop_guard();
    let branch_policy = CallPolicy::new(ctx.policy.timeout, branches);

    let search_task = {
        let service = Arc::clone(&ctx.specialists.search);
        let policy = branch_policy.clone();
        let query = query.clone();
        tokio::spawn(async move {
            let search = call_with_fallback(
                &policy,
                SpecialistKind::Search,
                service.search_products(&query),
                || fallback::search(&query),
            )
            .await;
            Step::record(
                INVENTORY_AGENT,
                format!("Concurrent search {query}"),
                search.narrate(
                    |r| {
                        format!(
                            "Concurrent search found {} products: {}",
                            r.total_count,
                            r.product_names()
                        )
                    },
                    SEARCH_FALLBACK,
                ),
            )
        })
    };

    let matchmaking_task = {
        let service = Arc::clone(&ctx.specialists.matchmaking);
        let policy = branch_policy.clone();
        let query = query.clone();
        let user_id = ctx.request.user_id.clone();
        tokio::spawn(async move {
            let matchmaking = call_with_fallback(
                &policy,
                SpecialistKind::Matchmaking,
                service.find_alternatives(&query, &user_id),
                || fallback::matchmaking(&query),
            )
            .await;
            let step = Step::record(
                MATCHMAKING_AGENT,
                format!("Concurrent alternatives {query}"),
                matchmaking.narrate(
                    |r| {
                        format!(
                            "Concurrent analysis found {} independent alternatives",
                            r.alternatives.len()
                        )
                    },
                    MATCHMAKING_FALLBACK,
                ),
            );
            (step, matchmaking)
        })
    };

    let location_task = {
        let service = Arc::clone(&ctx.specialists.location);
        let policy = branch_policy.clone();
        let query = query.clone();
        tokio::spawn(async move {
            let location = call_with_fallback(
                &policy,
                SpecialistKind::Location,
                service.find_product_location(&query),
                || fallback::location(&query),
            )
            .await;
            Step::record(
                LOCATION_AGENT,
                format!("Concurrent locate {query}"),
                location.narrate(
                    |r| match r.primary() {
                        Some(place) => format!(
                            "Concurrent location search: {} Aisle {}",
                            place.section, place.aisle
                        ),
                        None => "Concurrent location not found".to_string(),
                    },
                    LOCATION_FALLBACK,
                ),
            )
        })
    };

    let navigation_task = ctx.request.location.map(|from| {
        let service = Arc::clone(&ctx.specialists.navigation);
        let policy = branch_policy.clone();
        tokio::spawn(async move {
            let directions = call_with_fallback(
                &policy,
                SpecialistKind::Navigation,
                service.generate_directions(from, PRODUCT_DESTINATION),
                || fallback::navigation(from, PRODUCT_DESTINATION),
            )
            .await;
            let action = if directions.is_fallback() {
                "Concurrent navigate"
            } else {
                "Concurrent navigate to product"
            };
            let step = Step::record(
                NAVIGATION_AGENT,
                action,
                directions.narrate(
                    |r| {
                        format!(
                            "Concurrent navigation: {} independent route steps",
                            r.steps.len()
                        )
                    },
                    NAVIGATION_FALLBACK,
                ),
            );
            (step, directions.into_value())
        })
    });

    let (search, matchmaking, location, navigation) = tokio::join!(
        search_task,
        matchmaking_task,
        location_task,
        OptionFuture::from(navigation_task)
    );

    let inventory = search?;
    let (alternatives, matchmaking) = matchmaking?;
    let located = location?;
    let navigation = navigation.transpose()?;

    let mut outcome = StrategyOutcome::default();
    remember_live(&mut outcome.matchmaking, &matchmaking);
    outcome.steps = vec![inventory, alternatives, located];
    if let Some((step, directions)) = navigation {
        outcome.steps.push(step);
        outcome.navigation = Some(directions);
    }
    Ok(outcome)
}
