//! GroupChat strategy: a moderated, two-round discussion between the
//! specialists.

use common::GeoPoint;
use specialists::{SpecialistKind, fallback};

use super::{PRODUCT_DESTINATION, RunContext, StrategyOutcome, remember_live};
use crate::fallback::call_with_fallback;
use crate::step::{INVENTORY_AGENT, LOCATION_AGENT, MATCHMAKING_AGENT, NAVIGATION_AGENT, Step};

pub const MANAGER: &str = "Group Manager";

pub const SEARCH_FALLBACK: &str = "Having technical issues, will follow up";
pub const MATCHMAKING_FALLBACK: &str = "Experiencing delays, will contribute next round";
pub const LOCATION_FALLBACK: &str = "Technical difficulties, deferring to group";
pub const NAVIGATION_FALLBACK: &str = "Working on route calculation, great group effort so far!";

/// Running "speaker: utterance" log of the discussion.
#[derive(Debug, Default)]
struct Transcript(Vec<String>);

impl Transcript {
    fn say(&mut self, speaker: &str, step: &Step) {
        self.0.push(format!("{speaker}: {}", step.result));
    }
}

/// Open → round 1 (Search, Matchmaking, Location) → summary → round 2
/// (Search, Matchmaking, Navigation with a location) → conclusion.
#[tracing::instrument(skip_all, fields(strategy = "GroupChat"))]
pub async fn run(ctx: RunContext<'_>) -> StrategyOutcome {
    let query = ctx.query();
    let mut outcome = StrategyOutcome::default();
    let mut transcript = Transcript::default();

    let opening = Step::record(
        MANAGER,
        "Initiate discussion",
        format!(
            "Welcome to the group discussion about '{query}'. Let's collaborate to help the customer."
        ),
    );
    transcript.say("Manager", &opening);
    outcome.steps.push(opening);

    // Round 1
    let step = inventory_turn(ctx, 1).await;
    transcript.say("Inventory", &step);
    outcome.steps.push(step);

    let step = matchmaking_turn(ctx, 1, &mut outcome).await;
    transcript.say("Matchmaking", &step);
    outcome.steps.push(step);

    let step = location_turn(ctx).await;
    transcript.say("Location", &step);
    outcome.steps.push(step);

    let summary = Step::record(
        MANAGER,
        "Summarize Round 1",
        "Great initial insights! Inventory found products, Matchmaking identified alternatives, Location provided coordinates. Let's build consensus.",
    );
    transcript.say("Manager", &summary);
    outcome.steps.push(summary);

    // Round 2
    let step = inventory_turn(ctx, 2).await;
    transcript.say("Inventory", &step);
    outcome.steps.push(step);

    let step = matchmaking_turn(ctx, 2, &mut outcome).await;
    transcript.say("Matchmaking", &step);
    outcome.steps.push(step);

    if let Some(from) = ctx.request.location {
        let step = navigation_turn(ctx, from, &mut outcome).await;
        transcript.say("Navigation", &step);
        outcome.steps.push(step);
    }

    let conclusion = Step::record(
        MANAGER,
        "Conclude discussion",
        "Excellent collaboration! We've reached consensus on the best customer solution through group discussion.",
    );
    transcript.say("Manager", &conclusion);
    outcome.steps.push(conclusion);

    tracing::debug!(turns = transcript.0.len(), transcript = ?transcript.0, "group discussion closed");
    outcome
}

async fn inventory_turn(ctx: RunContext<'_>, round: u8) -> Step {
    let query = ctx.query();
    let search = call_with_fallback(
        ctx.policy,
        SpecialistKind::Search,
        ctx.specialists.search.search_products(query),
        || fallback::search(query),
    )
    .await;

    Step::record(
        INVENTORY_AGENT,
        format!("Group discussion Round {round}"),
        search.narrate(
            |r| {
                if round == 1 {
                    format!(
                        "Group discussion: I found {} products for '{query}': {}. What do others think?",
                        r.total_count,
                        r.product_names()
                    )
                } else {
                    "Following up: I can confirm stock levels and suggest cross-checking with the alternatives mentioned by Matchmaking.".to_string()
                }
            },
            SEARCH_FALLBACK,
        ),
    )
}

async fn matchmaking_turn(ctx: RunContext<'_>, round: u8, outcome: &mut StrategyOutcome) -> Step {
    let query = ctx.query();
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

    Step::record(
        MATCHMAKING_AGENT,
        format!("Group discussion Round {round}"),
        matchmaking.narrate(
            |r| {
                if round == 1 {
                    format!(
                        "Group input: I've identified {} alternatives for '{query}'. These could complement what Inventory found.",
                        r.alternatives.len()
                    )
                } else {
                    "Building on Location's findings: I can match alternatives to specific aisles they mentioned. Great teamwork!".to_string()
                }
            },
            MATCHMAKING_FALLBACK,
        ),
    )
}

async fn location_turn(ctx: RunContext<'_>) -> Step {
    let query = ctx.query();
    let location = call_with_fallback(
        ctx.policy,
        SpecialistKind::Location,
        ctx.specialists.location.find_product_location(query),
        || fallback::location(query),
    )
    .await;

    Step::record(
        LOCATION_AGENT,
        "Group discussion Round 1",
        location.narrate(
            |r| match r.primary() {
                Some(place) => format!(
                    "Group collaboration: Found '{query}' in {} Aisle {}. This aligns with Inventory's findings!",
                    place.section, place.aisle
                ),
                None => "Group discussion: No specific location found, but Matchmaking's alternatives might help.".to_string(),
            },
            LOCATION_FALLBACK,
        ),
    )
}

async fn navigation_turn(
    ctx: RunContext<'_>,
    from: GeoPoint,
    outcome: &mut StrategyOutcome,
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

    let step = Step::record(
        NAVIGATION_AGENT,
        "Join group discussion",
        directions.narrate(
            |r| {
                format!(
                    "Joining the discussion: Based on Location's coordinates and Inventory's findings, I can provide {} navigation steps!",
                    r.steps.len()
                )
            },
            NAVIGATION_FALLBACK,
        ),
    );
    outcome.navigation = Some(directions.into_value());
    step
}
