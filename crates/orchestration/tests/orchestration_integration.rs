//! Integration tests for the orchestration engine using in-memory specialists.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::GeoPoint;
use orchestration::strategies::{concurrent, group_chat, handoff, magentic, sequential};
use orchestration::{
    OrchestrationError, Orchestrator, OrchestratorConfig, Request, Response, Specialists,
    StrategyKind,
};
use specialists::{
    InMemoryLocationService, InMemoryMatchmakingService, InMemoryNavigationService,
    InMemorySearchService, LocationResult, LocationService, MatchmakingResult, MatchmakingService,
    NavigationService, SearchResult, SearchService, SpecialistKind,
};
use tokio_util::sync::CancellationToken;

const QUERY: &str = "cordless drill";

struct TestHarness {
    orchestrator: Orchestrator,
    search: InMemorySearchService,
    matchmaking: InMemoryMatchmakingService,
    location: InMemoryLocationService,
    navigation: InMemoryNavigationService,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(OrchestratorConfig::default())
    }

    fn with_config(config: OrchestratorConfig) -> Self {
        let search = InMemorySearchService::new();
        let matchmaking = InMemoryMatchmakingService::new();
        let location = InMemoryLocationService::new();
        let navigation = InMemoryNavigationService::new();

        let specialists = Specialists::new(
            Arc::new(search.clone()),
            Arc::new(matchmaking.clone()),
            Arc::new(location.clone()),
            Arc::new(navigation.clone()),
        );

        Self {
            orchestrator: Orchestrator::new(specialists, config),
            search,
            matchmaking,
            location,
            navigation,
        }
    }

    fn fail(&self, kind: SpecialistKind) {
        match kind {
            SpecialistKind::Search => self.search.set_fail(true),
            SpecialistKind::Matchmaking => self.matchmaking.set_fail(true),
            SpecialistKind::Location => self.location.set_fail(true),
            SpecialistKind::Navigation => self.navigation.set_fail(true),
        }
    }

    fn fail_all(&self) {
        for kind in SpecialistKind::ALL {
            self.fail(kind);
        }
    }

    fn set_latency(&self, kind: SpecialistKind, millis: u64) {
        let latency = Some(Duration::from_millis(millis));
        match kind {
            SpecialistKind::Search => self.search.set_latency(latency),
            SpecialistKind::Matchmaking => self.matchmaking.set_latency(latency),
            SpecialistKind::Location => self.location.set_latency(latency),
            SpecialistKind::Navigation => self.navigation.set_latency(latency),
        }
    }

    /// Search finds nothing, matchmaking has no alternatives, location has no place.
    fn make_adversarial(&self) {
        self.search.set_response(Some(SearchResult::default()));
        self.matchmaking
            .set_response(Some(MatchmakingResult::default()));
        self.location.set_response(Some(LocationResult::default()));
    }

    async fn run(&self, strategy: StrategyKind, with_location: bool) -> Response {
        self.orchestrator
            .run(request(strategy, with_location))
            .await
            .unwrap()
    }
}

fn request(strategy: StrategyKind, with_location: bool) -> Request {
    let request = Request::new("user-1", QUERY).with_strategy(strategy);
    if with_location {
        request.with_location(GeoPoint::new(47.6062, -122.3321))
    } else {
        request
    }
}

fn labels(response: &Response) -> Vec<&str> {
    response
        .steps
        .iter()
        .map(|s| s.agent_label.as_str())
        .collect()
}

fn results(response: &Response) -> Vec<&str> {
    response.steps.iter().map(|s| s.result.as_str()).collect()
}

fn expected_count(strategy: StrategyKind, with_location: bool) -> Option<usize> {
    let extra = usize::from(with_location);
    match strategy {
        StrategyKind::Sequential | StrategyKind::Concurrent => Some(3 + extra),
        StrategyKind::GroupChat | StrategyKind::Magentic => Some(8 + extra),
        StrategyKind::Handoff => None,
    }
}

fn fallback_marker(strategy: StrategyKind, kind: SpecialistKind) -> &'static str {
    use SpecialistKind::*;
    match (strategy, kind) {
        (StrategyKind::Sequential, Search) => sequential::SEARCH_FALLBACK,
        (StrategyKind::Sequential, Matchmaking) => sequential::MATCHMAKING_FALLBACK,
        (StrategyKind::Sequential, Location) => sequential::LOCATION_FALLBACK,
        (StrategyKind::Sequential, Navigation) => sequential::NAVIGATION_FALLBACK,
        (StrategyKind::Concurrent, Search) => concurrent::SEARCH_FALLBACK,
        (StrategyKind::Concurrent, Matchmaking) => concurrent::MATCHMAKING_FALLBACK,
        (StrategyKind::Concurrent, Location) => concurrent::LOCATION_FALLBACK,
        (StrategyKind::Concurrent, Navigation) => concurrent::NAVIGATION_FALLBACK,
        (StrategyKind::Handoff, Search) => handoff::SEARCH_FALLBACK,
        (StrategyKind::Handoff, Matchmaking) => handoff::MATCHMAKING_FALLBACK,
        (StrategyKind::Handoff, Location) => handoff::LOCATION_FALLBACK,
        (StrategyKind::Handoff, Navigation) => handoff::NAVIGATION_FALLBACK,
        (StrategyKind::GroupChat, Search) => group_chat::SEARCH_FALLBACK,
        (StrategyKind::GroupChat, Matchmaking) => group_chat::MATCHMAKING_FALLBACK,
        (StrategyKind::GroupChat, Location) => group_chat::LOCATION_FALLBACK,
        (StrategyKind::GroupChat, Navigation) => group_chat::NAVIGATION_FALLBACK,
        (StrategyKind::Magentic, Search) => magentic::SEARCH_FALLBACK,
        (StrategyKind::Magentic, Matchmaking) => magentic::MATCHMAKING_FALLBACK,
        (StrategyKind::Magentic, Location) => magentic::LOCATION_FALLBACK,
        (StrategyKind::Magentic, Navigation) => magentic::NAVIGATION_FALLBACK,
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sequential_cordless_drill_without_location() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::Sequential, false).await;

    assert_eq!(
        labels(&response),
        vec!["InventoryAgent", "MatchmakingAgent", "LocationAgent"]
    );
    assert_eq!(response.strategy_used, StrategyKind::Sequential);
    assert_eq!(
        response.steps[0].result,
        "Found 2 products: cordless drill - Professional, cordless drill - Essentials"
    );
    assert!(
        response.steps[1]
            .result
            .starts_with("2 alternatives found based on inventory results: Found 2 products")
    );
    assert!(
        response.steps[2]
            .result
            .starts_with("Located in Power Tools Aisle 12 (verified against inventory: ")
    );
    assert!(response.navigation.is_none());
    assert_eq!(h.navigation.call_count(), 0);
}

#[tokio::test]
async fn test_concurrent_cordless_drill_location_fails() {
    let h = TestHarness::new();
    h.fail(SpecialistKind::Location);

    let response = h.run(StrategyKind::Concurrent, true).await;

    assert_eq!(
        labels(&response),
        vec![
            "InventoryAgent",
            "MatchmakingAgent",
            "LocationAgent",
            "NavigationAgent"
        ]
    );
    assert_eq!(response.steps[2].result, concurrent::LOCATION_FALLBACK);
    assert!(response.navigation.is_some());
}

#[tokio::test]
async fn test_sequential_with_location_includes_navigation() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::Sequential, true).await;

    assert_eq!(response.steps.len(), 4);
    assert_eq!(response.steps[3].action, "Navigate to product");
    assert!(
        response.steps[3]
            .result
            .starts_with("3 navigation steps based on location: Located in")
    );

    let navigation = response.navigation.unwrap();
    assert_eq!(navigation.start_location, "Main entrance");
    assert_eq!(navigation.steps.len(), 3);
    assert_eq!(h.navigation.call_count(), 1);
    assert_eq!(
        h.navigation.last_route(),
        Some((GeoPoint::new(47.6062, -122.3321), GeoPoint::new(0.0, 0.0)))
    );
}

// ---------------------------------------------------------------------------
// Step counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_step_counts_all_succeed() {
    for strategy in StrategyKind::ALL {
        for with_location in [false, true] {
            let h = TestHarness::new();
            let response = h.run(strategy, with_location).await;

            match expected_count(strategy, with_location) {
                Some(expected) => assert_eq!(
                    response.steps.len(),
                    expected,
                    "{strategy} with_location={with_location}"
                ),
                None => assert!(response.steps.len() <= handoff::MAX_STEPS),
            }
            assert!(!response.steps.is_empty());
        }
    }
}

#[tokio::test]
async fn test_step_counts_total_outage() {
    for strategy in StrategyKind::ALL {
        for with_location in [false, true] {
            let h = TestHarness::new();
            h.fail_all();
            let response = h.run(strategy, with_location).await;

            if let Some(expected) = expected_count(strategy, with_location) {
                assert_eq!(
                    response.steps.len(),
                    expected,
                    "{strategy} with_location={with_location}"
                );
            }
            assert!(!response.steps.is_empty());
            assert_eq!(response.alternatives[0].name, "Premium cordless drill");
        }
    }
}

#[tokio::test]
async fn test_group_chat_phase_order() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::GroupChat, true).await;

    assert_eq!(
        labels(&response),
        vec![
            "Group Manager",
            "InventoryAgent",
            "MatchmakingAgent",
            "LocationAgent",
            "Group Manager",
            "InventoryAgent",
            "MatchmakingAgent",
            "NavigationAgent",
            "Group Manager",
        ]
    );
    assert_eq!(response.steps[0].action, "Initiate discussion");
    assert_eq!(response.steps[5].action, "Group discussion Round 2");
    assert_eq!(h.search.call_count(), 2);
    assert_eq!(h.matchmaking.call_count(), 2);
    assert_eq!(h.location.call_count(), 1);
}

#[tokio::test]
async fn test_group_chat_routes_from_request_location() {
    let h = TestHarness::new();

    let without = h.run(StrategyKind::GroupChat, false).await;
    assert!(!labels(&without).contains(&"NavigationAgent"));
    assert_eq!(h.navigation.call_count(), 0);

    h.run(StrategyKind::GroupChat, true).await;
    assert_eq!(h.navigation.call_count(), 1);
    assert_eq!(
        h.navigation.last_route(),
        Some((GeoPoint::new(47.6062, -122.3321), GeoPoint::new(0.0, 0.0)))
    );
}

#[tokio::test]
async fn test_magentic_phase_order_and_refinement() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::Magentic, false).await;

    assert_eq!(
        labels(&response),
        vec![
            "Orchestrator",
            "Inventory Specialist",
            "Matchmaking Specialist",
            "Orchestrator",
            "Location Coordinator",
            "Orchestrator",
            "Adaptive Refiner",
            "Orchestrator",
        ]
    );

    let refinement = &response.steps[6].result;
    assert!(refinement.contains("Synthesizing insights from 4 specialist inputs"));
    assert!(refinement.contains(
        "Key findings: Orchestrator initialized complex collaboration for: cordless drill; Inventory Specialist: "
    ));
    assert!(!refinement.contains("Location Coordinator:"));
}

// ---------------------------------------------------------------------------
// Handoff rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_handoff_products_found_goes_to_location() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::Handoff, true).await;

    assert_eq!(
        labels(&response),
        vec!["InventoryAgent", "LocationAgent", "NavigationAgent"]
    );
    assert_eq!(h.matchmaking.call_count(), 0);
    assert!(response.navigation.is_some());
}

#[tokio::test]
async fn test_handoff_zero_products_goes_to_matchmaking() {
    let h = TestHarness::new();
    h.search.set_response(Some(SearchResult::default()));

    let response = h.run(StrategyKind::Handoff, false).await;

    assert_eq!(
        labels(&response),
        vec!["InventoryAgent", "MatchmakingAgent", "LocationAgent"]
    );
    assert_eq!(
        response.steps[0].result,
        "Handoff inventory check: 0 products found: "
    );
    assert!(response.navigation.is_none());
}

#[tokio::test]
async fn test_handoff_ten_products_also_goes_to_matchmaking() {
    let h = TestHarness::new();
    h.search.set_response(Some(SearchResult {
        total_count: 10,
        ..SearchResult::default()
    }));

    let response = h.run(StrategyKind::Handoff, false).await;

    assert_eq!(response.steps[1].agent_label, "MatchmakingAgent");
}

#[tokio::test]
async fn test_handoff_adversarial_stops_at_cap() {
    let h = TestHarness::new();
    h.make_adversarial();

    let response = h.run(StrategyKind::Handoff, true).await;

    assert_eq!(response.steps.len(), handoff::MAX_STEPS);
    assert_eq!(response.steps[0].agent_label, "InventoryAgent");
    for (index, step) in response.steps.iter().enumerate().skip(1) {
        let expected = if index % 2 == 1 {
            "MatchmakingAgent"
        } else {
            "LocationAgent"
        };
        assert_eq!(step.agent_label, expected, "step {index}");
    }
    assert_eq!(h.search.call_count(), 1);
    assert_eq!(h.navigation.call_count(), 0);
}

#[tokio::test]
async fn test_handoff_in_stock_without_location_or_alternatives_stops_at_cap() {
    let h = TestHarness::new();
    h.matchmaking
        .set_response(Some(MatchmakingResult::default()));
    h.location.set_response(Some(LocationResult::default()));

    let response = h.run(StrategyKind::Handoff, true).await;

    assert_eq!(response.steps.len(), handoff::MAX_STEPS);
    assert_eq!(response.steps[0].agent_label, "InventoryAgent");
    for (index, step) in response.steps.iter().enumerate().skip(1) {
        let expected = if index % 2 == 1 {
            "LocationAgent"
        } else {
            "MatchmakingAgent"
        };
        assert_eq!(step.agent_label, expected, "step {index}");
    }
    assert_eq!(h.search.call_count(), 1);
    assert_eq!(h.location.call_count(), 5);
    assert_eq!(h.matchmaking.call_count(), 4);
    assert_eq!(h.navigation.call_count(), 0);
}

#[tokio::test]
async fn test_handoff_location_not_found_escalates_to_matchmaking() {
    let h = TestHarness::new();
    h.location.set_response(Some(LocationResult::default()));

    let response = h.run(StrategyKind::Handoff, true).await;

    assert_eq!(
        labels(&response),
        vec![
            "InventoryAgent",
            "LocationAgent",
            "MatchmakingAgent",
            "LocationAgent",
            "NavigationAgent"
        ]
    );
    assert_eq!(
        response.steps[1].result,
        "Handoff location not found - may need alternatives"
    );
}

// ---------------------------------------------------------------------------
// Resilience
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_single_specialist_failure_carries_marker() {
    for strategy in StrategyKind::ALL {
        for kind in SpecialistKind::ALL {
            let h = TestHarness::new();
            if strategy == StrategyKind::Handoff {
                // Route through every specialist: Inventory → Matchmaking → Location → Navigation.
                h.search.set_response(Some(SearchResult::default()));
            }
            h.fail(kind);

            let response = h.run(strategy, true).await;

            let marker = fallback_marker(strategy, kind);
            assert!(
                results(&response).contains(&marker),
                "{strategy}/{kind}: expected marker {marker:?} in {:?}",
                results(&response)
            );
            assert!(!response.steps.is_empty());
            assert!(response.navigation.is_some(), "{strategy}/{kind}");
        }
    }
}

#[tokio::test]
async fn test_failed_navigation_still_yields_route() {
    let h = TestHarness::new();
    h.fail(SpecialistKind::Navigation);

    let response = h.run(StrategyKind::Sequential, true).await;

    assert_eq!(response.steps[3].action, "Navigate");
    let navigation = response.navigation.unwrap();
    assert_eq!(navigation.start_location, "Entrance (47.6062, -122.3321)");
    assert_eq!(navigation.estimated_time, "3-5 minutes");
    let directions: Vec<_> = navigation
        .steps
        .iter()
        .map(|s| s.direction.as_str())
        .collect();
    assert_eq!(directions, vec!["Start", "Continue", "Arrive"]);
}

#[tokio::test]
async fn test_alternatives_follow_live_matchmaking() {
    let h = TestHarness::new();
    let response = h.run(StrategyKind::Sequential, false).await;
    assert_eq!(response.alternatives.len(), 3);
    assert_eq!(response.alternatives[0].name, "cordless drill (refurbished)");

    let h = TestHarness::new();
    h.fail(SpecialistKind::Matchmaking);
    let response = h.run(StrategyKind::Sequential, false).await;
    let names: Vec<_> = response
        .alternatives
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Premium cordless drill", "Standard cordless drill"]);
}

// ---------------------------------------------------------------------------
// Idempotence and identity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_identical_runs_produce_identical_steps() {
    let h = TestHarness::new();

    for strategy in StrategyKind::ALL {
        let first = h.run(strategy, true).await;
        let second = h.run(strategy, true).await;

        let strip = |r: &Response| -> Vec<(String, String, String)> {
            r.steps
                .iter()
                .map(|s| (s.agent_label.clone(), s.action.clone(), s.result.clone()))
                .collect()
        };
        assert_eq!(strip(&first), strip(&second), "{strategy}");
        assert_ne!(first.orchestration_id, second.orchestration_id);
    }
}

#[tokio::test]
async fn test_response_carries_description_and_diagram() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::Concurrent, false).await;

    assert_eq!(
        response.description,
        "All agents executed concurrently in parallel, providing independent analysis without dependencies."
    );
    let diagram = response.workflow_diagram.unwrap();
    assert!(diagram.contains("request --> s2"));
    assert!(diagram.contains("s2 --> response"));
}

#[tokio::test]
async fn test_response_serializes_camel_case() {
    let h = TestHarness::new();

    let response = h.run(StrategyKind::Sequential, true).await;
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["strategyUsed"], "Sequential");
    assert!(value["orchestrationId"].is_string());
    assert_eq!(value["steps"][0]["agentLabel"], "InventoryAgent");
    assert!(value["alternatives"][0]["price"].is_number());
    assert!(value["navigation"]["startLocation"].is_string());
    assert_eq!(value["cancelled"], false);
}

// ---------------------------------------------------------------------------
// Validation and configuration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_blank_query_rejected_before_any_call() {
    let h = TestHarness::new();

    let result = h.orchestrator.run(Request::new("user-1", "  ")).await;

    assert!(matches!(result, Err(OrchestrationError::InvalidRequest(_))));
    assert_eq!(h.search.call_count(), 0);
}

#[tokio::test]
async fn test_non_finite_location_rejected() {
    let h = TestHarness::new();
    let request = Request::new("user-1", QUERY).with_location(GeoPoint::new(f64::INFINITY, 0.0));

    let result = h.orchestrator.run(request).await;

    assert!(matches!(result, Err(OrchestrationError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_configured_mode_applied_to_every_specialist() {
    let h = TestHarness::with_config(OrchestratorConfig {
        mode: "MAF".to_string(),
        ..OrchestratorConfig::default()
    });

    h.run(StrategyKind::Sequential, false).await;

    assert_eq!(h.search.mode(), "maf");
    assert_eq!(h.matchmaking.mode(), "maf");
    assert_eq!(h.location.mode(), "maf");
    assert_eq!(h.navigation.mode(), "maf");
}

// ---------------------------------------------------------------------------
// Timing, cancellation and engine errors
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_concurrent_latency_is_max_not_sum() {
    let h = TestHarness::new();
    h.set_latency(SpecialistKind::Search, 100);
    h.set_latency(SpecialistKind::Matchmaking, 300);
    h.set_latency(SpecialistKind::Location, 200);
    h.set_latency(SpecialistKind::Navigation, 150);

    let start = tokio::time::Instant::now();
    let response = h.run(StrategyKind::Concurrent, true).await;
    let elapsed = start.elapsed();

    assert_eq!(response.steps.len(), 4);
    assert!(elapsed >= Duration::from_millis(300), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_steps_follow_registration_order() {
    let h = TestHarness::new();
    h.set_latency(SpecialistKind::Search, 400);
    h.set_latency(SpecialistKind::Matchmaking, 300);
    h.set_latency(SpecialistKind::Location, 200);
    h.set_latency(SpecialistKind::Navigation, 100);

    let response = h.run(StrategyKind::Concurrent, true).await;

    assert_eq!(
        labels(&response),
        vec!["InventoryAgent", "MatchmakingAgent", "LocationAgent", "NavigationAgent"]
    );
}

struct SlowSearch {
    finished: Arc<AtomicBool>,
}

#[async_trait]
impl SearchService for SlowSearch {
    async fn search_products(&self, _query: &str) -> specialists::error::Result<SearchResult> {
        tokio::time::sleep(Duration::from_secs(1)).await;
        self.finished.store(true, Ordering::SeqCst);
        Ok(SearchResult::default())
    }

    fn set_mode(&self, _mode: &str) {}

    fn mode(&self) -> String {
        "llm".to_string()
    }
}

#[tokio::test(start_paused = true)]
async fn test_dropped_concurrent_run_stops_branches() {
    let finished = Arc::new(AtomicBool::new(false));
    let specialists = Specialists::new(
        Arc::new(SlowSearch {
            finished: Arc::clone(&finished),
        }),
        Arc::new(InMemoryMatchmakingService::new()),
        Arc::new(InMemoryLocationService::new()),
        Arc::new(InMemoryNavigationService::new()),
    );
    let orchestrator = Orchestrator::new(specialists, OrchestratorConfig::default());

    let run = orchestrator.run(request(StrategyKind::Concurrent, false));
    let result = tokio::time::timeout(Duration::from_millis(50), run).await;
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!finished.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn test_sequential_latency_is_sum() {
    let h = TestHarness::new();
    h.set_latency(SpecialistKind::Search, 100);
    h.set_latency(SpecialistKind::Matchmaking, 300);
    h.set_latency(SpecialistKind::Location, 200);

    let start = tokio::time::Instant::now();
    h.run(StrategyKind::Sequential, false).await;

    assert!(start.elapsed() >= Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_slow_specialist_times_out_to_fallback() {
    let h = TestHarness::with_config(OrchestratorConfig {
        call_timeout: Duration::from_millis(100),
        ..OrchestratorConfig::default()
    });
    h.set_latency(SpecialistKind::Matchmaking, 5_000);

    let start = tokio::time::Instant::now();
    let response = h.run(StrategyKind::Sequential, false).await;

    assert_eq!(response.steps[1].result, sequential::MATCHMAKING_FALLBACK);
    assert!(response.steps[0].result.contains("Found 2 products"));
    assert!(start.elapsed() < Duration::from_secs(1));
    assert!(!response.cancelled);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_returns_best_effort_response() {
    let h = TestHarness::new();
    for kind in SpecialistKind::ALL {
        h.set_latency(kind, 10_000);
    }

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let start = tokio::time::Instant::now();
    let response = h
        .orchestrator
        .run_with_cancellation(request(StrategyKind::Sequential, true), cancel)
        .await
        .unwrap();

    assert!(response.cancelled);
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(
        results(&response),
        vec![
            sequential::SEARCH_FALLBACK,
            sequential::MATCHMAKING_FALLBACK,
            sequential::LOCATION_FALLBACK,
            sequential::NAVIGATION_FALLBACK,
        ]
    );
    // Only the first call was started; the rest resolved without calling out.
    assert_eq!(h.search.call_count(), 1);
    assert_eq!(h.matchmaking.call_count(), 0);
}

struct PanickingSearch;

#[async_trait]
impl SearchService for PanickingSearch {
    async fn search_products(&self, _query: &str) -> specialists::error::Result<SearchResult> {
        panic!("search backend crashed");
    }

    fn set_mode(&self, _mode: &str) {}

    fn mode(&self) -> String {
        "llm".to_string()
    }
}

#[tokio::test]
async fn test_panicking_concurrent_branch_is_engine_error() {
    let specialists = Specialists::new(
        Arc::new(PanickingSearch),
        Arc::new(InMemoryMatchmakingService::new()),
        Arc::new(InMemoryLocationService::new()),
        Arc::new(InMemoryNavigationService::new()),
    );
    let orchestrator = Orchestrator::new(specialists, OrchestratorConfig::default());

    let result = orchestrator
        .run(request(StrategyKind::Concurrent, false))
        .await;

    assert!(matches!(result, Err(OrchestrationError::Engine(_))));
}
