//! The orchestration façade.

use std::time::{Duration, Instant};

use common::OrchestrationId;
use specialists::DEFAULT_MODE;
use tokio_util::sync::CancellationToken;

use crate::clients::Specialists;
use crate::error::{OrchestrationError, Result};
use crate::fallback::CallPolicy;
use crate::request::Request;
use crate::response::{
    Response, alternatives_from, default_alternatives, normalize_navigation, route_landmarks,
};
use crate::strategies::{self, PRODUCT_DESTINATION, RunContext, StrategyOutcome};
use crate::workflow;

/// Engine settings applied to every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Upper bound for each individual specialist call.
    pub call_timeout: Duration,
    /// Backend mode applied to all specialists before a run.
    pub mode: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(30),
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

/// Runs requests against a set of specialists using the requested strategy.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    specialists: Specialists,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(specialists: Specialists, config: OrchestratorConfig) -> Self {
        Self {
            specialists,
            config,
        }
    }

    pub fn specialists(&self) -> &Specialists {
        &self.specialists
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Runs one request to completion.
    pub async fn run(&self, request: Request) -> Result<Response> {
        self.run_with_cancellation(request, CancellationToken::new())
            .await
    }

    /// Runs one request, giving up on outstanding specialist calls once
    /// `cancel` fires.
    ///
    /// A cancelled run still returns a response: steps recorded so far are
    /// kept, the rest carry fallbacks and the response is flagged cancelled.
    #[tracing::instrument(
        skip(self, request, cancel),
        fields(strategy = %request.strategy, orchestration_id = tracing::field::Empty)
    )]
    pub async fn run_with_cancellation(
        &self,
        request: Request,
        cancel: CancellationToken,
    ) -> Result<Response> {
        request.validate()?;

        let orchestration_id = OrchestrationId::new();
        tracing::Span::current().record("orchestration_id", tracing::field::display(orchestration_id));
        tracing::info!(query = %request.product_query, "orchestration started");

        let strategy = request.strategy;
        metrics::counter!("orchestrations_total", "strategy" => strategy.as_str()).increment(1);
        let started = Instant::now();

        self.specialists.set_mode(&self.config.mode);
        let policy = CallPolicy::new(self.config.call_timeout, cancel);
        let ctx = RunContext {
            request: &request,
            specialists: &self.specialists,
            policy: &policy,
        };

        let outcome = strategies::execute(strategy, ctx).await?;
        if outcome.steps.is_empty() {
            return Err(OrchestrationError::Engine(format!(
                "{strategy} strategy produced no steps"
            )));
        }

        metrics::histogram!("orchestration_duration_seconds", "strategy" => strategy.as_str())
            .record(started.elapsed().as_secs_f64());

        let response = assemble(orchestration_id, &request, outcome, policy.is_cancelled());
        tracing::info!(
            steps = response.steps.len(),
            cancelled = response.cancelled,
            "orchestration finished"
        );
        Ok(response)
    }
}

/// Builds the response: fills alternatives and navigation defaults and
/// renders the workflow diagram.
fn assemble(
    orchestration_id: OrchestrationId,
    request: &Request,
    outcome: StrategyOutcome,
    cancelled: bool,
) -> Response {
    let alternatives = outcome
        .matchmaking
        .as_ref()
        .map(alternatives_from)
        .filter(|alternatives| !alternatives.is_empty())
        .unwrap_or_else(|| default_alternatives(&request.product_query, orchestration_id));

    let navigation = match (outcome.navigation, request.location) {
        (Some(navigation), Some(start)) => {
            Some(normalize_navigation(navigation, start, PRODUCT_DESTINATION))
        }
        (navigation, _) => navigation,
    };
    if let Some(route) = &navigation {
        tracing::debug!(
            start = %route.start_location,
            landmarks = ?route_landmarks(route),
            "route ready"
        );
    }

    let workflow_diagram = Some(workflow::render(request.strategy, &outcome.steps));

    Response {
        orchestration_id,
        strategy_used: request.strategy,
        description: strategies::describe(request.strategy).to_string(),
        steps: outcome.steps,
        alternatives,
        navigation,
        workflow_diagram,
        cancelled,
    }
}
