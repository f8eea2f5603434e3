//! Multi-specialist orchestration engine.
//!
//! Coordinates four failure-prone specialists (search, matchmaking, location,
//! navigation) to answer one product query, using one of five strategies:
//!
//! - **Sequential**: one specialist at a time, each building on the last
//! - **Concurrent**: all specialists at once, joined at a barrier
//! - **Handoff**: each result picks the next specialist
//! - **GroupChat**: a moderated two-round discussion
//! - **Magentic**: an orchestrator with a knowledge ledger and refinement
//!
//! Every specialist call is wrapped by [`fallback::call_with_fallback`], so a
//! run always yields a well-formed [`Response`] even when every specialist
//! is down.

pub mod clients;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod request;
pub mod response;
pub mod step;
pub mod strategies;
pub mod workflow;

pub use clients::Specialists;
pub use error::OrchestrationError;
pub use fallback::{CallPolicy, Outcome, call_with_fallback};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use request::{Request, StrategyKind};
pub use response::{ProductAlternative, Response};
pub use step::Step;
