//! Matchmaking (alternatives) service trait and implementations.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::Money;
use serde::Serialize;

use super::InjectedBehavior;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::kind::SpecialistKind;
use crate::mode::ModeSelector;
use crate::model::{MatchmakingResult, ProductInfo};

/// Trait for finding alternatives to a requested product.
#[async_trait]
pub trait MatchmakingService: Send + Sync {
    /// Finds alternatives and similar products for `query` on behalf of `user_id`.
    async fn find_alternatives(&self, query: &str, user_id: &str) -> Result<MatchmakingResult>;

    fn set_mode(&self, mode: &str);

    fn mode(&self) -> String;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlternativesRequest<'a> {
    product_query: &'a str,
    user_id: &'a str,
}

/// Calls `POST {base}/api/matchmaking/alternatives/{mode}`.
#[derive(Debug)]
pub struct HttpMatchmakingService {
    transport: HttpTransport,
    mode: ModeSelector,
}

impl HttpMatchmakingService {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            mode: ModeSelector::default(),
        }
    }
}

#[async_trait]
impl MatchmakingService for HttpMatchmakingService {
    async fn find_alternatives(&self, query: &str, user_id: &str) -> Result<MatchmakingResult> {
        let path = format!("/api/matchmaking/alternatives/{}", self.mode.get());
        self.transport
            .post_json(
                SpecialistKind::Matchmaking,
                &path,
                &AlternativesRequest {
                    product_query: query,
                    user_id,
                },
            )
            .await
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
        tracing::debug!(mode = %self.mode.get(), "matchmaking service mode set");
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}

#[derive(Debug, Default)]
struct InMemoryMatchmakingState {
    response: Option<MatchmakingResult>,
    last_user_id: Option<String>,
}

/// In-memory matchmaking service for testing and offline runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatchmakingService {
    state: Arc<RwLock<InMemoryMatchmakingState>>,
    behavior: InjectedBehavior,
    mode: Arc<ModeSelector>,
}

impl InMemoryMatchmakingService {
    /// Creates a new in-memory matchmaking service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the service to fail every call.
    pub fn set_fail(&self, fail: bool) {
        self.behavior.set_fail(fail);
    }

    /// Delays every call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.behavior.set_latency(latency);
    }

    /// Replaces the generated result with a fixed one.
    pub fn set_response(&self, response: Option<MatchmakingResult>) {
        self.state.write().unwrap().response = response;
    }

    pub fn call_count(&self) -> usize {
        self.behavior.call_count()
    }

    pub fn last_user_id(&self) -> Option<String> {
        self.state.read().unwrap().last_user_id.clone()
    }

    fn generate(query: &str) -> MatchmakingResult {
        let shelved = |name: String, sku: &str, cents: i64, aisle: i32, section: &str| ProductInfo {
            in_stock: true,
            location: format!("Aisle {aisle}"),
            aisle,
            section: section.to_string(),
            ..ProductInfo::available(name, sku, Money::from_cents(cents))
        };

        MatchmakingResult {
            alternatives: vec![
                shelved(format!("{query} (refurbished)"), "ALT-2001", 9999, 12, "C"),
                shelved(format!("Budget {query}"), "ALT-2002", 5999, 14, "D"),
            ],
            similar_products: vec![shelved(
                format!("{query} starter kit"),
                "SIM-2001",
                13999,
                12,
                "C",
            )],
        }
    }
}

#[async_trait]
impl MatchmakingService for InMemoryMatchmakingService {
    async fn find_alternatives(&self, query: &str, user_id: &str) -> Result<MatchmakingResult> {
        self.state.write().unwrap().last_user_id = Some(user_id.to_string());
        self.behavior.enter(SpecialistKind::Matchmaking).await?;

        let canned = self.state.read().unwrap().response.clone();
        Ok(canned.unwrap_or_else(|| Self::generate(query)))
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}
