//! Inventory search service trait and implementations.

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
use crate::model::{ProductInfo, SearchResult};

/// Trait for product search.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Searches the inventory for products matching `query`.
    async fn search_products(&self, query: &str) -> Result<SearchResult>;

    /// Switches the backend variant used by subsequent calls.
    fn set_mode(&self, mode: &str);

    /// Returns the current backend variant.
    fn mode(&self) -> String;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    search_query: &'a str,
}

/// Calls `POST {base}/api/search/{mode}`.
#[derive(Debug)]
pub struct HttpSearchService {
    transport: HttpTransport,
    mode: ModeSelector,
}

impl HttpSearchService {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            mode: ModeSelector::default(),
        }
    }
}

#[async_trait]
impl SearchService for HttpSearchService {
    async fn search_products(&self, query: &str) -> Result<SearchResult> {
        let path = format!("/api/search/{}", self.mode.get());
        self.transport
            .post_json(
                SpecialistKind::Search,
                &path,
                &SearchRequest {
                    search_query: query,
                },
            )
            .await
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
        tracing::debug!(mode = %self.mode.get(), "search service mode set");
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}

#[derive(Debug, Default)]
struct InMemorySearchState {
    response: Option<SearchResult>,
    last_query: Option<String>,
}

/// In-memory search service for testing and offline runs.
///
/// Without a canned response it reports two stocked products named after the
/// query.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchService {
    state: Arc<RwLock<InMemorySearchState>>,
    behavior: InjectedBehavior,
    mode: Arc<ModeSelector>,
}

impl InMemorySearchService {
    /// Creates a new in-memory search service.
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
    pub fn set_response(&self, response: Option<SearchResult>) {
        self.state.write().unwrap().response = response;
    }

    /// Returns the number of calls received, failed ones included.
    pub fn call_count(&self) -> usize {
        self.behavior.call_count()
    }

    pub fn last_query(&self) -> Option<String> {
        self.state.read().unwrap().last_query.clone()
    }

    fn catalogue(query: &str) -> SearchResult {
        let stocked = |name: String, sku: &str, cents: i64| ProductInfo {
            in_stock: true,
            location: "Aisle 12".to_string(),
            aisle: 12,
            section: "Power Tools".to_string(),
            ..ProductInfo::available(name, sku, Money::from_cents(cents))
        };

        SearchResult {
            products_found: vec![
                stocked(format!("{query} - Professional"), "INV-1001", 14999),
                stocked(format!("{query} - Essentials"), "INV-1002", 7999),
            ],
            total_count: 2,
            search_query: query.to_string(),
        }
    }
}

#[async_trait]
impl SearchService for InMemorySearchService {
    async fn search_products(&self, query: &str) -> Result<SearchResult> {
        self.state.write().unwrap().last_query = Some(query.to_string());
        self.behavior.enter(SpecialistKind::Search).await?;

        let canned = self.state.read().unwrap().response.clone();
        Ok(canned.unwrap_or_else(|| Self::catalogue(query)))
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}
