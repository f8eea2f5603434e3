//! Product location service trait and implementations.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use super::InjectedBehavior;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::kind::SpecialistKind;
use crate::mode::ModeSelector;
use crate::model::{LocationResult, StoreLocation};

/// Trait for locating a product inside the store.
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn find_product_location(&self, query: &str) -> Result<LocationResult>;

    fn set_mode(&self, mode: &str);

    fn mode(&self) -> String;
}

/// Calls `GET {base}/api/location/find/{mode}?product={query}`.
#[derive(Debug)]
pub struct HttpLocationService {
    transport: HttpTransport,
    mode: ModeSelector,
}

impl HttpLocationService {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            mode: ModeSelector::default(),
        }
    }
}

#[async_trait]
impl LocationService for HttpLocationService {
    async fn find_product_location(&self, query: &str) -> Result<LocationResult> {
        let path = format!("/api/location/find/{}", self.mode.get());
        self.transport
            .get_json(SpecialistKind::Location, &path, &[("product", query)])
            .await
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
        tracing::debug!(mode = %self.mode.get(), "location service mode set");
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}

#[derive(Debug, Default)]
struct InMemoryLocationState {
    response: Option<LocationResult>,
}

/// In-memory location service for testing and offline runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationService {
    state: Arc<RwLock<InMemoryLocationState>>,
    behavior: InjectedBehavior,
    mode: Arc<ModeSelector>,
}

impl InMemoryLocationService {
    /// Creates a new in-memory location service.
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
    pub fn set_response(&self, response: Option<LocationResult>) {
        self.state.write().unwrap().response = response;
    }

    pub fn call_count(&self) -> usize {
        self.behavior.call_count()
    }
}

#[async_trait]
impl LocationService for InMemoryLocationService {
    async fn find_product_location(&self, query: &str) -> Result<LocationResult> {
        self.behavior.enter(SpecialistKind::Location).await?;

        let canned = self.state.read().unwrap().response.clone();
        Ok(canned.unwrap_or_else(|| LocationResult {
            store_locations: vec![StoreLocation {
                section: "Power Tools".to_string(),
                aisle: "12".to_string(),
                shelf: "Middle".to_string(),
                description: format!("{query} display"),
            }],
        }))
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}
