//! Navigation (in-store directions) service trait and implementations.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::GeoPoint;
use serde::Serialize;

use super::InjectedBehavior;
use crate::error::Result;
use crate::http::HttpTransport;
use crate::kind::SpecialistKind;
use crate::mode::ModeSelector;
use crate::model::{NavigationInstructions, NavigationLandmark, NavigationStep};

/// Trait for generating directions between two points.
#[async_trait]
pub trait NavigationService: Send + Sync {
    async fn generate_directions(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<NavigationInstructions>;

    fn set_mode(&self, mode: &str);

    fn mode(&self) -> String;
}

#[derive(Serialize)]
struct DirectionsRequest {
    from: GeoPoint,
    to: GeoPoint,
}

/// Calls `POST {base}/api/navigation/directions/{mode}`.
#[derive(Debug)]
pub struct HttpNavigationService {
    transport: HttpTransport,
    mode: ModeSelector,
}

impl HttpNavigationService {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            mode: ModeSelector::default(),
        }
    }
}

#[async_trait]
impl NavigationService for HttpNavigationService {
    async fn generate_directions(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<NavigationInstructions> {
        let path = format!("/api/navigation/directions/{}", self.mode.get());
        self.transport
            .post_json(
                SpecialistKind::Navigation,
                &path,
                &DirectionsRequest { from, to },
            )
            .await
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
        tracing::debug!(mode = %self.mode.get(), "navigation service mode set");
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}

#[derive(Debug, Default)]
struct InMemoryNavigationState {
    response: Option<NavigationInstructions>,
    last_route: Option<(GeoPoint, GeoPoint)>,
}

/// In-memory navigation service for testing and offline runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNavigationService {
    state: Arc<RwLock<InMemoryNavigationState>>,
    behavior: InjectedBehavior,
    mode: Arc<ModeSelector>,
}

impl InMemoryNavigationService {
    /// Creates a new in-memory navigation service.
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
    pub fn set_response(&self, response: Option<NavigationInstructions>) {
        self.state.write().unwrap().response = response;
    }

    pub fn call_count(&self) -> usize {
        self.behavior.call_count()
    }

    /// Returns the endpoints of the most recent request.
    pub fn last_route(&self) -> Option<(GeoPoint, GeoPoint)> {
        self.state.read().unwrap().last_route
    }

    fn route(to: GeoPoint) -> NavigationInstructions {
        NavigationInstructions {
            start_location: "Main entrance".to_string(),
            steps: vec![
                NavigationStep {
                    direction: "Head straight".to_string(),
                    description: "Walk past the main checkout lanes".to_string(),
                    landmark: Some(NavigationLandmark::described("Customer Service Desk")),
                },
                NavigationStep {
                    direction: "Turn left".to_string(),
                    description: "Follow the signs to Power Tools".to_string(),
                    landmark: None,
                },
                NavigationStep {
                    direction: "Arrive".to_string(),
                    description: "The product is on your right".to_string(),
                    landmark: Some(NavigationLandmark::at(to)),
                },
            ],
            estimated_time: "2-3 minutes".to_string(),
        }
    }
}

#[async_trait]
impl NavigationService for InMemoryNavigationService {
    async fn generate_directions(
        &self,
        from: GeoPoint,
        to: GeoPoint,
    ) -> Result<NavigationInstructions> {
        self.state.write().unwrap().last_route = Some((from, to));
        self.behavior.enter(SpecialistKind::Navigation).await?;

        let canned = self.state.read().unwrap().response.clone();
        Ok(canned.unwrap_or_else(|| Self::route(to)))
    }

    fn set_mode(&self, mode: &str) {
        self.mode.set(mode);
    }

    fn mode(&self) -> String {
        self.mode.get()
    }
}
