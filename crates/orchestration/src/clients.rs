//! The set of specialist clients a run works with.

use std::sync::Arc;

use specialists::{
    HttpLocationService, HttpMatchmakingService, HttpNavigationService, HttpSearchService,
    HttpTransport, InMemoryLocationService, InMemoryMatchmakingService, InMemoryNavigationService,
    InMemorySearchService, LocationService, MatchmakingService, NavigationService, SearchService,
};

/// One client per capability, shared behind `Arc` so concurrent branches can
/// own a handle each.
#[derive(Clone)]
pub struct Specialists {
    pub search: Arc<dyn SearchService>,
    pub matchmaking: Arc<dyn MatchmakingService>,
    pub location: Arc<dyn LocationService>,
    pub navigation: Arc<dyn NavigationService>,
}

impl Specialists {
    pub fn new(
        search: Arc<dyn SearchService>,
        matchmaking: Arc<dyn MatchmakingService>,
        location: Arc<dyn LocationService>,
        navigation: Arc<dyn NavigationService>,
    ) -> Self {
        Self {
            search,
            matchmaking,
            location,
            navigation,
        }
    }

    /// HTTP clients for all four capabilities sharing one transport.
    pub fn http(transport: HttpTransport) -> Self {
        Self::new(
            Arc::new(HttpSearchService::new(transport.clone())),
            Arc::new(HttpMatchmakingService::new(transport.clone())),
            Arc::new(HttpLocationService::new(transport.clone())),
            Arc::new(HttpNavigationService::new(transport)),
        )
    }

    /// Fresh in-memory services with their default canned behaviour.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemorySearchService::new()),
            Arc::new(InMemoryMatchmakingService::new()),
            Arc::new(InMemoryLocationService::new()),
            Arc::new(InMemoryNavigationService::new()),
        )
    }

    /// Applies one backend mode to every client.
    pub fn set_mode(&self, mode: &str) {
        self.search.set_mode(mode);
        self.matchmaking.set_mode(mode);
        self.location.set_mode(mode);
        self.navigation.set_mode(mode);
    }
}

impl std::fmt::Debug for Specialists {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Specialists")
            .field("search_mode", &self.search.mode())
            .finish_non_exhaustive()
    }
}
