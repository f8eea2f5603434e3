//! Clients for the four specialist services the orchestration engine coordinates.
//!
//! Each capability is a trait with two implementations:
//! - an HTTP client that calls `{base}/api/.../{mode}` and decodes a JSON body
//! - an in-memory service for tests and offline runs, with failure injection
//!   and simulated latency
//!
//! Clients report failures as [`SpecialistError`]. They never substitute data
//! themselves; the deterministic replacements live in [`fallback`] and are
//! applied by the caller.

pub mod error;
pub mod fallback;
pub mod http;
pub mod kind;
pub mod mode;
pub mod model;
pub mod services;

pub use error::SpecialistError;
pub use http::HttpTransport;
pub use kind::SpecialistKind;
pub use mode::{DEFAULT_MODE, ModeSelector};
pub use model::{
    LocationResult, MatchmakingResult, NavigationInstructions, NavigationLandmark, NavigationStep,
    ProductInfo, SearchResult, StoreLocation,
};
pub use services::{
    HttpLocationService, HttpMatchmakingService, HttpNavigationService, HttpSearchService,
    InMemoryLocationService, InMemoryMatchmakingService, InMemoryNavigationService,
    InMemorySearchService, LocationService, MatchmakingService, NavigationService, SearchService,
};
