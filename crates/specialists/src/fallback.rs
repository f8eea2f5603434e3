//! Deterministic substitute results, one builder per capability.
//!
//! These are structurally identical to live results so that everything
//! downstream of a failed call keeps working unchanged.

use common::{GeoPoint, Money};

use crate::model::{
    LocationResult, MatchmakingResult, NavigationInstructions, NavigationLandmark, NavigationStep,
    ProductInfo, SearchResult, StoreLocation,
};

/// One demo product, available, total count 1.
pub fn search(query: &str) -> SearchResult {
    SearchResult {
        products_found: vec![ProductInfo::available(
            format!("Demo Product for {query}"),
            "DEMO-001",
            Money::from_cents(2999),
        )],
        total_count: 1,
        search_query: query.to_string(),
    }
}

/// One alternative and one similar product.
pub fn matchmaking(query: &str) -> MatchmakingResult {
    MatchmakingResult {
        alternatives: vec![ProductInfo::available(
            format!("Alternative for {query}"),
            "ALT-001",
            Money::from_cents(1999),
        )],
        similar_products: vec![ProductInfo::available(
            format!("Similar to {query}"),
            "SIM-001",
            Money::from_cents(2499),
        )],
    }
}

pub fn location(query: &str) -> LocationResult {
    LocationResult {
        store_locations: vec![StoreLocation {
            section: "Hardware".to_string(),
            aisle: "A1".to_string(),
            shelf: "Top".to_string(),
            description: format!("Location for {query}"),
        }],
    }
}

/// Start / Continue / Arrive between the two points. The first and last
/// steps carry their point as landmark.
pub fn navigation(from: GeoPoint, to: GeoPoint) -> NavigationInstructions {
    NavigationInstructions {
        start_location: String::new(),
        steps: vec![
            NavigationStep {
                direction: "Start".to_string(),
                description: format!("Head towards {to} from {from}"),
                landmark: Some(NavigationLandmark::at(from)),
            },
            NavigationStep {
                direction: "Continue".to_string(),
                description: "Follow the main pathway".to_string(),
                landmark: None,
            },
            NavigationStep {
                direction: "Arrive".to_string(),
                description: format!("You will find your destination at {to}"),
                landmark: Some(NavigationLandmark::at(to)),
            },
        ],
        estimated_time: String::new(),
    }
}
