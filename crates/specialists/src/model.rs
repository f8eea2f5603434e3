//! Result payloads returned by the specialist services.
//!
//! All types use camelCase field names on the wire and tolerate missing
//! fields, since the remote services omit empty collections freely.

use common::{GeoPoint, Money};
use serde::{Deserialize, Serialize};

/// A product as reported by search or matchmaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInfo {
    pub name: String,
    pub sku: String,
    pub price: Money,
    pub in_stock: bool,
    pub is_available: bool,
    pub location: String,
    pub aisle: i32,
    pub section: String,
}

impl ProductInfo {
    /// Creates an available product with the given name, SKU and price.
    pub fn available(name: impl Into<String>, sku: impl Into<String>, price: Money) -> Self {
        Self {
            name: name.into(),
            sku: sku.into(),
            price,
            is_available: true,
            ..Self::default()
        }
    }
}

/// Result of an inventory search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub products_found: Vec<ProductInfo>,
    pub total_count: u32,
    pub search_query: String,
}

impl SearchResult {
    /// Comma-separated product names, in the order they were reported.
    pub fn product_names(&self) -> String {
        self.products_found
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Alternatives and similar products for a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchmakingResult {
    pub alternatives: Vec<ProductInfo>,
    pub similar_products: Vec<ProductInfo>,
}

/// A physical place in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreLocation {
    pub section: String,
    pub aisle: String,
    pub shelf: String,
    pub description: String,
}

/// Result of a location lookup. The first entry is the primary location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationResult {
    pub store_locations: Vec<StoreLocation>,
}

impl LocationResult {
    pub fn primary(&self) -> Option<&StoreLocation> {
        self.store_locations.first()
    }
}

/// Something a shopper passes on the way: either a described feature or a point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationLandmark {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl NavigationLandmark {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            location: None,
        }
    }

    pub fn at(point: GeoPoint) -> Self {
        Self {
            description: None,
            location: Some(point),
        }
    }

    /// Human-readable form: the description when present, else the
    /// coordinates to four decimals.
    pub fn display_text(&self) -> Option<String> {
        match (&self.description, &self.location) {
            (Some(description), _) if !description.is_empty() => Some(description.clone()),
            (_, Some(point)) => Some(point.to_string()),
            _ => None,
        }
    }
}

/// One leg of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationStep {
    pub direction: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<NavigationLandmark>,
}

/// A route from the shopper's position to a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationInstructions {
    pub start_location: String,
    pub steps: Vec<NavigationStep>,
    pub estimated_time: String,
}
