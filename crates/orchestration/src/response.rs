//! The normalized result of one orchestration run.

use common::{GeoPoint, Money, OrchestrationId};
use serde::{Deserialize, Serialize};
use specialists::{MatchmakingResult, NavigationInstructions, ProductInfo};

use crate::request::StrategyKind;
use crate::step::Step;

pub const DEFAULT_ESTIMATED_TIME: &str = "3-5 minutes";

/// A product suggested in place of, or alongside, the one requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAlternative {
    pub name: String,
    pub sku: String,
    pub price: Money,
    pub in_stock: bool,
    pub location: String,
    pub aisle: i32,
    pub section: String,
}

impl From<&ProductInfo> for ProductAlternative {
    fn from(product: &ProductInfo) -> Self {
        let location = if !product.location.is_empty() {
            product.location.clone()
        } else if product.aisle > 0 {
            format!("Aisle {}", product.aisle)
        } else {
            product.section.clone()
        };

        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            in_stock: product.in_stock || product.is_available,
            location,
            aisle: product.aisle,
            section: product.section.clone(),
        }
    }
}

/// The answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub orchestration_id: OrchestrationId,
    pub strategy_used: StrategyKind,
    pub description: String,
    pub steps: Vec<Step>,
    pub alternatives: Vec<ProductAlternative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<NavigationInstructions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_diagram: Option<String>,
    /// Set when the run was cancelled; steps after that point carry fallbacks.
    #[serde(default)]
    pub cancelled: bool,
}

/// Premium and standard variants of the query, used when no live
/// matchmaking answer is available.
pub fn default_alternatives(query: &str, id: OrchestrationId) -> Vec<ProductAlternative> {
    let tag: String = id
        .to_string()
        .chars()
        .take(8)
        .collect::<String>()
        .to_uppercase();

    vec![
        ProductAlternative {
            name: format!("Premium {query}"),
            sku: format!("PREM-{tag}"),
            price: Money::from_cents(18999),
            in_stock: true,
            location: "Aisle 5".to_string(),
            aisle: 5,
            section: "A".to_string(),
        },
        ProductAlternative {
            name: format!("Standard {query}"),
            sku: format!("STD-{tag}"),
            price: Money::from_cents(8999),
            in_stock: true,
            location: "Aisle 7".to_string(),
            aisle: 7,
            section: "B".to_string(),
        },
    ]
}

/// Alternatives followed by similar products, in reported order.
pub fn alternatives_from(result: &MatchmakingResult) -> Vec<ProductAlternative> {
    result
        .alternatives
        .iter()
        .chain(result.similar_products.iter())
        .map(ProductAlternative::from)
        .collect()
}

/// Fills the blanks a navigation service may leave.
pub fn normalize_navigation(
    mut navigation: NavigationInstructions,
    start: GeoPoint,
    destination: GeoPoint,
) -> NavigationInstructions {
    if navigation.start_location.trim().is_empty() {
        navigation.start_location = format!("Entrance ({:.4}, {:.4})", start.lat, start.lon);
    }
    if navigation.estimated_time.trim().is_empty() {
        navigation.estimated_time = DEFAULT_ESTIMATED_TIME.to_string();
    }
    if navigation.steps.is_empty() {
        navigation.steps = specialists::fallback::navigation(start, destination).steps;
    }
    navigation
}

/// Readable landmarks along a route, in step order.
pub fn route_landmarks(navigation: &NavigationInstructions) -> Vec<String> {
    navigation
        .steps
        .iter()
        .filter_map(|step| step.landmark.as_ref())
        .filter_map(|landmark| landmark.display_text())
        .collect()
}
