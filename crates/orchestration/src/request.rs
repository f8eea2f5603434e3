//! Inbound request model and strategy selection.

use std::str::FromStr;

use common::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::error::OrchestrationError;

/// The five coordination strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    #[default]
    Sequential,
    Concurrent,
    Handoff,
    GroupChat,
    Magentic,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Sequential,
        StrategyKind::Concurrent,
        StrategyKind::Handoff,
        StrategyKind::GroupChat,
        StrategyKind::Magentic,
    ];

    /// Returns the strategy name as a string, used in logs and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Sequential => "Sequential",
            StrategyKind::Concurrent => "Concurrent",
            StrategyKind::Handoff => "Handoff",
            StrategyKind::GroupChat => "GroupChat",
            StrategyKind::Magentic => "Magentic",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = OrchestrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(StrategyKind::Sequential),
            "concurrent" => Ok(StrategyKind::Concurrent),
            "handoff" => Ok(StrategyKind::Handoff),
            "groupchat" | "group-chat" | "group_chat" => Ok(StrategyKind::GroupChat),
            "magentic" => Ok(StrategyKind::Magentic),
            other => Err(OrchestrationError::InvalidRequest(format!(
                "unknown strategy '{other}'"
            ))),
        }
    }
}

/// One user query to be answered by the specialists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub user_id: String,
    pub product_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, alias = "orchestration")]
    pub strategy: StrategyKind,
}

impl Request {
    /// Creates a Sequential request without a location.
    pub fn new(user_id: impl Into<String>, product_query: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            product_query: product_query.into(),
            location: None,
            strategy: StrategyKind::default(),
        }
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Rejects blank queries and non-finite coordinates.
    pub fn validate(&self) -> Result<(), OrchestrationError> {
        if self.product_query.trim().is_empty() {
            return Err(OrchestrationError::InvalidRequest(
                "productQuery must not be blank".to_string(),
            ));
        }

        match self.location {
            Some(location) if !location.is_finite() => {
                return Err(OrchestrationError::InvalidRequest(format!(
                    "location coordinates must be finite, got {location}"
                )));
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parsing_is_case_insensitive() {
        assert_eq!(
            "SEQUENTIAL".parse::<StrategyKind>().unwrap(),
            StrategyKind::Sequential
        );
        assert_eq!(
            "group-chat".parse::<StrategyKind>().unwrap(),
            StrategyKind::GroupChat
        );
        assert_eq!(
            "GroupChat".parse::<StrategyKind>().unwrap(),
            StrategyKind::GroupChat
        );
        assert!("round-robin".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_request_defaults_to_sequential() {
        let request: Request = serde_json::from_str(r#"{"productQuery": "drill"}"#).unwrap();
        assert_eq!(request.strategy, StrategyKind::Sequential);
        assert_eq!(request.user_id, "");
        assert!(request.location.is_none());
    }

    #[test]
    fn test_request_accepts_orchestration_alias() {
        let json = r#"{
            "userId": "u1",
            "productQuery": "drill",
            "location": {"lat": 47.6, "lon": -122.3},
            "orchestration": "Handoff"
        }"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.strategy, StrategyKind::Handoff);
        assert_eq!(request.location, Some(GeoPoint::new(47.6, -122.3)));
    }

    #[test]
    fn test_validate_rejects_blank_query() {
        let request = Request::new("u1", "   ");
        assert!(matches!(
            request.validate(),
            Err(OrchestrationError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite_location() {
        let request = Request::new("u1", "drill").with_location(GeoPoint::new(f64::NAN, 0.0));
        assert!(request.validate().is_err());

        let request = Request::new("u1", "drill").with_location(GeoPoint::new(47.6, -122.3));
        assert!(request.validate().is_ok());
    }
}
