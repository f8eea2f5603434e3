//! Shared value types used by the specialist clients and the orchestration engine.

pub mod money;
pub mod types;

pub use money::{InvalidAmount, Money};
pub use types::{GeoPoint, OrchestrationId};
