//! Field resolution
//!
//! - `selector`: picks one strategy per field at schema build time
//! - `strategy`: the frozen, callable strategies invoked per request

pub mod selector;
pub mod strategy;

pub use selector::StrategySelector;
pub use strategy::{ResolutionStrategy, StrategyKind};
