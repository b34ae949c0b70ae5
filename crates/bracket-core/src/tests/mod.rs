//! Cross-module tests for the bracket engine.
//!
//! # Test Structure
//!
//! - `integration.rs`: Full tournaments per format, driven through the controller
//! - `determinism.rs`: Same roster, config and seed give identical state
//! - `properties.rs`: Property tests over roster sizes and result sequences
//! - `helpers.rs`: Roster factories and a play-out driver

mod helpers;
mod properties;

// Re-export for convenience
pub use helpers::*;
