//! FIRE Planner - Deterministic retirement projection engine
//!
//! This library provides:
//! - PF/EPS corpus and pension projections with salary-linked contributions
//! - NPS corpus, annuity split, and pension projections
//! - Taxable-investment projections net of capital-gains tax
//! - FIRE-number solving and required-investment back-solving
//! - Batch and sensitivity scenario runs

pub mod assumptions;
pub mod error;
pub mod projection;
pub mod scenario;
pub mod snapshot;

// Re-export commonly used types
pub use assumptions::{Assumptions, StatutoryLimits};
pub use error::EngineError;
pub use projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
pub use snapshot::InputSnapshot;
