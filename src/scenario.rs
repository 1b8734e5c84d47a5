//! Scenario runner for efficient batch projections
//!
//! Pre-builds assumptions once, then runs many projections with different
//! snapshots or sensitivity configs without rebuilding anything.

use rayon::prelude::*;

use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::snapshot::InputSnapshot;
use crate::Assumptions;

/// Pre-loaded scenario runner for batch and sensitivity projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// for shift in [-1.0, 0.0, 1.0] {
///     let config = ProjectionConfig { return_shift: shift, ..Default::default() };
///     let result = runner.run(&snapshot, config)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-built base assumptions
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with the statutory default assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default_statutory(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Run a single projection with the given config
    pub fn run(
        &self,
        snapshot: &InputSnapshot,
        config: ProjectionConfig,
    ) -> Result<ProjectionResult> {
        let engine = ProjectionEngine::new(self.base_assumptions.clone(), config);
        engine.project(snapshot)
    }

    /// Run projections for multiple snapshots with the same config
    ///
    /// Snapshots project in parallel; results come back in input order and
    /// each carries its own validation outcome.
    pub fn run_batch(
        &self,
        snapshots: &[InputSnapshot],
        config: ProjectionConfig,
    ) -> Vec<Result<ProjectionResult>> {
        snapshots
            .par_iter()
            .map(|snapshot| {
                let engine =
                    ProjectionEngine::new(self.base_assumptions.clone(), config.clone());
                engine.project(snapshot)
            })
            .collect()
    }

    /// Run multiple sensitivity configs for a single snapshot
    pub fn run_scenarios(
        &self,
        snapshot: &InputSnapshot,
        configs: &[ProjectionConfig],
    ) -> Vec<Result<ProjectionResult>> {
        configs
            .iter()
            .map(|config| {
                let engine =
                    ProjectionEngine::new(self.base_assumptions.clone(), config.clone());
                engine.project(snapshot)
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection/modification
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
