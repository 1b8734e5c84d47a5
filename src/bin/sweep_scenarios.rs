//! Sensitivity sweep over return and inflation shifts
//!
//! Projects one snapshot across a grid of parallel rate shifts and writes
//! the outcomes to CSV for comparison.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use fire_planner::snapshot::load_snapshot_json;
use fire_planner::{ProjectionConfig, ScenarioRunner};

fn main() -> Result<()> {
    env_logger::init();

    let snapshot_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "snapshot.json".to_string());
    let output_path = env::args()
        .nth(2)
        .unwrap_or_else(|| "sweep_output.csv".to_string());

    let start = Instant::now();
    println!("Loading snapshot from {snapshot_path}...");
    let snapshot = load_snapshot_json(&snapshot_path)?;

    // -2% to +2% return shifts crossed with 0 to +2% inflation shifts
    let return_shifts = [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0];
    let inflation_shifts = [0.0, 0.5, 1.0, 2.0];

    let mut configs = Vec::new();
    for &return_shift in &return_shifts {
        for &inflation_shift in &inflation_shifts {
            configs.push(ProjectionConfig {
                detailed_output: false,
                return_shift,
                inflation_shift,
            });
        }
    }

    println!("Running {} scenarios...", configs.len());
    let proj_start = Instant::now();

    let runner = ScenarioRunner::new();
    let results: Vec<_> = configs
        .par_iter()
        .map(|config| runner.run(&snapshot, config.clone()))
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut file = File::create(&output_path)
        .with_context(|| format!("failed to create {output_path}"))?;
    writeln!(
        file,
        "ReturnShift,InflationShift,TotalLumpSum,TotalPension,FireNumber,CorpusShortfall,RequiredNps,RequiredOther"
    )?;

    let mut failures = 0usize;
    for (config, result) in configs.iter().zip(&results) {
        match result {
            Ok(r) => writeln!(
                file,
                "{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
                config.return_shift,
                config.inflation_shift,
                r.total_lump_sum,
                r.total_pension,
                r.fire_number,
                r.corpus_shortfall,
                r.required_nps_investment,
                r.required_other_investment,
            )?,
            Err(e) => {
                failures += 1;
                eprintln!(
                    "scenario (return {:+.2}, inflation {:+.2}) failed: {e}",
                    config.return_shift, config.inflation_shift
                );
            }
        }
    }

    println!("Output written to {output_path}");
    if failures > 0 {
        println!("{failures} scenarios failed");
    }

    // Print the base scenario for a quick sanity check
    if let Some(Ok(base)) = configs
        .iter()
        .zip(&results)
        .find(|(c, _)| c.return_shift == 0.0 && c.inflation_shift == 0.0)
        .map(|(_, r)| r.as_ref())
    {
        let summary = base.summary();
        println!("\nBase Scenario:");
        println!("  Total Lump Sum:  {:.0}", summary.total_lump_sum);
        println!("  Total Pension:   {:.0}", summary.total_pension);
        println!("  FIRE Number:     {:.0}", summary.fire_number);
        println!("  Shortfall:       {:.0}", summary.corpus_shortfall);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
