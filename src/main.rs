//! FIRE Planner CLI
//!
//! Command-line interface for running retirement projections

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use fire_planner::snapshot::load_snapshot_json;
use fire_planner::{Assumptions, InputSnapshot, ProjectionConfig, ProjectionEngine};

#[derive(Debug, Parser)]
#[command(name = "fire_planner", about = "Retirement/FIRE projection engine")]
struct Args {
    /// Snapshot JSON file; built-in defaults are used when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Valuation date anchoring the default snapshot (YYYY-MM-DD);
    /// today when omitted
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Print every intermediate figure with two decimals
    #[arg(long)]
    debug: bool,

    /// Write the expense schedule to this CSV path
    #[arg(long)]
    schedule_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let snapshot = match &args.input {
        Some(path) => load_snapshot_json(path)?,
        None => {
            let as_of = args
                .as_of
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            InputSnapshot::with_defaults(as_of)
        }
    };

    let engine = ProjectionEngine::new(Assumptions::default_statutory(), ProjectionConfig::default());
    let result = engine.project(&snapshot).context("projection failed")?;

    println!("FIRE Planner v0.1.0");
    println!("===================\n");

    println!("Service: {:.2} years, retiring at age {}", result.years_of_service, result.retirement_age);
    println!();

    println!("Lump Sum");
    println!("  PF Corpus:                {:>14.0}", result.pf_corpus);
    println!("  NPS Lump Sum:             {:>14.0}", result.nps_lump_sum);
    println!("  Other Investment Corpus:  {:>14.0}", result.other_investment_corpus);
    println!("  Capital Gain Tax:         {:>14.0}", result.capital_gain_tax);
    println!("  Total Lump Sum:           {:>14.0}", result.total_lump_sum);
    println!("  Present Value:            {:>14.0}", result.total_lump_sum_present);
    println!();

    println!("Pension (monthly)");
    println!("  EPS Pension:              {:>14.0}", result.eps_pension);
    println!("  NPS Pension:              {:>14.0}", result.nps_pension);
    println!("  Total Pension:            {:>14.0}", result.total_pension);
    println!("  Present Value:            {:>14.0}", result.total_pension_present);
    println!();

    println!("Retirement Funding");
    println!("  Future Salary:            {:>14.0}", result.salary_at_retirement);
    println!("  Required Monthly Expense: {:>14.0}", result.required_monthly_expense);
    println!("  FIRE Number:              {:>14.0}", result.fire_number);
    if result.is_funded() {
        println!("  Surplus:                  {:>14.0}", -result.corpus_shortfall);
    } else {
        println!("  Shortfall:                {:>14.0}", result.corpus_shortfall);
        println!("  Required NPS Investment:  {:>14.2}", result.required_nps_investment);
        println!("  Required Other Investment:{:>14.2}", result.required_other_investment);
    }

    if args.debug {
        println!("\nBehind the Scenes");
        println!("  Years of Service:          {:.2}", result.years_of_service);
        println!("  Pensionable Salary:        {:.2}", result.pensionable_salary);
        println!("  Salary at Retirement:      {:.2}", result.salary_at_retirement);
        println!("  PF Pension Fund:           {:.2}", result.pf_pension_fund);
        println!("  PF Corpus:                 {:.2}", result.pf_corpus);
        println!("  NPS Corpus:                {:.2}", result.nps_corpus);
        println!("  NPS Annuity Corpus:        {:.2}", result.nps_annuity_corpus);
        println!("  NPS Lump Sum:              {:.2}", result.nps_lump_sum);
        println!("  NPS Pension:               {:.2}", result.nps_pension);
        println!("  EPS Pension:               {:.2}", result.eps_pension);
        println!("  Other Investment Corpus:   {:.2}", result.other_investment_corpus);
        println!("  Capital Gain Tax:          {:.2}", result.capital_gain_tax);
        println!("  Total Lump Sum:            {:.2}", result.total_lump_sum);
        println!("  Total Pension:             {:.2}", result.total_pension);
        println!("  PV of Total Lump Sum:      {:.2}", result.total_lump_sum_present);
        println!("  PV of Total Pension:       {:.2}", result.total_pension_present);
        println!("  Required Monthly Expense:  {:.2}", result.required_monthly_expense);
        println!("  Pension Shortfall:         {:.2}", result.pension_shortfall);
        println!("  FIRE Number:               {:.2}", result.fire_number);
        println!("  Corpus Shortfall:          {:.2}", result.corpus_shortfall);
        println!("  Required NPS Investment:   {:.2}", result.required_nps_investment);
        println!("  Required Other Investment: {:.2}", result.required_other_investment);
    }

    if !result.expense_schedule.is_empty() {
        println!("\nExpense Schedule (first 5 of {} years):", result.expense_schedule.len());
        println!("{:>5} {:>16}", "Age", "Annual Expense");
        for row in result.expense_schedule.iter().take(5) {
            println!("{:>5} {:>16.0}", row.age, row.annual_expense);
        }
    }

    if let Some(path) = &args.schedule_csv {
        let mut file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        writeln!(file, "Age,AnnualExpense")?;
        for row in &result.expense_schedule {
            writeln!(file, "{},{:.2}", row.age, row.annual_expense)?;
        }
        println!("\nExpense schedule written to: {}", path.display());
    }

    Ok(())
}
