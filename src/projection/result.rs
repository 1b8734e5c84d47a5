//! Projection output structures

use serde::{Deserialize, Serialize};

/// One year of the retirement expense schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// Attained age at the start of the year
    pub age: u32,

    /// Projected annual expense for that year (future value)
    pub annual_expense: f64,
}

/// Complete projection result
///
/// Monetary figures are future values at the exit date unless named
/// `*_present`. Pension figures are monthly amounts. Recomputed in full on
/// every run; nothing here is incremental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    // Timing
    pub years_of_service: f64,
    pub retirement_age: u32,

    // Salary figures
    pub salary_at_retirement: f64,
    pub pensionable_salary: f64,

    // Lump-sum corpora
    pub pf_pension_fund: f64,
    pub pf_corpus: f64,
    pub nps_corpus: f64,
    pub nps_annuity_corpus: f64,
    pub nps_lump_sum: f64,
    pub other_investment_corpus: f64,
    pub capital_gain_tax: f64,
    pub total_lump_sum: f64,
    pub total_lump_sum_present: f64,

    // Monthly pensions
    pub eps_pension: f64,
    pub nps_pension: f64,
    pub total_pension: f64,
    pub total_pension_present: f64,

    // Retirement funding
    pub required_monthly_expense: f64,
    pub pension_shortfall: f64,
    pub fire_number: f64,
    pub corpus_shortfall: f64,
    pub required_nps_investment: f64,
    pub required_other_investment: f64,

    /// Per-age expense projection from retirement to life expectancy;
    /// empty when the projection ran without detailed output
    pub expense_schedule: Vec<ExpenseRow>,
}

impl ProjectionResult {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        ProjectionSummary {
            years_of_service: self.years_of_service,
            retirement_age: self.retirement_age,
            total_lump_sum: self.total_lump_sum,
            total_pension: self.total_pension,
            fire_number: self.fire_number,
            corpus_shortfall: self.corpus_shortfall,
            required_nps_investment: self.required_nps_investment,
            required_other_investment: self.required_other_investment,
        }
    }

    /// Whether the projected corpus covers the FIRE number
    pub fn is_funded(&self) -> bool {
        self.corpus_shortfall <= 0.0
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years_of_service: f64,
    pub retirement_age: u32,
    pub total_lump_sum: f64,
    pub total_pension: f64,
    pub fire_number: f64,
    pub corpus_shortfall: f64,
    pub required_nps_investment: f64,
    pub required_other_investment: f64,
}
