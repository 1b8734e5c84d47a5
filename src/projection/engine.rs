//! Core projection engine: one snapshot in, one fully derived result out

use log::debug;

use crate::assumptions::Assumptions;
use crate::error::{EngineError, Result};
use crate::snapshot::InputSnapshot;

use super::compound::{accumulate_salary_linked, future_value, present_value};
use super::fire::{allocate_shortfall, expense_schedule, fire_number};
use super::growth::{average_capped_salary, salary_at_year};
use super::result::ProjectionResult;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Whether to retain the per-age expense schedule in the result
    pub detailed_output: bool,

    /// Parallel shift (percentage points) applied to every return rate,
    /// for sensitivity runs
    pub return_shift: f64,

    /// Shift (percentage points) applied to the inflation rate
    pub inflation_shift: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
            return_shift: 0.0,
            inflation_shift: 0.0,
        }
    }
}

/// Rates actually used in a run, after sensitivity shifts
#[derive(Debug, Clone, Copy)]
struct EffectiveRates {
    growth: f64,
    inflation: f64,
    pf: f64,
    nps: f64,
    annuity: f64,
    other: f64,
}

impl EffectiveRates {
    fn from_snapshot(snapshot: &InputSnapshot, config: &ProjectionConfig) -> Self {
        Self {
            growth: snapshot.growth_rate,
            inflation: snapshot.inflation_rate + config.inflation_shift,
            pf: snapshot.pf_return + config.return_shift,
            nps: snapshot.nps_return + config.return_shift,
            annuity: snapshot.annuity_return + config.return_shift,
            other: snapshot.other_return + config.return_shift,
        }
    }
}

/// Main projection engine
///
/// Stateless and deterministic: `project` is a pure function of the
/// snapshot, the assumptions, and the config. Projecting the same snapshot
/// twice yields bit-identical results.
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self {
            assumptions,
            config,
        }
    }

    /// Run the full projection for a single snapshot
    pub fn project(&self, snapshot: &InputSnapshot) -> Result<ProjectionResult> {
        snapshot.validate()?;

        let limits = &self.assumptions.statutory;
        let rates = EffectiveRates::from_snapshot(snapshot, &self.config);
        let years = snapshot.years_of_service();
        let retirement_age = snapshot.retirement_age();

        let salary_at_retirement = salary_at_year(snapshot.current_salary, rates.growth, years);
        let pensionable_salary =
            average_capped_salary(salary_at_retirement, rates.growth, limits);

        // PF/EPS: contribution bases grow with salary, so both accumulate
        // year by year rather than through one closed-form annuity
        let pf_pension_fund = accumulate_salary_linked(0.0, years, rates.pf, |year| {
            let salary = salary_at_year(snapshot.current_salary, rates.growth, year as f64);
            limits.eps_monthly_contribution(salary)
        })
        .ceil();

        let pf_corpus = accumulate_salary_linked(
            snapshot.current_pf_balance,
            years,
            rates.pf,
            |year| {
                let salary = salary_at_year(snapshot.current_salary, rates.growth, year as f64);
                salary * snapshot.pf_contribution_rate * 2.0
                    - limits.eps_monthly_contribution(salary)
            },
        )
        .ceil();

        let eps_pension =
            (pensionable_salary * years / limits.eps_pension_divisor).ceil();

        // NPS: level contribution, closed-form annuity, then the
        // annuity/lump-sum split at maturity
        let nps_corpus = future_value(
            0.0,
            snapshot.nps_monthly_contribution * 12.0,
            rates.nps,
            years,
        )
        .ceil();
        let nps_annuity_corpus = (nps_corpus * snapshot.nps_annuity_share).ceil();
        let nps_lump_sum = (nps_corpus * (1.0 - snapshot.nps_annuity_share)).ceil();
        let nps_pension = (nps_annuity_corpus * rates.annuity / 100.0 / 12.0).ceil();

        // Taxable channel: explicit zero short-circuit, then the
        // capital-gains haircut before aggregation
        let gross_other = self.other_investment_corpus(
            snapshot.monthly_other_investment,
            rates.other,
            years,
        );
        let capital_gain_tax = gross_other * snapshot.capital_gain_tax_rate / 100.0;
        let other_investment_corpus = gross_other - capital_gain_tax;

        let total_lump_sum = (pf_corpus + nps_lump_sum + other_investment_corpus).ceil();
        let total_pension = (eps_pension + nps_pension).ceil();
        let total_lump_sum_present =
            present_value(total_lump_sum, rates.inflation, years).ceil();
        let total_pension_present =
            (present_value(total_pension * 12.0, rates.inflation, years) / 12.0).ceil();

        let required_monthly_expense = (snapshot.current_expense
            * (1.0 + rates.inflation / 100.0).powf(years)
            * snapshot.expense_factor)
            .ceil();
        let pension_shortfall = required_monthly_expense - total_pension;

        let schedule = expense_schedule(
            required_monthly_expense * 12.0,
            rates.inflation,
            retirement_age,
            snapshot.life_expectancy,
        );
        let fire = fire_number(&schedule, rates.annuity, retirement_age);
        let corpus_shortfall = fire - total_lump_sum;

        let nps_room = (limits.nps_monthly_room(snapshot.full_salary)
            - snapshot.nps_monthly_contribution)
            .max(0.0);
        let funding = allocate_shortfall(
            corpus_shortfall,
            years,
            rates.nps,
            rates.other,
            snapshot.capital_gain_tax_rate,
            nps_room,
        );

        debug!(
            "projected {:.2}y of service: corpus {:.0}, fire number {:.0}",
            years, total_lump_sum, fire
        );

        let result = ProjectionResult {
            years_of_service: years,
            retirement_age,
            salary_at_retirement,
            pensionable_salary,
            pf_pension_fund,
            pf_corpus,
            nps_corpus,
            nps_annuity_corpus,
            nps_lump_sum,
            other_investment_corpus,
            capital_gain_tax,
            total_lump_sum,
            total_lump_sum_present,
            eps_pension,
            nps_pension,
            total_pension,
            total_pension_present,
            required_monthly_expense,
            pension_shortfall,
            fire_number: fire,
            corpus_shortfall,
            required_nps_investment: funding.nps_monthly,
            required_other_investment: funding.other_monthly,
            expense_schedule: if self.config.detailed_output {
                schedule
            } else {
                Vec::new()
            },
        };

        check_finite(&result)?;
        Ok(result)
    }

    /// Gross taxable-investment corpus at retirement
    ///
    /// Returns 0 outright when the contribution, the return, or the horizon
    /// is zero; the zero cases are contract, not an algebraic accident.
    fn other_investment_corpus(&self, monthly: f64, return_pct: f64, years: f64) -> f64 {
        if monthly == 0.0 || return_pct == 0.0 || years == 0.0 {
            return 0.0;
        }
        future_value(0.0, monthly * 12.0, return_pct, years).ceil()
    }
}

/// Reject any projection that produced a non-finite figure
fn check_finite(result: &ProjectionResult) -> Result<()> {
    let fields: [(&'static str, f64); 20] = [
        ("years_of_service", result.years_of_service),
        ("salary_at_retirement", result.salary_at_retirement),
        ("pensionable_salary", result.pensionable_salary),
        ("pf_pension_fund", result.pf_pension_fund),
        ("pf_corpus", result.pf_corpus),
        ("nps_corpus", result.nps_corpus),
        ("nps_annuity_corpus", result.nps_annuity_corpus),
        ("nps_lump_sum", result.nps_lump_sum),
        ("other_investment_corpus", result.other_investment_corpus),
        ("capital_gain_tax", result.capital_gain_tax),
        ("total_lump_sum", result.total_lump_sum),
        ("total_lump_sum_present", result.total_lump_sum_present),
        ("eps_pension", result.eps_pension),
        ("nps_pension", result.nps_pension),
        ("total_pension", result.total_pension),
        ("total_pension_present", result.total_pension_present),
        ("required_monthly_expense", result.required_monthly_expense),
        ("fire_number", result.fire_number),
        ("required_nps_investment", result.required_nps_investment),
        ("required_other_investment", result.required_other_investment),
    ];

    for (field, value) in fields {
        if !value.is_finite() {
            return Err(EngineError::NonFinite { field });
        }
    }
    for row in &result.expense_schedule {
        if !row.annual_expense.is_finite() {
            return Err(EngineError::NonFinite {
                field: "expense_schedule",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::compound::required_monthly_investment;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn test_snapshot() -> InputSnapshot {
        InputSnapshot {
            entry_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            exit_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            date_of_birth: NaiveDate::from_ymd_opt(1964, 1, 1).unwrap(),
            current_salary: 15_000.0,
            full_salary: 50_000.0,
            current_expense: 30_000.0,
            growth_rate: 0.0,
            inflation_rate: 0.0,
            pf_return: 8.25,
            nps_return: 8.25,
            annuity_return: 6.0,
            other_return: 10.0,
            capital_gain_tax_rate: 10.0,
            pf_contribution_rate: 0.12,
            nps_annuity_share: 0.4,
            expense_factor: 1.0,
            current_pf_balance: 50_000.0,
            monthly_other_investment: 1_000.0,
            nps_monthly_contribution: 1_000.0,
            life_expectancy: 85,
        }
    }

    fn engine() -> ProjectionEngine {
        ProjectionEngine::new(Assumptions::default_statutory(), ProjectionConfig::default())
    }

    #[test]
    fn test_flat_salary_regression_fixture() {
        // Zero growth, zero inflation, 24 years at 8.25%: unroll the yearly
        // crediting by hand. Each year credits the balance and adds the
        // year's annualized contribution.
        let result = engine().project(&test_snapshot()).unwrap();

        let eps_monthly = 15_000.0_f64.min(15_000.0) * 0.0833; // 1249.5
        let mut expected_pension_fund = 0.0;
        for _ in 0..24 {
            expected_pension_fund = expected_pension_fund * 1.0825 + eps_monthly * 12.0;
        }
        assert_relative_eq!(
            result.pf_pension_fund,
            expected_pension_fund.ceil(),
            epsilon = 1e-9
        );

        let pf_monthly = 15_000.0 * 0.12 * 2.0 - eps_monthly; // 2350.5
        let mut expected_corpus = 50_000.0;
        for _ in 0..24 {
            expected_corpus = expected_corpus * 1.0825 + pf_monthly * 12.0;
        }
        assert_relative_eq!(result.pf_corpus, expected_corpus.ceil(), epsilon = 1e-9);

        // Flat salary sits exactly at the ceiling
        assert_relative_eq!(result.pensionable_salary, 15_000.0, epsilon = 1e-9);
        assert_relative_eq!(
            result.eps_pension,
            (15_000.0 * result.years_of_service / 70.0).ceil(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_nps_split_and_pension() {
        let result = engine().project(&test_snapshot()).unwrap();

        let corpus = future_value(0.0, 12_000.0, 8.25, result.years_of_service).ceil();
        assert_relative_eq!(result.nps_corpus, corpus, epsilon = 1e-9);
        assert_relative_eq!(result.nps_annuity_corpus, (corpus * 0.4).ceil(), epsilon = 1e-9);
        assert_relative_eq!(result.nps_lump_sum, (corpus * 0.6).ceil(), epsilon = 1e-9);
        assert_relative_eq!(
            result.nps_pension,
            (result.nps_annuity_corpus * 0.06 / 12.0).ceil(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_capital_gains_haircut_applied_before_aggregation() {
        let result = engine().project(&test_snapshot()).unwrap();

        let gross = future_value(0.0, 12_000.0, 10.0, result.years_of_service).ceil();
        assert_relative_eq!(result.capital_gain_tax, gross * 0.10, epsilon = 1e-9);
        assert_relative_eq!(
            result.other_investment_corpus,
            gross * 0.90,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.total_lump_sum,
            (result.pf_corpus + result.nps_lump_sum + result.other_investment_corpus).ceil(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_contribution_short_circuits_taxable_corpus() {
        let mut snapshot = test_snapshot();
        snapshot.monthly_other_investment = 0.0;
        let result = engine().project(&snapshot).unwrap();
        assert_relative_eq!(result.other_investment_corpus, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.capital_gain_tax, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_inflation_present_values_equal_future_values() {
        let result = engine().project(&test_snapshot()).unwrap();
        assert_relative_eq!(
            result.total_lump_sum_present,
            result.total_lump_sum,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.total_pension_present,
            result.total_pension,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_expense_schedule_spans_retirement_horizon() {
        let result = engine().project(&test_snapshot()).unwrap();
        // Born 1964, exits start of 2024 at age 60; horizon 85
        assert_eq!(result.retirement_age, 60);
        assert_eq!(result.expense_schedule.len(), 26);
        assert_eq!(result.expense_schedule[0].age, 60);
        assert_relative_eq!(
            result.expense_schedule[0].annual_expense,
            result.required_monthly_expense * 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_summary_only_run_drops_schedule() {
        let config = ProjectionConfig {
            detailed_output: false,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(Assumptions::default_statutory(), config);
        let result = engine.project(&test_snapshot()).unwrap();
        assert!(result.expense_schedule.is_empty());
        assert!(result.fire_number > 0.0);
    }

    #[test]
    fn test_shortfall_waterfall_with_binding_nps_room() {
        // Inflate expenses until the fire number dwarfs the corpus, so the
        // tax-advantaged room binds and the taxable channel takes the rest
        let mut snapshot = test_snapshot();
        snapshot.current_expense = 300_000.0;
        snapshot.inflation_rate = 6.0;

        let result = engine().project(&snapshot).unwrap();
        assert!(result.corpus_shortfall > 0.0);

        // Room: min(50000 * 10%, 150000/12) + 50000/12, net of the existing
        // 1000/month contribution
        let room = 5_000.0 + 50_000.0 / 12.0 - 1_000.0;
        assert_relative_eq!(result.required_nps_investment, room, epsilon = 1e-9);

        let covered = future_value(0.0, room * 12.0, 8.25, result.years_of_service);
        let grossed = (result.corpus_shortfall - covered) / 0.9;
        assert_relative_eq!(
            result.required_other_investment,
            required_monthly_investment(grossed, result.years_of_service, 10.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_surplus_requires_no_extra_investment() {
        let mut snapshot = test_snapshot();
        snapshot.current_expense = 100.0;
        let result = engine().project(&snapshot).unwrap();
        assert!(result.is_funded());
        assert_relative_eq!(result.required_nps_investment, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.required_other_investment, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let snapshot = test_snapshot();
        let engine = engine();
        let first = engine.project(&snapshot).unwrap();
        let second = engine.project(&snapshot).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_return_shift_raises_corpus() {
        let snapshot = test_snapshot();
        let base = engine().project(&snapshot).unwrap();

        let shifted_engine = ProjectionEngine::new(
            Assumptions::default_statutory(),
            ProjectionConfig {
                return_shift: 1.0,
                ..Default::default()
            },
        );
        let shifted = shifted_engine.project(&snapshot).unwrap();
        assert!(shifted.total_lump_sum > base.total_lump_sum);
    }

    #[test]
    fn test_invalid_snapshot_is_rejected_before_projecting() {
        let mut snapshot = test_snapshot();
        snapshot.exit_date = snapshot.entry_date;
        assert!(matches!(
            engine().project(&snapshot),
            Err(EngineError::InvalidDateRange { .. })
        ));
    }
}
