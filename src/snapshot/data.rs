//! Input snapshot: the immutable set of values one projection runs on

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::projection::growth::years_between;

fn default_current_salary() -> f64 {
    15_000.0
}

fn default_full_salary() -> f64 {
    20_000.0
}

fn default_life_expectancy() -> u32 {
    85
}

/// All inputs to a single projection run
///
/// Constructed fresh per calculation; the engine never mutates it and never
/// reaches outside it (no clock reads, no globals). Monetary fields are
/// monthly amounts except `current_pf_balance`; rate fields are annual
/// percentages (4.0 = 4%); share fields are unit fractions (0.4 = 40%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// First day of pensionable service
    pub entry_date: NaiveDate,

    /// Retirement date (end of service)
    pub exit_date: NaiveDate,

    /// Date of birth, used for retirement age and the expense horizon
    pub date_of_birth: NaiveDate,

    /// Monthly PF wage (basic + DA), the base for PF/EPS contributions
    #[serde(default = "default_current_salary")]
    pub current_salary: f64,

    /// Gross monthly salary, the base for the NPS deduction room
    #[serde(default = "default_full_salary")]
    pub full_salary: f64,

    /// Current monthly household expense
    #[serde(default)]
    pub current_expense: f64,

    /// Annual salary growth rate (percent)
    #[serde(default)]
    pub growth_rate: f64,

    /// Annual inflation rate (percent)
    #[serde(default)]
    pub inflation_rate: f64,

    /// Annual PF/EPS fund return (percent)
    #[serde(default)]
    pub pf_return: f64,

    /// Annual NPS fund return (percent)
    #[serde(default)]
    pub nps_return: f64,

    /// Annuity conversion rate at retirement (percent)
    #[serde(default)]
    pub annuity_return: f64,

    /// Annual return on taxable "other" investments (percent)
    #[serde(default)]
    pub other_return: f64,

    /// Capital gains tax rate on the other-investment corpus (percent)
    #[serde(default)]
    pub capital_gain_tax_rate: f64,

    /// Employee PF contribution as a fraction of salary (employer matches)
    #[serde(default)]
    pub pf_contribution_rate: f64,

    /// Fraction of the NPS corpus converted to an annuity at maturity
    #[serde(default)]
    pub nps_annuity_share: f64,

    /// Lifestyle multiplier applied to the projected retirement expense
    #[serde(default)]
    pub expense_factor: f64,

    /// Accumulated PF balance as of the entry date
    #[serde(default)]
    pub current_pf_balance: f64,

    /// Current monthly taxable investment
    #[serde(default)]
    pub monthly_other_investment: f64,

    /// Current monthly NPS contribution
    #[serde(default)]
    pub nps_monthly_contribution: f64,

    /// Age the expense schedule runs to (inclusive)
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: u32,
}

impl InputSnapshot {
    /// Form-level defaults, anchored to an explicit `as_of` date
    ///
    /// `as_of` stands in for "today": service starts now and runs to the
    /// pension commencement age. The engine itself never reads the clock.
    pub fn with_defaults(as_of: NaiveDate) -> Self {
        let date_of_birth = NaiveDate::from_ymd_opt(1987, 6, 10).expect("valid reference date");
        Self {
            entry_date: as_of,
            exit_date: add_years(date_of_birth, 60),
            date_of_birth,
            current_salary: default_current_salary(),
            full_salary: default_full_salary(),
            current_expense: 0.0,
            growth_rate: 0.0,
            inflation_rate: 0.0,
            pf_return: 0.0,
            nps_return: 0.0,
            annuity_return: 0.0,
            other_return: 0.0,
            capital_gain_tax_rate: 0.0,
            pf_contribution_rate: 0.0,
            nps_annuity_share: 0.0,
            expense_factor: 0.0,
            current_pf_balance: 0.0,
            monthly_other_investment: 0.0,
            nps_monthly_contribution: 0.0,
            life_expectancy: default_life_expectancy(),
        }
    }

    /// Years of pensionable service, in fractional 365.25-day years
    pub fn years_of_service(&self) -> f64 {
        years_between(self.entry_date, self.exit_date)
    }

    /// Completed age at the exit date
    pub fn retirement_age(&self) -> u32 {
        years_between(self.date_of_birth, self.exit_date).floor().max(0.0) as u32
    }

    /// Check the snapshot is well-formed before projecting
    pub fn validate(&self) -> Result<()> {
        if self.exit_date <= self.entry_date {
            return Err(EngineError::invalid_dates(format!(
                "exit date {} is not after entry date {}",
                self.exit_date, self.entry_date
            )));
        }
        if self.exit_date <= self.date_of_birth {
            return Err(EngineError::invalid_dates(format!(
                "exit date {} is not after date of birth {}",
                self.exit_date, self.date_of_birth
            )));
        }

        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(EngineError::invalid_input(field, "must be finite"));
            }
        }

        for (field, value) in [
            ("current_salary", self.current_salary),
            ("full_salary", self.full_salary),
            ("current_expense", self.current_expense),
            ("current_pf_balance", self.current_pf_balance),
            ("monthly_other_investment", self.monthly_other_investment),
            ("nps_monthly_contribution", self.nps_monthly_contribution),
            ("expense_factor", self.expense_factor),
        ] {
            if value < 0.0 {
                return Err(EngineError::invalid_input(field, "must not be negative"));
            }
        }

        for (field, value) in [
            ("pf_contribution_rate", self.pf_contribution_rate),
            ("nps_annuity_share", self.nps_annuity_share),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EngineError::invalid_input(field, "must be a fraction in [0, 1]"));
            }
        }

        // Growth formulas need 1 + rate/100 > 0
        for (field, value) in [
            ("growth_rate", self.growth_rate),
            ("inflation_rate", self.inflation_rate),
            ("pf_return", self.pf_return),
            ("nps_return", self.nps_return),
            ("annuity_return", self.annuity_return),
            ("other_return", self.other_return),
        ] {
            if value <= -100.0 {
                return Err(EngineError::invalid_input(field, "must be above -100%"));
            }
        }

        if !(0.0..100.0).contains(&self.capital_gain_tax_rate) {
            return Err(EngineError::invalid_input(
                "capital_gain_tax_rate",
                "must be in [0, 100)",
            ));
        }

        if self.life_expectancy <= self.retirement_age() {
            return Err(EngineError::invalid_input(
                "life_expectancy",
                format!("must exceed retirement age {}", self.retirement_age()),
            ));
        }

        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 16] {
        [
            ("current_salary", self.current_salary),
            ("full_salary", self.full_salary),
            ("current_expense", self.current_expense),
            ("growth_rate", self.growth_rate),
            ("inflation_rate", self.inflation_rate),
            ("pf_return", self.pf_return),
            ("nps_return", self.nps_return),
            ("annuity_return", self.annuity_return),
            ("other_return", self.other_return),
            ("capital_gain_tax_rate", self.capital_gain_tax_rate),
            ("pf_contribution_rate", self.pf_contribution_rate),
            ("nps_annuity_share", self.nps_annuity_share),
            ("expense_factor", self.expense_factor),
            ("current_pf_balance", self.current_pf_balance),
            ("monthly_other_investment", self.monthly_other_investment),
            ("nps_monthly_contribution", self.nps_monthly_contribution),
        ]
    }
}

/// Shift a date by whole years, clamping Feb 29 to Feb 28 off leap years
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .expect("shifted date is representable")
}
