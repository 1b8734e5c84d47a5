//! FIRE-number computation and shortfall funding
//!
//! The FIRE number is the lump sum needed at retirement to fund every
//! remaining year's projected expense, each year discounted back to the
//! retirement date at the annuity return. Any gap between that number and
//! the projected corpus is funded through a two-tier waterfall:
//! tax-advantaged NPS room first, taxable investment second.

use super::compound::{future_value, present_value, required_monthly_investment};
use super::result::ExpenseRow;

/// Projected annual expense for every age from retirement to life expectancy
///
/// `annual_expense_at_retirement` is already a future value at the exit
/// date; each later year compounds it by another year of inflation. Ages
/// are inclusive on both ends, so a 60..85 horizon yields 26 rows.
pub fn expense_schedule(
    annual_expense_at_retirement: f64,
    inflation_rate_pct: f64,
    retirement_age: u32,
    life_expectancy: u32,
) -> Vec<ExpenseRow> {
    (retirement_age..=life_expectancy)
        .map(|age| ExpenseRow {
            age,
            annual_expense: annual_expense_at_retirement
                * (1.0 + inflation_rate_pct / 100.0).powi((age - retirement_age) as i32),
        })
        .collect()
}

/// Lump sum at retirement that funds the whole expense schedule
///
/// Folds the schedule from the last age backward, accumulating each year's
/// expense discounted by exactly `age - retirement_age` years at the
/// annuity return. The per-term exponent matters: telescoping the discount
/// into a running factor drifts away from this total.
pub fn fire_number(schedule: &[ExpenseRow], annuity_return_pct: f64, retirement_age: u32) -> f64 {
    schedule.iter().rev().fold(0.0, |total, row| {
        total
            + present_value(
                row.annual_expense,
                annuity_return_pct,
                (row.age - retirement_age) as f64,
            )
    })
}

/// Monthly investments that close a corpus shortfall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortfallFunding {
    /// Additional monthly NPS contribution (within the tax-advantaged room)
    pub nps_monthly: f64,

    /// Additional monthly taxable investment covering the rest
    pub other_monthly: f64,
}

impl ShortfallFunding {
    pub fn none() -> Self {
        Self {
            nps_monthly: 0.0,
            other_monthly: 0.0,
        }
    }
}

/// Allocate a corpus shortfall across the two investment channels
///
/// Tries NPS first. If the required contribution fits inside
/// `nps_room_monthly` (the remaining tax-advantaged room), the whole
/// shortfall is funded there. Otherwise NPS is pinned to the room, the
/// future value that capped contribution buys is subtracted, and the
/// residual target, grossed up for the capital-gains tax the taxable
/// corpus will bear, is back-solved at the taxable return.
pub fn allocate_shortfall(
    corpus_shortfall: f64,
    years: f64,
    nps_return_pct: f64,
    other_return_pct: f64,
    capital_gain_tax_rate_pct: f64,
    nps_room_monthly: f64,
) -> ShortfallFunding {
    if corpus_shortfall <= 0.0 {
        return ShortfallFunding::none();
    }

    let needed_nps = required_monthly_investment(corpus_shortfall, years, nps_return_pct);
    if needed_nps <= nps_room_monthly {
        return ShortfallFunding {
            nps_monthly: needed_nps,
            other_monthly: 0.0,
        };
    }

    let covered_by_nps = future_value(0.0, nps_room_monthly * 12.0, nps_return_pct, years);
    let residual = corpus_shortfall - covered_by_nps;
    let grossed_up = residual / (1.0 - capital_gain_tax_rate_pct / 100.0);

    ShortfallFunding {
        nps_monthly: nps_room_monthly,
        other_monthly: required_monthly_investment(grossed_up, years, other_return_pct),
    }
}
