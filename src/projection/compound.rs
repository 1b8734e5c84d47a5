//! Compounding primitives: future value, present value, salary-linked
//! year-by-year accumulation, and the contribution back-solve
//!
//! One convention throughout: contributions are stated monthly, annualized
//! (x12), and credited once per year at the annual rate. The back-solve is
//! the exact algebraic inverse of `future_value` under that convention.

/// Future value of a balance plus level annual contributions
///
/// Ordinary annuity: `P(1+r)^y + C((1+r)^y - 1)/r` with `r` the annual rate
/// as a fraction. A zero rate degenerates to `P + C*y`.
pub fn future_value(
    principal: f64,
    annual_contribution: f64,
    annual_rate_pct: f64,
    years: f64,
) -> f64 {
    let r = annual_rate_pct / 100.0;
    if r.abs() < 1e-10 {
        return principal + annual_contribution * years;
    }
    let growth = (1.0 + r).powf(years);
    principal * growth + annual_contribution * ((growth - 1.0) / r)
}

/// Discount a future amount back over `years` at the given annual rate
pub fn present_value(future_value: f64, discount_rate_pct: f64, years: f64) -> f64 {
    future_value / (1.0 + discount_rate_pct / 100.0).powf(years)
}

/// Accumulate a balance year by year with a contribution re-derived each year
///
/// For schemes whose contribution base grows with salary, a single
/// multi-year `future_value` call is wrong: the contribution changes every
/// year. This compounds one year at a time, asking `monthly_contribution`
/// for year `y`'s figure and crediting `contribution * 12` at the annual
/// rate. Iterates integer years `0, 1, ..` while `y < years`, so a
/// fractional service tail gets a final full-year step, matching the
/// statutory yearly interest crediting.
pub fn accumulate_salary_linked<F>(
    initial_balance: f64,
    years: f64,
    annual_rate_pct: f64,
    monthly_contribution: F,
) -> f64
where
    F: Fn(u32) -> f64,
{
    let mut balance = initial_balance;
    let mut year = 0u32;
    while (year as f64) < years {
        let contribution = monthly_contribution(year);
        balance = future_value(balance, contribution * 12.0, annual_rate_pct, 1.0);
        year += 1;
    }
    balance
}

/// Monthly contribution needed to reach `target` in `years` at the given rate
///
/// Inverse of `future_value` with zero principal:
/// `target * r / (12 ((1+r)^y - 1))`, rounded to the paisa. A zero rate
/// degenerates to `target / (12y)`. Requires `years > 0`; callers validate
/// the date range before back-solving.
pub fn required_monthly_investment(target: f64, years: f64, annual_rate_pct: f64) -> f64 {
    let r = annual_rate_pct / 100.0;
    let monthly = if r.abs() < 1e-10 {
        target / (12.0 * years)
    } else {
        let fv_factor = (1.0 + r).powf(years);
        (target * r) / (12.0 * (fv_factor - 1.0))
    };
    (monthly * 100.0).round() / 100.0
}
