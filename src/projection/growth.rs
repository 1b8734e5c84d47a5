//! Time and salary primitives: service duration, salary growth, and the
//! capped pensionable-salary average

use chrono::NaiveDate;

use crate::assumptions::StatutoryLimits;

/// Fractional years between two dates, using a 365.25-day year
///
/// Signed: negative when `end` precedes `start`. Snapshot validation
/// rejects reversed ranges before any projection runs on them.
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let days = end.signed_duration_since(start).num_days() as f64;
    days / 365.25
}

/// Salary after `years_elapsed` years of compound growth
///
/// Supports fractional years; a zero growth rate returns the base unchanged.
pub fn salary_at_year(base: f64, growth_rate_pct: f64, years_elapsed: f64) -> f64 {
    base * (1.0 + growth_rate_pct / 100.0).powf(years_elapsed)
}

/// Average capped salary over the last 60 months of service
///
/// Walks backward month by month from the salary at retirement, discounting
/// by the monthly-equivalent growth rate, capping each month at the EPS wage
/// ceiling, and averaging. This is the pensionable salary of the EPS
/// formula: the mean of the final five years' capped wages.
pub fn average_capped_salary(
    salary_at_retirement: f64,
    growth_rate_pct: f64,
    limits: &StatutoryLimits,
) -> f64 {
    let months = limits.averaging_months;
    let mut total = 0.0;
    for n in 0..months {
        let month_salary = if growth_rate_pct == 0.0 {
            salary_at_retirement
        } else {
            salary_at_retirement * (1.0 + growth_rate_pct / 100.0).powf(-(n as f64) / 12.0)
        };
        total += month_salary.min(limits.eps_wage_ceiling);
    }
    total / months as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    #[test]
    fn test_years_between_whole_years() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!((years_between(start, end) - 24.0).abs() < 0.01);
    }

    #[test]
    fn test_years_between_signed() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(years_between(start, end) < 0.0);
    }

    #[test]
    fn test_salary_growth_compounds() {
        let salary = salary_at_year(20_000.0, 4.0, 24.0);
        assert!((salary - 20_000.0 * 1.04f64.powi(24)).abs() < 1e-6);
    }

    #[test]
    fn test_salary_growth_zero_rate() {
        assert!((salary_at_year(20_000.0, 0.0, 24.0) - 20_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_flat_salary_below_ceiling() {
        let limits = StatutoryLimits::default();
        // Zero growth below the ceiling: every month equals the base
        let avg = average_capped_salary(12_000.0, 0.0, &limits);
        assert!((avg - 12_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_hits_ceiling_for_high_salary() {
        let limits = StatutoryLimits::default();
        // 20000 discounted back 60 months at 4% never drops below 15000
        let avg = average_capped_salary(20_000.0, 4.0, &limits);
        assert!((avg - 15_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_mixes_capped_and_uncapped_months() {
        let limits = StatutoryLimits::default();
        let avg = average_capped_salary(15_500.0, 10.0, &limits);
        // Early months are capped, later (discounted) months fall below
        assert!(avg < 15_000.0);
        assert!(avg > 12_000.0);
    }

    proptest! {
        #[test]
        fn prop_average_never_exceeds_ceiling(
            salary in 0u32..10_000_000,
            growth_bp in 0u32..3_000
        ) {
            let limits = StatutoryLimits::default();
            let avg = average_capped_salary(salary as f64, growth_bp as f64 / 100.0, &limits);
            prop_assert!(avg <= limits.eps_wage_ceiling + 1e-9);
            prop_assert!(avg >= 0.0);
        }
    }
}
