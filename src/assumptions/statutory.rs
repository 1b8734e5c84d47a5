//! Statutory scheme parameters: EPS wage ceiling, contribution split,
//! pension formula divisor, and NPS tax-deduction room

use serde::{Deserialize, Serialize};

/// Statutory limits and rates shared by all scheme projections
///
/// Values match the EPF/EPS and NPS rules in force; everything the engine
/// caps or splits reads from here rather than hard-coding the number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatutoryLimits {
    /// Monthly wage ceiling for EPS purposes (pensionable salary cap)
    pub eps_wage_ceiling: f64,

    /// Share of capped wages diverted to EPS (8.33%)
    pub eps_contribution_rate: f64,

    /// Divisor in the EPS pension formula: pensionable salary * service / 70
    pub eps_pension_divisor: f64,

    /// Months averaged for pensionable salary (last 5 years of service)
    pub averaging_months: u32,

    /// NPS deduction limit as a share of salary (Section 80CCD(1))
    pub nps_salary_deduction_rate: f64,

    /// Overall Section 80C annual deduction limit
    pub section_80c_annual_limit: f64,

    /// Additional NPS-only annual deduction limit (Section 80CCD(1B))
    pub section_80ccd1b_annual_limit: f64,

    /// Age at which the default exit date lands (DOB + this many years)
    pub pension_commencement_age: u32,
}

impl StatutoryLimits {
    /// Monthly tax-advantaged NPS contribution room for a given gross
    /// monthly salary: min(salary * 10%, 150000/12) + 50000/12
    pub fn nps_monthly_room(&self, monthly_salary: f64) -> f64 {
        let section_80c = (monthly_salary * self.nps_salary_deduction_rate)
            .min(self.section_80c_annual_limit / 12.0);
        section_80c + self.section_80ccd1b_annual_limit / 12.0
    }

    /// EPS monthly contribution for a given monthly salary, capped at the
    /// wage ceiling
    pub fn eps_monthly_contribution(&self, monthly_salary: f64) -> f64 {
        monthly_salary.min(self.eps_wage_ceiling) * self.eps_contribution_rate
    }
}

impl Default for StatutoryLimits {
    fn default() -> Self {
        Self {
            eps_wage_ceiling: 15_000.0,
            eps_contribution_rate: 0.0833,
            eps_pension_divisor: 70.0,
            averaging_months: 60,
            nps_salary_deduction_rate: 0.10,
            section_80c_annual_limit: 150_000.0,
            section_80ccd1b_annual_limit: 50_000.0,
            pension_commencement_age: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eps_contribution_respects_ceiling() {
        let limits = StatutoryLimits::default();

        // Below the ceiling: full wage is pensionable
        assert!((limits.eps_monthly_contribution(10_000.0) - 833.0).abs() < 1e-9);

        // Above the ceiling: contribution is computed on 15000
        assert!((limits.eps_monthly_contribution(50_000.0) - 1249.5).abs() < 1e-9);
    }

    #[test]
    fn test_nps_room_small_and_large_salary() {
        let limits = StatutoryLimits::default();

        // 10% of salary binds for small salaries
        let small = limits.nps_monthly_room(50_000.0);
        assert!((small - (5_000.0 + 50_000.0 / 12.0)).abs() < 1e-9);

        // 150000/12 binds for large salaries
        let large = limits.nps_monthly_room(200_000.0);
        assert!((large - (150_000.0 / 12.0 + 50_000.0 / 12.0)).abs() < 1e-9);
    }
}
