//! Load input snapshots from CSV (batch) and JSON (single)

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::Reader;
use log::info;
use std::path::Path;

use super::InputSnapshot;

/// Raw CSV row matching the batch input format
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "EntryDate")]
    entry_date: String,
    #[serde(rename = "ExitDate")]
    exit_date: String,
    #[serde(rename = "DateOfBirth")]
    date_of_birth: String,
    #[serde(rename = "CurrentSalary")]
    current_salary: f64,
    #[serde(rename = "FullSalary")]
    full_salary: f64,
    #[serde(rename = "CurrentExpense")]
    current_expense: f64,
    #[serde(rename = "GrowthRate")]
    growth_rate: f64,
    #[serde(rename = "InflationRate")]
    inflation_rate: f64,
    #[serde(rename = "PfReturn")]
    pf_return: f64,
    #[serde(rename = "NpsReturn")]
    nps_return: f64,
    #[serde(rename = "AnnuityReturn")]
    annuity_return: f64,
    #[serde(rename = "OtherReturn")]
    other_return: f64,
    #[serde(rename = "CapitalGainTaxRate")]
    capital_gain_tax_rate: f64,
    #[serde(rename = "PfContributionRate")]
    pf_contribution_rate: f64,
    #[serde(rename = "NpsAnnuityShare")]
    nps_annuity_share: f64,
    #[serde(rename = "ExpenseFactor")]
    expense_factor: f64,
    #[serde(rename = "CurrentPfBalance")]
    current_pf_balance: f64,
    #[serde(rename = "MonthlyOtherInvestment")]
    monthly_other_investment: f64,
    #[serde(rename = "NpsMonthlyContribution")]
    nps_monthly_contribution: f64,
    #[serde(rename = "LifeExpectancy")]
    life_expectancy: u32,
}

impl CsvRow {
    fn to_snapshot(self) -> Result<InputSnapshot> {
        Ok(InputSnapshot {
            entry_date: parse_date(&self.entry_date, "EntryDate")?,
            exit_date: parse_date(&self.exit_date, "ExitDate")?,
            date_of_birth: parse_date(&self.date_of_birth, "DateOfBirth")?,
            current_salary: self.current_salary,
            full_salary: self.full_salary,
            current_expense: self.current_expense,
            growth_rate: self.growth_rate,
            inflation_rate: self.inflation_rate,
            pf_return: self.pf_return,
            nps_return: self.nps_return,
            annuity_return: self.annuity_return,
            other_return: self.other_return,
            capital_gain_tax_rate: self.capital_gain_tax_rate,
            pf_contribution_rate: self.pf_contribution_rate,
            nps_annuity_share: self.nps_annuity_share,
            expense_factor: self.expense_factor,
            current_pf_balance: self.current_pf_balance,
            monthly_other_investment: self.monthly_other_investment,
            nps_monthly_contribution: self.nps_monthly_contribution,
            life_expectancy: self.life_expectancy,
        })
    }
}

fn parse_date(value: &str, column: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("{column} is not a YYYY-MM-DD date: {value:?}"))
}

/// Load all snapshots from a CSV file
pub fn load_snapshots<P: AsRef<Path>>(path: P) -> Result<Vec<InputSnapshot>> {
    let path = path.as_ref();
    let reader = Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let snapshots = read_snapshots(reader)?;
    info!("loaded {} snapshots from {}", snapshots.len(), path.display());
    Ok(snapshots)
}

/// Load snapshots from any reader (e.g., string buffer, network stream)
pub fn load_snapshots_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<InputSnapshot>> {
    read_snapshots(Reader::from_reader(reader))
}

fn read_snapshots<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<InputSnapshot>> {
    let mut snapshots = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result.with_context(|| format!("bad CSV record at row {}", index + 1))?;
        let snapshot = row
            .to_snapshot()
            .with_context(|| format!("bad snapshot at row {}", index + 1))?;
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}

/// Load a single snapshot from a JSON file
pub fn load_snapshot_json<P: AsRef<Path>>(path: P) -> Result<InputSnapshot> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid snapshot", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
EntryDate,ExitDate,DateOfBirth,CurrentSalary,FullSalary,CurrentExpense,GrowthRate,InflationRate,PfReturn,NpsReturn,AnnuityReturn,OtherReturn,CapitalGainTaxRate,PfContributionRate,NpsAnnuityShare,ExpenseFactor,CurrentPfBalance,MonthlyOtherInvestment,NpsMonthlyContribution,LifeExpectancy
2000-01-01,2024-01-01,1964-01-01,15000,50000,30000,4,4,8.25,8.25,6,10,10,0.12,0.4,1,50000,1000,1000,85
2010-06-15,2040-06-15,1985-03-02,25000,80000,40000,5,4,8.1,9,6,11,10,0.12,0.4,0.9,0,2000,3000,90
";

    #[test]
    fn test_load_snapshots_from_csv() {
        let snapshots = load_snapshots_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(snapshots.len(), 2);

        let first = &snapshots[0];
        assert_eq!(first.entry_date, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(first.life_expectancy, 85);
        assert!((first.pf_contribution_rate - 0.12).abs() < 1e-12);
        assert!(first.validate().is_ok());

        let second = &snapshots[1];
        assert_eq!(second.exit_date, NaiveDate::from_ymd_opt(2040, 6, 15).unwrap());
        assert!((second.expense_factor - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_bad_date_reports_row() {
        let csv = SAMPLE_CSV.replace("2000-01-01", "01/01/2000");
        let err = load_snapshots_from_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("row 1"));
    }

    #[test]
    fn test_json_round_trip() {
        let snapshots = load_snapshots_from_reader(SAMPLE_CSV.as_bytes()).unwrap();
        let json = serde_json::to_string(&snapshots[0]).unwrap();
        let parsed: InputSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshots[0]);
    }

    #[test]
    fn test_json_defaults_for_omitted_fields() {
        let json = r#"{
            "entry_date": "2024-01-01",
            "exit_date": "2047-06-10",
            "date_of_birth": "1987-06-10"
        }"#;
        let snapshot: InputSnapshot = serde_json::from_str(json).unwrap();
        assert!((snapshot.current_salary - 15_000.0).abs() < 1e-12);
        assert!((snapshot.full_salary - 20_000.0).abs() < 1e-12);
        assert_eq!(snapshot.life_expectancy, 85);
        assert!((snapshot.current_expense).abs() < 1e-12);
    }
}
