use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use taxplan_core::{
    FilingStatus, LtcgThresholds, TaxBracket, TaxTableError, TaxTables, TaxYearTables,
};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error)]
pub enum TableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("duplicate LTCG thresholds for {status} in {tax_year}")]
    DuplicateThresholds { tax_year: i32, status: FilingStatus },

    #[error("Invalid table: {0}")]
    Table(#[from] TaxTableError),
}

impl From<csv::Error> for TableLoaderError {
    fn from(err: csv::Error) -> Self {
        TableLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS rate schedule codes to the filing statuses they apply to.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly and Qualifying Surviving Spouse
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
pub fn schedule_to_filing_statuses(
    schedule: &str
) -> Result<&'static [FilingStatus], TableLoaderError> {
    match schedule.trim() {
        "X" => Ok(&[FilingStatus::Single]),
        "Y-1" => Ok(&[
            FilingStatus::MarriedFilingJointly,
            FilingStatus::QualifyingSurvivingSpouse,
        ]),
        "Y-2" => Ok(&[FilingStatus::MarriedFilingSeparately]),
        "Z" => Ok(&[FilingStatus::HeadOfHousehold]),
        other => Err(TableLoaderError::InvalidSchedule(other.to_string())),
    }
}

/// A single record from the tax brackets CSV file.
///
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: The minimum income for this bracket
/// - `max_income`: The maximum income for this bracket (empty for unlimited)
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
///
/// Extra columns (such as `base_tax`) are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// A single record from the LTCG thresholds CSV file
/// (`tax_year,filing_status,zero_cap,fifteen_cap`).
#[derive(Debug, Clone, PartialEq)]
pub struct LtcgThresholdRecord {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub thresholds: LtcgThresholds,
}

/// Mirrors the thresholds CSV layout; the status is validated separately so
/// errors can name the row.
#[derive(Debug, Deserialize)]
struct ThresholdRow {
    tax_year: i32,
    filing_status: String,
    zero_cap: Decimal,
    fifteen_cap: Decimal,
}

/// Loader for tax table data from CSV files.
///
/// Bracket files use IRS schedule codes, which are mapped to filing statuses
/// (Schedule Y-1 feeds two statuses). Threshold files name the filing status
/// directly, in any spelling [`FilingStatus::parse`] accepts.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse tax bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse LTCG threshold records from a CSV reader.
    pub fn parse_ltcg_thresholds<R: Read>(
        reader: R
    ) -> Result<Vec<LtcgThresholdRecord>, TableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row: ThresholdRow = result?;
            let filing_status = FilingStatus::parse(&row.filing_status).ok_or_else(|| {
                TableLoaderError::InvalidFilingStatus {
                    status: row.filing_status.clone(),
                    row: index + 1,
                }
            })?;
            records.push(LtcgThresholdRecord {
                tax_year: row.tax_year,
                filing_status,
                thresholds: LtcgThresholds::new(row.zero_cap, row.fifteen_cap),
            });
        }

        Ok(records)
    }

    /// Assemble parsed records into validated per-year tables, in ascending
    /// year order.
    ///
    /// Brackets are sorted by `min_income` within each schedule, so file order
    /// does not matter. Every year must end up with a valid schedule and a
    /// threshold pair for all five filing statuses.
    pub fn build(
        brackets: &[TaxBracketRecord],
        thresholds: &[LtcgThresholdRecord],
    ) -> Result<Vec<TaxYearTables>, TableLoaderError> {
        let mut schedules: BTreeMap<(i32, FilingStatus), Vec<TaxBracket>> = BTreeMap::new();
        for record in brackets {
            for &status in schedule_to_filing_statuses(&record.schedule)? {
                schedules
                    .entry((record.tax_year, status))
                    .or_default()
                    .push(TaxBracket::new(
                        record.min_income,
                        record.max_income,
                        record.rate,
                    ));
            }
        }

        let mut years: BTreeMap<i32, TaxYearTables> = BTreeMap::new();
        for ((tax_year, status), mut schedule) in schedules {
            schedule.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            years
                .entry(tax_year)
                .or_insert_with(|| TaxYearTables::new(tax_year))
                .set_brackets(status, schedule);
        }

        let mut seen = BTreeSet::new();
        for record in thresholds {
            if !seen.insert((record.tax_year, record.filing_status)) {
                return Err(TableLoaderError::DuplicateThresholds {
                    tax_year: record.tax_year,
                    status: record.filing_status,
                });
            }
            years
                .entry(record.tax_year)
                .or_insert_with(|| TaxYearTables::new(record.tax_year))
                .set_ltcg_thresholds(record.filing_status, record.thresholds);
        }

        let tables: Vec<TaxYearTables> = years.into_values().collect();
        for year in &tables {
            year.validate()?;
            debug!(tax_year = year.tax_year(), "built tax tables");
        }
        Ok(tables)
    }

    /// Build tables from `brackets` and `thresholds` and register every year
    /// in `registry`, replacing years that are already present.
    ///
    /// Nothing is registered unless all years are valid. Returns the years
    /// that were loaded.
    pub fn load(
        registry: &mut TaxTables,
        brackets: &[TaxBracketRecord],
        thresholds: &[LtcgThresholdRecord],
    ) -> Result<Vec<i32>, TableLoaderError> {
        let tables = Self::build(brackets, thresholds)?;
        let mut loaded = Vec::with_capacity(tables.len());

        for year in tables {
            let tax_year = year.tax_year();
            if registry.register(year)?.is_some() {
                info!(tax_year, "replaced built-in tax tables");
            }
            loaded.push(tax_year);
        }

        Ok(loaded)
    }
}
