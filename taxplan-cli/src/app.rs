//! Command implementations for the `taxplan` binary.
//!
//! Each command returns a report that renders either as plain text
//! ([`fmt::Display`]) or as JSON ([`Serialize`]).

use std::fmt;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use taxplan_core::calculations::RothRoomCalculator;
use taxplan_core::calculations::common::floor_at_zero;
use taxplan_core::{
    BracketInfo, FilingStatus, LtcgSplit, TaxBracket, TaxTables, parse_amount,
};
use taxplan_data::TaxTableLoader;
use tracing::info;

/// Built-in tables, plus any years loaded from `brackets` and `thresholds`.
///
/// Loaded years replace built-in years with the same number.
pub fn load_tables(
    brackets: Option<&Path>,
    thresholds: Option<&Path>,
) -> Result<TaxTables> {
    let mut tables = TaxTables::builtin().clone();
    let (Some(brackets), Some(thresholds)) = (brackets, thresholds) else {
        return Ok(tables);
    };

    let file = File::open(brackets)
        .with_context(|| format!("Failed to open: {}", brackets.display()))?;
    let bracket_records = TaxTableLoader::parse_brackets(file)
        .with_context(|| format!("Failed to parse CSV: {}", brackets.display()))?;

    let file = File::open(thresholds)
        .with_context(|| format!("Failed to open: {}", thresholds.display()))?;
    let threshold_records = TaxTableLoader::parse_ltcg_thresholds(file)
        .with_context(|| format!("Failed to parse CSV: {}", thresholds.display()))?;

    let loaded = TaxTableLoader::load(&mut tables, &bracket_records, &threshold_records)
        .context("Failed to load tax tables")?;
    info!(years = ?loaded, "loaded tax tables from CSV");

    Ok(tables)
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

fn resolve_year(
    tables: &TaxTables,
    year: Option<i32>,
) -> Result<i32> {
    Ok(tables.year(year)?.tax_year())
}

// ─── years ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearsReport {
    pub years: Vec<i32>,
}

impl fmt::Display for YearsReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for year in &self.years {
            writeln!(f, "{year}")?;
        }
        Ok(())
    }
}

pub fn years(tables: &TaxTables) -> YearsReport {
    YearsReport {
        years: tables.years(),
    }
}

// ─── brackets ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub tax_year: i32,
    pub status: FilingStatus,
    pub brackets: Vec<TaxBracket>,
}

impl fmt::Display for ScheduleReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{} ordinary brackets, {} ({})",
            self.tax_year,
            self.status.label(),
            self.status.code()
        )?;
        for bracket in &self.brackets {
            let max = bracket
                .max_income
                .map(money)
                .unwrap_or_else(|| "and up".to_string());
            writeln!(
                f,
                "  {:>4}  {:>14} - {}",
                percent(bracket.tax_rate),
                money(bracket.min_income),
                max
            )?;
        }
        Ok(())
    }
}

pub fn brackets(
    tables: &TaxTables,
    status: FilingStatus,
    year: Option<i32>,
) -> Result<ScheduleReport> {
    let tax_year = resolve_year(tables, year)?;
    let brackets = tables.ordinary_brackets(status, Some(tax_year))?;
    Ok(ScheduleReport {
        tax_year,
        status,
        brackets: brackets.to_vec(),
    })
}

// ─── resolve ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketReport {
    pub tax_year: i32,
    pub status: FilingStatus,
    pub taxable_income: String,
    pub bracket: BracketInfo,
}

impl fmt::Display for BracketReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.bracket.is_not_found() {
            return writeln!(f, "no bracket for taxable income '{}'", self.taxable_income);
        }
        let max = self
            .bracket
            .bracket_max
            .map(money)
            .unwrap_or_else(|| "and up".to_string());
        writeln!(f, "marginal rate:    {}", percent(self.bracket.rate))?;
        writeln!(
            f,
            "bracket:          {} - {}",
            money(self.bracket.bracket_min),
            max
        )?;
        writeln!(
            f,
            "room to next:     {}",
            money(self.bracket.room_to_next_bracket)
        )
    }
}

pub fn resolve(
    tables: &TaxTables,
    status: FilingStatus,
    year: Option<i32>,
    taxable_income: &str,
) -> Result<BracketReport> {
    let tax_year = resolve_year(tables, year)?;
    let bracket = tables.resolve_bracket(taxable_income, status, Some(tax_year))?;
    Ok(BracketReport {
        tax_year,
        status,
        taxable_income: taxable_income.to_string(),
        bracket,
    })
}

// ─── roth-room ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RothRoomReport {
    pub tax_year: i32,
    pub status: FilingStatus,
    pub ordinary_taxable: Decimal,
    pub room: Decimal,
}

impl fmt::Display for RothRoomReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "ordinary taxable: {}", money(self.ordinary_taxable))?;
        writeln!(f, "roth room:        {}", money(self.room))
    }
}

pub fn roth_room(
    tables: &TaxTables,
    status: FilingStatus,
    year: Option<i32>,
    ordinary_income: &str,
    stcg: &str,
) -> Result<RothRoomReport> {
    let tax_year = resolve_year(tables, year)?;
    let room = tables.roth_room(status, ordinary_income, stcg, Some(tax_year))?;
    Ok(RothRoomReport {
        tax_year,
        status,
        ordinary_taxable: RothRoomCalculator::taxable(ordinary_income, stcg),
        room,
    })
}

// ─── split-ltcg ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LtcgReport {
    pub tax_year: i32,
    pub status: FilingStatus,
    pub ordinary_taxable: Decimal,
    pub ltcg: Decimal,
    pub split: LtcgSplit,
    pub tax: Decimal,
}

impl fmt::Display for LtcgReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "taxed at 0%:      {}", money(self.split.zero))?;
        writeln!(f, "taxed at 15%:     {}", money(self.split.fifteen))?;
        writeln!(f, "taxed at 20%:     {}", money(self.split.twenty))?;
        writeln!(f, "tax on gains:     {}", money(self.tax))
    }
}

pub fn split_ltcg(
    tables: &TaxTables,
    status: FilingStatus,
    year: Option<i32>,
    ordinary_taxable: &str,
    ltcg: &str,
) -> Result<LtcgReport> {
    let ordinary_taxable =
        floor_at_zero(parse_amount(ordinary_taxable).context("ordinary taxable income")?);
    let ltcg = parse_amount(ltcg).context("long-term capital gains")?;
    let tax_year = resolve_year(tables, year)?;

    let split = tables.split_ltcg(ordinary_taxable, ltcg, status, Some(tax_year))?;
    Ok(LtcgReport {
        tax_year,
        status,
        ordinary_taxable,
        ltcg,
        split,
        tax: split.tax(),
    })
}

/// Prints `report` as JSON or plain text.
pub fn emit<T: Serialize + fmt::Display>(
    report: &T,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
