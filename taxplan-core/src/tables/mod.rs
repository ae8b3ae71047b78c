//! Year- and filing-status-keyed tax tables.
//!
//! A [`TaxYearTables`] holds the ordinary rate schedule and the long-term
//! capital gains thresholds for every filing status of one tax year.
//! [`TaxTables`] is the year-keyed registry the calculations look tables up
//! in. The tables compiled into the crate are available process-wide through
//! [`TaxTables::builtin`]; they are built once and never mutated.
//!
//! Adding a tax year means building another [`TaxYearTables`] (in code or via
//! a loader) and registering it. Lookups take the year as a parameter, with
//! `None` meaning the latest registered year.

mod year_2025;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{FilingStatus, LtcgThresholds, TaxBracket};

/// The most recent tax year compiled into the crate.
pub const LATEST_TAX_YEAR: i32 = 2025;

/// Errors raised by table lookup and table validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxTableError {
    /// No tables are registered for the requested year.
    #[error("unsupported tax year {0}")]
    UnsupportedYear(i32),

    /// The registry is empty, so there is no latest year to default to.
    #[error("no tax years registered")]
    NoTaxYears,

    /// The year is registered but has no table for this filing status.
    #[error("unsupported filing status {status} for tax year {tax_year}")]
    UnsupportedFilingStatus { tax_year: i32, status: FilingStatus },

    #[error("{tax_year} {status}: bracket schedule is empty")]
    EmptySchedule { tax_year: i32, status: FilingStatus },

    #[error("{tax_year} {status}: first bracket starts at {min}, expected 0")]
    FirstBracketNotZero {
        tax_year: i32,
        status: FilingStatus,
        min: Decimal,
    },

    #[error("{tax_year} {status}: bracket {index} does not start where the previous bracket ends")]
    NotContiguous {
        tax_year: i32,
        status: FilingStatus,
        index: usize,
    },

    #[error("{tax_year} {status}: rate of bracket {index} does not exceed the previous rate")]
    RatesNotIncreasing {
        tax_year: i32,
        status: FilingStatus,
        index: usize,
    },

    #[error("{tax_year} {status}: only the last bracket may be unbounded (bracket {index})")]
    UnboundedNotLast {
        tax_year: i32,
        status: FilingStatus,
        index: usize,
    },

    #[error("{tax_year} {status}: last bracket must be unbounded")]
    TopBracketBounded { tax_year: i32, status: FilingStatus },

    #[error("{tax_year} {status}: invalid rate {rate}, must be between 0 and 1")]
    InvalidRate {
        tax_year: i32,
        status: FilingStatus,
        rate: Decimal,
    },

    #[error("{tax_year} {status}: LTCG thresholds out of order ({zero_cap} > {fifteen_cap})")]
    InvalidLtcgThresholds {
        tax_year: i32,
        status: FilingStatus,
        zero_cap: Decimal,
        fifteen_cap: Decimal,
    },
}

/// Rate schedules and LTCG thresholds for a single tax year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxYearTables {
    tax_year: i32,
    ordinary: BTreeMap<FilingStatus, Vec<TaxBracket>>,
    ltcg: BTreeMap<FilingStatus, LtcgThresholds>,
}

impl TaxYearTables {
    pub fn new(tax_year: i32) -> Self {
        Self {
            tax_year,
            ordinary: BTreeMap::new(),
            ltcg: BTreeMap::new(),
        }
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// Sets the ordinary schedule for `status`, replacing any existing one.
    pub fn set_brackets(
        &mut self,
        status: FilingStatus,
        brackets: Vec<TaxBracket>,
    ) {
        self.ordinary.insert(status, brackets);
    }

    pub fn set_ltcg_thresholds(
        &mut self,
        status: FilingStatus,
        thresholds: LtcgThresholds,
    ) {
        self.ltcg.insert(status, thresholds);
    }

    pub fn with_brackets(
        mut self,
        status: FilingStatus,
        brackets: Vec<TaxBracket>,
    ) -> Self {
        self.set_brackets(status, brackets);
        self
    }

    pub fn with_ltcg_thresholds(
        mut self,
        status: FilingStatus,
        thresholds: LtcgThresholds,
    ) -> Self {
        self.set_ltcg_thresholds(status, thresholds);
        self
    }

    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> Result<&[TaxBracket], TaxTableError> {
        self.ordinary
            .get(&status)
            .map(Vec::as_slice)
            .ok_or(TaxTableError::UnsupportedFilingStatus {
                tax_year: self.tax_year,
                status,
            })
    }

    pub fn ltcg_thresholds(
        &self,
        status: FilingStatus,
    ) -> Result<LtcgThresholds, TaxTableError> {
        self.ltcg
            .get(&status)
            .copied()
            .ok_or(TaxTableError::UnsupportedFilingStatus {
                tax_year: self.tax_year,
                status,
            })
    }

    /// Checks that every filing status has a well-formed schedule and
    /// threshold pair.
    ///
    /// A well-formed schedule starts at 0, is contiguous
    /// (`max_income` of each bracket equals `min_income` of the next), has
    /// strictly increasing rates in `[0, 1]`, and ends with exactly one
    /// unbounded bracket.
    pub fn validate(&self) -> Result<(), TaxTableError> {
        for &status in FilingStatus::all() {
            self.validate_schedule(status, self.brackets(status)?)?;

            let thresholds = self.ltcg_thresholds(status)?;
            if thresholds.zero_cap < Decimal::ZERO || thresholds.zero_cap > thresholds.fifteen_cap
            {
                return Err(TaxTableError::InvalidLtcgThresholds {
                    tax_year: self.tax_year,
                    status,
                    zero_cap: thresholds.zero_cap,
                    fifteen_cap: thresholds.fifteen_cap,
                });
            }
        }
        Ok(())
    }

    fn validate_schedule(
        &self,
        status: FilingStatus,
        brackets: &[TaxBracket],
    ) -> Result<(), TaxTableError> {
        let tax_year = self.tax_year;
        let first = brackets
            .first()
            .ok_or(TaxTableError::EmptySchedule { tax_year, status })?;
        if first.min_income != Decimal::ZERO {
            return Err(TaxTableError::FirstBracketNotZero {
                tax_year,
                status,
                min: first.min_income,
            });
        }

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
                return Err(TaxTableError::InvalidRate {
                    tax_year,
                    status,
                    rate: bracket.tax_rate,
                });
            }
            if bracket.is_unbounded() && index + 1 != brackets.len() {
                return Err(TaxTableError::UnboundedNotLast {
                    tax_year,
                    status,
                    index,
                });
            }
        }

        for (index, pair) in brackets.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.max_income != Some(next.min_income) || next.min_income <= prev.min_income {
                return Err(TaxTableError::NotContiguous {
                    tax_year,
                    status,
                    index: index + 1,
                });
            }
            if next.tax_rate <= prev.tax_rate {
                return Err(TaxTableError::RatesNotIncreasing {
                    tax_year,
                    status,
                    index: index + 1,
                });
            }
        }

        if brackets.last().is_some_and(|b| !b.is_unbounded()) {
            return Err(TaxTableError::TopBracketBounded { tax_year, status });
        }
        Ok(())
    }
}

/// Registry of [`TaxYearTables`], keyed by tax year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxTables {
    years: BTreeMap<i32, TaxYearTables>,
}

static BUILTIN: OnceLock<TaxTables> = OnceLock::new();

impl TaxTables {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables compiled into the crate, shared by the whole process.
    pub fn builtin() -> &'static TaxTables {
        BUILTIN.get_or_init(|| {
            let mut tables = TaxTables::new();
            tables.years.insert(LATEST_TAX_YEAR, year_2025::tables());
            tables
        })
    }

    /// Validates `tables` and registers it, returning the tables previously
    /// registered for the same year, if any.
    pub fn register(
        &mut self,
        tables: TaxYearTables,
    ) -> Result<Option<TaxYearTables>, TaxTableError> {
        tables.validate()?;
        debug!(tax_year = tables.tax_year, "registered tax tables");
        Ok(self.years.insert(tables.tax_year, tables))
    }

    /// Registered years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.keys().next_back().copied()
    }

    /// Tables for `year`, or for the latest registered year when `None`.
    pub fn year(
        &self,
        year: Option<i32>,
    ) -> Result<&TaxYearTables, TaxTableError> {
        let year = match year {
            Some(year) => year,
            None => self.latest_year().ok_or(TaxTableError::NoTaxYears)?,
        };
        self.years
            .get(&year)
            .ok_or(TaxTableError::UnsupportedYear(year))
    }

    pub fn ordinary_brackets(
        &self,
        status: FilingStatus,
        year: Option<i32>,
    ) -> Result<&[TaxBracket], TaxTableError> {
        self.year(year)?.brackets(status)
    }

    pub fn ltcg_thresholds(
        &self,
        status: FilingStatus,
        year: Option<i32>,
    ) -> Result<LtcgThresholds, TaxTableError> {
        self.year(year)?.ltcg_thresholds(status)
    }
}

/// Ordinary rate schedule for `status` from the built-in tables.
///
/// `year` defaults to [`LATEST_TAX_YEAR`].
///
/// # Errors
///
/// Returns [`TaxTableError::UnsupportedYear`] for a year with no tables.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxplan_core::{FilingStatus, get_ordinary_brackets};
///
/// let brackets = get_ordinary_brackets(FilingStatus::Single, None).unwrap();
///
/// assert_eq!(brackets.len(), 7);
/// assert_eq!(brackets[0].max_income, Some(dec!(11925)));
/// assert!(brackets[6].is_unbounded());
/// ```
pub fn get_ordinary_brackets(
    status: FilingStatus,
    year: Option<i32>,
) -> Result<&'static [TaxBracket], TaxTableError> {
    TaxTables::builtin().ordinary_brackets(status, year)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn simple_schedule() -> Vec<TaxBracket> {
        vec![
            TaxBracket::new(dec!(0), Some(dec!(10000)), dec!(0.10)),
            TaxBracket::new(dec!(10000), Some(dec!(40000)), dec!(0.20)),
            TaxBracket::new(dec!(40000), None, dec!(0.30)),
        ]
    }

    fn simple_year(tax_year: i32) -> TaxYearTables {
        let mut tables = TaxYearTables::new(tax_year);
        for &status in FilingStatus::all() {
            tables.set_brackets(status, simple_schedule());
            tables.set_ltcg_thresholds(status, LtcgThresholds::new(dec!(20000), dec!(300000)));
        }
        tables
    }

    // =========================================================================
    // built-in table tests
    // =========================================================================

    #[test]
    fn builtin_tables_validate() {
        for year in TaxTables::builtin().years() {
            let tables = TaxTables::builtin().year(Some(year)).unwrap();

            assert_eq!(tables.validate(), Ok(()));
        }
    }

    #[test]
    fn builtin_latest_year_is_latest_constant() {
        assert_eq!(TaxTables::builtin().latest_year(), Some(LATEST_TAX_YEAR));
    }

    #[test]
    fn builtin_schedules_are_contiguous_with_increasing_rates() {
        for &status in FilingStatus::all() {
            let brackets = get_ordinary_brackets(status, Some(LATEST_TAX_YEAR)).unwrap();

            assert!(!brackets.is_empty());
            for pair in brackets.windows(2) {
                assert_eq!(pair[0].max_income, Some(pair[1].min_income), "{status}");
                assert!(pair[0].tax_rate < pair[1].tax_rate, "{status}");
            }
        }
    }

    #[test]
    fn get_ordinary_brackets_defaults_to_latest_year() {
        let default = get_ordinary_brackets(FilingStatus::HeadOfHousehold, None).unwrap();
        let explicit =
            get_ordinary_brackets(FilingStatus::HeadOfHousehold, Some(LATEST_TAX_YEAR)).unwrap();

        assert_eq!(default, explicit);
    }

    #[test]
    fn get_ordinary_brackets_rejects_unsupported_year() {
        let result = get_ordinary_brackets(FilingStatus::Single, Some(1999));

        assert_eq!(result, Err(TaxTableError::UnsupportedYear(1999)));
    }

    #[test]
    fn surviving_spouse_shares_joint_schedule() {
        let joint = get_ordinary_brackets(FilingStatus::MarriedFilingJointly, None).unwrap();
        let survivor =
            get_ordinary_brackets(FilingStatus::QualifyingSurvivingSpouse, None).unwrap();

        assert_eq!(joint, survivor);
    }

    // =========================================================================
    // registry tests
    // =========================================================================

    #[test]
    fn empty_registry_has_no_default_year() {
        let tables = TaxTables::new();

        assert_eq!(
            tables.ordinary_brackets(FilingStatus::Single, None),
            Err(TaxTableError::NoTaxYears)
        );
    }

    #[test]
    fn register_adds_year_and_moves_latest() {
        let mut tables = TaxTables::builtin().clone();

        let previous = tables.register(simple_year(2026)).unwrap();

        assert_eq!(previous, None);
        assert_eq!(tables.years(), vec![2025, 2026]);
        assert_eq!(tables.latest_year(), Some(2026));
        assert_eq!(
            tables.ordinary_brackets(FilingStatus::Single, None).unwrap()[0].max_income,
            Some(dec!(10000))
        );
    }

    #[test]
    fn register_replaces_existing_year() {
        let mut tables = TaxTables::new();
        tables.register(simple_year(2026)).unwrap();

        let previous = tables.register(simple_year(2026)).unwrap();

        assert_eq!(previous, Some(simple_year(2026)));
        assert_eq!(tables.years(), vec![2026]);
    }

    #[test]
    fn register_does_not_touch_builtin() {
        let mut tables = TaxTables::builtin().clone();
        tables.register(simple_year(2026)).unwrap();

        assert_eq!(TaxTables::builtin().years(), vec![LATEST_TAX_YEAR]);
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn validate_requires_every_status() {
        let tables = simple_year(2026);
        let mut partial = TaxYearTables::new(2026);
        partial.set_brackets(FilingStatus::Single, simple_schedule());
        partial.set_ltcg_thresholds(
            FilingStatus::Single,
            tables.ltcg_thresholds(FilingStatus::Single).unwrap(),
        );

        assert_eq!(
            partial.validate(),
            Err(TaxTableError::UnsupportedFilingStatus {
                tax_year: 2026,
                status: FilingStatus::MarriedFilingJointly,
            })
        );
    }

    #[test]
    fn validate_rejects_empty_schedule() {
        let tables = simple_year(2026).with_brackets(FilingStatus::Single, vec![]);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::EmptySchedule {
                tax_year: 2026,
                status: FilingStatus::Single,
            })
        );
    }

    #[test]
    fn validate_rejects_nonzero_start() {
        let mut schedule = simple_schedule();
        schedule[0].min_income = dec!(100);
        let tables = simple_year(2026).with_brackets(FilingStatus::Single, schedule);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::FirstBracketNotZero {
                tax_year: 2026,
                status: FilingStatus::Single,
                min: dec!(100),
            })
        );
    }

    #[test]
    fn validate_rejects_gap() {
        let mut schedule = simple_schedule();
        schedule[1].min_income = dec!(10001);
        let tables = simple_year(2026).with_brackets(FilingStatus::Single, schedule);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::NotContiguous {
                tax_year: 2026,
                status: FilingStatus::Single,
                index: 1,
            })
        );
    }

    #[test]
    fn validate_rejects_flat_rates() {
        let mut schedule = simple_schedule();
        schedule[2].tax_rate = dec!(0.20);
        let tables = simple_year(2026).with_brackets(FilingStatus::HeadOfHousehold, schedule);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::RatesNotIncreasing {
                tax_year: 2026,
                status: FilingStatus::HeadOfHousehold,
                index: 2,
            })
        );
    }

    #[test]
    fn validate_rejects_unbounded_middle_bracket() {
        let mut schedule = simple_schedule();
        schedule[1].max_income = None;
        let tables = simple_year(2026).with_brackets(FilingStatus::Single, schedule);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::UnboundedNotLast {
                tax_year: 2026,
                status: FilingStatus::Single,
                index: 1,
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_top_bracket() {
        let mut schedule = simple_schedule();
        schedule[2].max_income = Some(dec!(1000000));
        let tables = simple_year(2026).with_brackets(FilingStatus::Single, schedule);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::TopBracketBounded {
                tax_year: 2026,
                status: FilingStatus::Single,
            })
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut schedule = simple_schedule();
        schedule[2].tax_rate = dec!(30);
        let tables = simple_year(2026).with_brackets(FilingStatus::Single, schedule);

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::InvalidRate {
                tax_year: 2026,
                status: FilingStatus::Single,
                rate: dec!(30),
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_ltcg_thresholds() {
        let tables = simple_year(2026).with_ltcg_thresholds(
            FilingStatus::MarriedFilingSeparately,
            LtcgThresholds::new(dec!(500000), dec!(40000)),
        );

        assert_eq!(
            tables.validate(),
            Err(TaxTableError::InvalidLtcgThresholds {
                tax_year: 2026,
                status: FilingStatus::MarriedFilingSeparately,
                zero_cap: dec!(500000),
                fifteen_cap: dec!(40000),
            })
        );
    }

    #[test]
    fn register_rejects_invalid_tables() {
        let mut tables = TaxTables::new();
        let invalid = simple_year(2026).with_brackets(FilingStatus::Single, vec![]);

        assert!(tables.register(invalid).is_err());
        assert!(tables.years().is_empty());
    }
}
