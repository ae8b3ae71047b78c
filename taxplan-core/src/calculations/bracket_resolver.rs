//! Marginal bracket lookup for taxable ordinary income.
//!
//! The resolver matches brackets with [`BoundaryRule::Inclusive`]: income
//! sitting exactly on a bracket edge (say $48,475 for a single filer in
//! 2025) resolves to the lower bracket with zero room left. This is the IRS
//! "over X but not over Y" reading of the rate schedules.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxplan_core::{FilingStatus, resolve_bracket};
//!
//! let info = resolve_bracket(dec!(60000), FilingStatus::Single, None).unwrap();
//!
//! assert_eq!(info.rate, dec!(0.22));
//! assert_eq!(info.bracket_min, dec!(48475));
//! assert_eq!(info.bracket_max, Some(dec!(103350)));
//! assert_eq!(info.room_to_next_bracket, dec!(43350));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::floor_at_zero;
use crate::tables::{TaxTableError, TaxTables};
use crate::{BoundaryRule, BracketInfo, FilingStatus, IntoAmount, TaxBracket};

/// Looks up brackets in one ordinary rate schedule.
#[derive(Debug, Clone, Copy)]
pub struct BracketResolver<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> BracketResolver<'a> {
    /// Brackets should be sorted by `min_income` ascending.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// First bracket containing `amount` under `rule`, scanning upwards.
    pub fn find(
        &self,
        amount: Decimal,
        rule: BoundaryRule,
    ) -> Option<&'a TaxBracket> {
        self.brackets.iter().find(|b| b.contains(amount, rule))
    }

    /// Resolves the bracket for `taxable_income`.
    ///
    /// Negative income is treated as zero. Input with no usable number in it
    /// (NaN, infinity, unparsable text) yields [`BracketInfo::NOT_FOUND`], as
    /// does an amount no bracket covers.
    pub fn resolve(
        &self,
        taxable_income: impl IntoAmount,
    ) -> BracketInfo {
        let Some(amount) = taxable_income.into_amount() else {
            debug!("taxable income is not a number, using neutral bracket");
            return BracketInfo::NOT_FOUND;
        };
        let amount = floor_at_zero(amount);

        match self.find(amount, BoundaryRule::Inclusive) {
            Some(bracket) => BracketInfo::for_amount(bracket, amount),
            None => {
                warn!(%amount, "no bracket covers taxable income, using neutral bracket");
                BracketInfo::NOT_FOUND
            }
        }
    }
}

impl TaxTables {
    /// Resolves the ordinary bracket for `taxable_income` using the schedule
    /// for `status` in `year` (latest registered year when `None`).
    ///
    /// # Errors
    ///
    /// Only an unsupported year or filing status is an error; bad numeric
    /// input resolves to [`BracketInfo::NOT_FOUND`].
    pub fn resolve_bracket(
        &self,
        taxable_income: impl IntoAmount,
        status: FilingStatus,
        year: Option<i32>,
    ) -> Result<BracketInfo, TaxTableError> {
        let brackets = self.ordinary_brackets(status, year)?;
        let info = BracketResolver::new(brackets).resolve(taxable_income);
        debug!(%status, rate = %info.rate, room = %info.room_to_next_bracket, "resolved bracket");
        Ok(info)
    }
}

/// Resolves the ordinary bracket for `taxable_income` against the built-in
/// tables. See [`TaxTables::resolve_bracket`].
pub fn resolve_bracket(
    taxable_income: impl IntoAmount,
    status: FilingStatus,
    year: Option<i32>,
) -> Result<BracketInfo, TaxTableError> {
    TaxTables::builtin().resolve_bracket(taxable_income, status, year)
}
