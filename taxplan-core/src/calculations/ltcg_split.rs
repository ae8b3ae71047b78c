//! Long-term capital gains stacking.
//!
//! Long-term gains are taxed as if they sit on top of all ordinary taxable
//! income. They fill the 0% band up to `zero_cap`, then the 15% band up to
//! `fifteen_cap`, and whatever is left is taxed at 20%. Ordinary income only
//! matters through its amount: it decides how much of each band is already
//! used up.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxplan_core::{FilingStatus, LtcgSplit, split_ltcg};
//!
//! let split = split_ltcg(dec!(60000), dec!(20000), FilingStatus::Single, Some(2025)).unwrap();
//!
//! assert_eq!(
//!     split,
//!     LtcgSplit { zero: dec!(0), fifteen: dec!(20000), twenty: dec!(0) }
//! );
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::floor_at_zero;
use crate::tables::{TaxTableError, TaxTables};
use crate::{FilingStatus, LtcgSplit, LtcgThresholds};

/// Splits `ltcg` across the 0/15/20% bands defined by `thresholds`, stacked
/// on top of `ordinary_taxable`.
///
/// `ordinary_taxable` is expected to be non-negative. A non-positive `ltcg`
/// returns [`LtcgSplit::ZERO`]. Otherwise the three parts are non-negative
/// and sum exactly to `ltcg`.
pub fn stack_ltcg(
    thresholds: &LtcgThresholds,
    ordinary_taxable: Decimal,
    ltcg: Decimal,
) -> LtcgSplit {
    if ltcg <= Decimal::ZERO {
        return LtcgSplit::ZERO;
    }

    let zero_remaining = floor_at_zero(thresholds.zero_cap.saturating_sub(ordinary_taxable));
    let zero = ltcg.min(zero_remaining);

    let after_zero = floor_at_zero(ltcg - zero);
    let fifteen_remaining =
        floor_at_zero(thresholds.fifteen_cap - ordinary_taxable.max(thresholds.zero_cap));
    let fifteen = after_zero.min(fifteen_remaining);

    let twenty = floor_at_zero(ltcg - zero - fifteen);

    LtcgSplit {
        zero,
        fifteen,
        twenty,
    }
}

impl TaxTables {
    /// Splits `ltcg` using the thresholds for `status` in `year` (latest
    /// registered year when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError`] for an unsupported year or filing status.
    /// A non-positive `ltcg` short-circuits before any lookup.
    pub fn split_ltcg(
        &self,
        ordinary_taxable: Decimal,
        ltcg: Decimal,
        status: FilingStatus,
        year: Option<i32>,
    ) -> Result<LtcgSplit, TaxTableError> {
        if ltcg <= Decimal::ZERO {
            return Ok(LtcgSplit::ZERO);
        }
        let thresholds = self.ltcg_thresholds(status, year)?;
        let split = thresholds.split(ordinary_taxable, ltcg);
        debug!(
            %status,
            zero = %split.zero,
            fifteen = %split.fifteen,
            twenty = %split.twenty,
            "split long-term gains"
        );
        Ok(split)
    }
}

/// Splits long-term gains across the 0/15/20% bands using the built-in
/// tables. See [`TaxTables::split_ltcg`].
pub fn split_ltcg(
    ordinary_taxable: Decimal,
    ltcg: Decimal,
    status: FilingStatus,
    year: Option<i32>,
) -> Result<LtcgSplit, TaxTableError> {
    TaxTables::builtin().split_ltcg(ordinary_taxable, ltcg, status, year)
}
