//! Room left in the current ordinary bracket, for sizing Roth conversions.
//!
//! Short-term capital gains are ordinary income and eat into the room;
//! long-term gains are taxed on their own 0/15/20% schedule and must never be
//! passed in as `stcg`.
//!
//! Brackets are matched with [`BoundaryRule::HalfOpen`]: income sitting
//! exactly on an edge is already in the next bracket, so the room reported is
//! the full width of that bracket. The bracket resolver uses the inclusive
//! rule instead and reports zero room at the same point.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxplan_core::{FilingStatus, compute_roth_room};
//!
//! let room = compute_roth_room(FilingStatus::Single, dec!(60000), dec!(20000), None).unwrap();
//!
//! // 22% bracket tops out at $103,350
//! assert_eq!(room, dec!(23350));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::bracket_resolver::BracketResolver;
use crate::calculations::common::floor_at_zero;
use crate::tables::{TaxTableError, TaxTables};
use crate::{BoundaryRule, FilingStatus, IntoAmount, TaxBracket};

/// Computes bracket room over one ordinary rate schedule.
#[derive(Debug, Clone, Copy)]
pub struct RothRoomCalculator<'a> {
    resolver: BracketResolver<'a>,
}

impl<'a> RothRoomCalculator<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self {
            resolver: BracketResolver::new(brackets),
        }
    }

    /// Combined ordinary taxable amount: each input floored at zero, then
    /// summed. Inputs with no usable number count as zero. The sum saturates
    /// at [`Decimal::MAX`], which lands in the top bracket.
    pub fn taxable(
        ordinary_income: impl IntoAmount,
        stcg: impl IntoAmount,
    ) -> Decimal {
        let ordinary_income = floor_at_zero(ordinary_income.into_amount().unwrap_or_default());
        let stcg = floor_at_zero(stcg.into_amount().unwrap_or_default());
        ordinary_income.saturating_add(stcg)
    }

    /// Dollars that can be added before crossing into the next bracket.
    /// Zero in the top bracket and when no bracket matches.
    pub fn room(
        &self,
        ordinary_income: impl IntoAmount,
        stcg: impl IntoAmount,
    ) -> Decimal {
        let taxable = Self::taxable(ordinary_income, stcg);

        match self.resolver.find(taxable, BoundaryRule::HalfOpen) {
            Some(bracket) => bracket.room_above(taxable),
            None => {
                warn!(%taxable, "no bracket covers ordinary income, reporting zero room");
                Decimal::ZERO
            }
        }
    }
}

impl TaxTables {
    /// Room left in the ordinary bracket for `status` in `year` (latest
    /// registered year when `None`).
    ///
    /// # Errors
    ///
    /// Returns [`TaxTableError`] for an unsupported year or filing status.
    pub fn roth_room(
        &self,
        status: FilingStatus,
        ordinary_income: impl IntoAmount,
        stcg: impl IntoAmount,
        year: Option<i32>,
    ) -> Result<Decimal, TaxTableError> {
        let brackets = self.ordinary_brackets(status, year)?;
        let room = RothRoomCalculator::new(brackets).room(ordinary_income, stcg);
        debug!(%status, %room, "computed roth room");
        Ok(room)
    }
}

/// Room left in the current ordinary bracket, using the built-in tables.
/// Pass `Decimal::ZERO` for `stcg` when there are no short-term gains.
/// See [`TaxTables::roth_room`].
pub fn compute_roth_room(
    status: FilingStatus,
    ordinary_income: impl IntoAmount,
    stcg: impl IntoAmount,
    year: Option<i32>,
) -> Result<Decimal, TaxTableError> {
    TaxTables::builtin().roth_room(status, ordinary_income, stcg, year)
}
