use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TaxBracket;

/// The ordinary bracket an amount falls in, and how far it is to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketInfo {
    pub rate: Decimal,
    pub bracket_min: Decimal,
    /// `None` when the amount is in the unbounded top bracket.
    pub bracket_max: Option<Decimal>,
    pub room_to_next_bracket: Decimal,
}

impl BracketInfo {
    /// Neutral result for unusable input or an amount no bracket covers:
    /// rate 0, min 0, max 0, room 0.
    pub const NOT_FOUND: BracketInfo = BracketInfo {
        rate: Decimal::ZERO,
        bracket_min: Decimal::ZERO,
        bracket_max: Some(Decimal::ZERO),
        room_to_next_bracket: Decimal::ZERO,
    };

    pub fn for_amount(
        bracket: &TaxBracket,
        amount: Decimal,
    ) -> Self {
        Self {
            rate: bracket.tax_rate,
            bracket_min: bracket.min_income,
            bracket_max: bracket.max_income,
            room_to_next_bracket: bracket.room_above(amount),
        }
    }

    pub fn is_not_found(&self) -> bool {
        *self == Self::NOT_FOUND
    }

    pub fn is_top_bracket(&self) -> bool {
        self.bracket_max.is_none()
    }
}
