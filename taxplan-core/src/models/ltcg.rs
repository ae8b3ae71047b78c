use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::calculations::ltcg_split::stack_ltcg;

/// Ordinary-taxable-income cutoffs for the long-term capital gains rates.
///
/// Gains stacked below `zero_cap` are taxed at 0%, between `zero_cap` and
/// `fifteen_cap` at 15%, and above `fifteen_cap` at 20%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LtcgThresholds {
    pub zero_cap: Decimal,
    pub fifteen_cap: Decimal,
}

impl LtcgThresholds {
    pub fn new(
        zero_cap: Decimal,
        fifteen_cap: Decimal,
    ) -> Self {
        Self {
            zero_cap,
            fifteen_cap,
        }
    }

    /// Splits `ltcg` across the 0/15/20% bands by stacking it on top of
    /// `ordinary_taxable`. See [`stack_ltcg`].
    pub fn split(
        &self,
        ordinary_taxable: Decimal,
        ltcg: Decimal,
    ) -> LtcgSplit {
        stack_ltcg(self, ordinary_taxable, ltcg)
    }
}

/// Long-term gains partitioned by the rate they are taxed at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LtcgSplit {
    pub zero: Decimal,
    pub fifteen: Decimal,
    pub twenty: Decimal,
}

impl LtcgSplit {
    pub const ZERO: LtcgSplit = LtcgSplit {
        zero: Decimal::ZERO,
        fifteen: Decimal::ZERO,
        twenty: Decimal::ZERO,
    };

    pub fn total(&self) -> Decimal {
        self.zero + self.fifteen + self.twenty
    }

    /// Federal tax on the gains, rounded to cents.
    pub fn tax(&self) -> Decimal {
        round_half_up(self.fifteen * dec!(0.15) + self.twenty * dec!(0.20))
    }
}
