use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the upper edge of a bracket is treated when matching an amount.
///
/// Adjacent brackets share an edge (`brackets[i].max_income ==
/// brackets[i + 1].min_income`), so an amount sitting exactly on an edge
/// belongs to the lower bracket under [`BoundaryRule::Inclusive`] and to the
/// upper bracket under [`BoundaryRule::HalfOpen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryRule {
    /// `min <= amount <= max`
    Inclusive,
    /// `min <= amount < max`
    HalfOpen,
}

/// One band of an ordinary-income rate schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    /// `None` for the unbounded top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }

    pub fn contains(
        &self,
        amount: Decimal,
        rule: BoundaryRule,
    ) -> bool {
        if amount < self.min_income {
            return false;
        }
        match (self.max_income, rule) {
            (None, _) => true,
            (Some(max), BoundaryRule::Inclusive) => amount <= max,
            (Some(max), BoundaryRule::HalfOpen) => amount < max,
        }
    }

    /// Distance from `amount` to the top of this bracket, never negative.
    /// Always zero for the unbounded bracket.
    pub fn room_above(
        &self,
        amount: Decimal,
    ) -> Decimal {
        match self.max_income {
            Some(max) => (max - amount).max(Decimal::ZERO),
            None => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn twelve_percent() -> TaxBracket {
        TaxBracket::new(dec!(11925), Some(dec!(48475)), dec!(0.12))
    }

    #[test]
    fn contains_lower_edge_under_both_rules() {
        let bracket = twelve_percent();

        assert!(bracket.contains(dec!(11925), BoundaryRule::Inclusive));
        assert!(bracket.contains(dec!(11925), BoundaryRule::HalfOpen));
    }

    #[test]
    fn upper_edge_depends_on_rule() {
        let bracket = twelve_percent();

        assert!(bracket.contains(dec!(48475), BoundaryRule::Inclusive));
        assert!(!bracket.contains(dec!(48475), BoundaryRule::HalfOpen));
    }

    #[test]
    fn excludes_amount_below_min() {
        let bracket = twelve_percent();

        assert!(!bracket.contains(dec!(11924.99), BoundaryRule::Inclusive));
    }

    #[test]
    fn unbounded_bracket_contains_everything_above_min() {
        let bracket = TaxBracket::new(dec!(626350), None, dec!(0.37));

        assert!(bracket.contains(dec!(10000000), BoundaryRule::HalfOpen));
        assert!(bracket.is_unbounded());
    }

    #[test]
    fn room_above_measures_to_max() {
        let bracket = twelve_percent();

        assert_eq!(bracket.room_above(dec!(30000)), dec!(18475));
    }

    #[test]
    fn room_above_floors_at_zero() {
        let bracket = twelve_percent();

        assert_eq!(bracket.room_above(dec!(50000)), dec!(0));
    }

    #[test]
    fn room_above_is_zero_for_unbounded_bracket() {
        let bracket = TaxBracket::new(dec!(626350), None, dec!(0.37));

        assert_eq!(bracket.room_above(dec!(700000)), dec!(0));
    }
}
