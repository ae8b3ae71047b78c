//! 2025 tables (Rev. Proc. 2024-40).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::TaxYearTables;
use crate::{FilingStatus, LtcgThresholds, TaxBracket};

fn rates() -> [Decimal; 7] {
    [
        dec!(0.10),
        dec!(0.12),
        dec!(0.22),
        dec!(0.24),
        dec!(0.32),
        dec!(0.35),
        dec!(0.37),
    ]
}

/// Builds a schedule from the upper edges of the six bounded brackets.
fn schedule(edges: [Decimal; 6]) -> Vec<TaxBracket> {
    let mut min_income = Decimal::ZERO;
    let mut brackets = Vec::with_capacity(7);
    for (i, rate) in rates().into_iter().enumerate() {
        let max_income = edges.get(i).copied();
        brackets.push(TaxBracket::new(min_income, max_income, rate));
        if let Some(max) = max_income {
            min_income = max;
        }
    }
    brackets
}

pub(super) fn tables() -> TaxYearTables {
    // Schedule X
    let single = schedule([
        dec!(11925),
        dec!(48475),
        dec!(103350),
        dec!(197300),
        dec!(250525),
        dec!(626350),
    ]);
    // Schedule Y-1
    let joint = schedule([
        dec!(23850),
        dec!(96950),
        dec!(206700),
        dec!(394600),
        dec!(501050),
        dec!(751600),
    ]);
    // Schedule Y-2
    let separate = schedule([
        dec!(11925),
        dec!(48475),
        dec!(103350),
        dec!(197300),
        dec!(250525),
        dec!(375800),
    ]);
    // Schedule Z
    let head_of_household = schedule([
        dec!(17000),
        dec!(64850),
        dec!(103350),
        dec!(197300),
        dec!(250500),
        dec!(626350),
    ]);

    let joint_ltcg = LtcgThresholds::new(dec!(96700), dec!(600050));

    TaxYearTables::new(2025)
        .with_brackets(FilingStatus::Single, single)
        .with_brackets(FilingStatus::MarriedFilingJointly, joint.clone())
        .with_brackets(FilingStatus::MarriedFilingSeparately, separate)
        .with_brackets(FilingStatus::HeadOfHousehold, head_of_household)
        .with_brackets(FilingStatus::QualifyingSurvivingSpouse, joint)
        .with_ltcg_thresholds(
            FilingStatus::Single,
            LtcgThresholds::new(dec!(48350), dec!(533400)),
        )
        .with_ltcg_thresholds(FilingStatus::MarriedFilingJointly, joint_ltcg)
        .with_ltcg_thresholds(
            FilingStatus::MarriedFilingSeparately,
            LtcgThresholds::new(dec!(48350), dec!(300000)),
        )
        .with_ltcg_thresholds(
            FilingStatus::HeadOfHousehold,
            LtcgThresholds::new(dec!(64750), dec!(566700)),
        )
        .with_ltcg_thresholds(FilingStatus::QualifyingSurvivingSpouse, joint_ltcg)
}
