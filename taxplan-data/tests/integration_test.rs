//! Integration tests loading the 2025 CSV fixtures and running the
//! calculations against the resulting tables.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use taxplan_core::{FilingStatus, LtcgSplit, TaxTables};
use taxplan_data::{TableLoaderError, TaxTableLoader};

const BRACKETS_CSV_2025: &str = include_str!("../test-data/tax_brackets_2025.csv");
const THRESHOLDS_CSV_2025: &str = include_str!("../test-data/ltcg_thresholds_2025.csv");

fn load_2025() -> TaxTables {
    let brackets =
        TaxTableLoader::parse_brackets(BRACKETS_CSV_2025.as_bytes()).expect("Failed to parse CSV");
    let thresholds = TaxTableLoader::parse_ltcg_thresholds(THRESHOLDS_CSV_2025.as_bytes())
        .expect("Failed to parse CSV");

    let mut tables = TaxTables::new();
    TaxTableLoader::load(&mut tables, &brackets, &thresholds).expect("Failed to load tables");
    tables
}

#[test]
fn test_parse_all_2025_brackets() {
    let records =
        TaxTableLoader::parse_brackets(BRACKETS_CSV_2025.as_bytes()).expect("Failed to parse CSV");

    assert_eq!(records.len(), 28);
    for schedule in ["X", "Y-1", "Y-2", "Z"] {
        let count = records.iter().filter(|r| r.schedule == schedule).count();
        assert_eq!(count, 7, "Expected 7 brackets for schedule {}", schedule);
    }
}

#[test]
fn test_loaded_2025_matches_builtin() {
    let loaded = load_2025();

    assert_eq!(&loaded, TaxTables::builtin());
}

#[test]
fn test_loaded_tables_resolve_brackets() {
    let tables = load_2025();

    let info = tables
        .resolve_bracket(dec!(60000), FilingStatus::Single, None)
        .expect("resolve");

    assert_eq!(info.rate, dec!(0.22));
    assert_eq!(info.room_to_next_bracket, dec!(43350));
}

#[test]
fn test_loaded_tables_compute_roth_room() {
    let tables = load_2025();

    let without = tables
        .roth_room(FilingStatus::Single, dec!(60000), dec!(0), None)
        .expect("room");
    let with = tables
        .roth_room(FilingStatus::Single, dec!(60000), dec!(20000), None)
        .expect("room");

    assert_eq!(with, without - dec!(20000));
}

#[test]
fn test_loaded_tables_split_ltcg() {
    let tables = load_2025();

    let cases = [
        (dec!(30000), LtcgSplit { zero: dec!(18350), fifteen: dec!(1650), twenty: dec!(0) }),
        (dec!(60000), LtcgSplit { zero: dec!(0), fifteen: dec!(20000), twenty: dec!(0) }),
        (dec!(600000), LtcgSplit { zero: dec!(0), fifteen: dec!(0), twenty: dec!(20000) }),
    ];

    for (ordinary, expected) in cases {
        let split = tables
            .split_ltcg(ordinary, dec!(20000), FilingStatus::Single, Some(2025))
            .expect("split");
        assert_eq!(split, expected, "ordinary taxable {}", ordinary);
    }
}

#[test]
fn test_surviving_spouse_loaded_from_schedule_y1() {
    let tables = load_2025();

    let joint = tables
        .ordinary_brackets(FilingStatus::MarriedFilingJointly, None)
        .expect("joint");
    let survivor = tables
        .ordinary_brackets(FilingStatus::QualifyingSurvivingSpouse, None)
        .expect("survivor");

    assert_eq!(joint, survivor);
}

#[test]
fn test_brackets_without_thresholds_fail_to_load() {
    let brackets =
        TaxTableLoader::parse_brackets(BRACKETS_CSV_2025.as_bytes()).expect("Failed to parse CSV");
    let mut tables = TaxTables::new();

    let err = TaxTableLoader::load(&mut tables, &brackets, &[]).expect_err("should fail");

    assert!(matches!(err, TableLoaderError::Table(_)));
    assert!(tables.years().is_empty());
}
