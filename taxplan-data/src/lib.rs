//! CSV loaders that build [`taxplan_core::TaxYearTables`] from data files, so a
//! new tax year can be added without recompiling.

mod loader;

pub use loader::{
    LtcgThresholdRecord, TableLoaderError, TaxBracketRecord, TaxTableLoader,
    schedule_to_filing_statuses,
};
