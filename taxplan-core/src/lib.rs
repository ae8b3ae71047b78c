pub mod calculations;
pub mod models;
pub mod tables;

pub use calculations::{compute_roth_room, resolve_bracket, split_ltcg};
pub use models::*;
pub use tables::{LATEST_TAX_YEAR, TaxTableError, TaxTables, TaxYearTables, get_ordinary_brackets};
