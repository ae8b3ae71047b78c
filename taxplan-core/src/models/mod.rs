mod amount;
mod bracket_info;
mod filing_status;
mod ltcg;
mod tax_bracket;

pub use amount::{IntoAmount, ParseAmountError, parse_amount};
pub use bracket_info::BracketInfo;
pub use filing_status::{FilingStatus, ParseFilingStatusError};
pub use ltcg::{LtcgSplit, LtcgThresholds};
pub use tax_bracket::{BoundaryRule, TaxBracket};
