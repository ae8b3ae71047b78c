use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a money amount.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid amount '{input}': {reason}")]
pub struct ParseAmountError {
    input: String,
    reason: String,
}

/// Normalizes input for decimal parsing: trims whitespace, removes thousands
/// separators and a leading dollar sign.
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    trimmed.replace(',', "")
}

/// Parses a string such as `"1,234.56"` or `"$60000"` into a [`Decimal`].
///
/// Empty or whitespace-only input is an error; callers that treat blank
/// fields as zero should go through [`IntoAmount`] instead.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError {
            input: s.to_string(),
            reason: "empty input".to_string(),
        });
    }
    normalized.parse().map_err(|e: rust_decimal::Error| ParseAmountError {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

/// A raw numeric value as it arrives from a caller, possibly from a
/// half-typed form field.
///
/// `into_amount` returns `None` when the value has no usable number in it
/// (NaN, infinity, unparsable or blank text). Sign is preserved; flooring is
/// up to the calculation consuming it.
pub trait IntoAmount {
    fn into_amount(self) -> Option<Decimal>;
}

impl IntoAmount for Decimal {
    fn into_amount(self) -> Option<Decimal> {
        Some(self)
    }
}

/// Finite values outside the `Decimal` range clamp to [`Decimal::MAX`] or
/// [`Decimal::MIN`].
impl IntoAmount for f64 {
    fn into_amount(self) -> Option<Decimal> {
        if !self.is_finite() {
            return None;
        }
        Decimal::from_f64(self).or(Some(if self > 0.0 {
            Decimal::MAX
        } else {
            Decimal::MIN
        }))
    }
}

impl IntoAmount for i64 {
    fn into_amount(self) -> Option<Decimal> {
        Some(Decimal::from(self))
    }
}

impl IntoAmount for u32 {
    fn into_amount(self) -> Option<Decimal> {
        Some(Decimal::from(self))
    }
}

impl IntoAmount for &str {
    fn into_amount(self) -> Option<Decimal> {
        parse_amount(self)
            .map_err(|e| tracing::debug!(error = %e, "ignoring unparsable amount"))
            .ok()
    }
}

impl IntoAmount for &String {
    fn into_amount(self) -> Option<Decimal> {
        self.as_str().into_amount()
    }
}

impl<T: IntoAmount> IntoAmount for Option<T> {
    fn into_amount(self) -> Option<Decimal> {
        self.and_then(IntoAmount::into_amount)
    }
}
