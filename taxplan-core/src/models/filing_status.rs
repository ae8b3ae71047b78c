use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known filing status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported filing status '{0}'")]
pub struct ParseFilingStatusError(pub String);

/// Filing status used as the lookup key into every tax table.
///
/// The canonical wire spelling is the snake_case name returned by
/// [`FilingStatus::as_str`]. IRS codes (`S`, `MFJ`, `MFS`, `HOH`, `QSS`) and
/// the longer descriptive spellings are accepted on input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FilingStatus {
    #[serde(rename = "single", alias = "s", alias = "S")]
    Single,
    #[serde(
        rename = "married_joint",
        alias = "mfj",
        alias = "MFJ",
        alias = "married_filing_jointly"
    )]
    MarriedFilingJointly,
    #[serde(
        rename = "married_separate",
        alias = "mfs",
        alias = "MFS",
        alias = "married_filing_separately"
    )]
    MarriedFilingSeparately,
    #[serde(rename = "hoh", alias = "HOH", alias = "head_of_household")]
    HeadOfHousehold,
    #[serde(
        rename = "widow",
        alias = "qss",
        alias = "QSS",
        alias = "qualifying_surviving_spouse"
    )]
    QualifyingSurvivingSpouse,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[
            FilingStatus::Single,
            FilingStatus::MarriedFilingJointly,
            FilingStatus::MarriedFilingSeparately,
            FilingStatus::HeadOfHousehold,
            FilingStatus::QualifyingSurvivingSpouse,
        ]
    }

    /// Canonical snake_case spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedFilingJointly => "married_joint",
            Self::MarriedFilingSeparately => "married_separate",
            Self::HeadOfHousehold => "hoh",
            Self::QualifyingSurvivingSpouse => "widow",
        }
    }

    /// IRS abbreviation, as printed on Form 1040.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        }
    }

    /// Parses any accepted spelling, ignoring case and surrounding whitespace.
    ///
    /// Unknown values are rejected rather than mapped to [`FilingStatus::Single`].
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "single" | "s" => Some(Self::Single),
            "married_joint" | "mfj" | "married_filing_jointly" => {
                Some(Self::MarriedFilingJointly)
            }
            "married_separate" | "mfs" | "married_filing_separately" => {
                Some(Self::MarriedFilingSeparately)
            }
            "hoh" | "head_of_household" => Some(Self::HeadOfHousehold),
            "widow" | "widower" | "qss" | "qualifying_surviving_spouse" => {
                Some(Self::QualifyingSurvivingSpouse)
            }
            _ => None,
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = ParseFilingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFilingStatusError(s.to_string()))
    }
}
