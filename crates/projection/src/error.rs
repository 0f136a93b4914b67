// ---------------------------------------------------------------------------
// Error types for configuration loading and household edits
// ---------------------------------------------------------------------------

use std::fmt;

use crate::person::PersonId;
use crate::scenario::ScenarioId;

/// Reasons a `SeaLevelConfig` override was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The override file is not valid JSON for the config shape.
    Parse(String),
    /// A reference table has no rows.
    EmptyTable(&'static str),
    /// Row `index` of `table` does not strictly increase over the previous row.
    NonIncreasing { table: &'static str, index: usize },
    /// The last historical anchor differs from the reference point.
    ReferenceMismatch { anchor_year: i32, anchor_mm: f64 },
    /// The first historical anchor does not sit on the baseline year.
    MinYearMismatch { expected: i32, found: i32 },
    /// A scenario's likely range does not bracket its median.
    InvertedInterval(ScenarioId),
    /// The supported birth-year range is empty.
    InvertedBirthRange { min: i32, max: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Config parse error: {msg}"),
            ConfigError::EmptyTable(table) => write!(f, "Table '{table}' is empty"),
            ConfigError::NonIncreasing { table, index } => {
                write!(f, "Table '{table}' is not strictly increasing at row {index}")
            }
            ConfigError::ReferenceMismatch {
                anchor_year,
                anchor_mm,
            } => write!(
                f,
                "Last historical anchor ({anchor_year}, {anchor_mm} mm) does not match the reference point"
            ),
            ConfigError::MinYearMismatch { expected, found } => write!(
                f,
                "First historical anchor is {found}, expected baseline year {expected}"
            ),
            ConfigError::InvertedInterval(id) => {
                write!(f, "Scenario {id}: likely range does not contain the median")
            }
            ConfigError::InvertedBirthRange { min, max } => {
                write!(f, "Birth-year range {min}..={max} is empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Errors from editing a `Household`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseholdError {
    /// No person with this id is in the household.
    UnknownPerson(PersonId),
    /// The household must keep at least one person.
    LastPerson,
}

impl fmt::Display for HouseholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HouseholdError::UnknownPerson(id) => write!(f, "No person with id {id}"),
            HouseholdError::LastPerson => write!(f, "Cannot remove the last person"),
        }
    }
}

impl std::error::Error for HouseholdError {}
