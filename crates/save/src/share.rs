//! Share codes: a whole household in one URL-fragment-friendly string.
//!
//! Format: standard base64 of a JSON array of
//! `[name, birth_year, end_year, generation_id, deceased (0 or 1)]` rows.
//! Ids are not carried; decoded persons are numbered 1..=n.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use projection::{Generation, Person, PersonId};

use crate::save_error::SaveError;

/// Prefixes accepted in front of a code (as copied from a link).
const SHARE_PREFIXES: &[&str] = &["#share=", "share="];

pub fn encode_share(persons: &[Person]) -> String {
    let rows: Vec<Value> = persons
        .iter()
        .map(|p| {
            serde_json::json!([
                p.name(),
                p.birth_year(),
                p.end_year(),
                p.generation().id(),
                u8::from(p.deceased()),
            ])
        })
        .collect();
    STANDARD.encode(Value::Array(rows).to_string())
}

/// `#share=<code>` for appending to a page URL.
pub fn share_fragment(persons: &[Person]) -> String {
    format!("{}{}", SHARE_PREFIXES[0], encode_share(persons))
}

/// Calendar years a share code may carry. Anything outside is not a
/// plausible record; records inside are repaired when adopted.
const SHARE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

fn row_year(row: &[Value], index: usize, row_index: usize) -> Result<i32, SaveError> {
    row.get(index)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .map(f64::round)
        .filter(|v| (f64::from(*SHARE_YEARS.start())..=f64::from(*SHARE_YEARS.end())).contains(v))
        .map(|v| v as i32)
        .ok_or_else(|| SaveError::Share(format!("row {row_index}: field {index} is not a year")))
}

fn decode_row(value: &Value, row_index: usize) -> Result<Person, SaveError> {
    let row = value
        .as_array()
        .ok_or_else(|| SaveError::Share(format!("row {row_index} is not an array")))?;
    let name = match row.first() {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let birth_year = row_year(row, 1, row_index)?;
    let end_year = row_year(row, 2, row_index)?;
    let generation = row
        .get(3)
        .and_then(Value::as_str)
        .map(Generation::from_id)
        .unwrap_or_default();
    let deceased = row.get(4).and_then(Value::as_i64) == Some(1);

    Ok(Person::restore(
        PersonId(row_index as u32 + 1),
        name,
        birth_year,
        end_year,
        generation,
        deceased,
    ))
}

/// Decode a share code (optionally prefixed with `#share=` or `share=`).
///
/// Records are restored verbatim; an empty list is rejected because a
/// household always holds at least one person.
pub fn decode_share(code: &str) -> Result<Vec<Person>, SaveError> {
    let mut code = code.trim();
    for prefix in SHARE_PREFIXES {
        if let Some(rest) = code.strip_prefix(prefix) {
            code = rest;
            break;
        }
    }

    let json = STANDARD.decode(code)?;
    let value: Value = serde_json::from_slice(&json)?;
    let rows = value
        .as_array()
        .ok_or_else(|| SaveError::Share("expected a JSON array of persons".to_string()))?;
    if rows.is_empty() {
        return Err(SaveError::Share("no persons in share code".to_string()));
    }

    rows.iter()
        .enumerate()
        .map(|(i, row)| decode_row(row, i))
        .collect()
}
