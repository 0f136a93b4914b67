mod tables_en;
mod tables_fr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::person::{Generation, Person};
use crate::scenario::ScenarioId;
use crate::Saveable;

use tables_en::build_english_table;
use tables_fr::build_french_table;

// =============================================================================
// Constants
// =============================================================================

/// Default locale used when no locale is explicitly set.
pub const DEFAULT_LOCALE: &str = "en";

/// All supported locale codes.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "fr"];

// =============================================================================
// String Table
// =============================================================================

/// A string table maps localization keys to their translated text for a single locale.
pub type StringTable = BTreeMap<String, String>;

// =============================================================================
// Resource
// =============================================================================

/// Display strings for the household report.
///
/// The engine never reads this; only presentation code does. Scenario and
/// generation labels are looked up by their stable ids
/// (`scenario.SSP2-4.5`, `generation.grands2`).
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct LocalizationState {
    /// Currently active locale code ("en" or "fr").
    pub active_locale: String,
    /// String tables keyed by locale code.
    pub tables: BTreeMap<String, StringTable>,
}

impl Default for LocalizationState {
    fn default() -> Self {
        let mut state = Self {
            active_locale: DEFAULT_LOCALE.to_string(),
            tables: BTreeMap::new(),
        };
        state.tables.insert("en".to_string(), build_english_table());
        state.tables.insert("fr".to_string(), build_french_table());
        state
    }
}

impl LocalizationState {
    /// Look up a localization key in the active locale's string table.
    /// Returns the translated string, or the key itself as a fallback.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Look up a localization key, returning `None` if not found.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tables
            .get(&self.active_locale)
            .and_then(|table| table.get(key).map(|s| s.as_str()))
            .or_else(|| {
                // Fallback to English if key not found in active locale
                self.tables
                    .get(DEFAULT_LOCALE)
                    .and_then(|table| table.get(key).map(|s| s.as_str()))
            })
    }

    /// Set the active locale. Returns `false` (and changes nothing) for an
    /// unsupported code.
    pub fn set_locale(&mut self, locale: &str) -> bool {
        if !self.tables.contains_key(locale) {
            return false;
        }
        self.active_locale = locale.to_string();
        true
    }

    pub fn scenario_label(&self, id: ScenarioId) -> String {
        self.t(&format!("scenario.{}", id.key())).to_string()
    }

    pub fn generation_label(&self, generation: Generation) -> String {
        self.t(&format!("generation.{}", generation.id())).to_string()
    }

    /// The person's name, or their generation label when unnamed.
    pub fn display_name(&self, person: &Person) -> String {
        if person.name().is_empty() {
            self.generation_label(person.generation())
        } else {
            person.name().to_string()
        }
    }

    fn decimal_separator(&self) -> char {
        match self.active_locale.as_str() {
            "fr" => ',',
            _ => '.',
        }
    }

    /// Millimeters as centimeters with one decimal ("12.3 cm", "12,3 cm").
    pub fn format_cm(&self, mm: f64) -> String {
        let text = format!("{:.1}", mm / 10.0);
        format!("{} cm", text.replace('.', &self.decimal_separator().to_string()))
    }

    /// Like `format_cm`, but whole millimeters below 1 cm ("7 mm").
    pub fn format_sub(&self, mm: f64) -> String {
        if mm >= 10.0 {
            self.format_cm(mm)
        } else {
            format!("{} mm", mm.round() as i64)
        }
    }
}

// =============================================================================
// Saveable implementation
// =============================================================================

impl Saveable for LocalizationState {
    const SAVE_KEY: &'static str = "sea-level-lang";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        // Only the active locale is stored; tables are rebuilt from code.
        Some(self.active_locale.as_bytes().to_vec())
    }

    fn load_from_bytes(bytes: &[u8]) -> Option<Self> {
        let locale = match std::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    "Saveable {}: failed to decode locale from {} bytes, using default: {}",
                    Self::SAVE_KEY,
                    bytes.len(),
                    e
                );
                return None;
            }
        };
        let mut state = Self::default();
        if !state.set_locale(locale) {
            warn!("Saveable {}: unsupported locale {:?}", Self::SAVE_KEY, locale);
        }
        Some(state)
    }
}
