//! `SeaLevelConfig`: the reference point and static tables every core function reads.
//!
//! The configuration is injected explicitly into the projection and statistics
//! functions instead of living in globals, so tests can run against alternate
//! reference years. It is a Bevy resource so systems can share one instance.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::scenario::{ScenarioId, ScenarioRegistry};

/// Anchor of all extrapolation: the last measured year, its height and the
/// observed rate of rise at that time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub year: i32,
    pub height_mm: f64,
    pub rate_mm_per_year: f64,
}

/// Historical sea level at a given year (mm above the baseline).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub year: i32,
    pub height_mm: f64,
}

/// Life expectancy for people born in `birth_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeAnchor {
    pub birth_year: i32,
    pub years: i32,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeaLevelConfig {
    pub reference: ReferencePoint,
    /// Baseline year; the historical table should start here.
    pub min_year: i32,
    pub historical: Vec<Anchor>,
    pub life_expectancy: Vec<LifeAnchor>,
    pub scenarios: ScenarioRegistry,
    pub min_birth_year: i32,
    pub max_birth_year: i32,
    pub max_horizon_year: i32,
    pub deceased_default_span: i32,
}

impl Default for SeaLevelConfig {
    fn default() -> Self {
        Self {
            reference: ReferencePoint {
                year: REFERENCE_YEAR,
                height_mm: REFERENCE_HEIGHT_MM,
                rate_mm_per_year: CURRENT_RATE_MM_PER_YEAR,
            },
            min_year: MIN_YEAR,
            historical: HISTORICAL_ANCHORS
                .iter()
                .map(|&(year, height_mm)| Anchor { year, height_mm })
                .collect(),
            life_expectancy: LIFE_EXPECTANCY_ANCHORS
                .iter()
                .map(|&(birth_year, years)| LifeAnchor { birth_year, years })
                .collect(),
            scenarios: ScenarioRegistry::default(),
            min_birth_year: MIN_BIRTH_YEAR,
            max_birth_year: MAX_BIRTH_YEAR,
            max_horizon_year: MAX_HORIZON_YEAR,
            deceased_default_span: DECEASED_DEFAULT_SPAN,
        }
    }
}

impl SeaLevelConfig {
    /// Parse a JSON override (missing fields keep their defaults) and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SeaLevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamp a raw birth year into the supported range.
    pub fn clamp_birth_year(&self, birth_year: i32) -> i32 {
        birth_year.clamp(self.min_birth_year, self.max_birth_year.max(self.min_birth_year))
    }

    /// Check the table invariants the projection relies on.
    ///
    /// The core functions never call this; they stay total on any input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (Some(first), Some(last)) = (self.historical.first(), self.historical.last()) else {
            return Err(ConfigError::EmptyTable("historical"));
        };
        if self.life_expectancy.is_empty() {
            return Err(ConfigError::EmptyTable("life_expectancy"));
        }

        for (i, pair) in self.historical.windows(2).enumerate() {
            if pair[1].year <= pair[0].year {
                return Err(ConfigError::NonIncreasing {
                    table: "historical",
                    index: i + 1,
                });
            }
        }
        for (i, pair) in self.life_expectancy.windows(2).enumerate() {
            if pair[1].birth_year <= pair[0].birth_year || pair[1].years <= pair[0].years {
                return Err(ConfigError::NonIncreasing {
                    table: "life_expectancy",
                    index: i + 1,
                });
            }
        }

        if first.year != self.min_year {
            return Err(ConfigError::MinYearMismatch {
                expected: self.min_year,
                found: first.year,
            });
        }
        if last.year != self.reference.year || last.height_mm != self.reference.height_mm {
            return Err(ConfigError::ReferenceMismatch {
                anchor_year: last.year,
                anchor_mm: last.height_mm,
            });
        }

        for id in ScenarioId::ALL {
            let s = self.scenarios.get(id);
            if !(s.ci_low_mm <= s.median_add_mm && s.median_add_mm <= s.ci_high_mm) {
                return Err(ConfigError::InvertedInterval(id));
            }
        }

        if self.min_birth_year > self.max_birth_year {
            return Err(ConfigError::InvertedBirthRange {
                min: self.min_birth_year,
                max: self.max_birth_year,
            });
        }
        Ok(())
    }
}
