//! Climate scenario registry (IPCC AR6 WGI, global mean sea level by 2100).

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the three SSP pathways carried by the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    bitcode::Encode, bitcode::Decode,
)]
pub enum ScenarioId {
    #[serde(rename = "SSP1-2.6")]
    Ssp126,
    #[serde(rename = "SSP2-4.5")]
    Ssp245,
    #[serde(rename = "SSP5-8.5")]
    Ssp585,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 3] = [ScenarioId::Ssp126, ScenarioId::Ssp245, ScenarioId::Ssp585];

    /// Stable external key ("SSP2-4.5" etc.), also used for localization lookups.
    pub fn key(self) -> &'static str {
        match self {
            ScenarioId::Ssp126 => "SSP1-2.6",
            ScenarioId::Ssp245 => "SSP2-4.5",
            ScenarioId::Ssp585 => "SSP5-8.5",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn index(self) -> usize {
        match self {
            ScenarioId::Ssp126 => 0,
            ScenarioId::Ssp245 => 1,
            ScenarioId::Ssp585 => 2,
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Which edge of the likely range a confidence-interval curve follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CiBound {
    Low,
    High,
}

/// Parameters of a single scenario. All rises are added millimeters at
/// `SCENARIO_HORIZON_YEARS` after the reference year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,
    pub color: String,
    pub median_add_mm: f64,
    pub ci_low_mm: f64,
    pub ci_high_mm: f64,
}

impl Scenario {
    fn new(label: &str, color: &str, median_add_mm: f64, ci_low_mm: f64, ci_high_mm: f64) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            median_add_mm,
            ci_low_mm,
            ci_high_mm,
        }
    }

    /// Added rise at the horizon for the given confidence bound.
    pub fn total_75(&self, bound: CiBound) -> f64 {
        match bound {
            CiBound::Low => self.ci_low_mm,
            CiBound::High => self.ci_high_mm,
        }
    }
}

/// A value for each scenario, indexable by `ScenarioId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerScenario<T>(pub [T; 3]);

impl<T> PerScenario<T> {
    pub fn from_fn(mut f: impl FnMut(ScenarioId) -> T) -> Self {
        Self([
            f(ScenarioId::Ssp126),
            f(ScenarioId::Ssp245),
            f(ScenarioId::Ssp585),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScenarioId, &T)> {
        ScenarioId::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerScenario<U> {
        PerScenario::from_fn(|id| f(&self[id]))
    }
}

impl<T> Index<ScenarioId> for PerScenario<T> {
    type Output = T;

    fn index(&self, id: ScenarioId) -> &T {
        &self.0[id.index()]
    }
}

impl<T> IndexMut<ScenarioId> for PerScenario<T> {
    fn index_mut(&mut self, id: ScenarioId) -> &mut T {
        &mut self.0[id.index()]
    }
}

/// Immutable set of scenarios known to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioRegistry {
    scenarios: PerScenario<Scenario>,
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self {
            scenarios: PerScenario([
                Scenario::new("Optimistic (+1.5°C)", "#4ade80", 350.0, 180.0, 490.0),
                Scenario::new("Intermediate (+2-3°C)", "#fbbf24", 470.0, 290.0, 650.0),
                Scenario::new("High-end (+4-5°C)", "#f87171", 680.0, 500.0, 930.0),
            ]),
        }
    }
}

impl ScenarioRegistry {
    pub fn new(scenarios: PerScenario<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn get(&self, id: ScenarioId) -> &Scenario {
        &self.scenarios[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScenarioId, &Scenario)> {
        self.scenarios.iter()
    }
}
