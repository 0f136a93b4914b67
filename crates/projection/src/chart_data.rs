//! Series for the sea-level chart (historical line + six projection curves).
//!
//! Sample years are every 5 years from 1900 to 2100, plus the reference year
//! and each person's birth year, so the chart can mark births exactly.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::SeaLevelConfig;
use crate::historical::height_at;
use crate::projection::{projected_height, projected_height_ci};
use crate::scenario::{CiBound, PerScenario};

pub const CHART_START_YEAR: i32 = 1900;
pub const CHART_END_YEAR: i32 = 2100;
pub const CHART_STEP_YEARS: usize = 5;

/// One sample of the chart. Heights are whole millimeters; `None` where the
/// series is not drawn (history after the reference year, projections before).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub year: i32,
    pub historical: Option<i64>,
    pub median: PerScenario<Option<i64>>,
    pub low: PerScenario<Option<i64>>,
    pub high: PerScenario<Option<i64>>,
}

fn round_mm(mm: f64) -> i64 {
    mm.round() as i64
}

/// Sorted, deduplicated sample years for the given birth years.
pub fn chart_years(config: &SeaLevelConfig, birth_years: &[i32]) -> Vec<i32> {
    let mut years: BTreeSet<i32> = (CHART_START_YEAR..=CHART_END_YEAR)
        .step_by(CHART_STEP_YEARS)
        .collect();
    years.insert(config.reference.year);
    for &birth_year in birth_years {
        let year = config.clamp_birth_year(birth_year);
        if (CHART_START_YEAR..=CHART_END_YEAR).contains(&year) {
            years.insert(year);
        }
    }
    years.into_iter().collect()
}

pub fn chart_point(config: &SeaLevelConfig, year: i32) -> ChartPoint {
    let reference_year = config.reference.year;
    let projected = |f: &dyn Fn() -> f64| (year >= reference_year).then(|| round_mm(f()));
    ChartPoint {
        year,
        historical: (year <= reference_year).then(|| round_mm(height_at(config, year))),
        median: PerScenario::from_fn(|id| projected(&|| projected_height(config, year, id))),
        low: PerScenario::from_fn(|id| {
            projected(&|| projected_height_ci(config, year, id, CiBound::Low))
        }),
        high: PerScenario::from_fn(|id| {
            projected(&|| projected_height_ci(config, year, id, CiBound::High))
        }),
    }
}

pub fn chart_series(config: &SeaLevelConfig, birth_years: &[i32]) -> Vec<ChartPoint> {
    chart_years(config, birth_years)
        .into_iter()
        .map(|year| chart_point(config, year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioId;

    #[test]
    fn test_base_years_without_persons() {
        let config = SeaLevelConfig::default();
        let years = chart_years(&config, &[]);
        assert_eq!(years.len(), 41);
        assert_eq!(years.first(), Some(&1900));
        assert_eq!(years.last(), Some(&2100));
        assert!(years.contains(&2025));
    }

    #[test]
    fn test_birth_years_added_once() {
        let config = SeaLevelConfig::default();
        let years = chart_years(&config, &[1983, 1983, 1990]);
        assert_eq!(years.len(), 42);
        assert!(years.contains(&1983));
        assert!(years.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_out_of_range_birth_year_is_clamped() {
        let config = SeaLevelConfig::default();
        // 1850 clamps to 1900 (already sampled), 2040 clamps to 2035 (already sampled).
        assert_eq!(chart_years(&config, &[1850, 2040]).len(), 41);
        assert!(chart_years(&config, &[2033]).contains(&2033));
    }

    #[test]
    fn test_reference_point_has_all_series() {
        let config = SeaLevelConfig::default();
        let point = chart_point(&config, 2025);
        assert_eq!(point.historical, Some(240));
        for id in ScenarioId::ALL {
            assert_eq!(point.median[id], Some(240));
            assert_eq!(point.low[id], Some(240));
            assert_eq!(point.high[id], Some(240));
        }
    }

    #[test]
    fn test_past_point_has_only_history() {
        let config = SeaLevelConfig::default();
        let point = chart_point(&config, 1955);
        assert_eq!(point.historical, Some(74));
        assert!(point.median.0.iter().all(Option::is_none));
        assert!(point.high.0.iter().all(Option::is_none));
    }

    #[test]
    fn test_future_point_has_only_projections() {
        let config = SeaLevelConfig::default();
        let point = chart_point(&config, 2100);
        assert_eq!(point.historical, None);
        assert_eq!(point.median[ScenarioId::Ssp126], Some(590));
        assert_eq!(point.median[ScenarioId::Ssp245], Some(710));
        assert_eq!(point.median[ScenarioId::Ssp585], Some(920));
        assert_eq!(point.high[ScenarioId::Ssp585], Some(1170));
        // Below-linear bound falls back to the current rate: 240 + 337.5
        assert_eq!(point.low[ScenarioId::Ssp126], Some(578));
    }

    #[test]
    fn test_series_length_matches_years() {
        let config = SeaLevelConfig::default();
        let births = [1955, 1985, 2010, 2022];
        let series = chart_series(&config, &births);
        assert_eq!(series.len(), chart_years(&config, &births).len());
        assert!(series.iter().any(|p| p.year == 2022));
    }
}
