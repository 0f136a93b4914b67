//! Lifetime exposure metrics for one person.

use serde::Serialize;

use crate::config::SeaLevelConfig;
use crate::historical::height_at;
use crate::projection::projected_height;
use crate::scenario::PerScenario;

/// Projected exposure under one scenario (mm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScenarioExposure {
    /// Rise from the reference year to the horizon. 0 for a deceased person.
    pub to_come_mm: f64,
    /// Rise from birth to the horizon (or to death).
    pub total_mm: f64,
}

/// Derived statistics for a (birth year, end year) pair. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonStats {
    pub height_at_birth_mm: f64,
    /// Reference height, or the height at death for a deceased person.
    pub height_now_mm: f64,
    /// Rise already experienced (birth to reference year, or birth to death).
    pub lived_mm: f64,
    pub is_deceased: bool,
    pub rise_since_death_mm: f64,
    pub per_scenario: PerScenario<ScenarioExposure>,
}

/// Compute exposure for someone born in `birth_year` whose life (or projection
/// horizon) ends in `end_year`. An end year before the reference year means
/// deceased.
///
/// Every amount is floored at 0, so inconsistent inputs (end before birth, a
/// birth after the reference year) produce zeros rather than negative exposure.
pub fn person_stats(config: &SeaLevelConfig, birth_year: i32, end_year: i32) -> PersonStats {
    let reference_mm = config.reference.height_mm;
    let is_deceased = end_year < config.reference.year;

    let height_at_birth_mm = height_at(config, birth_year);
    let height_now_mm = if is_deceased {
        height_at(config, end_year)
    } else {
        reference_mm
    };
    let lived_mm = (height_now_mm - height_at_birth_mm).max(0.0);
    let rise_since_death_mm = if is_deceased {
        (reference_mm - height_at(config, end_year)).max(0.0)
    } else {
        0.0
    };

    let per_scenario = PerScenario::from_fn(|id| {
        if is_deceased {
            return ScenarioExposure {
                to_come_mm: 0.0,
                total_mm: lived_mm,
            };
        }
        let at_horizon = projected_height(config, end_year, id);
        ScenarioExposure {
            to_come_mm: (at_horizon - reference_mm).max(0.0),
            total_mm: (at_horizon - height_at_birth_mm).max(0.0),
        }
    });

    PersonStats {
        height_at_birth_mm,
        height_now_mm,
        lived_mm,
        is_deceased,
        rise_since_death_mm,
        per_scenario,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioId;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_living_person_example() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 1955, 2040);
        assert!(!s.is_deceased);
        assert!((s.lived_mm - (height_at(&config, 2025) - height_at(&config, 1955))).abs() < EPS);
        assert_eq!(s.height_now_mm, 240.0);
        assert_eq!(s.rise_since_death_mm, 0.0);
    }

    #[test]
    fn test_living_person_scenarios() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 1955, 2040);
        for (id, exposure) in s.per_scenario.iter() {
            let h = projected_height(&config, 2040, id);
            assert!((exposure.to_come_mm - (h - 240.0)).abs() < EPS);
            assert!((exposure.total_mm - (h - s.height_at_birth_mm)).abs() < EPS);
            assert!((exposure.total_mm - (s.lived_mm + exposure.to_come_mm)).abs() < EPS);
        }
    }

    #[test]
    fn test_deceased_person_example() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 1955, 2010);
        assert!(s.is_deceased);
        assert!((s.rise_since_death_mm - (240.0 - height_at(&config, 2010))).abs() < EPS);
        assert_eq!(s.rise_since_death_mm, 51.0);
        assert_eq!(s.per_scenario[ScenarioId::Ssp245].to_come_mm, 0.0);
    }

    #[test]
    fn test_deceased_freeze() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 1920, 1990);
        assert_eq!(s.height_now_mm, 129.0);
        assert_eq!(s.lived_mm, 110.0);
        for (_, exposure) in s.per_scenario.iter() {
            assert_eq!(exposure.to_come_mm, 0.0);
            assert_eq!(exposure.total_mm, s.lived_mm);
        }
    }

    #[test]
    fn test_horizon_at_reference_year_is_living() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 1950, 2025);
        assert!(!s.is_deceased);
        for (_, exposure) in s.per_scenario.iter() {
            assert_eq!(exposure.to_come_mm, 0.0);
        }
    }

    #[test]
    fn test_future_birth_has_no_lived_rise() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 2030, 2119);
        // Birth height comes from the current-rate extrapolation.
        assert!((s.height_at_birth_mm - 262.5).abs() < EPS);
        assert_eq!(s.lived_mm, 0.0);
        for (id, exposure) in s.per_scenario.iter() {
            let h = projected_height(&config, 2119, id);
            assert!((exposure.total_mm - (h - 262.5)).abs() < EPS, "{id}");
            assert!(exposure.total_mm < exposure.to_come_mm);
        }
    }

    #[test]
    fn test_end_before_birth_is_floored() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 2000, 1950);
        assert!(s.is_deceased);
        assert_eq!(s.lived_mm, 0.0);
        for (_, exposure) in s.per_scenario.iter() {
            assert_eq!(exposure.total_mm, 0.0);
        }
    }

    #[test]
    fn test_higher_scenario_higher_total() {
        let config = SeaLevelConfig::default();
        let s = person_stats(&config, 1985, 2069);
        let totals = s.per_scenario.map(|e| e.total_mm);
        assert!(totals[ScenarioId::Ssp126] < totals[ScenarioId::Ssp245]);
        assert!(totals[ScenarioId::Ssp245] < totals[ScenarioId::Ssp585]);
    }
}
