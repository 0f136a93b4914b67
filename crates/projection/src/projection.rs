//! Scenario projection: quadratic extrapolation past the reference year.
//!
//! Each curve is `h(dt) = ref + rate*dt + accel*dt^2`, pinned by two constraints:
//! the slope at `dt = 0` equals the observed current rate, and the value at
//! `dt = SCENARIO_HORIZON_YEARS` equals `ref + total75`. Years at or before the
//! reference year return the historical height, so the historical line and the
//! six future curves (three medians, three likely-range bounds) join without a
//! step.

use crate::config::SeaLevelConfig;
use crate::constants::SCENARIO_HORIZON_YEARS;
use crate::historical::height_at;
use crate::scenario::{CiBound, ScenarioId};

/// Quadratic coefficient reaching `total_75` mm after the horizon.
///
/// Clamped at 0: a total below the linear extrapolation degrades to a straight
/// line at the current rate instead of a decelerating curve.
pub fn acceleration_coefficient(config: &SeaLevelConfig, total_75: f64) -> f64 {
    let horizon = f64::from(SCENARIO_HORIZON_YEARS);
    ((total_75 - config.reference.rate_mm_per_year * horizon) / (horizon * horizon)).max(0.0)
}

/// Whether `total_75` is reachable from the current rate without deceleration,
/// i.e. whether the curve actually passes through the quoted horizon value.
pub fn reaches_horizon_total(config: &SeaLevelConfig, total_75: f64) -> bool {
    total_75 >= config.reference.rate_mm_per_year * f64::from(SCENARIO_HORIZON_YEARS)
}

fn project_from_total(config: &SeaLevelConfig, year: i32, total_75: f64) -> f64 {
    if year <= config.reference.year {
        return height_at(config, year);
    }
    let dt = f64::from(year - config.reference.year);
    let accel = acceleration_coefficient(config, total_75);
    config.reference.height_mm + config.reference.rate_mm_per_year * dt + accel * dt * dt
}

/// Median projected sea level in `year` under `scenario` (mm above baseline).
pub fn projected_height(config: &SeaLevelConfig, year: i32, scenario: ScenarioId) -> f64 {
    project_from_total(config, year, config.scenarios.get(scenario).median_add_mm)
}

/// Likely-range bound of the projection in `year` under `scenario`.
pub fn projected_height_ci(
    config: &SeaLevelConfig,
    year: i32,
    scenario: ScenarioId,
    bound: CiBound,
) -> f64 {
    project_from_total(config, year, config.scenarios.get(scenario).total_75(bound))
}
