//! How much more rise the high-end pathway adds over the intermediate one,
//! for the people a household report puts up front.

use serde::Serialize;

use crate::config::SeaLevelConfig;
use crate::household::Household;
use crate::person::{Generation, Person, PersonId};
use crate::scenario::ScenarioId;

/// Lifetime totals under SSP2-4.5 and SSP5-8.5 for one living person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioGap {
    pub person: PersonId,
    pub intermediate_total_mm: f64,
    pub high_end_total_mm: f64,
    pub gap_mm: f64,
}

/// The focus person and the youngest person, when they are alive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StakesSummary {
    pub focus: Option<ScenarioGap>,
    pub youngest: Option<ScenarioGap>,
}

impl StakesSummary {
    pub fn is_empty(&self) -> bool {
        self.focus.is_none() && self.youngest.is_none()
    }
}

/// Gap for a single person; `None` once they are deceased.
pub fn scenario_gap(config: &SeaLevelConfig, person: &Person) -> Option<ScenarioGap> {
    let stats = person.stats(config);
    if stats.is_deceased {
        return None;
    }
    let intermediate = stats.per_scenario[ScenarioId::Ssp245].total_mm;
    let high_end = stats.per_scenario[ScenarioId::Ssp585].total_mm;
    Some(ScenarioGap {
        person: person.id(),
        intermediate_total_mm: intermediate,
        high_end_total_mm: high_end,
        gap_mm: high_end - intermediate,
    })
}

/// Focus is the first person tagged `Me` in birth order, otherwise the middle
/// of the birth-sorted list. The youngest is reported only if it is someone else.
pub fn scenario_stakes(config: &SeaLevelConfig, household: &Household) -> StakesSummary {
    let sorted = household.sorted_by_birth_year();
    let Some(&youngest) = sorted.last() else {
        return StakesSummary::default();
    };
    let focus = sorted
        .iter()
        .copied()
        .find(|p| p.generation() == Generation::Me)
        .unwrap_or(sorted[sorted.len() / 2]);

    StakesSummary {
        focus: scenario_gap(config, focus),
        youngest: if youngest.id() != focus.id() {
            scenario_gap(config, youngest)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::PersonUpdate;

    #[test]
    fn test_seeded_focus_is_me_and_youngest_is_grandchild() {
        let config = SeaLevelConfig::default();
        let household = Household::seeded(&config);
        let stakes = scenario_stakes(&config, &household);
        assert_eq!(stakes.focus.map(|g| g.person), Some(PersonId(1)));
        assert_eq!(stakes.youngest.map(|g| g.person), Some(PersonId(4)));
    }

    #[test]
    fn test_gap_is_high_end_minus_intermediate() {
        let config = SeaLevelConfig::default();
        let household = Household::seeded(&config);
        let me = household.get(PersonId(1)).unwrap();
        let gap = scenario_gap(&config, me).unwrap();
        let stats = me.stats(&config);
        assert_eq!(gap.intermediate_total_mm, stats.per_scenario[ScenarioId::Ssp245].total_mm);
        assert_eq!(gap.high_end_total_mm, stats.per_scenario[ScenarioId::Ssp585].total_mm);
        assert!(gap.gap_mm > 0.0);
        assert!((gap.gap_mm - (gap.high_end_total_mm - gap.intermediate_total_mm)).abs() < 1e-9);
    }

    #[test]
    fn test_deceased_person_has_no_gap() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        household
            .update(PersonId(2), PersonUpdate::Deceased(true), &config)
            .unwrap();
        assert!(scenario_gap(&config, household.get(PersonId(2)).unwrap()).is_none());
    }

    #[test]
    fn test_focus_falls_back_to_middle_without_me() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        household
            .update(PersonId(1), PersonUpdate::Generation(Generation::Siblings), &config)
            .unwrap();
        // Birth order: 1955, 1985, 2010, 2022 -> index 2 is the 2010 child.
        let stakes = scenario_stakes(&config, &household);
        assert_eq!(stakes.focus.map(|g| g.person), Some(PersonId(3)));
        assert_eq!(stakes.youngest.map(|g| g.person), Some(PersonId(4)));
    }

    #[test]
    fn test_single_person_is_not_repeated_as_youngest() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        for id in 2..=4 {
            household.remove(PersonId(id)).unwrap();
        }
        let stakes = scenario_stakes(&config, &household);
        assert!(stakes.focus.is_some());
        assert!(stakes.youngest.is_none());
    }

    #[test]
    fn test_all_deceased_is_empty() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        for id in 1..=2 {
            household
                .update(PersonId(id), PersonUpdate::Deceased(true), &config)
                .unwrap();
        }
        for id in 3..=4 {
            household.remove(PersonId(id)).unwrap();
        }
        assert!(scenario_stakes(&config, &household).is_empty());
    }
}
