//! `Household`: the in-memory person collection rendered by the front end.
//!
//! The household exclusively owns its `Person` records. All edits go through
//! `update`, which applies the invariant-repairing setters.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::config::SeaLevelConfig;
use crate::error::HouseholdError;
use crate::person::{Generation, Person, PersonId, PersonUpdate};
use crate::person_stats::PersonStats;
use crate::Saveable;

/// Birth year given to a person added with `add_default`.
pub const NEW_PERSON_BIRTH_YEAR: i32 = 1980;

/// Ids up to this value are reserved by the seeded family.
const SEEDED_MAX_ID: u32 = 4;

#[derive(Resource, Debug, Clone, PartialEq, Encode, Decode)]
pub struct Household {
    persons: Vec<Person>,
    next_id: u32,
}

impl FromWorld for Household {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<SeaLevelConfig>() {
            Some(config) => Self::seeded(config),
            None => Self::seeded(&SeaLevelConfig::default()),
        }
    }
}

impl Household {
    /// The starter family shown on first launch.
    pub fn seeded(config: &SeaLevelConfig) -> Self {
        let persons = vec![
            Person::new(PersonId(1), "Me", 1985, Generation::Me, false, config),
            Person::new(PersonId(2), "", 1955, Generation::Parents, false, config),
            Person::new(PersonId(3), "", 2010, Generation::Children, false, config),
            Person::new(PersonId(4), "", 2022, Generation::Grandchildren, false, config),
        ];
        Self {
            persons,
            next_id: SEEDED_MAX_ID + 1,
        }
    }

    /// Adopt records from a share code or another outside source, keeping
    /// their ids. Each record is repaired against `config` first.
    pub fn from_persons(persons: Vec<Person>, config: &SeaLevelConfig) -> Self {
        let persons: Vec<Person> = persons.into_iter().map(|p| p.repaired(config)).collect();
        let max_id = persons
            .iter()
            .map(|p| p.id().0)
            .max()
            .unwrap_or(0)
            .max(SEEDED_MAX_ID);
        Self {
            persons,
            next_id: max_id + 1,
        }
    }

    /// Repair every record in place (after loading stored bytes, which carry
    /// no configuration). Returns how many records changed.
    pub fn repair(&mut self, config: &SeaLevelConfig) -> usize {
        let mut changed = 0;
        for person in &mut self.persons {
            let repaired = person.clone().repaired(config);
            if repaired != *person {
                *person = repaired;
                changed += 1;
            }
        }
        changed
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| p.id() == id)
    }

    fn allocate_id(&mut self) -> PersonId {
        let id = PersonId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an unnamed sibling born in `NEW_PERSON_BIRTH_YEAR`.
    pub fn add_default(&mut self, config: &SeaLevelConfig) -> PersonId {
        self.add(
            "",
            NEW_PERSON_BIRTH_YEAR,
            Generation::Siblings,
            false,
            config,
        )
    }

    pub fn add(
        &mut self,
        name: &str,
        birth_year: i32,
        generation: Generation,
        deceased: bool,
        config: &SeaLevelConfig,
    ) -> PersonId {
        let id = self.allocate_id();
        self.persons
            .push(Person::new(id, name, birth_year, generation, deceased, config));
        id
    }

    /// Append an existing record under a fresh id.
    pub fn insert(&mut self, mut person: Person) -> PersonId {
        let id = self.allocate_id();
        person.set_id(id);
        self.persons.push(person);
        id
    }

    /// Remove a person. The last remaining person cannot be removed.
    pub fn remove(&mut self, id: PersonId) -> Result<Person, HouseholdError> {
        let index = self
            .persons
            .iter()
            .position(|p| p.id() == id)
            .ok_or(HouseholdError::UnknownPerson(id))?;
        if self.persons.len() <= 1 {
            return Err(HouseholdError::LastPerson);
        }
        Ok(self.persons.remove(index))
    }

    pub fn update(
        &mut self,
        id: PersonId,
        update: PersonUpdate,
        config: &SeaLevelConfig,
    ) -> Result<(), HouseholdError> {
        let person = self
            .persons
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(HouseholdError::UnknownPerson(id))?;
        person.apply(update, config);
        Ok(())
    }

    /// Persons ordered oldest first (stable for equal birth years).
    pub fn sorted_by_birth_year(&self) -> Vec<&Person> {
        let mut sorted: Vec<&Person> = self.persons.iter().collect();
        sorted.sort_by_key(|p| p.birth_year());
        sorted
    }

    /// Replace everything with the starter family.
    pub fn reset(&mut self, config: &SeaLevelConfig) {
        *self = Self::seeded(config);
    }
}

impl Saveable for Household {
    const SAVE_KEY: &'static str = "sea-level-v1";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Option<Self> {
        let household: Household = crate::decode_or_warn(Self::SAVE_KEY, bytes)?;
        if household.is_empty() {
            warn!("Saveable {}: stored household is empty, ignoring", Self::SAVE_KEY);
            return None;
        }
        Some(household)
    }
}

// ---------------------------------------------------------------------------
// Derived statistics
// ---------------------------------------------------------------------------

/// Statistics for every person in the household, in household order.
#[derive(Resource, Debug, Clone, Default)]
pub struct HouseholdStats {
    pub entries: Vec<(PersonId, PersonStats)>,
}

impl HouseholdStats {
    pub fn compute(config: &SeaLevelConfig, household: &Household) -> Self {
        Self {
            entries: household
                .persons()
                .iter()
                .map(|p| (p.id(), p.stats(config)))
                .collect(),
        }
    }

    pub fn get(&self, id: PersonId) -> Option<&PersonStats> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, stats)| stats)
    }
}

/// Recompute `HouseholdStats` whenever the household or configuration changes.
pub fn refresh_household_stats(
    config: Res<SeaLevelConfig>,
    household: Res<Household>,
    mut stats: ResMut<HouseholdStats>,
) {
    if !household.is_changed() && !config.is_changed() {
        return;
    }
    *stats = HouseholdStats::compute(&config, &household);
    debug!(
        "Refreshed exposure statistics for {} person(s)",
        stats.entries.len()
    );
}
