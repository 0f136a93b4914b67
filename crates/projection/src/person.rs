//! `Person` records and the field-update protocol that keeps them consistent.
//!
//! Invariant (repaired by every setter): a deceased person ends before the
//! reference year, a living person's horizon is at or after it, and the end
//! year is always after the birth year when the range allows it.

use serde::{Deserialize, Serialize};

use crate::config::SeaLevelConfig;
use crate::life_expectancy::life_expectancy;
use crate::person_stats::{person_stats, PersonStats};

/// Opaque identity, unique within a household.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    bitcode::Encode, bitcode::Decode,
)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Relationship to the user. Only used for grouping and color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, bitcode::Encode,
    bitcode::Decode,
)]
pub enum Generation {
    #[serde(rename = "arriere")]
    GreatGrandparents,
    #[serde(rename = "grands")]
    Grandparents,
    #[serde(rename = "parents")]
    Parents,
    #[default]
    #[serde(rename = "me")]
    Me,
    #[serde(rename = "siblings")]
    Siblings,
    #[serde(rename = "partner")]
    Partner,
    #[serde(rename = "friends")]
    Friends,
    #[serde(rename = "children")]
    Children,
    #[serde(rename = "grands2")]
    Grandchildren,
}

impl Generation {
    pub const ALL: [Generation; 9] = [
        Generation::GreatGrandparents,
        Generation::Grandparents,
        Generation::Parents,
        Generation::Me,
        Generation::Siblings,
        Generation::Partner,
        Generation::Friends,
        Generation::Children,
        Generation::Grandchildren,
    ];

    /// Stable tag used in share codes and localization keys.
    pub fn id(self) -> &'static str {
        match self {
            Generation::GreatGrandparents => "arriere",
            Generation::Grandparents => "grands",
            Generation::Parents => "parents",
            Generation::Me => "me",
            Generation::Siblings => "siblings",
            Generation::Partner => "partner",
            Generation::Friends => "friends",
            Generation::Children => "children",
            Generation::Grandchildren => "grands2",
        }
    }

    /// Parse a tag; unknown tags map to `Me`.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|g| g.id() == id)
            .unwrap_or_default()
    }

    pub fn color(self) -> &'static str {
        match self {
            Generation::GreatGrandparents => "#a78bfa",
            Generation::Grandparents => "#60a5fa",
            Generation::Parents => "#34d399",
            Generation::Me => "#f1f5f9",
            Generation::Siblings | Generation::Partner | Generation::Friends => "#fbbf24",
            Generation::Children => "#fb923c",
            Generation::Grandchildren => "#f472b6",
        }
    }
}

/// A single field edit, applied atomically with invariant repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonUpdate {
    Name(String),
    BirthYear(i32),
    EndYear(i32),
    Generation(Generation),
    Deceased(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct Person {
    id: PersonId,
    name: String,
    birth_year: i32,
    end_year: i32,
    generation: Generation,
    deceased: bool,
}

impl Person {
    /// Create a person with a default end year: birth + life expectancy when
    /// living, birth + `deceased_default_span` when deceased (both repaired to
    /// respect the reference-year invariant).
    pub fn new(
        id: PersonId,
        name: impl Into<String>,
        birth_year: i32,
        generation: Generation,
        deceased: bool,
        config: &SeaLevelConfig,
    ) -> Self {
        let birth_year = config.clamp_birth_year(birth_year);
        let deceased = deceased && can_be_deceased(config, birth_year);
        Self {
            id,
            name: name.into(),
            birth_year,
            end_year: default_end_year(config, birth_year, deceased),
            generation,
            deceased,
        }
    }

    /// Rebuild a record verbatim (deserializers, share links). No repair.
    pub fn restore(
        id: PersonId,
        name: String,
        birth_year: i32,
        end_year: i32,
        generation: Generation,
        deceased: bool,
    ) -> Self {
        Self {
            id,
            name,
            birth_year,
            end_year,
            generation,
            deceased,
        }
    }

    /// Bring a restored record back within the legal ranges: birth year
    /// clamped, the deceased flag dropped when no death year can precede the
    /// reference year, and the end year clamped to the window of the flag.
    pub fn repaired(mut self, config: &SeaLevelConfig) -> Self {
        self.birth_year = config.clamp_birth_year(self.birth_year);
        self.deceased = self.deceased && can_be_deceased(config, self.birth_year);
        self.set_end_year(self.end_year, config);
        self
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn deceased(&self) -> bool {
        self.deceased
    }

    pub(crate) fn set_id(&mut self, id: PersonId) {
        self.id = id;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_generation(&mut self, generation: Generation) {
        self.generation = generation;
    }

    /// Change the birth year. Always resets a customized end year. A birth
    /// too late to have a death year before the reference year clears the
    /// deceased flag.
    pub fn set_birth_year(&mut self, birth_year: i32, config: &SeaLevelConfig) {
        self.birth_year = config.clamp_birth_year(birth_year);
        self.deceased = self.deceased && can_be_deceased(config, self.birth_year);
        self.end_year = default_end_year(config, self.birth_year, self.deceased);
    }

    /// Flip the deceased flag, moving the end year across the reference year
    /// only when it is on the wrong side. Ignored for someone born too late
    /// to have died before the reference year.
    pub fn set_deceased(&mut self, deceased: bool, config: &SeaLevelConfig) {
        if deceased && !can_be_deceased(config, self.birth_year) {
            return;
        }
        self.deceased = deceased;
        let reference_year = config.reference.year;
        if deceased && self.end_year >= reference_year {
            self.end_year = reference_year - 1;
        } else if !deceased && self.end_year < reference_year {
            self.end_year = living_end_year(config, self.birth_year);
        }
    }

    /// Set the end year, clamped to the range allowed by the deceased flag:
    /// `[birth + 1, reference - 1]` when deceased, `[max(birth + 1, reference),
    /// max_horizon]` when living.
    pub fn set_end_year(&mut self, end_year: i32, config: &SeaLevelConfig) {
        let reference_year = config.reference.year;
        let (min, max) = if self.deceased {
            (self.birth_year + 1, reference_year - 1)
        } else {
            (
                (self.birth_year + 1).max(reference_year),
                config.max_horizon_year,
            )
        };
        self.end_year = end_year.min(max).max(min);
    }

    pub fn apply(&mut self, update: PersonUpdate, config: &SeaLevelConfig) {
        match update {
            PersonUpdate::Name(name) => self.set_name(name),
            PersonUpdate::BirthYear(year) => self.set_birth_year(year, config),
            PersonUpdate::EndYear(year) => self.set_end_year(year, config),
            PersonUpdate::Generation(generation) => self.set_generation(generation),
            PersonUpdate::Deceased(deceased) => self.set_deceased(deceased, config),
        }
    }

    /// Exposure statistics, computed from the birth year clamped into the
    /// supported range.
    pub fn stats(&self, config: &SeaLevelConfig) -> PersonStats {
        person_stats(config, config.clamp_birth_year(self.birth_year), self.end_year)
    }

    /// Birth is after the reference year.
    pub fn is_future_birth(&self, config: &SeaLevelConfig) -> bool {
        self.birth_year > config.reference.year
    }
}

/// A death year strictly between birth and the reference year exists.
fn can_be_deceased(config: &SeaLevelConfig, birth_year: i32) -> bool {
    birth_year + 1 < config.reference.year
}

/// Birth + life expectancy, raised to the reference year so a living person
/// never ends in the past.
fn living_end_year(config: &SeaLevelConfig, birth_year: i32) -> i32 {
    (birth_year + life_expectancy(config, birth_year))
        .max(config.reference.year)
        .max(birth_year + 1)
}

fn deceased_end_year(config: &SeaLevelConfig, birth_year: i32) -> i32 {
    (birth_year + config.deceased_default_span).min(config.reference.year - 1)
}

/// Default end year for a fresh or re-dated person.
pub fn default_end_year(config: &SeaLevelConfig, birth_year: i32, deceased: bool) -> i32 {
    if deceased {
        deceased_end_year(config, birth_year)
    } else {
        living_end_year(config, birth_year)
    }
}
