use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod chart_data;
pub mod config;
pub mod constants;
pub mod error;
pub mod historical;
pub mod household;
pub mod life_expectancy;
pub mod localization;
pub mod person;
pub mod person_stats;
pub mod projection;
pub mod scenario;
pub mod scenario_gap;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub use config::SeaLevelConfig;
pub use error::{ConfigError, HouseholdError};
pub use household::{refresh_household_stats, Household, HouseholdStats};
pub use localization::LocalizationState;
pub use person::{Generation, Person, PersonId, PersonUpdate};
pub use person_stats::{person_stats, PersonStats, ScenarioExposure};
pub use scenario::{CiBound, PerScenario, Scenario, ScenarioId, ScenarioRegistry};

// ---------------------------------------------------------------------------
// Saveable trait + registry
// ---------------------------------------------------------------------------

/// Trait for resources persisted by the save crate, one stored value per key.
///
/// A resource that wants persistence implements this and is registered with the
/// `SaveableRegistry`; the save systems never need to know the concrete type.
pub trait Saveable: Resource + Sized {
    /// Storage key. Must be stable across versions.
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes.
    /// Return `None` to skip saving.
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Deserialize from bytes. `None` leaves the live resource untouched.
    fn load_from_bytes(bytes: &[u8]) -> Option<Self>;
}

/// Decode bytes via `bitcode::decode`, logging a warning and returning `None` on failure.
/// Use this in `Saveable::load_from_bytes` implementations to surface decode errors.
pub fn decode_or_warn<T: bitcode::DecodeOwned>(key: &str, bytes: &[u8]) -> Option<T> {
    match bitcode::decode(bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, keeping current value: {}",
                key,
                bytes.len(),
                e
            );
            None
        }
    }
}

/// Type alias for the save function stored in a `SaveableEntry`.
pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
/// Type alias for the load function stored in a `SaveableEntry`.
/// Returns whether the stored value was applied.
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) -> bool + Send + Sync>;

/// Type-erased save/load operations for a single registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
}

/// Registry of all saveable resources, populated during plugin setup.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type that implements `Saveable`.
    ///
    /// Panics in debug builds if a resource with the same `SAVE_KEY` is already
    /// registered.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!(
                "SaveableRegistry: duplicate key '{}', ignoring second registration",
                key
            );
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                match T::load_from_bytes(bytes) {
                    Some(value) => {
                        world.insert_resource(value);
                        true
                    }
                    None => false,
                }
            }),
        });
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Save all registered resources into a key -> bytes map.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut values = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                values.insert(entry.key.clone(), bytes);
            }
        }
        values
    }

    /// Load registered resources from a key -> bytes map.
    /// Resources whose key is absent or undecodable are left unchanged.
    /// Returns the number of resources restored.
    pub fn load_all(&self, world: &mut World, values: &BTreeMap<String, Vec<u8>>) -> usize {
        let mut restored = 0;
        for entry in &self.entries {
            if let Some(bytes) = values.get(&entry.key) {
                if (entry.load_fn)(world, bytes) {
                    restored += 1;
                }
            }
        }
        restored
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Engine resources and the statistics refresh system.
///
/// A `SeaLevelConfig` inserted before this plugin is added takes precedence
/// over the built-in defaults, and seeds the starter household.
pub struct ProjectionPlugin;

impl Plugin for ProjectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SeaLevelConfig>()
            .init_resource::<Household>()
            .init_resource::<HouseholdStats>()
            .init_resource::<LocalizationState>()
            .init_resource::<SaveableRegistry>()
            .add_systems(Update, refresh_household_stats);

        let mut registry = app.world_mut().resource_mut::<SaveableRegistry>();
        registry.register::<Household>();
        registry.register::<LocalizationState>();
    }
}
