use std::collections::BTreeMap;

use bevy::prelude::*;
use projection::{
    refresh_household_stats, Household, LocalizationState, SaveableRegistry, SeaLevelConfig,
};

use crate::file_header::{decode_value, encode_value};
use crate::save_error::SaveError;
use crate::store::{KeyValueStore, MemoryStore};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Backend every registered `Saveable` is written to, one value per key.
///
/// Insert one before `SavePlugin` to persist somewhere other than memory.
#[derive(Resource)]
pub struct HouseholdStore(pub Box<dyn KeyValueStore>);

impl Default for HouseholdStore {
    fn default() -> Self {
        Self(Box::new(MemoryStore::new()))
    }
}

impl HouseholdStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self(Box::new(store))
    }
}

/// Whether edits are written back automatically.
#[derive(Resource)]
pub struct AutosaveConfig {
    pub enabled: bool,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Outcome of the most recent save/load, for status lines and tests.
#[derive(Resource, Default, Debug)]
pub struct SaveStatus {
    pub saves: u32,
    pub last_saved_keys: usize,
    pub last_loaded: Option<usize>,
    pub last_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Event)]
pub struct SaveHouseholdEvent;

#[derive(Event)]
pub struct LoadHouseholdEvent;

/// Replace the household with the starter family (locale is kept).
#[derive(Event)]
pub struct ResetHouseholdEvent;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Requires `ProjectionPlugin` (for the registry and the household).
pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveHouseholdEvent>()
            .add_event::<LoadHouseholdEvent>()
            .add_event::<ResetHouseholdEvent>()
            .init_resource::<HouseholdStore>()
            .init_resource::<AutosaveConfig>()
            .init_resource::<SaveStatus>()
            .init_resource::<SaveableRegistry>();

        app.add_systems(Startup, load_on_startup);

        // Reset/load must land before stats are refreshed; saving goes last so
        // it sees every edit made this frame.
        app.add_systems(
            Update,
            (
                (exclusive_reset, exclusive_load)
                    .chain()
                    .before(refresh_household_stats),
                (autosave_on_change, exclusive_save)
                    .chain()
                    .after(refresh_household_stats),
            ),
        );
    }
}

// ---------------------------------------------------------------------------
// World-level operations (also used directly by the binary)
// ---------------------------------------------------------------------------

/// Write every registered resource to the store. Returns the number of keys written.
pub fn save_to_store(world: &mut World) -> Result<usize, SaveError> {
    world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
        let values = registry.save_all(world);
        let mut store = world.resource_mut::<HouseholdStore>();
        for (key, bytes) in &values {
            store.0.set(key, &encode_value(bytes))?;
        }
        Ok(values.len())
    })
}

/// Restore every registered resource found in the store.
///
/// Values that fail their header check are skipped with a warning and the
/// resource keeps its current value. Returns the number of resources restored,
/// or `NoData` when nothing is stored under any registered key.
pub fn load_from_store(world: &mut World) -> Result<usize, SaveError> {
    world.resource_scope(|world, registry: Mut<SaveableRegistry>| {
        let store = world.resource::<HouseholdStore>();
        let mut values = BTreeMap::new();
        let mut found = 0;
        for key in registry.keys() {
            let Some(bytes) = store.0.get(key)? else {
                continue;
            };
            found += 1;
            match decode_value(&bytes) {
                Ok(payload) => {
                    values.insert(key.to_string(), payload);
                }
                Err(e) => warn!("Stored value '{}' ignored: {}", key, e),
            }
        }
        if found == 0 {
            return Err(SaveError::NoData);
        }
        let restored = registry.load_all(world, &values);
        repair_loaded_household(world);
        Ok(restored)
    })
}

/// Stored bytes carry no configuration, so records are checked against the
/// active one after every load.
fn repair_loaded_household(world: &mut World) {
    let config = world.resource::<SeaLevelConfig>().clone();
    let mut household = world.resource_mut::<Household>();
    let repaired = household.bypass_change_detection().repair(&config);
    if repaired > 0 {
        warn!("Repaired {} stored person record(s)", repaired);
        household.set_changed();
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Drain all pending events of type `E`; true if there were any.
fn take_events<E: Event>(world: &mut World) -> bool {
    world
        .get_resource_mut::<Events<E>>()
        .map(|mut events| events.drain().count() > 0)
        .unwrap_or(false)
}

fn record_load(world: &mut World, result: Result<usize, SaveError>) {
    let mut status = world.resource_mut::<SaveStatus>();
    match result {
        Ok(restored) => {
            info!("Restored {} saved resource(s)", restored);
            status.last_loaded = Some(restored);
        }
        Err(SaveError::NoData) => {
            info!("No saved household, keeping the starter family");
            status.last_loaded = None;
        }
        Err(e) => {
            warn!("Failed to load household: {}", e);
            status.last_error = Some(e.to_string());
        }
    }
}

fn load_on_startup(world: &mut World) {
    let result = load_from_store(world);
    record_load(world, result);
}

fn exclusive_load(world: &mut World) {
    if !take_events::<LoadHouseholdEvent>(world) {
        return;
    }
    let result = load_from_store(world);
    record_load(world, result);
}

fn exclusive_reset(world: &mut World) {
    if !take_events::<ResetHouseholdEvent>(world) {
        return;
    }
    let config = world.resource::<SeaLevelConfig>().clone();
    world.resource_mut::<Household>().reset(&config);
    info!("Household reset to the starter family");
}

fn autosave_on_change(
    config: Res<AutosaveConfig>,
    household: Res<Household>,
    locale: Res<LocalizationState>,
    mut events: EventWriter<SaveHouseholdEvent>,
) {
    if config.enabled && (household.is_changed() || locale.is_changed()) {
        events.send(SaveHouseholdEvent);
    }
}

fn exclusive_save(world: &mut World) {
    if !take_events::<SaveHouseholdEvent>(world) {
        return;
    }
    let result = save_to_store(world);
    let mut status = world.resource_mut::<SaveStatus>();
    match result {
        Ok(keys) => {
            debug!("Saved {} value(s)", keys);
            status.saves += 1;
            status.last_saved_keys = keys;
            status.last_error = None;
        }
        Err(e) => {
            warn!("Failed to save household: {}", e);
            status.last_error = Some(e.to_string());
        }
    }
}
