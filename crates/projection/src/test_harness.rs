//! # TestHousehold: headless integration test harness
//!
//! Wraps a `bevy::app::App` running `MinimalPlugins` + `ProjectionPlugin` so
//! tests can edit the household, advance the schedule and assert on the
//! derived statistics without a window.

use bevy::app::App;
use bevy::prelude::*;

use crate::config::SeaLevelConfig;
use crate::error::HouseholdError;
use crate::household::{Household, HouseholdStats};
use crate::person::{Generation, PersonId, PersonUpdate};
use crate::person_stats::PersonStats;
use crate::ProjectionPlugin;

pub struct TestHousehold {
    app: App,
}

impl Default for TestHousehold {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHousehold {
    /// The starter family under the built-in configuration, after one update.
    pub fn new() -> Self {
        Self::with_config(SeaLevelConfig::default())
    }

    /// Insert `config` before the plugin so it seeds the household.
    pub fn with_config(config: SeaLevelConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(ProjectionPlugin);
        app.update();
        Self { app }
    }

    /// Run `n` schedule updates.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn config(&self) -> &SeaLevelConfig {
        self.resource::<SeaLevelConfig>()
    }

    pub fn household(&self) -> &Household {
        self.resource::<Household>()
    }

    pub fn stats(&self, id: PersonId) -> Option<&PersonStats> {
        self.resource::<HouseholdStats>().get(id)
    }

    // -----------------------------------------------------------------------
    // Household edits (take effect in stats after the next tick)
    // -----------------------------------------------------------------------

    pub fn add(&mut self, name: &str, birth_year: i32, generation: Generation) -> PersonId {
        let config = self.config().clone();
        self.world_mut()
            .resource_mut::<Household>()
            .add(name, birth_year, generation, false, &config)
    }

    pub fn update_person(
        &mut self,
        id: PersonId,
        update: PersonUpdate,
    ) -> Result<(), HouseholdError> {
        let config = self.config().clone();
        self.world_mut()
            .resource_mut::<Household>()
            .update(id, update, &config)
    }

    pub fn remove(&mut self, id: PersonId) -> Result<(), HouseholdError> {
        self.world_mut()
            .resource_mut::<Household>()
            .remove(id)
            .map(|_| ())
    }
}
