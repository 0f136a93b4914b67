use std::path::Path;
use std::process::ExitCode;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;

use projection::{Household, HouseholdStats, LocalizationState, ProjectionPlugin, SeaLevelConfig};
use save::{
    decode_share, share_fragment, FileStore, HouseholdStore, ResetHouseholdEvent, SavePlugin,
};

mod cli;
mod report;

use cli::{CliArgs, CliError};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("lifetide: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SeaLevelConfig, CliError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(SeaLevelConfig::from_json_str(&json)?)
        }
        None => Ok(SeaLevelConfig::default()),
    }
}

fn run(args: &CliArgs) -> Result<String, CliError> {
    let config = load_config(args.config.as_deref())?;
    let store = match &args.store {
        Some(dir) => HouseholdStore::new(FileStore::new(dir)),
        None => HouseholdStore::default(),
    };

    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level: if args.verbose { Level::INFO } else { Level::WARN },
        ..default()
    });
    execute(app, args, config, store)
}

/// Build the headless app, apply the requested edits, and render the report.
fn execute(
    mut app: App,
    args: &CliArgs,
    config: SeaLevelConfig,
    store: HouseholdStore,
) -> Result<String, CliError> {
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(store)
        .add_plugins((ProjectionPlugin, SavePlugin));

    // Startup restores whatever the store holds.
    app.update();

    apply_edits(&mut app, args)?;
    Ok(render(&app, args))
}

fn apply_edits(app: &mut App, args: &CliArgs) -> Result<(), CliError> {
    if args.reset {
        app.world_mut().send_event(ResetHouseholdEvent);
        app.update();
    }

    let world = app.world_mut();
    let config = world.resource::<SeaLevelConfig>().clone();

    if let Some(locale) = &args.locale {
        if !world.resource_mut::<LocalizationState>().set_locale(locale) {
            return Err(CliError::UnknownLocale(locale.clone()));
        }
    }

    if let Some(code) = &args.share {
        let persons = decode_share(code)?;
        info!("Household replaced from a share code ({} persons)", persons.len());
        *world.resource_mut::<Household>() = Household::from_persons(persons, &config);
    }

    if !args.adds.is_empty() || !args.sets.is_empty() || !args.removes.is_empty() {
        let mut household = world.resource_mut::<Household>();
        for add in &args.adds {
            household.add(
                &add.name,
                add.birth_year,
                add.generation,
                add.deceased,
                &config,
            );
        }
        for set in &args.sets {
            household.update(set.id, set.update.clone(), &config)?;
        }
        for id in &args.removes {
            household.remove(*id)?;
        }
    }

    // Refresh stats and write the result back to the store.
    app.update();
    Ok(())
}

fn render(app: &App, args: &CliArgs) -> String {
    let world = app.world();
    let config = world.resource::<SeaLevelConfig>();
    let household = world.resource::<Household>();
    let stats = world.resource::<HouseholdStats>();
    let locale = world.resource::<LocalizationState>();

    let mut sections = vec![
        report::render_household(config, household, stats, locale),
        report::render_stakes(config, household, locale),
    ];
    if args.chart {
        sections.push(report::render_chart(config, household));
    }
    if args.export_share {
        sections.push(share_fragment(household.persons()));
    }
    sections.join("\n\n")
}
