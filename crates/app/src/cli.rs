//! Command-line flags for the `lifetide` binary.

use std::fmt;
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::Parser;

use projection::localization::SUPPORTED_LOCALES;
use projection::{ConfigError, Generation, HouseholdError, PersonId, PersonUpdate};
use save::SaveError;

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "lifetide")]
#[command(about = "Prints sea level exposure over the lifetime of each household member")]
pub struct CliArgs {
    /// Report language (remembered in the store)
    #[arg(long, value_parser = PossibleValuesParser::new(SUPPORTED_LOCALES.iter().copied()))]
    pub locale: Option<String>,

    /// Persist the household under DIR (default: in memory)
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,

    /// JSON override for the reference configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Replace the household with a share code
    #[arg(long, value_name = "CODE")]
    pub share: Option<String>,

    /// Add a person. GEN is one of arriere, grands, parents, me, siblings,
    /// partner, friends, children, grands2
    #[arg(long = "add", value_name = "NAME:YEAR[:GEN[:deceased]]", value_parser = parse_add)]
    pub adds: Vec<AddSpec>,

    /// Edit a person. FIELD is name, birth, end, generation or deceased
    #[arg(long = "set", value_name = "ID:FIELD=VALUE", value_parser = parse_set)]
    pub sets: Vec<SetSpec>,

    /// Remove a person by id
    #[arg(long = "remove", value_name = "ID", value_parser = parse_person_id)]
    pub removes: Vec<PersonId>,

    /// Start again from the starter family
    #[arg(long)]
    pub reset: bool,

    /// Also print the chart series
    #[arg(long)]
    pub chart: bool,

    /// Print a #share= fragment for the household
    #[arg(long)]
    pub export_share: bool,

    /// Log at info level
    #[arg(short, long)]
    pub verbose: bool,
}

/// A person to add, as given to `--add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSpec {
    pub name: String,
    pub birth_year: i32,
    pub generation: Generation,
    pub deceased: bool,
}

/// One field edit, as given to `--set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetSpec {
    pub id: PersonId,
    pub update: PersonUpdate,
}

#[derive(Debug)]
pub enum CliError {
    UnknownLocale(String),
    Io(std::io::Error),
    Config(ConfigError),
    Household(HouseholdError),
    Save(SaveError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::UnknownLocale(locale) => write!(f, "unsupported locale '{locale}'"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(e) => write!(f, "configuration: {e}"),
            CliError::Household(e) => write!(f, "household: {e}"),
            CliError::Save(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Household(e) => Some(e),
            CliError::Save(e) => Some(e),
            CliError::UnknownLocale(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<HouseholdError> for CliError {
    fn from(e: HouseholdError) -> Self {
        CliError::Household(e)
    }
}

impl From<SaveError> for CliError {
    fn from(e: SaveError) -> Self {
        CliError::Save(e)
    }
}

fn parse_year(value: &str) -> Result<i32, String> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("'{value}' is not a year"))
}

fn parse_generation(value: &str) -> Result<Generation, String> {
    Generation::ALL
        .into_iter()
        .find(|g| g.id() == value)
        .ok_or_else(|| format!("unknown generation '{value}'"))
}

fn parse_person_id(value: &str) -> Result<PersonId, String> {
    value
        .trim()
        .parse::<u32>()
        .map(PersonId)
        .map_err(|_| format!("'{value}' is not a person id"))
}

/// Parse `NAME:YEAR[:GEN[:deceased]]`. The name may be empty.
fn parse_add(value: &str) -> Result<AddSpec, String> {
    let mut parts = value.split(':');
    let name = parts.next().unwrap_or_default().to_string();
    let birth_year = parse_year(parts.next().ok_or("missing birth year")?)?;
    let generation = match parts.next() {
        None | Some("") => Generation::default(),
        Some(id) => parse_generation(id)?,
    };
    let deceased = match parts.next() {
        None => false,
        Some("deceased") => true,
        Some(other) => return Err(format!("expected 'deceased', got '{other}'")),
    };
    if parts.next().is_some() {
        return Err("too many fields".to_string());
    }
    Ok(AddSpec {
        name,
        birth_year,
        generation,
        deceased,
    })
}

/// Parse `ID:FIELD=VALUE`.
fn parse_set(value: &str) -> Result<SetSpec, String> {
    let (id, edit) = value.split_once(':').ok_or("expected ID:FIELD=VALUE")?;
    let (field, raw) = edit.split_once('=').ok_or("expected FIELD=VALUE")?;
    let update = match field {
        "name" => PersonUpdate::Name(raw.to_string()),
        "birth" => PersonUpdate::BirthYear(parse_year(raw)?),
        "end" => PersonUpdate::EndYear(parse_year(raw)?),
        "generation" => PersonUpdate::Generation(parse_generation(raw)?),
        "deceased" => PersonUpdate::Deceased(
            raw.parse::<bool>()
                .map_err(|_| format!("'{raw}' is not true or false"))?,
        ),
        other => return Err(format!("unknown field '{other}'")),
    };
    Ok(SetSpec {
        id: parse_person_id(id)?,
        update,
    })
}
