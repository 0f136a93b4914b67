//! Persistence for the household and the interface locale, plus share codes.

mod atomic_write;
pub mod file_header;
mod save_error;
mod save_plugin;
pub mod share;
pub mod store;

pub use save_error::SaveError;
pub use save_plugin::{
    load_from_store, save_to_store, AutosaveConfig, HouseholdStore, LoadHouseholdEvent,
    ResetHouseholdEvent, SaveHouseholdEvent, SavePlugin, SaveStatus,
};
pub use share::{decode_share, encode_share, share_fragment};
pub use store::{FileStore, KeyValueStore, MemoryStore};
