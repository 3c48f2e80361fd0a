//! Data-driven battle content.
//!
//! Loaders turn the files under `data/` into `battle-core` values:
//! - battle configuration (TOML)
//! - the player roster (RON)
//! - encounters: wild or trainer, with their opponent rosters (RON)
//!
//! Species and ability tables are compiled into `battle-core`; files only
//! refer to them by name.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EncounterLoader, EncounterSpec, LoadResult, RosterEntry,
    RosterLoader,
};
