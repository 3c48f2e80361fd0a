//! Read-only battle data.
//!
//! Species and ability tables are closed enumerations resolved to `'static`
//! descriptors; the engine never mutates them. Randomness comes from the
//! [`RngOracle`] so decisions stay reproducible from a seed.
mod abilities;
mod element;
mod rng;
mod species;

pub use abilities::{AbilityData, AbilityEffect, AbilityId, AnimationCue, TargetSide};
pub use element::Element;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use species::{AbilityUnlock, Evolution, Species, SpeciesData};
