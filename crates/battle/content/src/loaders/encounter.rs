//! Encounter loader.

use std::path::Path;

use battle_core::{Encounter, Monster, RngOracle, Roster};
use serde::Deserialize;

use crate::loaders::{LoadResult, RosterEntry, RosterLoader, read_file};

/// An encounter as written in RON.
///
/// ```ron
/// (
///     encounter: Trainer("Rival"),
///     opponents: [(species: Gulfin, level: 12)],
/// )
/// ```
///
/// Wild opponents get partially spent health, energy and meters unless
/// `randomize` is set to `false`. Trainer opponents always start fresh.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EncounterSpec {
    #[serde(default)]
    pub encounter: Encounter,
    pub opponents: Vec<RosterEntry>,
    #[serde(default = "default_randomize")]
    pub randomize: bool,
}

fn default_randomize() -> bool {
    true
}

impl EncounterSpec {
    /// Builds the opponent roster. `seed` drives the randomized wild state.
    pub fn opponent_roster(&self, rng: &dyn RngOracle, seed: u64) -> LoadResult<Roster> {
        if self.opponents.is_empty() {
            anyhow::bail!("Encounter has no opponents");
        }
        let randomize = self.randomize && self.encounter.is_wild();
        let mut position = 0u64;
        RosterLoader::build(self.opponents.clone(), |entry| {
            position += 1;
            if randomize {
                Monster::randomized(entry.species, entry.level, rng, seed.wrapping_add(position))
            } else {
                Monster::new(entry.species, entry.level)
            }
        })
    }
}

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))
    }
}
