//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Roster};

use crate::loaders::{
    ConfigLoader, EncounterLoader, EncounterSpec, LoadResult, RosterLoader,
};

/// Loads content from the standard data directory layout:
///
/// ```text
/// data/
/// ├── config.toml
/// ├── player_roster.ron
/// └── encounters/
///     └── <name>.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load battle config from `config.toml`, falling back to defaults when
    /// the file does not exist.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_player_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join("player_roster.ron"))
    }

    /// Load `encounters/<name>.ron`.
    pub fn load_encounter(&self, name: &str) -> LoadResult<EncounterSpec> {
        let path = self.data_dir.join("encounters").join(format!("{name}.ron"));
        EncounterLoader::load(&path)
    }

    /// Names of every encounter file, sorted.
    pub fn encounter_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("encounters");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use battle_core::Species;

    use super::*;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), BattleConfig::default());
    }

    #[test]
    fn loads_roster_and_encounters_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "seed = 9\n").unwrap();
        fs::write(
            dir.path().join("player_roster.ron"),
            "[(species: Sparchu, level: 6)]",
        )
        .unwrap();
        fs::create_dir(dir.path().join("encounters")).unwrap();
        fs::write(
            dir.path().join("encounters/marsh.ron"),
            "(opponents: [(species: Finsta, level: 3)])",
        )
        .unwrap();
        fs::write(dir.path().join("encounters/notes.txt"), "ignored").unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().seed, 9);
        assert_eq!(
            factory.load_player_roster().unwrap().get(0).map(|m| m.species()),
            Some(Species::Sparchu)
        );
        assert_eq!(factory.encounter_names().unwrap(), vec!["marsh".to_owned()]);
        assert_eq!(factory.load_encounter("marsh").unwrap().opponents.len(), 1);
        assert!(factory.load_encounter("desert").is_err());
    }

    #[test]
    fn bundled_data_loads() {
        let factory = ContentFactory::bundled();
        factory.load_config().unwrap();
        assert!(!factory.load_player_roster().unwrap().is_empty());
        for name in factory.encounter_names().unwrap() {
            factory.load_encounter(&name).unwrap();
        }
    }
}
