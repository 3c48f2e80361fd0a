//! Roster loader.

use std::path::Path;

use battle_core::{Monster, Roster, RosterIndex, Species};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// One roster line as written in RON.
///
/// ```ron
/// [
///     (species: Sparchu, level: 8),
///     (species: Larvea, level: 4, index: Some(5)),
/// ]
/// ```
///
/// Entries without an index are appended after the highest index used so far.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    pub species: Species,
    pub level: u32,
    #[serde(default)]
    pub index: Option<RosterIndex>,
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let entries = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
        Self::build(entries, |entry| Monster::new(entry.species, entry.level))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<RosterEntry>> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))
    }

    /// Builds a roster, creating each monster with `make`.
    pub fn build(
        entries: Vec<RosterEntry>,
        mut make: impl FnMut(&RosterEntry) -> Monster,
    ) -> LoadResult<Roster> {
        let mut roster = Roster::new();
        for entry in &entries {
            if entry.level == 0 {
                anyhow::bail!("{} has level 0", entry.species);
            }
            let monster = make(entry);
            match entry.index {
                Some(index) => roster
                    .insert(index, monster)
                    .map_err(|e| anyhow::anyhow!("Invalid roster entry {}: {}", entry.species, e))?,
                None => {
                    roster.insert_next(monster);
                }
            }
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(species: Species, level: u32, index: Option<RosterIndex>) -> RosterEntry {
        RosterEntry {
            species,
            level,
            index,
        }
    }

    #[test]
    fn parses_optional_index() {
        let entries = RosterLoader::parse(
            "[(species: Sparchu, level: 8), (species: Larvea, level: 4, index: Some(5))]",
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![
                entry(Species::Sparchu, 8, None),
                entry(Species::Larvea, 4, Some(5)),
            ]
        );
    }

    #[test]
    fn unindexed_entries_follow_the_highest_index() {
        let roster = RosterLoader::build(
            vec![
                entry(Species::Finsta, 3, Some(4)),
                entry(Species::Cindrill, 3, None),
                entry(Species::Pluma, 3, Some(1)),
            ],
            |e| Monster::new(e.species, e.level),
        )
        .unwrap();

        let indices: Vec<_> = roster.iter().map(|(i, m)| (i, m.species())).collect();
        assert_eq!(
            indices,
            vec![
                (1, Species::Pluma),
                (4, Species::Finsta),
                (5, Species::Cindrill),
            ]
        );
    }

    #[test]
    fn duplicate_index_is_rejected() {
        let result = RosterLoader::build(
            vec![
                entry(Species::Finsta, 3, Some(0)),
                entry(Species::Pluma, 3, Some(0)),
            ],
            |e| Monster::new(e.species, e.level),
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_level_is_rejected() {
        let result = RosterLoader::build(vec![entry(Species::Atrox, 0, None)], |e| {
            Monster::new(e.species, e.level)
        });
        assert!(result.unwrap_err().to_string().contains("level 0"));
    }

    #[test]
    fn loads_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("party.ron");
        std::fs::write(
            &path,
            "[(species: Jacana, level: 6), (species: Atrox, level: 4, index: Some(3))]",
        )
        .unwrap();

        let roster = RosterLoader::load(&path).unwrap();
        let jacana = roster.get(0).unwrap();
        assert_eq!(jacana.species(), Species::Jacana);
        assert_eq!(jacana.level(), 6);
        assert_eq!(roster.get(3).map(|m| m.level()), Some(4));
    }

    #[test]
    fn unknown_species_fails_to_parse() {
        assert!(RosterLoader::parse("[(species: Missingno, level: 3)]").is_err());
    }
}
