//! Ordered monster collection keyed by stable indices.

use std::collections::BTreeMap;

use super::RosterIndex;
use crate::env::Species;
use crate::error::{ErrorSeverity, GameError};
use crate::monster::Monster;

/// Errors raised by roster bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("no monster at roster index {index}")]
    Missing { index: RosterIndex },

    #[error("roster index {index} is already taken")]
    Occupied { index: RosterIndex },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RosterError::Missing { .. } => ErrorSeverity::Internal,
            RosterError::Occupied { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RosterError::Missing { .. } => "ROSTER_MISSING",
            RosterError::Occupied { .. } => "ROSTER_OCCUPIED",
        }
    }
}

/// A party of monsters. Indices stay stable while monsters come and go, so
/// active slots can refer back to their occupant by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    monsters: BTreeMap<RosterIndex, Monster>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster indexed `0..n` in iteration order.
    pub fn from_monsters(monsters: impl IntoIterator<Item = Monster>) -> Self {
        Self {
            monsters: monsters.into_iter().enumerate().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn get(&self, index: RosterIndex) -> Option<&Monster> {
        self.monsters.get(&index)
    }

    pub fn get_mut(&mut self, index: RosterIndex) -> Option<&mut Monster> {
        self.monsters.get_mut(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RosterIndex, &Monster)> {
        self.monsters.iter().map(|(index, monster)| (*index, monster))
    }

    /// Places a monster at an explicit index.
    pub fn insert(&mut self, index: RosterIndex, monster: Monster) -> Result<(), RosterError> {
        if self.monsters.contains_key(&index) {
            return Err(RosterError::Occupied { index });
        }
        self.monsters.insert(index, monster);
        Ok(())
    }

    /// Appends a monster after the highest used index.
    pub fn insert_next(&mut self, monster: Monster) -> RosterIndex {
        let index = self
            .monsters
            .last_key_value()
            .map_or(0, |(last, _)| last + 1);
        self.monsters.insert(index, monster);
        index
    }

    pub fn remove(&mut self, index: RosterIndex) -> Result<Monster, RosterError> {
        self.monsters
            .remove(&index)
            .ok_or(RosterError::Missing { index })
    }

    /// Exchanges the monsters stored at two indices.
    pub fn swap(&mut self, a: RosterIndex, b: RosterIndex) -> Result<(), RosterError> {
        if a == b {
            return self.get(a).map(|_| ()).ok_or(RosterError::Missing { index: a });
        }
        let first = self.remove(a)?;
        let second = match self.remove(b) {
            Ok(monster) => monster,
            Err(err) => {
                self.monsters.insert(a, first);
                return Err(err);
            }
        };
        self.monsters.insert(a, second);
        self.monsters.insert(b, first);
        Ok(())
    }

    /// Indices of monsters that could be sent out: alive and not in `active`.
    /// Ascending order.
    pub fn eligible_reserves<'a>(
        &'a self,
        active: &'a [RosterIndex],
    ) -> impl Iterator<Item = RosterIndex> + 'a {
        self.iter()
            .filter(move |(index, monster)| monster.is_alive() && !active.contains(index))
            .map(|(index, _)| index)
    }

    /// Number of monsters with health left.
    pub fn alive_count(&self) -> usize {
        self.monsters.values().filter(|m| m.is_alive()).count()
    }

    /// Evolves every monster that has reached its trigger level.
    ///
    /// Returns `(index, from, into)` for each evolution performed.
    pub fn evolve_ready(&mut self) -> Vec<(RosterIndex, Species, Species)> {
        let mut evolved = Vec::new();
        for (index, monster) in self.monsters.iter_mut() {
            let from = monster.species();
            if let Some(into) = monster.evolve() {
                tracing::info!(index, %from, %into, "monster evolved");
                evolved.push((*index, from, into));
            }
        }
        evolved
    }
}
