//! Stat model.
//!
//! Species carry per-level base stats; a monster's effective stat is the base
//! value scaled linearly by its level.

/// Enum representing individual stats.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    MaxHealth,
    MaxEnergy,
    Attack,
    Defense,
    Recovery,
    Speed,
}

/// Per-level base stats of a species.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub max_health: f64,
    pub max_energy: f64,
    pub attack: f64,
    pub defense: f64,
    pub recovery: f64,
    pub speed: f64,
}

impl BaseStats {
    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::MaxHealth => self.max_health,
            StatKind::MaxEnergy => self.max_energy,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Recovery => self.recovery,
            StatKind::Speed => self.speed,
        }
    }

    /// Scales every stat by `level`.
    pub fn at_level(&self, level: u32) -> MonsterStats {
        let level = level as f64;
        MonsterStats {
            max_health: self.max_health * level,
            max_energy: self.max_energy * level,
            attack: self.attack * level,
            defense: self.defense * level,
            recovery: self.recovery * level,
            speed: self.speed * level,
        }
    }
}

/// Effective stats of a monster at its current level.
///
/// Computed on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterStats {
    pub max_health: f64,
    pub max_energy: f64,
    pub attack: f64,
    pub defense: f64,
    pub recovery: f64,
    pub speed: f64,
}

impl MonsterStats {
    pub fn get(&self, stat: StatKind) -> f64 {
        match stat {
            StatKind::MaxHealth => self.max_health,
            StatKind::MaxEnergy => self.max_energy,
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Recovery => self.recovery,
            StatKind::Speed => self.speed,
        }
    }
}

/// `(current, maximum)` pairs shown on a monster's status bars.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterInfo {
    pub health: (f64, f64),
    pub energy: (f64, f64),
    pub initiative: (f64, f64),
}
