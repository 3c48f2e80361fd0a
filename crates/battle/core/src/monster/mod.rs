//! Monster entity: stats, live state, ability availability and leveling.
//!
//! A monster is created once with a fixed species and level and lives in a
//! roster across battles. Only its live-state fields (health, energy,
//! initiative, experience, defending) change while it fights.
//!
//! # Invariants
//!
//! - `0 ≤ health ≤ max_health` and `0 ≤ energy ≤ max_energy` after every
//!   public mutation
//! - `0 ≤ initiative ≤ 100`
mod stats;

pub use stats::{BaseStats, MonsterInfo, MonsterStats, StatKind};

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::env::{
    AbilityId, AbilityUnlock, Element, Evolution, RngOracle, Species, SpeciesData, compute_seed,
};

/// Abilities available to a monster, in unlock order.
pub type AbilityList = ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES }>;

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    species: Species,
    level: u32,
    element: Element,
    base: BaseStats,
    abilities: &'static [AbilityUnlock],
    evolution: Option<Evolution>,

    pub health: f64,
    pub energy: f64,
    /// Turn meter; the monster is due a turn at [`BattleConfig::INITIATIVE_READY`].
    pub initiative: f64,
    pub xp: f64,
    /// One-shot mitigation bonus, cleared when this monster's next turn starts.
    pub defending: bool,
}

impl Monster {
    /// Creates a monster of a catalogued species at full health and energy.
    pub fn new(species: Species, level: u32) -> Self {
        Self::from_data(species.data(), level)
    }

    /// Creates a monster from an explicit species descriptor.
    ///
    /// Useful for content that tweaks a species' numbers without adding a new
    /// catalogue entry.
    pub fn from_data(data: &SpeciesData, level: u32) -> Self {
        let level = level.max(1);
        let stats = data.base.at_level(level);
        Self {
            species: data.species,
            level,
            element: data.element,
            base: data.base,
            abilities: data.abilities,
            evolution: data.evolution,
            health: stats.max_health,
            energy: stats.max_energy,
            initiative: 0.0,
            xp: 0.0,
            defending: false,
        }
    }

    /// Creates a wild monster whose live state is partially spent.
    ///
    /// Health and energy are reduced by up to half, initiative starts anywhere
    /// in [0, 100] and experience anywhere below the level threshold.
    pub fn randomized(species: Species, level: u32, rng: &dyn RngOracle, seed: u64) -> Self {
        let mut monster = Self::new(species, level);
        let actor = species as u32;

        let max_health = monster.max_health();
        let max_energy = monster.max_energy();
        let threshold = monster.level_threshold();

        monster.health -= rng.range(compute_seed(seed, 0, actor, 0), 0, (max_health / 2.0) as u32) as f64;
        monster.energy -= rng.range(compute_seed(seed, 0, actor, 1), 0, (max_energy / 2.0) as u32) as f64;
        monster.initiative = rng.range(
            compute_seed(seed, 0, actor, 2),
            0,
            BattleConfig::INITIATIVE_READY as u32,
        ) as f64;
        monster.xp = rng.range(compute_seed(seed, 0, actor, 3), 0, threshold as u32 - 1) as f64;
        monster.clamp();
        monster
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn evolution(&self) -> Option<Evolution> {
        self.evolution
    }

    /// Effective value of one stat: `base * level`.
    pub fn stat(&self, stat: StatKind) -> f64 {
        self.base.get(stat) * self.level as f64
    }

    pub fn stats(&self) -> MonsterStats {
        self.base.at_level(self.level)
    }

    pub fn max_health(&self) -> f64 {
        self.stat(StatKind::MaxHealth)
    }

    pub fn max_energy(&self) -> f64 {
        self.stat(StatKind::MaxEnergy)
    }

    /// Experience needed for the next level.
    pub fn level_threshold(&self) -> f64 {
        self.level as f64 * BattleConfig::XP_PER_LEVEL
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Advances the turn meter and regenerates energy.
    ///
    /// `paused` is true while any combatant holds the turn; the clamp runs
    /// either way.
    pub fn tick(&mut self, dt: f64, paused: bool) {
        if !paused {
            let stats = self.stats();
            self.initiative += stats.speed * dt;
            self.energy += stats.recovery * BattleConfig::ENERGY_RECOVERY_RATE * dt;
        }
        self.clamp();
    }

    /// Abilities unlocked at the current level, optionally only those whose
    /// energy cost can currently be paid.
    pub fn usable_abilities(&self, affordable_only: bool) -> AbilityList {
        self.abilities
            .iter()
            .filter(|unlock| unlock.level <= self.level)
            .map(|unlock| unlock.ability)
            .filter(|ability| !affordable_only || ability.cost() <= self.energy)
            .take(BattleConfig::MAX_ABILITIES)
            .collect()
    }

    /// True when the turn meter is full, the monster is alive and it can pay
    /// for at least one ability.
    pub fn is_ready(&self) -> bool {
        self.initiative >= BattleConfig::INITIATIVE_READY
            && self.is_alive()
            && !self.usable_abilities(true).is_empty()
    }

    /// Subtracts `amount` from health, floored at zero and rounded to two
    /// decimal places.
    pub fn apply_damage(&mut self, amount: f64) {
        self.health = round_hundredths((self.health - amount).max(0.0));
        self.clamp();
    }

    /// Adds `amount` to health, capped at the maximum and rounded to two
    /// decimal places.
    pub fn heal(&mut self, amount: f64) {
        self.health = round_hundredths((self.health + amount).min(self.max_health()));
        self.clamp();
    }

    /// Pays an ability's energy cost.
    pub fn spend_energy(&mut self, cost: f64) {
        self.energy -= cost;
        self.clamp();
    }

    /// Adds experience, granting at most one level per call.
    ///
    /// On level-up the experience becomes the overflow past the old
    /// threshold; if that overflow still exceeds the new threshold the next
    /// award levels again. Returns true when a level was gained.
    pub fn gain_experience(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            return false;
        }

        let threshold = self.level_threshold();
        if threshold - self.xp > amount {
            self.xp += amount;
            return false;
        }

        self.xp = amount - (threshold - self.xp);
        self.level += 1;
        self.clamp();
        true
    }

    /// Species this monster would evolve into at its current level.
    pub fn pending_evolution(&self) -> Option<Species> {
        self.evolution
            .filter(|evolution| self.level >= evolution.level)
            .map(|evolution| evolution.into)
    }

    /// Turns the monster into its evolved species, keeping level and
    /// experience and restoring health and energy.
    ///
    /// Returns the new species, or `None` when no evolution is due.
    pub fn evolve(&mut self) -> Option<Species> {
        let into = self.pending_evolution()?;
        let xp = self.xp;
        *self = Self::new(into, self.level);
        self.xp = xp;
        Some(into)
    }

    pub fn info(&self) -> MonsterInfo {
        MonsterInfo {
            health: (self.health, self.max_health()),
            energy: (self.energy, self.max_energy()),
            initiative: (self.initiative, BattleConfig::INITIATIVE_READY),
        }
    }

    fn clamp(&mut self) {
        self.health = self.health.clamp(0.0, self.max_health());
        self.energy = self.energy.clamp(0.0, self.max_energy());
        self.initiative = self.initiative.clamp(0.0, BattleConfig::INITIATIVE_READY);
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
