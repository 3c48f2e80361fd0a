//! Notifications emitted by the battle for renderers, audio and logs.
//!
//! The engine never draws or plays anything itself; it appends events to the
//! battle state and the session hands them out via `drain_events`.

use crate::env::{AbilityEffect, AbilityId, AnimationCue, Species};
use crate::state::{RosterIndex, Side, SlotId};

/// A sound the presentation layer should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    /// An ability landed on its target.
    Impact,
    Faint,
    Catch,
    LevelUp,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// Combatants were placed on the field and the battle started.
    Started,
    TurnGranted {
        slot: SlotId,
    },
    /// Energy was paid and the ability is on its way; play `animation` on the target.
    AbilityUsed {
        source: SlotId,
        target: SlotId,
        ability: AbilityId,
        animation: AnimationCue,
    },
    /// The ability reached its target.
    Impact {
        source: SlotId,
        target: SlotId,
        ability: AbilityId,
        effect: AbilityEffect,
        amount: f64,
        multiplier: f64,
    },
    Defended {
        slot: SlotId,
    },
    Switched {
        slot: SlotId,
        from: RosterIndex,
        to: RosterIndex,
    },
    Fainted {
        slot: SlotId,
        species: Species,
    },
    ExperienceGained {
        slot: SlotId,
        amount: f64,
        level: u32,
        leveled_up: bool,
    },
    /// A leaving combatant was taken off the field.
    SlotCleared {
        slot: SlotId,
    },
    /// A reserve entered the field at `slot`.
    SentOut {
        slot: SlotId,
        roster_index: RosterIndex,
        species: Species,
    },
    Caught {
        slot: SlotId,
        species: Species,
    },
    CatchBlocked {
        slot: SlotId,
    },
    /// A caught monster was added to the player roster.
    JoinedRoster {
        roster_index: RosterIndex,
        species: Species,
    },
    Sound(SoundCue),
    Victory {
        trainer: Option<String>,
    },
    Defeat,
    Evolved {
        side: Side,
        roster_index: RosterIndex,
        from: Species,
        into: Species,
    },
}
