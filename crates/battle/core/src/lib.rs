//! Real-time turn-based monster battle engine.
//!
//! `battle-core` owns the battle rules: monster stats and leveling, the
//! initiative scheduler, the player menu state machine, the opponent policy
//! and combat resolution. It renders nothing. A [`BattleSession`] is ticked
//! by the host game and reports back through [`BattleEvent`]s, a
//! [`BattleView`] snapshot and the end-of-battle hook.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod monster;
pub mod policy;
pub mod session;
pub mod state;
pub mod view;

pub use combat::{AttackResult, resolve_attack};
pub use config::BattleConfig;
pub use engine::{BattleEngine, BattleError, BattleObserver, EndOfBattleHook, NoopHook};
pub use env::{
    AbilityData, AbilityEffect, AbilityId, AnimationCue, Element, PcgRng, RngOracle, Species,
    SpeciesData, TargetSide,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{BattleEvent, SoundCue};
pub use monster::{Monster, MonsterInfo, MonsterStats, StatKind};
pub use policy::{DecisionSeed, OpponentAction, OpponentPolicy, RandomPolicy};
pub use session::{BattleOutcome, BattleSession};
pub use state::{
    BattlePhase, BattleResult, BattleState, Encounter, MenuInput, MenuOption, MenuOptions,
    Roster, RosterError, RosterIndex, SelectionMode, SelectionState, Side, SlotId, SlotStatus,
    TurnLock, TurnLockError,
};
pub use view::{BattleView, RosterEntryView, SlotView};
