//! Combat resolution.
//!
//! Pure functions that turn an ability, its user and its target into a
//! health delta. Turn handling, faints and experience live in the engine.

pub mod damage;
pub mod result;

pub use damage::{base_amount, calculate_amount, defense_factor};
pub use result::{AttackResult, apply_result, resolve_attack};
