/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// "Thinking time" before an opponent acts on a granted turn.
    pub opponent_delay_ms: u32,
    /// Delay between a faint (or catch) and the slot being cleared, so the
    /// renderer can play the faint animation.
    pub removal_delay_ms: u32,
    /// Delay between committing an ability and its impact on the target.
    pub attack_impact_ms: u32,
    /// How long a target stays highlighted after being hit.
    pub highlight_ms: u32,
    /// How long the "catch blocked" cue stays visible.
    pub catch_blocked_ms: u32,
    /// Base seed for the opponent policy and randomised monster state.
    pub seed: u64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Active combatants per side.
    pub const MAX_ACTIVE: usize = 3;
    /// Maximum ability unlocks per species.
    pub const MAX_ABILITIES: usize = 8;

    // ===== balancing constants =====
    pub const INITIATIVE_READY: f64 = 100.0;
    pub const XP_PER_LEVEL: f64 = 150.0;
    pub const XP_AWARD_PER_LEVEL: f64 = 100.0;
    pub const ENERGY_RECOVERY_RATE: f64 = 0.009;
    pub const DEFENSE_DIVISOR: f64 = 2000.0;
    pub const DEFEND_BONUS: f64 = 0.2;
    pub const CATCH_HEALTH_RATIO: f64 = 0.9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OPPONENT_DELAY_MS: u32 = 1000;
    pub const DEFAULT_REMOVAL_DELAY_MS: u32 = 600;
    pub const DEFAULT_ATTACK_IMPACT_MS: u32 = 400;
    pub const DEFAULT_HIGHLIGHT_MS: u32 = 300;
    pub const DEFAULT_CATCH_BLOCKED_MS: u32 = 1000;

    pub fn new() -> Self {
        Self {
            opponent_delay_ms: Self::DEFAULT_OPPONENT_DELAY_MS,
            removal_delay_ms: Self::DEFAULT_REMOVAL_DELAY_MS,
            attack_impact_ms: Self::DEFAULT_ATTACK_IMPACT_MS,
            highlight_ms: Self::DEFAULT_HIGHLIGHT_MS,
            catch_blocked_ms: Self::DEFAULT_CATCH_BLOCKED_MS,
            seed: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
