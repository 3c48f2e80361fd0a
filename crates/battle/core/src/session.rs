//! Battle session: owns one encounter from setup to termination.
//!
//! Each call to [`BattleSession::tick`] runs the fixed order
//!
//! 1. end check (from the previous tick's faints)
//! 2. player input
//! 3. deferred timers
//! 4. meter and energy advancement
//! 5. readiness scan
//! 6. observer notification
//!
//! Timers scheduled anywhere in a tick start counting down on the next one.
//!
//! Guarded failures never escape a tick: they are logged and the offending
//! input or task is dropped.

use crate::config::BattleConfig;
use crate::engine::{BattleEngine, BattleError, BattleObserver, EndOfBattleHook, NoopHook};
use crate::env::{PcgRng, RngOracle};
use crate::error::GameError;
use crate::event::BattleEvent;
use crate::policy::{OpponentPolicy, RandomPolicy};
use crate::state::{BattlePhase, BattleResult, BattleState, Encounter, MenuInput, Roster};
use crate::view::BattleView;

/// Rosters handed back when a session is finished.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleOutcome {
    /// `None` when the session was finished before a side ran out.
    pub result: Option<BattleResult>,
    pub player_roster: Roster,
    pub opponent_roster: Roster,
}

pub struct BattleSession {
    state: BattleState,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,
    policy: Box<dyn OpponentPolicy>,
    hook: Box<dyn EndOfBattleHook>,
    observer: Option<Box<dyn BattleObserver>>,
}

impl BattleSession {
    /// Creates a session and sends out the starting combatants.
    pub fn new(
        player_roster: Roster,
        opponent_roster: Roster,
        encounter: Encounter,
        config: BattleConfig,
    ) -> Self {
        let mut session = Self {
            state: BattleState::new(player_roster, opponent_roster, encounter),
            config,
            rng: Box::new(PcgRng),
            policy: Box::new(RandomPolicy),
            hook: Box::new(NoopHook),
            observer: None,
        };
        BattleEngine::new(&mut session.state, &session.config).setup();
        session
    }

    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_hook(mut self, hook: impl EndOfBattleHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    pub fn with_observer(mut self, observer: impl BattleObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Advances the battle by `dt` seconds, applying at most one menu input.
    ///
    /// Returns the phase after the tick. Ticking a terminated battle does
    /// nothing.
    pub fn tick(&mut self, dt: f64, input: Option<MenuInput>) -> BattlePhase {
        if self.state.phase == BattlePhase::Terminated {
            return self.state.phase;
        }

        let mut engine = BattleEngine::new(&mut self.state, &self.config);
        let phase = engine.check_end(self.hook.as_mut());

        if !phase.is_over() {
            if let Some(input) = input {
                if let Err(err) = engine.handle_input(input) {
                    report(&err);
                }
            }

            for task in engine.due_tasks(dt * 1000.0) {
                if let Err(err) = engine.run_task(task, self.policy.as_ref(), self.rng.as_ref()) {
                    report(&err);
                }
            }

            engine.tick_monsters(dt);

            if let Err(err) = engine.scan_and_grant() {
                report(&err);
            }
        }
        self.state.timers.arm();

        if let Some(observer) = self.observer.as_mut() {
            observer.on_tick(&BattleView::capture(&self.state));
        }
        self.state.phase
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase.is_over()
    }

    pub fn view(&self) -> BattleView {
        BattleView::capture(&self.state)
    }

    /// Takes every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Ends the session and hands the rosters back.
    pub fn finish(self) -> BattleOutcome {
        let result = self.state.result;
        let (player_roster, opponent_roster) = self.state.into_rosters();
        BattleOutcome {
            result,
            player_roster,
            opponent_roster,
        }
    }
}

fn report(err: &BattleError) {
    let severity = err.severity();
    if severity.is_recoverable() {
        tracing::debug!(code = err.error_code(), "ignored: {err}");
    } else if severity.is_internal() {
        tracing::error!(code = err.error_code(), severity = severity.as_str(), "{err}");
    } else {
        tracing::warn!(code = err.error_code(), severity = severity.as_str(), "{err}");
    }
}
