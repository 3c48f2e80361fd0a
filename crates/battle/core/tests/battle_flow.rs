use std::cell::{Cell, RefCell};
use std::rc::Rc;

use battle_core::env::{AbilityUnlock, Element};
use battle_core::monster::BaseStats;
use battle_core::{
    AbilityId, BattleConfig, BattleEvent, BattleObserver, BattlePhase, BattleResult,
    BattleSession, BattleState, BattleView, DecisionSeed, Encounter, EndOfBattleHook, MenuInput,
    MenuOptions, Monster, OpponentAction, OpponentPolicy, RngOracle, Roster, SelectionMode, Side,
    SlotId, SlotStatus, Species, SpeciesData,
};

// ============================================================================
// Helpers
// ============================================================================

const INPUT_DT: f64 = 0.01;

fn ready(mut monster: Monster) -> Monster {
    monster.initiative = 100.0;
    monster
}

fn session(player: Vec<Monster>, opponent: Vec<Monster>, encounter: Encounter) -> BattleSession {
    BattleSession::new(
        Roster::from_monsters(player),
        Roster::from_monsters(opponent),
        encounter,
        BattleConfig::with_seed(7),
    )
}

/// Sends one input per tick.
fn press(session: &mut BattleSession, inputs: &[MenuInput]) {
    for input in inputs {
        session.tick(INPUT_DT, Some(*input));
    }
}

/// A plant monster with no defense and plenty of health.
fn soft_plant(level: u32) -> Monster {
    static SOFT_ABILITIES: [AbilityUnlock; 1] = [AbilityUnlock {
        level: 0,
        ability: AbilityId::Scratch,
    }];
    let data = SpeciesData {
        species: Species::Plumette,
        element: Element::Plant,
        base: BaseStats {
            max_health: 100.0,
            max_energy: 10.0,
            attack: 1.0,
            defense: 0.0,
            recovery: 1.0,
            speed: 1.0,
        },
        abilities: &SOFT_ABILITIES,
        evolution: None,
    };
    Monster::from_data(&data, level)
}

/// Opponent policy that always does the same thing.
struct Scripted(OpponentAction);

impl OpponentPolicy for Scripted {
    fn choose(
        &self,
        _actor: SlotId,
        _state: &BattleState,
        _rng: &dyn RngOracle,
        _seed: DecisionSeed,
    ) -> OpponentAction {
        self.0
    }
}

#[derive(Clone, Default)]
struct RecordingHook(Rc<RefCell<Vec<String>>>);

impl EndOfBattleHook for RecordingHook {
    fn on_victory(&mut self, trainer: Option<&str>) {
        self.0
            .borrow_mut()
            .push(format!("victory:{}", trainer.unwrap_or("wild")));
    }

    fn on_defeat(&mut self) {
        self.0.borrow_mut().push("defeat".to_owned());
    }
}

fn count_events(events: &[BattleEvent], predicate: impl Fn(&BattleEvent) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

/// Player Sparchu lv10 (attack 30) attacks with Fire, the second ability of
/// its menu, at opponent slot 0.
const FIRE_AT_FIRST_OPPONENT: [MenuInput; 4] = [
    MenuInput::Confirm,
    MenuInput::Down,
    MenuInput::Confirm,
    MenuInput::Confirm,
];

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn initiative_resets_on_grant_and_freezes_while_held() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![Monster::new(Species::Plumette, 10)],
        Encounter::Wild,
    );

    session.tick(0.1, None);
    let state = session.state();
    assert_eq!(state.acting(), Some(SlotId::player(0)));
    assert_eq!(state.selection.mode, SelectionMode::General);
    assert_eq!(state.monster(SlotId::player(0)).unwrap().initiative, 0.0);

    let opponent_meter = state.monster(SlotId::opponent(0)).unwrap().initiative;
    let player_energy = state.monster(SlotId::player(0)).unwrap().energy;
    assert!(opponent_meter > 0.0);

    for _ in 0..50 {
        session.tick(1.0, None);
    }
    let state = session.state();
    assert_eq!(state.acting(), Some(SlotId::player(0)));
    assert_eq!(state.monster(SlotId::player(0)).unwrap().initiative, 0.0);
    assert_eq!(state.monster(SlotId::player(0)).unwrap().energy, player_energy);
    assert_eq!(
        state.monster(SlotId::opponent(0)).unwrap().initiative,
        opponent_meter
    );
}

#[test]
fn opponents_are_scanned_first_and_only_one_acts() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![
            ready(Monster::new(Species::Plumette, 10)),
            ready(Monster::new(Species::Finsta, 10)),
        ],
        Encounter::Wild,
    );

    session.tick(INPUT_DT, None);
    let state = session.state();
    assert_eq!(state.acting(), Some(SlotId::opponent(0)));
    assert_eq!(state.monster(SlotId::player(0)).unwrap().initiative, 100.0);
    assert_eq!(state.monster(SlotId::opponent(1)).unwrap().initiative, 100.0);

    let events = session.drain_events();
    assert_eq!(
        count_events(&events, |e| matches!(e, BattleEvent::TurnGranted { .. })),
        1
    );
}

#[test]
fn defend_ends_turn_and_sets_flag() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![Monster::new(Species::Plumette, 10)],
        Encounter::Wild,
    );
    session.tick(INPUT_DT, None);
    press(&mut session, &[MenuInput::Down, MenuInput::Confirm]);

    let state = session.state();
    assert!(state.monster(SlotId::player(0)).unwrap().defending);
    assert_eq!(state.acting(), None);
    assert_eq!(state.selection.mode, SelectionMode::None);
    assert_eq!(state.selection.cursors.general, 0);
}

// ============================================================================
// Attacks
// ============================================================================

#[test]
fn fire_on_defenseless_plant_doubles_and_pays_energy_at_commit() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![soft_plant(10)],
        Encounter::Wild,
    );
    session.tick(INPUT_DT, None);
    let energy_before = session.state().monster(SlotId::player(0)).unwrap().energy;

    press(&mut session, &FIRE_AT_FIRST_OPPONENT);
    let state = session.state();
    let attacker = state.monster(SlotId::player(0)).unwrap();
    assert_eq!(attacker.energy, energy_before - AbilityId::Fire.cost());
    assert_eq!(state.monster(SlotId::opponent(0)).unwrap().health, 1000.0);
    assert_eq!(state.acting(), Some(SlotId::player(0)));
    assert_eq!(state.selection.mode, SelectionMode::None);

    session.tick(0.5, None);
    let state = session.state();
    // 30 attack * 2.0 power * 2.0 fire→plant * 1.0 defense factor
    assert_eq!(state.monster(SlotId::opponent(0)).unwrap().health, 880.0);
    assert_eq!(state.acting(), None);
    assert!(state.slot(SlotId::opponent(0)).unwrap().highlighted);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::Impact { multiplier, amount, .. } if *multiplier == 2.0 && *amount == 120.0
    )));

    session.tick(0.5, None);
    assert!(!session.state().slot(SlotId::opponent(0)).unwrap().highlighted);
}

#[test]
fn impact_timer_starts_on_the_tick_after_commit() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![soft_plant(10)],
        Encounter::Wild,
    );
    session.tick(INPUT_DT, None);
    press(&mut session, &FIRE_AT_FIRST_OPPONENT[..3]);

    // Commit on a long tick: none of it counts toward the impact delay.
    session.tick(0.5, Some(MenuInput::Confirm));
    let state = session.state();
    assert_eq!(state.monster(SlotId::opponent(0)).unwrap().health, 1000.0);
    assert_eq!(
        state.timers.iter().map(|t| t.remaining_ms).collect::<Vec<_>>(),
        vec![400.0]
    );

    session.tick(0.25, None);
    assert_eq!(session.state().monster(SlotId::opponent(0)).unwrap().health, 1000.0);
    session.tick(0.25, None);
    assert_eq!(session.state().monster(SlotId::opponent(0)).unwrap().health, 880.0);
}

#[test]
fn cancel_keeps_turn_and_cursor() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![Monster::new(Species::Plumette, 10)],
        Encounter::Wild,
    );
    session.tick(INPUT_DT, None);
    press(
        &mut session,
        &[MenuInput::Confirm, MenuInput::Down, MenuInput::Cancel],
    );

    let state = session.state();
    assert_eq!(state.selection.mode, SelectionMode::General);
    assert_eq!(state.selection.cursors.attacks, 1);
    assert_eq!(state.acting(), Some(SlotId::player(0)));

    press(&mut session, &[MenuInput::Confirm]);
    let state = session.state();
    assert_eq!(state.selection.mode, SelectionMode::Attacks);
    assert_eq!(state.selection.cursors.attacks, 1);
}

// ============================================================================
// Faints, experience and outcomes
// ============================================================================

#[test]
fn last_opponent_faints_then_victory_on_next_tick() {
    let hook = RecordingHook::default();
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![Monster::new(Species::Plumette, 1)],
        Encounter::Wild,
    )
    .with_hook(hook.clone());

    session.tick(INPUT_DT, None);
    press(&mut session, &FIRE_AT_FIRST_OPPONENT);
    session.tick(0.5, None);

    let state = session.state();
    assert_eq!(state.phase, BattlePhase::InProgress);
    assert_eq!(
        state.slot(SlotId::opponent(0)).unwrap().status,
        SlotStatus::Fainting
    );
    assert_eq!(state.monster(SlotId::player(0)).unwrap().xp, 100.0);

    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Victory);
    assert!(session.state().slots(Side::Opponent).is_empty());
    assert_eq!(hook.0.borrow().as_slice(), &["victory:wild".to_owned()]);

    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Terminated);
    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Terminated);
    assert_eq!(hook.0.borrow().len(), 1);

    let events = session.drain_events();
    assert_eq!(
        count_events(&events, |e| matches!(
            e,
            BattleEvent::TurnGranted { slot } if slot.side == Side::Opponent
        )),
        0
    );
    assert_eq!(session.finish().result, Some(BattleResult::Victory));
}

#[test]
fn experience_is_split_between_survivors() {
    let mut session = session(
        vec![
            ready(Monster::new(Species::Sparchu, 10)),
            Monster::new(Species::Finsta, 10),
        ],
        vec![
            Monster::new(Species::Plumette, 1),
            Monster::new(Species::Plumette, 5),
        ],
        Encounter::Wild,
    );

    session.tick(INPUT_DT, None);
    press(&mut session, &FIRE_AT_FIRST_OPPONENT);
    session.tick(0.5, None);

    let state = session.state();
    assert_eq!(state.monster(SlotId::player(0)).unwrap().xp, 50.0);
    assert_eq!(state.monster(SlotId::player(1)).unwrap().xp, 50.0);
    assert_eq!(state.phase, BattlePhase::InProgress);
}

#[test]
fn player_defeat_when_last_combatant_faints() {
    let hook = RecordingHook::default();
    let mut session = session(
        vec![Monster::new(Species::Plumette, 1)],
        vec![ready(Monster::new(Species::Sparchu, 20))],
        Encounter::Trainer("Rival".into()),
    )
    .with_hook(hook.clone())
    .with_policy(Scripted(OpponentAction::Attack {
        ability: AbilityId::Fire,
        target: SlotId::player(0),
    }));

    session.tick(INPUT_DT, None);
    assert_eq!(session.state().acting(), Some(SlotId::opponent(0)));

    // Thinking delay, then impact.
    session.tick(1.0, None);
    assert_eq!(
        session.state().monster(SlotId::opponent(0)).unwrap().energy,
        140.0 - AbilityId::Fire.cost()
    );
    session.tick(0.5, None);
    assert_eq!(session.state().monster(SlotId::player(0)).unwrap().health, 0.0);
    assert_eq!(session.state().monster(SlotId::opponent(0)).unwrap().xp, 0.0);

    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Defeat);
    assert_eq!(hook.0.borrow().as_slice(), &["defeat".to_owned()]);
    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Terminated);

    let outcome = session.finish();
    assert_eq!(outcome.result, Some(BattleResult::Defeat));
    assert_eq!(outcome.player_roster.get(0).unwrap().health, 0.0);
}

#[test]
fn fainted_slot_is_refilled_from_lowest_reserve() {
    let mut session = session(
        vec![
            Monster::new(Species::Plumette, 1),
            Monster::new(Species::Finsta, 5),
            Monster::new(Species::Pouch, 5),
            Monster::new(Species::Sparchu, 5),
            Monster::new(Species::Jacana, 5),
        ],
        vec![ready(Monster::new(Species::Sparchu, 20))],
        Encounter::Wild,
    )
    .with_policy(Scripted(OpponentAction::Attack {
        ability: AbilityId::Fire,
        target: SlotId::player(0),
    }));

    session.tick(INPUT_DT, None);
    session.tick(1.0, None);
    session.tick(0.5, None);
    assert_eq!(
        session.state().slot(SlotId::player(0)).unwrap().status,
        SlotStatus::Fainting
    );

    session.tick(0.6, None);
    let state = session.state();
    assert_eq!(state.slot(SlotId::player(0)).unwrap().roster_index, 3);
    assert_eq!(state.slot(SlotId::player(1)).unwrap().roster_index, 1);
    assert_eq!(state.slot(SlotId::player(2)).unwrap().roster_index, 2);
    assert_eq!(state.phase, BattlePhase::InProgress);

    let events = session.drain_events();
    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::SentOut { slot, roster_index: 3, species: Species::Sparchu }
            if *slot == SlotId::player(0)
    )));
}

#[test]
fn victory_evolves_ready_monsters() {
    let mut session = session(
        vec![ready(Monster::new(Species::Larvea, 4))],
        vec![Monster::new(Species::Plumette, 1)],
        Encounter::Trainer("Hiker".into()),
    );

    session.tick(INPUT_DT, None);
    // Larvea lv4: [Scratch, Spark]; Spark is fire and finishes the plant.
    press(&mut session, &FIRE_AT_FIRST_OPPONENT);
    session.tick(0.5, None);
    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Victory);

    let events = session.drain_events();
    assert!(events.contains(&BattleEvent::Victory {
        trainer: Some("Hiker".into())
    }));

    let outcome = session.finish();
    let evolved = outcome.player_roster.get(0).unwrap();
    assert_eq!(evolved.species(), Species::Cleaf);
    assert_eq!(evolved.level(), 4);
    assert_eq!(evolved.xp, 100.0);
}

// ============================================================================
// Switch and catch
// ============================================================================

#[test]
fn switch_replaces_only_the_acting_slot() {
    let mut session = session(
        vec![
            ready(Monster::new(Species::Sparchu, 10)),
            Monster::new(Species::Finsta, 10),
            Monster::new(Species::Plumette, 10),
            Monster::new(Species::Pouch, 10),
        ],
        vec![Monster::new(Species::Atrox, 10)],
        Encounter::Wild,
    );
    session.tick(INPUT_DT, None);
    assert!(
        session
            .state()
            .selection
            .enabled
            .contains(MenuOptions::SWITCH)
    );

    press(
        &mut session,
        &[
            MenuInput::Down,
            MenuInput::Down,
            MenuInput::Confirm,
            MenuInput::Confirm,
        ],
    );

    let state = session.state();
    let occupants: Vec<_> = state
        .slots(Side::Player)
        .iter()
        .map(|(position, slot)| (position, slot.roster_index))
        .collect();
    assert_eq!(occupants, vec![(0, 3), (1, 1), (2, 2)]);
    assert_eq!(state.acting(), None);
    assert_eq!(state.selection.cursors.general, 0);
}

#[test]
fn weakened_wild_monster_is_caught_and_joins_roster() {
    let mut wild = Monster::new(Species::Plumette, 10);
    wild.health = 10.0;
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![wild],
        Encounter::Wild,
    );

    session.tick(INPUT_DT, None);
    press(
        &mut session,
        &[MenuInput::Up, MenuInput::Confirm, MenuInput::Confirm],
    );
    let state = session.state();
    assert_eq!(
        state.slot(SlotId::opponent(0)).unwrap().status,
        SlotStatus::Caught
    );
    assert_eq!(state.acting(), None);

    // The caught slot no longer counts as live, so the battle is decided on
    // the next end check and the pending removal is flushed with it.
    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Victory);
    let state = session.state();
    assert!(state.slots(Side::Opponent).is_empty());
    assert_eq!(
        state.roster(Side::Player).get(1).map(Monster::species),
        Some(Species::Plumette)
    );
    assert!(state.roster(Side::Opponent).is_empty());

    assert_eq!(session.tick(INPUT_DT, None), BattlePhase::Terminated);
    let events = session.drain_events();
    assert_eq!(
        count_events(&events, |e| matches!(e, BattleEvent::JoinedRoster { .. })),
        1
    );
}

#[test]
fn healthy_monster_blocks_catch_for_a_second() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![Monster::new(Species::Plumette, 10)],
        Encounter::Wild,
    );

    session.tick(INPUT_DT, None);
    press(
        &mut session,
        &[MenuInput::Up, MenuInput::Confirm, MenuInput::Confirm],
    );
    let state = session.state();
    assert!(state.catch_blocked);
    assert_eq!(
        state.slot(SlotId::opponent(0)).unwrap().status,
        SlotStatus::Fighting
    );
    assert_eq!(state.acting(), None);

    session.tick(1.0, None);
    assert!(!session.state().catch_blocked);
}

#[test]
fn trainer_battle_disables_catch() {
    let mut session = session(
        vec![ready(Monster::new(Species::Sparchu, 10))],
        vec![Monster::new(Species::Plumette, 10)],
        Encounter::Trainer("Rival".into()),
    );

    session.tick(INPUT_DT, None);
    assert!(
        !session
            .state()
            .selection
            .enabled
            .contains(MenuOptions::CATCH)
    );

    press(&mut session, &[MenuInput::Up, MenuInput::Confirm]);
    let state = session.state();
    assert_eq!(state.selection.mode, SelectionMode::General);
    assert_eq!(state.acting(), Some(SlotId::player(0)));
}

// ============================================================================
// Full battle
// ============================================================================

#[derive(Clone, Default)]
struct TickCounter(Rc<Cell<usize>>);

impl BattleObserver for TickCounter {
    fn on_tick(&mut self, view: &BattleView) {
        self.0.set(self.0.get() + 1);
        for slot in &view.slots {
            let (health, max_health) = slot.info.health;
            let (energy, max_energy) = slot.info.energy;
            let (initiative, _) = slot.info.initiative;
            assert!((0.0..=max_health).contains(&health));
            assert!((0.0..=max_energy).contains(&energy));
            assert!((0.0..=100.0).contains(&initiative));
        }
    }
}

#[test]
fn autopiloted_battle_runs_to_termination() {
    let counter = TickCounter::default();
    let mut session = session(
        vec![
            Monster::new(Species::Sparchu, 10),
            Monster::new(Species::Finsta, 8),
        ],
        vec![
            Monster::new(Species::Plumette, 5),
            Monster::new(Species::Larvea, 3),
        ],
        Encounter::Wild,
    )
    .with_observer(counter.clone());

    let mut ticks = 0;
    while session.tick(0.05, Some(MenuInput::Confirm)) != BattlePhase::Terminated {
        ticks += 1;
        assert!(ticks < 20_000, "battle did not finish");
    }

    assert_eq!(counter.0.get(), ticks + 1);
    let outcome = session.finish();
    assert!(outcome.result.is_some());
    for (_, monster) in outcome.player_roster.iter() {
        assert!((0.0..=monster.max_health()).contains(&monster.health));
    }
}
