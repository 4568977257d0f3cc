//! Full duels driven through the public action API

use std::sync::Arc;

use lowlife_duel::core::{CombatantId, DuelConfig, DuelError, SessionKey, Side};
use lowlife_duel::duel::{
    hit_probability, Action, Battlefield, Combatant, DuelEnd, DuelPhase, DuelState, DuelStatus,
    FinisherChoice, PendingGrenade, RangeGate, TimeOfDay,
};
use lowlife_duel::provider::{BaseAttributes, Collaborators, CombatKit, Roster};
use lowlife_duel::session::DuelRegistry;

const ROOK: CombatantId = CombatantId(1);
const VEX: CombatantId = CombatantId(2);

fn start(collaborators: Collaborators, seed: u64) -> DuelState {
    let mut state = DuelState::new(
        SessionKey::new(10, 20),
        Combatant::new(ROOK, "Rook"),
        Combatant::new(VEX, "Vex"),
        DuelConfig::default(),
        collaborators,
        seed,
    )
    .expect("duel should start");
    state.battlefield = Battlefield::open(26, TimeOfDay::Day);
    state.refresh_cover();
    state
}

fn armored(armor: f64) -> Collaborators {
    let attrs = BaseAttributes {
        armor,
        ..BaseAttributes::default()
    };
    let roster = Roster::new()
        .with_fighter(ROOK, attrs.clone(), CombatKit::default())
        .with_fighter(VEX, attrs, CombatKit::default());
    Collaborators::from_roster(Arc::new(roster))
}

fn on_turn(state: &DuelState) -> (Side, CombatantId) {
    (state.turn, state.fighter(state.turn).id)
}

#[test]
fn test_even_fighters_hit_at_accuracy() {
    let even = BaseAttributes::default();
    let p = hit_probability(80, &even, &even, None, false);
    assert!((p - 0.80).abs() < 1e-9);
}

#[test]
fn test_grapple_start_keeps_starter_on_turn() {
    let mut state = start(Collaborators::default(), 3);
    state.range_idx = RangeGate::Hands.index();
    let (side, id) = on_turn(&state);
    let status = state.act(id, Action::Grapple).unwrap();
    assert_eq!(status, DuelStatus::Ongoing);
    assert_eq!(state.phase, DuelPhase::Grapple);
    assert_eq!(state.turn, side);
    assert_eq!(state.gap(), 2);
    assert!(state.log.contains("Grappling engaged!"));
}

#[test]
fn test_pending_grenade_hits_before_the_action() {
    let mut state = start(armored(10.0), 11);
    let (side, id) = on_turn(&state);
    state.side_mut(side).pending_grenade = Some(PendingGrenade {
        from: side.other(),
        damage: 35,
    });
    state.act(id, Action::Disengage).unwrap();
    assert_eq!(state.fighter(side).hp, 70);
    assert!(state.side(side).pending_grenade.is_none());
    let lines = state.log.lines();
    let boom = lines.iter().position(|l| l.contains("Grenade detonates")).unwrap();
    let retreat = lines.iter().position(|l| l.contains("retreats")).unwrap();
    assert!(boom < retreat);
}

#[test]
fn test_both_fall_is_a_draw() {
    let mut state = start(Collaborators::default(), 5);
    let (side, id) = on_turn(&state);
    state.side_mut(side.other()).unconscious = true;
    state.fighter_mut(side).hp = 10;
    state.side_mut(side).pending_grenade = Some(PendingGrenade {
        from: side.other(),
        damage: 30,
    });
    let status = state.act(id, Action::Advance).unwrap();
    assert_eq!(status, DuelStatus::Ended(DuelEnd::Draw));
    assert!(state.log.contains("Both fighters fall! It's a draw."));
}

#[test]
fn test_squeeze_on_empty_lungs_knocks_out() {
    let mut state = start(Collaborators::default(), 8);
    state.range_idx = RangeGate::Hands.index();
    let (choker, id) = on_turn(&state);
    let target = choker.other();
    state.phase = DuelPhase::Choke { choker, target };
    state.side_mut(target).breath = Some(5);
    state.side_mut(target).bloodflow = Some(50);

    let status = state.act(id, Action::Choke).unwrap();
    assert!(state.side(target).unconscious);
    assert_eq!(state.side(target).breath, Some(0));
    assert_eq!(state.fighter(target).hp, 100);
    assert_eq!(status, DuelStatus::Finisher { victor: id, target: state.fighter(target).id });

    let status = state.act(id, Action::Finisher(FinisherChoice::Mercy)).unwrap();
    assert!(status.is_over());
}

#[test]
fn test_breaking_free_opens_range_and_ends_grapple() {
    let mut freed = None;
    for seed in 0..20 {
        let mut state = start(Collaborators::default(), seed);
        state.range_idx = RangeGate::Hands.index();
        let (side, id) = on_turn(&state);
        state.act(id, Action::Grapple).unwrap();
        state.side_mut(side).positioning = 100;
        state.side_mut(side.other()).positioning = 0;
        state.side_mut(side.other()).breath = Some(40);
        state.act(id, Action::BreakFree).unwrap();
        if state.phase == DuelPhase::Ranged {
            freed = Some(state);
            break;
        }
    }
    let state = freed.expect("a 90% break-free should land within 20 seeds");
    assert_eq!(state.gate(), RangeGate::Close);
    assert_eq!(state.gap(), 6);
    assert!(state.side(Side::A).position < state.side(Side::B).position);
    assert!(state.side(Side::A).breath.is_none() && state.side(Side::B).breath.is_none());
    let lines = state.log.lines();
    let broke = lines.iter().position(|l| l.contains("**breaks free**")).unwrap();
    let resumed = lines
        .iter()
        .position(|l| l.contains("Grappling broken. Combat resumes."))
        .unwrap();
    assert!(broke < resumed);
}

#[test]
fn test_clearing_stacks_expire_once() {
    let mut state = start(Collaborators::default(), 12);
    state.add_clearing_stack(Side::A, 2, 1);
    for _ in 0..2 {
        let (_, id) = on_turn(&state);
        state.act(id, Action::Advance).unwrap();
    }
    assert_eq!(state.tick, 2);
    assert_eq!(state.side(Side::A).clearing.stacks, 0);
    state.expire_clearing();
    assert_eq!(state.side(Side::A).clearing.stacks, 0);
    assert!(state.side(Side::A).clearing.expiries.is_empty());
}

#[test]
fn test_illegal_actions_leave_state_untouched() {
    let mut state = start(Collaborators::default(), 13);
    let (side, id) = on_turn(&state);
    let idle = state.fighter(side.other()).id;
    state.side_mut(side).pending_grenade = Some(PendingGrenade {
        from: side.other(),
        damage: 20,
    });
    let positions = (state.side(Side::A).position, state.side(Side::B).position);
    let log_len = state.log.len();

    let rejected = [
        state.act(idle, Action::Attack).unwrap_err(),
        state.act(id, Action::Grapple).unwrap_err(),
        state.act(id, Action::Punch).unwrap_err(),
        state.act(id, Action::Finisher(FinisherChoice::Beat)).unwrap_err(),
        state.act(CombatantId(77), Action::Advance).unwrap_err(),
    ];
    assert!(matches!(rejected[0], DuelError::NotYourTurn { .. }));
    assert!(matches!(rejected[1], DuelError::NotAtHands));
    assert!(matches!(rejected[2], DuelError::WrongPhase { .. }));
    assert!(matches!(rejected[3], DuelError::WrongPhase { .. }));
    assert!(matches!(rejected[4], DuelError::NotParticipant(_)));

    assert_eq!(state.log.len(), log_len);
    assert_eq!(state.tick, 0);
    assert_eq!(state.fighter(side).hp, 100);
    assert!(state.side(side).pending_grenade.is_some());
    assert_eq!(
        (state.side(Side::A).position, state.side(Side::B).position),
        positions
    );
}

/// Simple human script: close in, punch, fight out of grapples
fn human_move(state: &DuelState, me: Side) -> Action {
    match state.phase {
        DuelPhase::Finisher { .. } => Action::Finisher(FinisherChoice::Mercy),
        DuelPhase::Choke { choker, .. } if choker == me => Action::Choke,
        DuelPhase::Choke { .. } => Action::Struggle,
        DuelPhase::Grapple => Action::Punch,
        _ if state.gate() == RangeGate::Hands => Action::Attack,
        _ => Action::Advance,
    }
}

#[test]
fn test_duel_against_ai_runs_to_completion() {
    let mut registry = DuelRegistry::new(DuelConfig::default(), Collaborators::default(), 21);
    let key = SessionKey::new(1, 2);
    let user = CombatantId(555);
    registry.start_vs_ai(key, user, "Rook").unwrap();

    let mut actions = 0;
    loop {
        let state = registry.get(key).unwrap();
        let Some(side) = state.acting_side() else {
            break;
        };
        assert_eq!(state.fighter(side).id, user, "AI should never be left holding the turn");
        let action = human_move(state, side);
        registry.act(key, user, action).unwrap();
        actions += 1;
        assert!(actions < 5_000, "duel did not finish");
    }

    let state = registry.get(key).unwrap();
    assert!(matches!(state.status(), DuelStatus::Ended(_)));
    assert_eq!(registry.retire_finished().len(), 1);
    assert!(registry.is_empty());
}

#[test]
fn test_ai_vs_ai_driver_loop() {
    let mut state = DuelState::new(
        SessionKey::new(0, 0),
        Combatant::ai(ROOK, "Rook"),
        Combatant::ai(VEX, "Vex"),
        DuelConfig::default(),
        Collaborators::default(),
        99,
    )
    .unwrap();
    let mut turns = 0;
    while state.is_active() && turns < 5_000 {
        state.take_ai_turn().unwrap();
        turns += 1;
    }
    assert!(!state.is_active());
    assert!(matches!(state.take_ai_turn(), Err(DuelError::DuelEnded)));
}
