use glam::Vec2;

use ion_drift::consts::{CHARGE_RADIUS, MAX_ACCELERATION, MOBILE_START};
use ion_drift::sim::{GameEvent, GamePhase, GameState, SimulationOutcome, circle_rect_overlap};
use ion_drift::{LevelSet, PhysicsTuning};

/// Build a game from a single JSON level
fn single_level(json: &str, tuning: PhysicsTuning) -> GameState {
    let levels = LevelSet::from_json(json).unwrap();
    GameState::new(levels, tuning).unwrap()
}

/// Mobile charge at (100, 300), one negative charge at (500, 100), nothing else in reach
fn lone_charge_level() -> GameState {
    single_level(
        r#"[{
            "name": "Lone charge",
            "start": [100, 300],
            "obstacles": [],
            "goals": [{ "x": 700, "y": 500, "width": 25, "height": 25 }],
            "charges": [{ "x": 500, "y": 100, "charge": -1 }]
        }]"#,
        PhysicsTuning::default(),
    )
}

// ==================================================================================
// End-to-end scenarios
// ==================================================================================

#[test]
fn attraction_toward_opposite_charge() {
    let mut state = lone_charge_level();
    assert_eq!(state.mobile.charge, 1.0);
    assert_eq!(state.mobile.mass, 25.0);

    state.start();
    assert_eq!(state.tick(1.0), SimulationOutcome::Continue);

    let toward_fixed = (Vec2::new(500.0, 100.0) - state.mobile.pos).normalize();

    // Net force points at the fixed charge
    let force_dir = state.mobile.combined_force.normalize();
    assert!(force_dir.dot(toward_fixed) > 0.999, "force {force_dir:?}");

    // Velocity picked up along the same direction
    let vel = state.mobile.vel;
    assert!(vel.length() > 0.0);
    assert!(vel.normalize().dot(toward_fixed) > 0.999, "velocity {vel:?}");
    assert!(vel.length() <= MAX_ACCELERATION * 1.0);

    // Displacement is tiny and bounded by the clamp
    let moved = state.mobile.pos.distance(MOBILE_START);
    assert!(moved <= 0.5 * MAX_ACCELERATION * 1.0 * 1.0);
    assert!(moved < 0.01);
}

#[test]
fn mobile_inside_obstacle_loses() {
    let mut state = GameState::bundled();
    let center = Vec2::new(212.0, 200.0);
    assert!(circle_rect_overlap(
        center,
        CHARGE_RADIUS,
        Vec2::new(200.0, 150.0),
        25.0,
        100.0
    ));

    let id = state.mobile.id;
    state.move_body(id, center).unwrap();
    state.start();
    assert_eq!(state.tick(16.0), SimulationOutcome::Lost);
    assert_eq!(state.phase, GamePhase::Lost);
}

#[test]
fn mobile_inside_goal_wins() {
    let mut state = GameState::bundled();
    let id = state.mobile.id;
    state.move_body(id, Vec2::new(712.0, 300.0)).unwrap();
    state.start();
    assert_eq!(state.tick(16.0), SimulationOutcome::Won);
    assert_eq!(state.phase, GamePhase::Won);

    // Sticky until reset
    let pos = state.mobile.pos;
    assert_eq!(state.tick(16.0), SimulationOutcome::Won);
    assert_eq!(state.mobile.pos, pos);
}

#[test]
fn reset_after_loss_restores_start() {
    let mut state = GameState::bundled();
    let id = state.mobile.id;
    state.move_body(id, Vec2::new(212.0, 200.0)).unwrap();
    state.start();
    state.tick(16.0);
    assert_eq!(state.phase, GamePhase::Lost);

    state.reset();
    assert_eq!(state.mobile.pos, MOBILE_START);
    assert_eq!(state.mobile.vel, Vec2::ZERO);
    assert_eq!(state.phase, GamePhase::Idle);

    let events = state.drain_events();
    assert_eq!(events.last(), Some(&GameEvent::Reset));
    assert!(events.contains(&GameEvent::Lost));
}

// ==================================================================================
// Longer runs
// ==================================================================================

#[test]
fn repelled_into_boundary_wall() {
    let mut state = single_level(
        r#"[{
            "name": "Pushed",
            "start": [30, 300],
            "obstacles": [],
            "charges": [{ "x": 60, "y": 300, "charge": 1 }]
        }]"#,
        PhysicsTuning::default(),
    );
    let left_wall = state
        .obstacles
        .iter()
        .find(|b| b.name == "Bound 1")
        .map(|b| b.id)
        .unwrap();

    state.start();
    let mut outcome = SimulationOutcome::Continue;
    for _ in 0..200 {
        outcome = state.tick(16.0);
        if outcome.is_terminal() {
            break;
        }
    }
    assert_eq!(outcome, SimulationOutcome::Lost);
    // Stopped against the left wall, moving left
    assert!(state.mobile.vel.x < 0.0);
    assert!(state.mobile.pos.x < 15.0 + 1.0);
    assert!(state.body(left_wall).is_some());
}

#[test]
fn impulse_does_not_depend_on_substep() {
    let run = |substep: f32| {
        let tuning = PhysicsTuning {
            substep,
            ..Default::default()
        };
        let mut state = single_level(
            r#"[{
                "name": "Far source",
                "start": [100, 300],
                "obstacles": [],
                "goals": [{ "x": 700, "y": 500, "width": 25, "height": 25 }],
                "charges": [{ "x": 700, "y": 100, "charge": -1 }]
            }]"#,
            tuning,
        );
        state.start();
        for _ in 0..4 {
            state.tick(16.0);
        }
        state.mobile.vel
    };

    let coarse = run(0.5);
    let fine = run(0.125);
    assert!((coarse - fine).length() / fine.length() < 0.01);
}

#[test]
fn bundled_levels_stay_finite() {
    let mut state = GameState::bundled();
    for index in 0..state.levels().len() {
        state.select_level(index).unwrap();
        state.start();
        for _ in 0..600 {
            if state.tick(1000.0 / 60.0).is_terminal() {
                break;
            }
            for body in state.bodies() {
                assert!(body.pos.is_finite(), "{} at {:?}", body.name, body.pos);
            }
            assert!(state.mobile.vel.is_finite());
        }
    }
}

#[test]
fn acceleration_ceiling_engages_near_a_charge() {
    // Mobile charge 20 units from an opposite charge: inside the softening radius
    let mut state = single_level(
        r#"[{
            "name": "Close call",
            "start": [100, 300],
            "obstacles": [],
            "goals": [{ "x": 700, "y": 500, "width": 25, "height": 25 }],
            "charges": [{ "x": 120, "y": 300, "charge": -1 }]
        }]"#,
        PhysicsTuning::default(),
    );
    let max = state.tuning.max_acceleration;
    assert_eq!(max, MAX_ACCELERATION);

    state.start();
    assert_eq!(state.tick(1.0), SimulationOutcome::Continue);

    // The raw acceleration is several times the ceiling
    let raw = state.mobile.combined_force * state.tuning.force_scale / state.mobile.mass;
    assert!(raw.length() > 2.0 * max, "raw acceleration {}", raw.length());

    // One tick of dt 1 at the ceiling, straight toward the charge
    let vel = state.mobile.vel;
    assert!((vel.length() - max).abs() / max < 0.01, "velocity {vel:?}");
    assert!(vel.x > 0.0);
}

#[test]
fn stall_is_clamped() {
    let mut a = lone_charge_level();
    let mut b = lone_charge_level();
    a.start();
    b.start();

    // A five second stall advances no further than the frame clamp
    a.tick(5000.0);
    b.tick(b.tuning.max_frame_dt);
    assert_eq!(a.mobile.pos, b.mobile.pos);
    assert_eq!(a.mobile.vel, b.mobile.vel);
}
