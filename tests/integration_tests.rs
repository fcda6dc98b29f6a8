//! Integration tests for tonearm-control.
//!
//! These tests drive the tonearm through a simulated mechanism and check the
//! physical outcome of every primitive, routine and front-end command.

mod common;

use proptest::prelude::*;

use common::{rig, rig_with, BrokenLed, Led, Mechanism, LIFT_TOP, PICKUP, SWING_SEATED};
use tonearm_control::error::{ConfigError, Error, HardwareError, MovementError};
use tonearm_control::{
    Axis, CalibrationTable, ClutchState, Command, HorizontalDirection, Landmark, LiftPosition,
    RecordSize, Routine, RoutineState, Rpm, SensorChannel, StatusLeds, Turntable, TurntableConfig,
    VerticalDirection,
};

fn jammed_vertically() -> Mechanism {
    Mechanism {
        vertical_jammed: true,
        ..Default::default()
    }
}

fn jammed_horizontally() -> Mechanism {
    Mechanism {
        horizontal_jammed: true,
        ..Default::default()
    }
}

fn default_calibration() -> CalibrationTable {
    CalibrationTable::defaults(&TurntableConfig::default().calibration)
}

// =============================================================================
// Seek to sensor
// =============================================================================

#[test]
fn seek_up_stops_at_upper_limit() {
    let (mech, mut arm) = rig();

    let steps = arm.seek_vertical(VerticalDirection::Up, Rpm(10)).unwrap();

    let m = mech.borrow();
    assert_eq!(steps, LIFT_TOP as u32);
    assert_eq!(m.lift, LIFT_TOP);
    assert_eq!(m.speed, Some(Rpm(10)));
    assert!(m.is_at_rest());
    assert_eq!(arm.selected_axis(), None);
}

#[test]
fn seek_at_target_takes_no_steps() {
    let (mech, mut arm) = rig();

    assert_eq!(arm.seek_vertical(VerticalDirection::Down, Rpm(10)), Ok(0));
    assert_eq!(arm.seek_landmark(Landmark::Home, Rpm(8)), Ok(0));

    let m = mech.borrow();
    assert_eq!(m.vertical_steps, 0);
    assert_eq!(m.horizontal_steps, 0);
    assert!(m.is_at_rest());
    assert_eq!(arm.landmark(), Some(Landmark::Home));
}

#[test]
fn jammed_lift_times_out_moving_up() {
    let (mech, mut arm) = rig_with(jammed_vertically(), &TurntableConfig::default());

    let result = arm.seek_vertical(VerticalDirection::Up, Rpm(10));

    assert_eq!(result, Err(Error::Movement(MovementError::VerticalUpTimeout)));
    let m = mech.borrow();
    assert_eq!(m.vertical_steps, 1500);
    assert!(m.is_at_rest());
}

#[test]
fn jammed_lift_times_out_moving_down() {
    let mechanism = Mechanism {
        lift: LIFT_TOP,
        vertical_jammed: true,
        ..Default::default()
    };
    let (mech, mut arm) = rig_with(mechanism, &TurntableConfig::default());

    let result = arm.seek_vertical(VerticalDirection::Down, Rpm(3));

    assert_eq!(result, Err(Error::Movement(MovementError::VerticalDownTimeout)));
    assert_eq!(MovementError::VerticalDownTimeout.code(), 0xB);
    assert!(mech.borrow().is_at_rest());
}

#[test]
fn swing_from_home_reaches_play_sensor() {
    let (mech, mut arm) = rig();
    arm.set_clutch(ClutchState::Engaged).unwrap();

    let steps = arm.seek_landmark(Landmark::Play12, Rpm(8)).unwrap();

    assert_eq!(steps, 500);
    assert_eq!(mech.borrow().swing, 400);
    assert_eq!(arm.landmark(), Some(Landmark::Play12));
    assert!(mech.borrow().is_at_rest());
}

#[test]
fn swing_without_clutch_times_out() {
    let (mech, mut arm) = rig();

    let result = arm.seek_landmark(Landmark::Play12, Rpm(8));

    assert_eq!(
        result,
        Err(Error::Movement(MovementError::HorizontalClockwiseTimeout))
    );
    let m = mech.borrow();
    assert_eq!(m.horizontal_steps, 3000);
    assert_eq!(m.swing, SWING_SEATED);
    assert!(m.is_at_rest());
    assert_eq!(arm.landmark(), None);
}

#[test]
fn swing_direction_follows_last_landmark() {
    let mechanism = Mechanism {
        swing: 1205,
        ..Default::default()
    };
    let (mech, mut arm) = rig_with(mechanism, &TurntableConfig::default());
    arm.set_clutch(ClutchState::Engaged).unwrap();

    assert_eq!(arm.seek_landmark(Landmark::Play7, Rpm(8)), Ok(0));
    assert_eq!(arm.seek_landmark(Landmark::Play12, Rpm(8)), Ok(795));
    assert_eq!(mech.borrow().swing, 410);
}

#[test]
fn home_sensor_overrides_stale_landmark() {
    let (mech, mut arm) = rig();
    arm.set_clutch(ClutchState::Engaged).unwrap();
    arm.seek_landmark(Landmark::Pickup, Rpm(8)).unwrap();
    assert_eq!(arm.landmark(), Some(Landmark::Pickup));

    // Someone carried the arm back by hand.
    mech.borrow_mut().swing = SWING_SEATED;

    assert_eq!(arm.seek_landmark(Landmark::Play10, Rpm(8)), Ok(900));
    assert_eq!(arm.landmark(), Some(Landmark::Play10));
}

#[test]
fn seek_rejects_channel_of_other_axis() {
    let (mech, mut arm) = rig();
    let channels = arm.channels().clone();

    assert_eq!(
        arm.seek_to_sensor(Axis::Vertical, channels.home, 10, Rpm(10)),
        Err(Error::Config(ConfigError::ChannelNotOnAxis {
            axis: Axis::Vertical,
            channel: 7
        }))
    );
    assert_eq!(
        arm.seek_to_sensor(Axis::Horizontal, channels.pause_button, 10, Rpm(10)),
        Err(Error::Config(ConfigError::ChannelNotOnAxis {
            axis: Axis::Horizontal,
            channel: 3
        }))
    );
    assert_eq!(mech.borrow().vertical_steps + mech.borrow().horizontal_steps, 0);
}

#[test]
fn step_failure_releases_axis() {
    let mechanism = Mechanism {
        fail_steps: true,
        ..Default::default()
    };
    let (mech, mut arm) = rig_with(mechanism, &TurntableConfig::default());

    assert_eq!(
        arm.seek_vertical(VerticalDirection::Up, Rpm(10)),
        Err(Error::Hardware(HardwareError::Pin))
    );
    assert!(mech.borrow().is_at_rest());
    assert_eq!(arm.selected_axis(), None);
}

#[test]
fn seek_speed_is_capped() {
    let (mech, mut arm) = rig();

    arm.seek_vertical(VerticalDirection::Up, Rpm(60)).unwrap();

    assert_eq!(mech.borrow().speed, Some(Rpm(14)));
}

// =============================================================================
// Relative moves and clutch
// =============================================================================

#[test]
fn relative_move_steps_exactly() {
    let (mech, mut arm) = rig();
    arm.set_clutch(ClutchState::Engaged).unwrap();

    arm.relative_move(50, HorizontalDirection::Clockwise.into(), Rpm(14))
        .unwrap();

    let m = mech.borrow();
    assert_eq!(m.swing, SWING_SEATED + 50);
    assert_eq!(m.horizontal_steps, 50);
    assert!(m.is_at_rest());
}

#[test]
fn clutch_settle_is_longer_when_engaging() {
    let (mech, mut arm) = rig();

    arm.set_clutch(ClutchState::Engaged).unwrap();
    assert_eq!(mech.borrow().elapsed_ms(), 300);

    arm.set_clutch(ClutchState::Disengaged).unwrap();
    assert_eq!(mech.borrow().elapsed_ms(), 500);
    assert_eq!(arm.clutch_state(), Some(ClutchState::Disengaged));
}

#[test]
fn make_safe_releases_engaged_clutch() {
    let (mech, mut arm) = rig();

    arm.make_safe().unwrap();
    assert!(mech.borrow().clutch_log.is_empty());

    arm.set_clutch(ClutchState::Engaged).unwrap();
    arm.make_safe().unwrap();

    let m = mech.borrow();
    assert_eq!(m.clutch, ClutchState::Disengaged);
    assert_eq!(m.clutch_log, vec![ClutchState::Engaged, ClutchState::Disengaged]);
    assert!(m.is_at_rest());
}

// =============================================================================
// Routines
// =============================================================================

#[test]
fn home_returns_arm_to_rest() {
    let mechanism = Mechanism {
        swing: 805,
        ..Default::default()
    };
    let (mech, mut arm) = rig_with(mechanism, &TurntableConfig::default());

    arm.home().unwrap();

    let m = mech.borrow();
    assert_eq!(m.swing, SWING_SEATED);
    assert_eq!(m.lift, 0);
    assert_eq!(m.horizontal_steps, 805 + 100);
    assert_eq!(m.clutch, ClutchState::Disengaged);
    assert_eq!(m.clutch_log, vec![ClutchState::Engaged, ClutchState::Disengaged]);
    assert!(m.is_at_rest());
    assert_eq!(arm.landmark(), Some(Landmark::Home));
}

#[test]
fn failed_home_seek_skips_seating_and_releases_clutch() {
    let mechanism = Mechanism {
        swing: 805,
        horizontal_jammed: true,
        ..Default::default()
    };
    let (mech, mut arm) = rig_with(mechanism, &TurntableConfig::default());

    let result = arm.home();

    assert_eq!(
        result,
        Err(Error::Movement(MovementError::HorizontalCounterclockwiseTimeout))
    );
    let m = mech.borrow();
    assert_eq!(m.horizontal_steps, 3000);
    assert_eq!(m.lift, LIFT_TOP);
    assert_eq!(m.clutch, ClutchState::Disengaged);
    assert!(m.is_at_rest());
}

#[test]
fn failed_lift_never_engages_clutch() {
    let (mech, mut arm) = rig_with(jammed_vertically(), &TurntableConfig::default());

    assert_eq!(
        arm.home(),
        Err(Error::Movement(MovementError::VerticalUpTimeout))
    );
    let m = mech.borrow();
    assert!(m.clutch_log.is_empty());
    assert_eq!(m.clutch, ClutchState::Disengaged);
}

#[test]
fn play_lands_on_calibrated_lead_in() {
    let (mech, mut arm) = rig();
    let selector_2 = arm.channels().record_size_selector_2;
    mech.borrow_mut().set_input(selector_2, true);

    assert_eq!(arm.selected_record_size(), Ok(RecordSize::Twelve));
    arm.play(&default_calibration()).unwrap();

    let m = mech.borrow();
    assert_eq!(m.swing, 400 + 12);
    assert_eq!(m.horizontal_steps, 500 + 12);
    assert_eq!(m.lift, 0);
    assert_eq!(m.speed, Some(Rpm(3)));
    assert_eq!(m.clutch, ClutchState::Disengaged);
    // engage + offset settle + disengage
    assert_eq!(m.elapsed_ms(), 300 + 200 + 200);
    assert!(m.is_at_rest());
}

#[test]
fn play_uses_stored_offset() {
    let (mech, mut arm) = rig();
    let selector_1 = arm.channels().record_size_selector_1;
    mech.borrow_mut().set_input(selector_1, true);

    let mut calibration = default_calibration();
    calibration.set_offset(RecordSize::Seven, 3).unwrap();
    arm.play(&calibration).unwrap();

    let m = mech.borrow();
    assert_eq!(m.swing, 1203);
    assert_eq!(m.horizontal_steps, 1303);
}

#[test]
fn play_follows_rewired_play_sensor() {
    let mut config = TurntableConfig::default();
    config.channels.play_10in = SensorChannel(12);
    let mechanism = Mechanism {
        channels: config.channels.clone(),
        ..Default::default()
    };
    let (mech, mut arm) = rig_with(mechanism, &config);

    let record = default_calibration().record(RecordSize::Ten, arm.channels());
    assert_eq!(record.destination, SensorChannel(12));

    arm.play(&default_calibration()).unwrap();

    assert_eq!(mech.borrow().swing, 810);
    assert_eq!(arm.landmark(), Some(Landmark::Play10));
}

#[test]
fn play_without_offset_skips_settle() {
    let (mech, mut arm) = rig();

    let mut calibration = default_calibration();
    calibration.set_offset(RecordSize::Ten, 0).unwrap();
    arm.play(&calibration).unwrap();

    let m = mech.borrow();
    assert_eq!(m.swing, 800);
    assert_eq!(m.elapsed_ms(), 300 + 200);
}

#[test]
fn failed_play_seek_skips_offset() {
    let (mech, mut arm) = rig_with(jammed_horizontally(), &TurntableConfig::default());

    let result = arm.play(&default_calibration());

    assert_eq!(
        result,
        Err(Error::Movement(MovementError::HorizontalClockwiseTimeout))
    );
    let m = mech.borrow();
    assert_eq!(m.horizontal_steps, 3000);
    assert_eq!(m.lift, LIFT_TOP);
    assert_eq!(m.clutch, ClutchState::Disengaged);
    assert!(m.is_at_rest());
}

#[test]
fn pause_toggles_lift_without_clutch() {
    let (mech, mut arm) = rig();

    assert_eq!(arm.pause_or_unpause(), Ok(LiftPosition::Raised));
    assert_eq!(mech.borrow().lift, LIFT_TOP);

    assert_eq!(arm.pause_or_unpause(), Ok(LiftPosition::Lowered));
    assert_eq!(mech.borrow().lift, 0);
    assert_eq!(mech.borrow().speed, Some(Rpm(3)));

    assert!(mech.borrow().clutch_log.is_empty());
    assert!(mech.borrow().is_at_rest());
}

#[test]
fn pause_timeout_leaves_arm_at_rest() {
    let (mech, mut arm) = rig_with(jammed_vertically(), &TurntableConfig::default());

    assert_eq!(
        arm.run(Routine::PauseToggle, &default_calibration()),
        Err(Error::Movement(MovementError::VerticalUpTimeout))
    );
    assert!(mech.borrow().is_at_rest());
}

#[test]
fn configured_timeouts_apply() {
    let config = tonearm_control::parse_config(
        r#"
[motion]
vertical_timeout_steps = 40
"#,
    )
    .unwrap();
    let (mech, mut arm) = rig_with(jammed_vertically(), &config);

    assert!(arm.seek_vertical(VerticalDirection::Up, Rpm(10)).is_err());
    assert_eq!(mech.borrow().vertical_steps, 40);
}

proptest! {
    #[test]
    fn prop_seek_never_exceeds_budget(timeout in 1u32..300) {
        let (mech, mut arm) = rig_with(jammed_vertically(), &TurntableConfig::default());
        let upper = arm.channels().vertical_upper_limit;

        let result = arm.seek_to_sensor(Axis::Vertical, upper, timeout, Rpm(10));

        prop_assert_eq!(result, Err(Error::Movement(MovementError::VerticalUpTimeout)));
        prop_assert_eq!(mech.borrow().vertical_steps, timeout);
        prop_assert!(mech.borrow().is_at_rest());
    }

    #[test]
    fn prop_reachable_sensor_found_within_budget(start in 0i32..LIFT_TOP) {
        let mechanism = Mechanism { lift: start, ..Default::default() };
        let (mech, mut arm) = rig_with(mechanism, &TurntableConfig::default());

        let steps = arm.seek_vertical(VerticalDirection::Up, Rpm(10));

        prop_assert_eq!(steps, Ok((LIFT_TOP - start) as u32));
        prop_assert!(mech.borrow().is_at_rest());
    }
}

// =============================================================================
// Turntable front
// =============================================================================

type SimTurntable = Turntable<
    common::SimSensors,
    common::SimStepper,
    common::SelectLine,
    common::SimClutch,
    common::SimDelay,
    Led,
>;

fn turntable(mechanism: Mechanism) -> (common::Shared, SimTurntable, Led, Led) {
    let (mech, arm) = rig_with(mechanism, &TurntableConfig::default());
    let movement = Led::default();
    let pause = Led::default();
    let leds = StatusLeds::new(movement.clone(), pause.clone());
    (mech, Turntable::new(arm, default_calibration(), leds), movement, pause)
}

#[test]
fn play_home_button_alternates() {
    let (mech, mut deck, movement, pause) = turntable(Mechanism::default());

    deck.execute(Command::PlayHome).unwrap();
    assert!(deck.is_playing());
    assert_eq!(mech.borrow().swing, 810);
    assert_eq!(deck.state(), &RoutineState::Idle);
    assert!(!movement.is_on());

    deck.execute(Command::Pause).unwrap();
    assert!(deck.is_paused());
    assert!(pause.is_on());

    deck.execute(Command::Pause).unwrap();
    assert!(!deck.is_paused());
    assert!(!pause.is_on());

    deck.execute(Command::PlayHome).unwrap();
    assert!(!deck.is_playing());
    assert_eq!(mech.borrow().swing, SWING_SEATED);
    assert_eq!(mech.borrow().lift, 0);
}

#[test]
fn pickup_returns_home_in_automatic_mode() {
    let (mech, mut deck, _, _) = turntable(Mechanism::default());
    deck.execute(Command::PlayHome).unwrap();

    // The record plays through to the deadwax.
    mech.borrow_mut().swing = PICKUP + 50;
    assert_eq!(deck.on_pickup(), Ok(false));

    let switch = deck.tonearm().channels().auto_manual_switch;
    mech.borrow_mut().set_input(switch, true);
    assert_eq!(deck.on_pickup(), Ok(true));

    assert!(!deck.is_playing());
    assert_eq!(mech.borrow().swing, SWING_SEATED);
    assert_eq!(deck.on_pickup(), Ok(false));
}

#[test]
fn failure_is_shown_until_next_command() {
    let (mech, mut deck, movement, _) = turntable(jammed_horizontally());

    assert!(deck.execute(Command::PlayHome).is_err());
    assert_eq!(
        deck.state(),
        &RoutineState::Fault {
            routine: Routine::Play,
            error: Error::Movement(MovementError::HorizontalClockwiseTimeout),
        }
    );
    assert_eq!(deck.fault_code(), Some(0xC));
    assert!(!deck.is_playing());

    deck.tick(0).unwrap();
    assert!(movement.is_on());
    deck.tick(250).unwrap();
    assert!(!movement.is_on());
    deck.tick(500).unwrap();
    assert!(movement.is_on());

    mech.borrow_mut().horizontal_jammed = false;
    deck.execute(Command::PlayHome).unwrap();
    assert_eq!(deck.state(), &RoutineState::Idle);
    assert_eq!(deck.fault_code(), None);
    deck.tick(0).unwrap();
    assert!(!movement.is_on());
}

#[test]
fn broken_movement_led_records_fault() {
    let (mech, arm) = rig();
    let leds = StatusLeds::new(BrokenLed, BrokenLed);
    let mut deck = Turntable::new(arm, default_calibration(), leds);

    assert_eq!(
        deck.execute(Command::PlayHome),
        Err(Error::Hardware(HardwareError::Pin))
    );
    assert_eq!(
        deck.state(),
        &RoutineState::Fault {
            routine: Routine::Play,
            error: Error::Hardware(HardwareError::Pin),
        }
    );
    assert!(!deck.is_playing());

    let m = mech.borrow();
    assert_eq!(m.swing, SWING_SEATED);
    assert_eq!(m.lift, 0);
    assert!(m.is_at_rest());
}
