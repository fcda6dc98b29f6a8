//! Simulated turntable mechanism shared by the integration tests.
//!
//! Every fake adapter holds a handle to one [`Mechanism`], so a test can jam
//! an axis, flip a switch or inspect the arm while the tonearm owns the
//! adapters.
#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use tonearm_control::config::units::{Rpm, SensorChannel};
use tonearm_control::error::HardwareError;
use tonearm_control::io::{ClutchActuator, SensorSource, StepperDrive};
use tonearm_control::motion::DriveDirection;
use tonearm_control::{ChannelMap, ClutchState, Tonearm, TurntableConfig};

/// Lift position of the upper limit switch.
pub const LIFT_TOP: i32 = 100;
/// Swing position the home routine leaves the arm at.
pub const SWING_SEATED: i32 = -100;
/// Play sensor windows along the swing.
pub const PLAY_12: (i32, i32) = (400, 410);
pub const PLAY_10: (i32, i32) = (800, 810);
pub const PLAY_7: (i32, i32) = (1200, 1210);
/// Pickup sensor trips from here inward.
pub const PICKUP: i32 = 2000;

const SWING_MIN: i32 = -150;
const SWING_MAX: i32 = 2100;

/// Physical state of the simulated turntable.
#[derive(Debug)]
pub struct Mechanism {
    pub channels: ChannelMap,
    /// 0 rests on the lower limit, [`LIFT_TOP`] on the upper one.
    pub lift: i32,
    /// Arm swing in steps; grows clockwise.
    pub swing: i32,
    /// Axis select line level.
    pub select_high: bool,
    pub energized: bool,
    pub speed: Option<Rpm>,
    pub clutch: ClutchState,
    pub pending_clutch: Option<ClutchState>,
    pub clutch_log: Vec<ClutchState>,
    pub vertical_jammed: bool,
    pub horizontal_jammed: bool,
    pub fail_steps: bool,
    pub vertical_steps: u32,
    pub horizontal_steps: u32,
    /// Levels of inputs that are not motion sensors (buttons, switches).
    pub inputs: [bool; 16],
    pub elapsed_ns: u64,
}

impl Default for Mechanism {
    fn default() -> Self {
        Self {
            channels: ChannelMap::default(),
            lift: 0,
            swing: SWING_SEATED,
            select_high: false,
            energized: false,
            speed: None,
            clutch: ClutchState::Disengaged,
            pending_clutch: None,
            clutch_log: Vec::new(),
            vertical_jammed: false,
            horizontal_jammed: false,
            fail_steps: false,
            vertical_steps: 0,
            horizontal_steps: 0,
            inputs: [false; 16],
            elapsed_ns: 0,
        }
    }
}

fn within(value: i32, (low, high): (i32, i32)) -> bool {
    value >= low && value <= high
}

impl Mechanism {
    /// Level the sensor on `channel` reports.
    pub fn level(&self, channel: SensorChannel) -> bool {
        let c = &self.channels;
        if channel == c.vertical_lower_limit {
            self.lift <= 0
        } else if channel == c.vertical_upper_limit {
            self.lift >= LIFT_TOP
        } else if channel == c.home {
            self.swing <= 0
        } else if channel == c.play_12in {
            within(self.swing, PLAY_12)
        } else if channel == c.play_10in {
            within(self.swing, PLAY_10)
        } else if channel == c.play_7in {
            within(self.swing, PLAY_7)
        } else if channel == c.pickup {
            self.swing >= PICKUP
        } else {
            self.inputs[channel.value() as usize]
        }
    }

    /// Set a button or switch input.
    pub fn set_input(&mut self, channel: SensorChannel, level: bool) {
        self.inputs[channel.value() as usize] = level;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }

    /// Motor current off and select line cleared.
    pub fn is_at_rest(&self) -> bool {
        !self.energized && !self.select_high
    }
}

pub type Shared = Rc<RefCell<Mechanism>>;

pub struct SimSensors(pub Shared);

impl SensorSource for SimSensors {
    fn read(&mut self, channel: SensorChannel) -> Result<bool, HardwareError> {
        if !channel.is_addressable() {
            return Err(HardwareError::ChannelOutOfRange(channel.value()));
        }
        Ok(self.0.borrow().level(channel))
    }
}

pub struct SimStepper(pub Shared);

impl StepperDrive for SimStepper {
    fn set_speed(&mut self, rpm: Rpm) -> Result<(), HardwareError> {
        self.0.borrow_mut().speed = Some(rpm);
        Ok(())
    }

    fn step(&mut self, direction: DriveDirection) -> Result<(), HardwareError> {
        let mut m = self.0.borrow_mut();
        if m.fail_steps {
            return Err(HardwareError::Pin);
        }
        m.energized = true;

        let delta = direction.sign() as i32;
        if m.select_high {
            m.vertical_steps += 1;
            if !m.vertical_jammed {
                // Forward lowers the arm.
                m.lift = (m.lift - delta).clamp(0, LIFT_TOP);
            }
        } else {
            m.horizontal_steps += 1;
            if !m.horizontal_jammed && m.clutch == ClutchState::Engaged {
                m.swing = (m.swing + delta).clamp(SWING_MIN, SWING_MAX);
            }
        }
        Ok(())
    }

    fn release_current(&mut self) -> Result<(), HardwareError> {
        self.0.borrow_mut().energized = false;
        Ok(())
    }
}

pub struct SelectLine(pub Shared);

impl ErrorType for SelectLine {
    type Error = Infallible;
}

impl OutputPin for SelectLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().select_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().select_high = true;
        Ok(())
    }
}

pub struct SimClutch(pub Shared);

impl ClutchActuator for SimClutch {
    fn start(&mut self, position: ClutchState) -> Result<(), HardwareError> {
        self.0.borrow_mut().pending_clutch = Some(position);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        let mut m = self.0.borrow_mut();
        if let Some(position) = m.pending_clutch.take() {
            m.clutch = position;
            m.clutch_log.push(position);
        }
        Ok(())
    }
}

pub struct SimDelay(pub Shared);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().elapsed_ns += ns as u64;
    }
}

/// Indicator LED whose level the test can watch.
#[derive(Clone, Default)]
pub struct Led(pub Rc<RefCell<bool>>);

impl Led {
    pub fn is_on(&self) -> bool {
        *self.0.borrow()
    }
}

impl ErrorType for Led {
    type Error = Infallible;
}

impl OutputPin for Led {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        *self.0.borrow_mut() = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        *self.0.borrow_mut() = true;
        Ok(())
    }
}

/// Indicator LED whose driver pin always fails.
pub struct BrokenLed;

impl ErrorType for BrokenLed {
    type Error = ErrorKind;
}

impl OutputPin for BrokenLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}

pub type SimArm = Tonearm<SimSensors, SimStepper, SelectLine, SimClutch, SimDelay>;

/// Tonearm on a fresh mechanism: arm seated at home and resting on its lower limit.
pub fn rig() -> (Shared, SimArm) {
    rig_with(Mechanism::default(), &TurntableConfig::default())
}

/// Tonearm on a prepared mechanism.
pub fn rig_with(mechanism: Mechanism, config: &TurntableConfig) -> (Shared, SimArm) {
    let shared = Rc::new(RefCell::new(mechanism));
    let arm = Tonearm::builder()
        .from_config(config)
        .sensors(SimSensors(shared.clone()))
        .stepper(SimStepper(shared.clone()))
        .axis_select(SelectLine(shared.clone()))
        .clutch(SimClutch(shared.clone()))
        .delay(SimDelay(shared.clone()))
        .build()
        .expect("simulated tonearm should build");
    (shared, arm)
}
