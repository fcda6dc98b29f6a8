//! Turntable front end.
//!
//! Ties the tonearm, the calibration table and the status LEDs together
//! behind the two buttons. The polling loop owns a [`Turntable`], feeds it
//! button presses as [`Command`]s and calls [`Turntable::on_pickup`] and
//! [`Turntable::tick`] every pass.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::calibration::CalibrationTable;
use crate::error::{Error, HardwareError, Result};
use crate::io::{ClutchActuator, SensorSource, StepperDrive};
use crate::motion::Tonearm;
use crate::routine::{LiftPosition, Routine};

/// Blink half-period of the movement LED while a fault is shown.
const FAULT_BLINK_MS: u32 = 250;

/// Button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play from home, or return home from anywhere else.
    PlayHome,
    /// Lift or lower the arm in place.
    Pause,
}

/// Position of the auto/manual switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// The arm stays where the record ends.
    Manual,
    /// The arm returns home when the pickup sensor trips.
    Automatic,
}

/// What the front end is doing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutineState {
    /// Waiting for a command.
    Idle,
    /// Running a routine.
    Busy(Routine),
    /// The last routine failed. Cleared by the next command.
    Fault {
        /// Routine that failed.
        routine: Routine,
        /// Why it failed.
        error: Error,
    },
}

/// Movement and pause indicator LEDs.
pub struct StatusLeds<L: OutputPin> {
    movement: L,
    pause: L,
}

impl<L: OutputPin> StatusLeds<L> {
    /// Create the indicator pair.
    pub fn new(movement: L, pause: L) -> Self {
        Self { movement, pause }
    }

    /// Give the pins back.
    pub fn release(self) -> (L, L) {
        (self.movement, self.pause)
    }

    fn set_movement(&mut self, on: bool) -> core::result::Result<(), HardwareError> {
        set(&mut self.movement, on)
    }

    fn set_pause(&mut self, on: bool) -> core::result::Result<(), HardwareError> {
        set(&mut self.pause, on)
    }
}

fn set<L: OutputPin>(pin: &mut L, on: bool) -> core::result::Result<(), HardwareError> {
    if on {
        pin.set_high().map_err(|_| HardwareError::Pin)
    } else {
        pin.set_low().map_err(|_| HardwareError::Pin)
    }
}

/// Automated turntable.
pub struct Turntable<S, M, SEL, C, D, L>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
    L: OutputPin,
{
    arm: Tonearm<S, M, SEL, C, D>,
    calibration: CalibrationTable,
    leds: StatusLeds<L>,
    state: RoutineState,
    playing: bool,
    paused: bool,
}

impl<S, M, SEL, C, D, L> Turntable<S, M, SEL, C, D, L>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
    L: OutputPin,
{
    /// Create the front end around a built tonearm.
    pub fn new(arm: Tonearm<S, M, SEL, C, D>, calibration: CalibrationTable, leds: StatusLeds<L>) -> Self {
        Self {
            arm,
            calibration,
            leds,
            state: RoutineState::Idle,
            playing: false,
            paused: false,
        }
    }

    /// Handle a button press.
    ///
    /// Returns the routine's own result. A failure is also kept as
    /// [`RoutineState::Fault`] until the next command.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        let routine = match command {
            Command::PlayHome if self.arm.is_home()? => Routine::Play,
            Command::PlayHome => Routine::Home,
            Command::Pause => Routine::PauseToggle,
        };
        self.run(routine)
    }

    /// Return home if the record has ended in automatic mode.
    ///
    /// Returns whether the home routine was started.
    pub fn on_pickup(&mut self) -> Result<bool> {
        if !self.playing || self.mode()? != OperatingMode::Automatic {
            return Ok(false);
        }
        if !self.arm.read_input(self.arm.channels().pickup)? {
            return Ok(false);
        }

        info!("pickup reached, returning home");
        self.run(Routine::Home)?;
        Ok(true)
    }

    /// Refresh the status LEDs.
    pub fn tick(&mut self, now_ms: u32) -> Result<()> {
        let movement = match self.state {
            RoutineState::Idle => false,
            RoutineState::Busy(_) => true,
            RoutineState::Fault { .. } => (now_ms / FAULT_BLINK_MS) % 2 == 0,
        };
        self.leds.set_movement(movement)?;
        self.leds.set_pause(self.paused)?;
        Ok(())
    }

    /// Auto/manual switch position.
    pub fn mode(&mut self) -> Result<OperatingMode> {
        let automatic = self.arm.read_input(self.arm.channels().auto_manual_switch)?;
        Ok(if automatic {
            OperatingMode::Automatic
        } else {
            OperatingMode::Manual
        })
    }

    /// Current routine state.
    #[inline]
    pub fn state(&self) -> &RoutineState {
        &self.state
    }

    /// Status code of the last failure, for the numeric display.
    pub fn fault_code(&self) -> Option<u8> {
        match &self.state {
            RoutineState::Fault {
                error: Error::Movement(e),
                ..
            } => Some(e.code()),
            _ => None,
        }
    }

    /// Check a record is being played.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check the arm is lifted mid-record.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Active calibration.
    #[inline]
    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    /// Active calibration, for the calibration entry flow.
    #[inline]
    pub fn calibration_mut(&mut self) -> &mut CalibrationTable {
        &mut self.calibration
    }

    /// The tonearm.
    #[inline]
    pub fn tonearm(&mut self) -> &mut Tonearm<S, M, SEL, C, D> {
        &mut self.arm
    }

    fn run(&mut self, routine: Routine) -> Result<()> {
        self.state = RoutineState::Busy(routine);

        let result = self
            .leds
            .set_movement(true)
            .map_err(Error::from)
            .and_then(|()| match routine {
                Routine::Home => self.arm.home().map(|_| {
                    self.playing = false;
                    self.paused = false;
                }),
                Routine::Play => self.arm.play(&self.calibration).map(|_| {
                    self.playing = true;
                    self.paused = false;
                }),
                Routine::PauseToggle => self.arm.pause_or_unpause().map(|lift| {
                    self.paused = self.playing && lift == LiftPosition::Raised;
                }),
            });

        match result {
            Ok(()) => {
                self.state = RoutineState::Idle;
                self.leds.set_movement(false)?;
                self.leds.set_pause(self.paused)?;
                Ok(())
            }
            Err(error) => {
                self.playing = false;
                self.paused = false;
                self.state = RoutineState::Fault {
                    routine,
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }
}
