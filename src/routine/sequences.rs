//! Home, play and pause sequences.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::calibration::{CalibrationTable, RecordSize};
use crate::config::Landmark;
use crate::error::Result;
use crate::io::{ClutchActuator, SensorSource, StepperDrive};
use crate::motion::{Axis, ClutchState, HorizontalDirection, Tonearm, VerticalDirection};

use super::{guarded, LiftPosition, Routine};

impl<S, M, SEL, C, D> Tonearm<S, M, SEL, C, D>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
{
    /// Record size on the selector switch.
    pub fn selected_record_size(&mut self) -> Result<RecordSize> {
        let selector_1 = self.read_input(self.channels.record_size_selector_1)?;
        let selector_2 = self.read_input(self.channels.record_size_selector_2)?;
        Ok(RecordSize::from_selectors(selector_1, selector_2))
    }

    /// Return the arm to its rest.
    ///
    /// Lifts the arm, swings it counterclockwise to the home sensor, pushes
    /// it into the mount and sets it down. A failed seek skips the seating
    /// move. The clutch is released afterwards in every case.
    pub fn home(&mut self) -> Result<()> {
        guarded(
            Routine::Home,
            self,
            |arm| {
                let motion = arm.motion.clone();

                arm.seek_vertical(VerticalDirection::Up, motion.default_speed)?;
                arm.set_clutch(ClutchState::Engaged)?;
                arm.seek_landmark(Landmark::Home, motion.seek_speed)?;
                arm.relative_move(
                    motion.home_seat_steps,
                    HorizontalDirection::Counterclockwise.into(),
                    motion.default_speed,
                )?;
                arm.set_clutch(ClutchState::Disengaged)?;
                arm.seek_vertical(VerticalDirection::Down, motion.careful_speed)?;
                Ok(())
            },
            Self::make_safe,
        )
    }

    /// Place the stylus on the lead-in of the selected record.
    ///
    /// The calibration offset is only applied once the play sensor has been
    /// reached.
    pub fn play(&mut self, calibration: &CalibrationTable) -> Result<()> {
        guarded(
            Routine::Play,
            self,
            |arm| {
                let motion = arm.motion.clone();
                let size = arm.selected_record_size()?;
                let record = calibration.record(size, &arm.channels);
                debug!(
                    "playing {}\" record, offset {} steps",
                    size.inches(),
                    record.offset
                );

                arm.seek_vertical(VerticalDirection::Up, motion.default_speed)?;
                arm.set_clutch(ClutchState::Engaged)?;
                arm.seek_to_sensor(
                    Axis::Horizontal,
                    record.destination,
                    motion.horizontal_timeout_steps,
                    motion.seek_speed,
                )?;

                if record.offset != 0 {
                    let direction = if record.offset > 0 {
                        HorizontalDirection::Clockwise
                    } else {
                        HorizontalDirection::Counterclockwise
                    };
                    arm.relative_move(record.offset.unsigned_abs(), direction.into(), record.rpm)?;
                    arm.pause_ms(motion.settle_ms);
                }

                arm.set_clutch(ClutchState::Disengaged)?;
                arm.seek_vertical(VerticalDirection::Down, motion.careful_speed)?;
                Ok(())
            },
            Self::make_safe,
        )
    }

    /// Lift the arm if it rests at the lower limit, otherwise lower it.
    ///
    /// Never touches the clutch.
    pub fn pause_or_unpause(&mut self) -> Result<LiftPosition> {
        guarded(
            Routine::PauseToggle,
            self,
            |arm| {
                if arm.is_lowered()? {
                    arm.seek_vertical(VerticalDirection::Up, arm.motion.default_speed)?;
                    Ok(LiftPosition::Raised)
                } else {
                    arm.seek_vertical(VerticalDirection::Down, arm.motion.careful_speed)?;
                    Ok(LiftPosition::Lowered)
                }
            },
            Self::make_safe,
        )
    }

    /// Run a routine by name.
    pub fn run(&mut self, routine: Routine, calibration: &CalibrationTable) -> Result<()> {
        match routine {
            Routine::Home => self.home(),
            Routine::Play => self.play(calibration),
            Routine::PauseToggle => self.pause_or_unpause().map(|_| ()),
        }
    }
}
