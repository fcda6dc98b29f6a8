//! Shared stepper multiplexed between the two tonearm axes.
//!
//! One stepper driver feeds both motors through a demultiplexer; the select
//! line decides which one receives pulses. Selecting an axis hands out an
//! [`ActiveAxis`] guard that borrows the multiplexer mutably, so a second axis
//! cannot be selected while the first is live, and dropping the guard
//! releases motor current on every exit path.

use embedded_hal::digital::OutputPin;

use crate::config::units::Rpm;
use crate::error::HardwareError;
use crate::io::StepperDrive;

use super::direction::{Axis, AxisDirection, DriveDirection};

/// Stepper drive plus the axis select line.
///
/// Select line levels: high routes pulses to the vertical motor, low to the
/// horizontal one. A released multiplexer leaves the line low with no coil
/// current.
pub struct AxisMultiplexer<M, SEL>
where
    M: StepperDrive,
    SEL: OutputPin,
{
    drive: M,
    select_line: SEL,
    selected: Option<Axis>,
    invert_vertical: bool,
    invert_horizontal: bool,
}

impl<M, SEL> AxisMultiplexer<M, SEL>
where
    M: StepperDrive,
    SEL: OutputPin,
{
    /// Create a multiplexer. Nothing is selected until [`select`](Self::select).
    pub fn new(drive: M, select_line: SEL) -> Self {
        Self {
            drive,
            select_line,
            selected: None,
            invert_vertical: false,
            invert_horizontal: false,
        }
    }

    /// Set per-axis wiring inversion.
    pub fn with_inversion(mut self, invert_vertical: bool, invert_horizontal: bool) -> Self {
        self.invert_vertical = invert_vertical;
        self.invert_horizontal = invert_horizontal;
        self
    }

    /// Axis currently receiving pulses, if any.
    #[inline]
    pub fn selected(&self) -> Option<Axis> {
        self.selected
    }

    /// Drive direction for a move after wiring inversion.
    #[inline]
    pub fn drive_direction(&self, direction: AxisDirection) -> DriveDirection {
        let invert = match direction.axis() {
            Axis::Vertical => self.invert_vertical,
            Axis::Horizontal => self.invert_horizontal,
        };
        direction.drive().inverted_if(invert)
    }

    /// Route the driver to the axis of `direction` and set its speed.
    ///
    /// Always fully releases the previous selection first.
    pub fn select(
        &mut self,
        direction: AxisDirection,
        speed: Rpm,
    ) -> Result<ActiveAxis<'_, M, SEL>, HardwareError> {
        self.release()?;

        let axis = direction.axis();
        let routed = match axis {
            Axis::Vertical => self.select_line.set_high(),
            Axis::Horizontal => self.select_line.set_low(),
        };
        self.selected = Some(axis);

        if let Err(e) = routed
            .map_err(|_| HardwareError::Pin)
            .and_then(|_| self.drive.set_speed(speed))
        {
            let _ = self.release();
            return Err(e);
        }

        trace!("axis {:?} selected at {} rpm", axis, speed.value());
        let drive = self.drive_direction(direction);
        Ok(ActiveAxis {
            mux: self,
            axis,
            drive,
            steps: 0,
            released: false,
        })
    }

    /// Cut motor current and clear the select line.
    ///
    /// Both actions are attempted even if the first fails.
    pub fn release(&mut self) -> Result<(), HardwareError> {
        let current = self.drive.release_current();
        let line = self.select_line.set_low().map_err(|_| HardwareError::Pin);
        self.selected = None;
        current.and(line)
    }

    /// Mutable access to the stepper drive.
    pub fn drive_mut(&mut self) -> &mut M {
        &mut self.drive
    }
}

/// Exclusive handle on the selected axis for the duration of one move.
pub struct ActiveAxis<'a, M, SEL>
where
    M: StepperDrive,
    SEL: OutputPin,
{
    mux: &'a mut AxisMultiplexer<M, SEL>,
    axis: Axis,
    drive: DriveDirection,
    steps: u32,
    released: bool,
}

impl<M, SEL> ActiveAxis<'_, M, SEL>
where
    M: StepperDrive,
    SEL: OutputPin,
{
    /// Axis being moved.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Steps taken so far.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Take one step in the direction chosen at selection.
    pub fn step(&mut self) -> Result<(), HardwareError> {
        self.mux.drive.step(self.drive)?;
        self.steps += 1;
        Ok(())
    }

    /// Release the axis and report the steps taken.
    pub fn finish(mut self) -> Result<u32, HardwareError> {
        self.released = true;
        self.mux.release()?;
        Ok(self.steps)
    }
}

impl<M, SEL> Drop for ActiveAxis<'_, M, SEL>
where
    M: StepperDrive,
    SEL: OutputPin,
{
    fn drop(&mut self) {
        if !self.released {
            let _ = self.mux.release();
        }
    }
}
