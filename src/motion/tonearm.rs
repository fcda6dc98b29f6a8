//! Tonearm motion primitives.
//!
//! Every move is bounded: seeks stop after a fixed step budget and blind
//! moves after an exact step count. Motor current is released when each move
//! ends, whatever the outcome.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Rpm, SensorChannel};
use crate::config::{ChannelMap, Landmark, MotionConfig};
use crate::error::{ConfigError, Error, MovementError, Result};
use crate::io::{ClutchActuator, SensorSource, StepperDrive};

use super::axis::AxisMultiplexer;
use super::builder::TonearmBuilder;
use super::clutch::{Clutch, ClutchState};
use super::direction::{Axis, AxisDirection, HorizontalDirection, VerticalDirection};
use super::position::ArmPosition;

/// Timeout reported for a seek that ran out of steps moving `direction`.
fn timeout_for(direction: AxisDirection) -> MovementError {
    match direction {
        AxisDirection::Vertical(VerticalDirection::Up) => MovementError::VerticalUpTimeout,
        AxisDirection::Vertical(VerticalDirection::Down) => MovementError::VerticalDownTimeout,
        AxisDirection::Horizontal(HorizontalDirection::Clockwise) => {
            MovementError::HorizontalClockwiseTimeout
        }
        AxisDirection::Horizontal(HorizontalDirection::Counterclockwise) => {
            MovementError::HorizontalCounterclockwiseTimeout
        }
    }
}

/// Two-axis tonearm with its sensors, shared drive and clutch.
///
/// Generic over:
/// - `S`: sensor source
/// - `M`: stepper drive shared by both axes
/// - `SEL`: axis select line
/// - `C`: clutch actuator
/// - `D`: blocking delay for clutch settling and pauses
pub struct Tonearm<S, M, SEL, C, D>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
{
    pub(crate) sensors: S,
    pub(crate) axes: AxisMultiplexer<M, SEL>,
    pub(crate) clutch: Clutch<C>,
    pub(crate) delay: D,
    pub(crate) channels: ChannelMap,
    pub(crate) motion: MotionConfig,
    pub(crate) position: ArmPosition,
}

impl<S, M, SEL, C, D> Tonearm<S, M, SEL, C, D>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
{
    /// Create a builder.
    pub fn builder() -> TonearmBuilder<S, M, SEL, C, D> {
        TonearmBuilder::new()
    }

    /// Seek `axis` until `channel` reads true.
    ///
    /// Returns the number of steps taken. Zero steps are taken when the
    /// sensor already reads true. The seek gives up after `timeout_steps`
    /// steps with the timeout for the direction it was moving.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ChannelNotOnAxis`] if `channel` does not position `axis`
    /// - [`MovementError`] if the sensor did not trip in time
    /// - [`HardwareError`](crate::error::HardwareError) on any I/O failure
    pub fn seek_to_sensor(
        &mut self,
        axis: Axis,
        channel: SensorChannel,
        timeout_steps: u32,
        speed: Rpm,
    ) -> Result<u32> {
        if self.channels.axis_of(channel) != Some(axis) {
            return Err(Error::Config(ConfigError::ChannelNotOnAxis {
                axis,
                channel: channel.value(),
            }));
        }

        let landmark = self.channels.landmark_at(channel);

        if self.sensors.read(channel)? {
            trace!("seek {:?}: {} already reached", axis, channel.value());
            if let Some(landmark) = landmark {
                self.position.arrive(landmark);
            }
            return Ok(0);
        }

        let direction = match landmark {
            Some(target) => {
                let at_home = target != Landmark::Home && self.sensors.read(self.channels.home)?;
                AxisDirection::Horizontal(self.position.direction_toward(target, at_home))
            }
            None if channel == self.channels.vertical_upper_limit => {
                AxisDirection::Vertical(VerticalDirection::Up)
            }
            None => AxisDirection::Vertical(VerticalDirection::Down),
        };

        let result = self.step_until(direction, channel, timeout_steps, speed);

        if let Some(landmark) = landmark {
            match &result {
                Ok(_) => self.position.arrive(landmark),
                Err(_) => self.position.invalidate(),
            }
        }

        result
    }

    /// Seek the vertical axis to its upper or lower limit.
    pub fn seek_vertical(&mut self, direction: VerticalDirection, speed: Rpm) -> Result<u32> {
        let channel = match direction {
            VerticalDirection::Up => self.channels.vertical_upper_limit,
            VerticalDirection::Down => self.channels.vertical_lower_limit,
        };
        self.seek_to_sensor(
            Axis::Vertical,
            channel,
            self.motion.vertical_timeout_steps,
            speed,
        )
    }

    /// Seek the horizontal axis to a landmark sensor.
    pub fn seek_landmark(&mut self, landmark: Landmark, speed: Rpm) -> Result<u32> {
        self.seek_to_sensor(
            Axis::Horizontal,
            self.channels.landmark(landmark),
            self.motion.horizontal_timeout_steps,
            speed,
        )
    }

    /// Step exactly `steps` steps without consulting any sensor.
    ///
    /// Only hardware failures are reported. The tracked landmark is kept:
    /// offsets are small compared to the gaps between landmarks.
    pub fn relative_move(
        &mut self,
        steps: u32,
        direction: AxisDirection,
        speed: Rpm,
    ) -> Result<()> {
        let speed = self.motion.limit_speed(speed);
        let mut active = self.axes.select(direction, speed)?;
        for _ in 0..steps {
            active.step()?;
        }
        let taken = active.finish()?;
        debug!("relative move {:?}: {} steps", direction, taken);
        Ok(())
    }

    /// Drive the clutch and wait for it to settle.
    pub fn set_clutch(&mut self, state: ClutchState) -> Result<()> {
        self.clutch.set(state, &mut self.delay)?;
        Ok(())
    }

    /// Bring the mechanism to rest: no motor current and a released clutch.
    ///
    /// Skips the clutch when it is known to be disengaged already. Both parts
    /// are attempted even if the first fails; the first error is returned.
    pub fn make_safe(&mut self) -> Result<()> {
        let released = self.axes.release();

        let clutch = if self.clutch.state() == Some(ClutchState::Disengaged) {
            Ok(())
        } else {
            self.clutch.set(ClutchState::Disengaged, &mut self.delay)
        };

        released.and(clutch).map_err(Error::from)
    }

    /// Block for `ms` milliseconds.
    pub fn pause_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Read any input channel.
    pub fn read_input(&mut self, channel: SensorChannel) -> Result<bool> {
        Ok(self.sensors.read(channel)?)
    }

    /// Check the arm is at its upper limit.
    pub fn is_raised(&mut self) -> Result<bool> {
        self.read_input(self.channels.vertical_upper_limit)
    }

    /// Check the arm is at its lower limit.
    pub fn is_lowered(&mut self) -> Result<bool> {
        self.read_input(self.channels.vertical_lower_limit)
    }

    /// Check the home sensor.
    pub fn is_home(&mut self) -> Result<bool> {
        self.read_input(self.channels.home)
    }

    /// Last known clutch state.
    #[inline]
    pub fn clutch_state(&self) -> Option<ClutchState> {
        self.clutch.state()
    }

    /// Axis currently selected on the shared drive.
    #[inline]
    pub fn selected_axis(&self) -> Option<Axis> {
        self.axes.selected()
    }

    /// Last landmark a horizontal seek reached.
    #[inline]
    pub fn landmark(&self) -> Option<Landmark> {
        self.position.landmark()
    }

    /// Channel layout in use.
    #[inline]
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Motion parameters in use.
    #[inline]
    pub fn motion_config(&self) -> &MotionConfig {
        &self.motion
    }

    fn step_until(
        &mut self,
        direction: AxisDirection,
        channel: SensorChannel,
        timeout_steps: u32,
        speed: Rpm,
    ) -> Result<u32> {
        let speed = self.motion.limit_speed(speed);
        let sensors = &mut self.sensors;
        let mut active = self.axes.select(direction, speed)?;

        loop {
            if active.steps() >= timeout_steps {
                active.finish()?;
                let error = timeout_for(direction);
                warn!(
                    "seek {:?} toward {} gave up after {} steps",
                    direction,
                    channel.value(),
                    timeout_steps
                );
                return Err(Error::Movement(error));
            }

            active.step()?;

            if sensors.read(channel)? {
                break;
            }
        }

        let steps = active.finish()?;
        debug!("seek {:?} reached {} in {} steps", direction, channel.value(), steps);
        Ok(steps)
    }
}
