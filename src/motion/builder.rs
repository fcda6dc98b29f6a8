//! Builder pattern for Tonearm.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{validate_channels, validate_motion, ChannelMap, MotionConfig, TurntableConfig};
use crate::error::{ConfigError, Error, Result};
use crate::io::{ClutchActuator, SensorSource, StepperDrive};

use super::axis::AxisMultiplexer;
use super::clutch::Clutch;
use super::position::ArmPosition;
use super::tonearm::Tonearm;

/// Builder for creating Tonearm instances.
pub struct TonearmBuilder<S, M, SEL, C, D>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
{
    sensors: Option<S>,
    stepper: Option<M>,
    axis_select: Option<SEL>,
    clutch: Option<C>,
    delay: Option<D>,
    channels: ChannelMap,
    motion: MotionConfig,
}

impl<S, M, SEL, C, D> Default for TonearmBuilder<S, M, SEL, C, D>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M, SEL, C, D> TonearmBuilder<S, M, SEL, C, D>
where
    S: SensorSource,
    M: StepperDrive,
    SEL: OutputPin,
    C: ClutchActuator,
    D: DelayNs,
{
    /// Create a new builder with the default channel layout and motion parameters.
    pub fn new() -> Self {
        Self {
            sensors: None,
            stepper: None,
            axis_select: None,
            clutch: None,
            delay: None,
            channels: ChannelMap::default(),
            motion: MotionConfig::default(),
        }
    }

    /// Set the sensor source.
    pub fn sensors(mut self, sensors: S) -> Self {
        self.sensors = Some(sensors);
        self
    }

    /// Set the stepper drive shared by both axes.
    pub fn stepper(mut self, stepper: M) -> Self {
        self.stepper = Some(stepper);
        self
    }

    /// Set the axis select line.
    pub fn axis_select(mut self, pin: SEL) -> Self {
        self.axis_select = Some(pin);
        self
    }

    /// Set the clutch actuator.
    pub fn clutch(mut self, clutch: C) -> Self {
        self.clutch = Some(clutch);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the channel layout.
    pub fn channels(mut self, channels: ChannelMap) -> Self {
        self.channels = channels;
        self
    }

    /// Set the motion parameters.
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Configure from a TurntableConfig.
    pub fn from_config(self, config: &TurntableConfig) -> Self {
        self.channels(config.channels.clone())
            .motion(config.motion.clone())
    }

    /// Build the Tonearm.
    ///
    /// # Errors
    ///
    /// Returns an error if a component is missing or the channel layout or
    /// motion parameters are invalid.
    pub fn build(self) -> Result<Tonearm<S, M, SEL, C, D>> {
        let sensors = self.sensors.ok_or(missing("sensors"))?;
        let stepper = self.stepper.ok_or(missing("stepper"))?;
        let axis_select = self.axis_select.ok_or(missing("axis_select"))?;
        let clutch = self.clutch.ok_or(missing("clutch"))?;
        let delay = self.delay.ok_or(missing("delay"))?;

        validate_channels(&self.channels)?;
        validate_motion(&self.motion)?;

        let axes = AxisMultiplexer::new(stepper, axis_select)
            .with_inversion(self.motion.invert_vertical, self.motion.invert_horizontal);
        let clutch = Clutch::new(clutch, self.motion.clutch_engagement_ms);

        Ok(Tonearm {
            sensors,
            axes,
            clutch,
            delay,
            channels: self.channels,
            motion: self.motion,
            position: ArmPosition::unknown(),
        })
    }
}

fn missing(component: &'static str) -> Error {
    Error::Config(ConfigError::MissingComponent(component))
}
