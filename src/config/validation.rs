//! Configuration validation.

use crate::calibration::RecordSize;
use crate::error::{ConfigError, Error, Result};
use crate::motion::Axis;

use super::{CalibrationConfig, ChannelMap, HardwareConfig, MotionConfig, SpeedConfig};
use super::TurntableConfig;

/// Validate a turntable configuration.
///
/// Checks:
/// - Every channel exists on the multiplexer
/// - Motion and selector channels are distinct
/// - Timeouts, speeds and step counts are non-zero
/// - Calibration defaults respect the maximum and storage slots do not overlap
pub fn validate_config(config: &TurntableConfig) -> Result<()> {
    validate_channels(&config.channels)?;
    validate_motion(&config.motion)?;
    validate_calibration(&config.calibration)?;
    validate_speed(&config.speed)?;
    validate_hardware(&config.hardware)?;
    Ok(())
}

pub(crate) fn validate_channels(channels: &ChannelMap) -> Result<()> {
    for channel in channels.all_channels() {
        if !channel.is_addressable() {
            return Err(Error::Config(ConfigError::ChannelOutOfRange(channel.value())));
        }
    }

    let motion = channels.motion_channels();
    for (i, channel) in motion.iter().enumerate() {
        if motion[i + 1..].contains(channel) {
            return Err(Error::Config(ConfigError::DuplicateChannel(channel.value())));
        }
    }

    Ok(())
}

pub(crate) fn validate_motion(motion: &MotionConfig) -> Result<()> {
    for axis in [Axis::Vertical, Axis::Horizontal] {
        if motion.timeout_steps(axis) == 0 {
            return Err(Error::Config(ConfigError::InvalidTimeout(axis)));
        }
    }

    if let Some(speed) = motion.speeds().into_iter().find(|s| s.value() == 0) {
        return Err(Error::Config(ConfigError::InvalidSpeed(speed.value())));
    }

    Ok(())
}

fn validate_calibration(calibration: &CalibrationConfig) -> Result<()> {
    let sizes = RecordSize::ALL;

    for size in sizes {
        let slot = calibration.slot(size);
        if slot.default_offset > calibration.max_offset {
            return Err(Error::Config(ConfigError::DefaultExceedsMax {
                size,
                value: slot.default_offset,
                max: calibration.max_offset,
            }));
        }
        if slot.rpm.value() == 0 {
            return Err(Error::Config(ConfigError::InvalidSpeed(0)));
        }
    }

    for (i, a) in sizes.iter().enumerate() {
        for b in &sizes[i + 1..] {
            let (first, second) = (calibration.slot(*a), calibration.slot(*b));
            if first.overlaps(second) {
                return Err(Error::Config(ConfigError::OverlappingAddresses {
                    first: first.address,
                    second: second.address,
                }));
            }
        }
    }

    Ok(())
}

fn validate_speed(speed: &SpeedConfig) -> Result<()> {
    if speed.edges_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidEdgesPerRevolution(0)));
    }
    Ok(())
}

fn validate_hardware(hardware: &HardwareConfig) -> Result<()> {
    if hardware.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)));
    }
    Ok(())
}
