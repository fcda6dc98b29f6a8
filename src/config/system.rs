//! Turntable configuration - root configuration structure.

use serde::Deserialize;

use super::calibration::CalibrationConfig;
use super::channels::ChannelMap;
use super::hardware::{HardwareConfig, SpeedConfig};
use super::motion::MotionConfig;

/// Root configuration structure from TOML.
///
/// Every section is optional; missing sections take the defaults of the
/// reference hardware.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TurntableConfig {
    /// Sensor channel layout.
    pub channels: ChannelMap,

    /// Step budgets, speeds and clutch timing.
    pub motion: MotionConfig,

    /// Calibration storage layout and defaults.
    pub calibration: CalibrationConfig,

    /// Platter speed sensor.
    pub speed: SpeedConfig,

    /// Stepper and multiplexer parameters.
    pub hardware: HardwareConfig,
}
