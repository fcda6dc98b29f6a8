//! Hardware and speed sensor parameters.

use serde::Deserialize;

/// Physical parameters of the stepper and the input multiplexer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Full steps per output shaft revolution (2048 for a geared 28BYJ-48).
    pub steps_per_revolution: u16,
    /// Settling time after switching multiplexer channels.
    pub multiplexer_settle_us: u32,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: 2048,
            multiplexer_settle_us: 10,
        }
    }
}

/// Platter speed sensor parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Sensor edges per platter revolution.
    pub edges_per_revolution: u8,
    /// Silence after which the platter is reported stopped.
    pub stopped_threshold_ms: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            edges_per_revolution: 1,
            stopped_threshold_ms: 4000,
        }
    }
}
