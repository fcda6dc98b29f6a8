//! Motion configuration from TOML.

use serde::Deserialize;

use crate::motion::Axis;

use super::units::Rpm;

/// Step budgets, speeds and clutch timing for the tonearm.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Steps allowed for a vertical seek before it is considered stalled.
    pub vertical_timeout_steps: u32,

    /// Steps allowed for a horizontal seek before it is considered stalled.
    pub horizontal_timeout_steps: u32,

    /// Base time the clutch needs to move between positions.
    ///
    /// Engaging waits half as long again.
    pub clutch_engagement_ms: u32,

    /// General purpose speed (lifting the arm).
    #[serde(rename = "rpm_default")]
    pub default_speed: Rpm,

    /// Speed while seeking an optical sensor.
    #[serde(rename = "rpm_sensor_seek")]
    pub seek_speed: Rpm,

    /// Fastest speed the drive is ever asked for.
    #[serde(rename = "rpm_top_speed")]
    pub top_speed: Rpm,

    /// Speed for setting the stylus down.
    #[serde(rename = "rpm_careful")]
    pub careful_speed: Rpm,

    /// Blind steps past the home sensor that seat the arm in its mount.
    pub home_seat_steps: u32,

    /// Pause after a blind offset move so the arm stops swinging.
    pub settle_ms: u32,

    /// Invert the vertical drive direction.
    pub invert_vertical: bool,

    /// Invert the horizontal drive direction.
    pub invert_horizontal: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            vertical_timeout_steps: 1500,
            horizontal_timeout_steps: 3000,
            clutch_engagement_ms: 200,
            default_speed: Rpm(10),
            seek_speed: Rpm(8),
            top_speed: Rpm(14),
            careful_speed: Rpm(3),
            home_seat_steps: 100,
            settle_ms: 200,
            invert_vertical: false,
            invert_horizontal: false,
        }
    }
}

impl MotionConfig {
    /// Step budget for a seek on `axis`.
    #[inline]
    pub fn timeout_steps(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.vertical_timeout_steps,
            Axis::Horizontal => self.horizontal_timeout_steps,
        }
    }

    /// Whether the drive direction of `axis` is inverted.
    #[inline]
    pub fn inverted(&self, axis: Axis) -> bool {
        match axis {
            Axis::Vertical => self.invert_vertical,
            Axis::Horizontal => self.invert_horizontal,
        }
    }

    /// Clamp a requested speed to the configured top speed.
    #[inline]
    pub fn limit_speed(&self, speed: Rpm) -> Rpm {
        speed.min(self.top_speed)
    }

    /// Every configured speed.
    pub fn speeds(&self) -> [Rpm; 4] {
        [
            self.default_speed,
            self.seek_speed,
            self.top_speed,
            self.careful_speed,
        ]
    }
}
