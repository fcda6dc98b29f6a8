//! Unit types for hardware quantities.
//!
//! Small newtypes so a sensor channel, a motor speed and a step count cannot
//! be swapped for one another at a call site.

use core::fmt;

use serde::Deserialize;

/// Number of inputs on the sensor multiplexer.
pub const MULTIPLEXER_CHANNELS: u8 = 16;

/// Identifier of one input on the digital sensor source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct SensorChannel(pub u8);

impl SensorChannel {
    /// Create a new channel identifier.
    #[inline]
    pub const fn new(channel: u8) -> Self {
        Self(channel)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check the channel exists on the multiplexer.
    #[inline]
    pub const fn is_addressable(self) -> bool {
        self.0 < MULTIPLEXER_CHANNELS
    }
}

impl fmt::Display for SensorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Stepper speed in revolutions per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Rpm(pub u8);

impl Rpm {
    /// Create a new speed.
    #[inline]
    pub const fn new(rpm: u8) -> Self {
        Self(rpm)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Delay between steps for a motor with `steps_per_revolution` steps.
    ///
    /// Returns `None` for a zero speed or a zero step count.
    #[inline]
    pub fn step_interval_us(self, steps_per_revolution: u16) -> Option<u32> {
        if self.0 == 0 || steps_per_revolution == 0 {
            return None;
        }
        Some(60_000_000 / steps_per_revolution as u32 / self.0 as u32)
    }
}
