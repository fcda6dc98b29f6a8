//! Error types for tonearm-control.
//!
//! Provides unified error handling across configuration, tonearm motion,
//! calibration storage and the hardware adapters.

use core::fmt;

use crate::calibration::RecordSize;
use crate::motion::Axis;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all tonearm-control operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// A bounded move did not reach its sensor
    Movement(MovementError),
    /// Calibration value error
    Calibration(CalibrationError),
    /// Pin, multiplexer or storage failure
    Hardware(HardwareError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Two motion-relevant roles share one sensor channel
    DuplicateChannel(u8),
    /// Channel does not exist on the 16-input multiplexer
    ChannelOutOfRange(u8),
    /// A seek was requested toward a sensor that does not belong to the axis
    ChannelNotOnAxis {
        /// Axis the seek was requested on
        axis: Axis,
        /// Offending channel
        channel: u8,
    },
    /// Step timeout must be > 0
    InvalidTimeout(Axis),
    /// Motor speed must be > 0 RPM
    InvalidSpeed(u8),
    /// Speed sensor must report at least one edge per revolution
    InvalidEdgesPerRevolution(u8),
    /// Stepper must have at least one step per revolution
    InvalidStepsPerRevolution(u16),
    /// Compiled-in calibration default is above the allowed maximum
    DefaultExceedsMax {
        /// Record size the default belongs to
        size: RecordSize,
        /// Default value
        value: u16,
        /// Configured maximum
        max: u16,
    },
    /// Two calibration records overlap in non-volatile storage
    OverlappingAddresses {
        /// First record address
        first: u16,
        /// Second record address
        second: u16,
    },
    /// Builder is missing a required component
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Directional movement timeouts.
///
/// A jammed mechanism and a dead sensor look the same from here: the step
/// budget ran out before the destination sensor tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MovementError {
    /// Took too long for the tonearm to reach the upper limit
    VerticalUpTimeout,
    /// Took too long for the tonearm to reach the lower limit
    VerticalDownTimeout,
    /// Took too long for the tonearm to reach its sensor moving clockwise
    HorizontalClockwiseTimeout,
    /// Took too long for the tonearm to reach its sensor moving counterclockwise
    HorizontalCounterclockwiseTimeout,
}

impl MovementError {
    /// Status code shown by the existing harness for this failure.
    pub const fn code(self) -> u8 {
        match self {
            MovementError::VerticalUpTimeout => 0xA,
            MovementError::VerticalDownTimeout => 0xB,
            MovementError::HorizontalClockwiseTimeout => 0xC,
            MovementError::HorizontalCounterclockwiseTimeout => 0xD,
        }
    }

    /// Axis the failed move was attempted on.
    pub const fn axis(self) -> Axis {
        match self {
            MovementError::VerticalUpTimeout | MovementError::VerticalDownTimeout => {
                Axis::Vertical
            }
            MovementError::HorizontalClockwiseTimeout
            | MovementError::HorizontalCounterclockwiseTimeout => Axis::Horizontal,
        }
    }
}

/// Calibration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Offset exceeds the configured maximum
    OffsetOutOfRange {
        /// Rejected value
        value: u16,
        /// Configured maximum
        max: u16,
    },
}

/// Hardware adapter errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    /// GPIO pin operation failed
    Pin,
    /// Multiplexer has no such input
    ChannelOutOfRange(u8),
    /// Storage access outside the device
    AddressOutOfRange(u16),
    /// Storage device reported a failure
    Storage,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Movement(e) => write!(f, "Movement error: {}", e),
            Error::Calibration(e) => write!(f, "Calibration error: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::DuplicateChannel(ch) => {
                write!(f, "Sensor channel {} is assigned to more than one role", ch)
            }
            ConfigError::ChannelOutOfRange(ch) => {
                write!(f, "Sensor channel {} is out of range. Valid channels: 0-15", ch)
            }
            ConfigError::ChannelNotOnAxis { axis, channel } => {
                write!(f, "Sensor channel {} does not belong to the {:?} axis", channel, axis)
            }
            ConfigError::InvalidTimeout(axis) => {
                write!(f, "{:?} timeout must be > 0 steps", axis)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {} RPM. Must be > 0", v),
            ConfigError::InvalidEdgesPerRevolution(v) => {
                write!(f, "Invalid edges per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::DefaultExceedsMax { size, value, max } => {
                write!(f, "Default calibration {} for {:?} exceeds maximum {}", value, size, max)
            }
            ConfigError::OverlappingAddresses { first, second } => {
                write!(f, "Calibration addresses {} and {} overlap", first, second)
            }
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MovementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementError::VerticalUpTimeout => write!(f, "Timed out moving up"),
            MovementError::VerticalDownTimeout => write!(f, "Timed out moving down"),
            MovementError::HorizontalClockwiseTimeout => write!(f, "Timed out moving clockwise"),
            MovementError::HorizontalCounterclockwiseTimeout => {
                write!(f, "Timed out moving counterclockwise")
            }
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalibrationError::OffsetOutOfRange { value, max } => {
                write!(f, "Calibration offset {} exceeds maximum {}", value, max)
            }
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::Pin => write!(f, "GPIO pin operation failed"),
            HardwareError::ChannelOutOfRange(ch) => {
                write!(f, "Multiplexer channel {} does not exist", ch)
            }
            HardwareError::AddressOutOfRange(addr) => {
                write!(f, "Storage address {} is out of range", addr)
            }
            HardwareError::Storage => write!(f, "Storage operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MovementError> for Error {
    fn from(e: MovementError) -> Self {
        Error::Movement(e)
    }
}

impl From<CalibrationError> for Error {
    fn from(e: CalibrationError) -> Self {
        Error::Calibration(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MovementError {}

#[cfg(feature = "std")]
impl std::error::Error for CalibrationError {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}
