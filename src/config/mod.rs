//! Configuration module for tonearm-control.
//!
//! Provides the channel layout, motion parameters and calibration layout,
//! loaded from TOML files (with `std` feature) or built in code.

mod calibration;
mod channels;
mod hardware;
mod motion;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use calibration::{CalibrationConfig, CalibrationSlot, SLOT_WIDTH};
pub use channels::{ChannelMap, Landmark};
pub use hardware::{HardwareConfig, SpeedConfig};
pub use motion::MotionConfig;
pub use system::TurntableConfig;
pub use validation::validate_config;
pub(crate) use validation::{validate_channels, validate_motion};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Rpm, SensorChannel};
