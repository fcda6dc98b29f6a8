//! # tonearm-control
//!
//! Motion control for the tonearm of an automated turntable, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Bounded moves**: every sensor seek gives up after a step budget with a
//!   direction-specific timeout
//! - **Shared drive**: one stepper drives both axes through a select line, and
//!   only one axis is ever selected
//! - **Fail-safe routines**: home, play and pause always end with no motor
//!   current and a released clutch
//! - **Configuration-driven**: channel layout, speeds and timeouts from TOML
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tonearm_control::{CalibrationTable, Tonearm};
//!
//! let config = tonearm_control::load_config("turntable.toml")?;
//!
//! let mut arm = Tonearm::builder()
//!     .from_config(&config)
//!     .sensors(multiplexer)
//!     .stepper(stepper)
//!     .axis_select(select_pin)
//!     .clutch(clutch)
//!     .delay(delay)
//!     .build()?;
//!
//! let calibration = CalibrationTable::load(&mut eeprom, &config.calibration)?;
//! arm.play(&calibration)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod calibration;
pub mod config;
pub mod error;
pub mod io;
pub mod motion;
pub mod routine;
pub mod speed;
pub mod turntable;

// Re-exports for ergonomic API
pub use calibration::{CalibrationRecord, CalibrationTable, RecordSize};
pub use config::{validate_config, ChannelMap, Landmark, MotionConfig, TurntableConfig};
pub use error::{Error, MovementError, Result};
pub use motion::{
    Axis, AxisDirection, ClutchState, HorizontalDirection, Tonearm, TonearmBuilder,
    VerticalDirection,
};
pub use routine::{LiftPosition, Routine};
pub use speed::{SpeedMeter, SpeedReading};
pub use turntable::{Command, OperatingMode, RoutineState, StatusLeds, Turntable};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Rpm, SensorChannel};
