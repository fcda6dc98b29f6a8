//! Hardware seams.
//!
//! The motion engine only talks to hardware through these traits. The
//! submodules provide thin embedded-hal 1.0 implementations for the reference
//! board; tests and other boards can supply their own.

mod clutch;
mod multiplexer;
mod stepper;
mod store;

pub use clutch::HBridgeClutch;
pub use multiplexer::Multiplexer;
pub use stepper::FourWireStepper;
pub use store::MemoryStore;

use crate::config::units::{Rpm, SensorChannel};
use crate::error::HardwareError;
use crate::motion::{ClutchState, DriveDirection};

/// Source of polled digital inputs (limit switches, optical sensors, buttons).
pub trait SensorSource {
    /// Read the current level of `channel`.
    fn read(&mut self, channel: SensorChannel) -> Result<bool, HardwareError>;
}

/// Stepper driver shared by both tonearm axes.
pub trait StepperDrive {
    /// Set the speed used by subsequent steps.
    fn set_speed(&mut self, rpm: Rpm) -> Result<(), HardwareError>;

    /// Advance exactly one physical step, including step-rate pacing.
    fn step(&mut self, direction: DriveDirection) -> Result<(), HardwareError>;

    /// De-energize the windings.
    fn release_current(&mut self) -> Result<(), HardwareError>;
}

/// Actuator that moves the horizontal clutch.
pub trait ClutchActuator {
    /// Start driving the clutch toward `position`.
    fn start(&mut self, position: ClutchState) -> Result<(), HardwareError>;

    /// Stop driving the clutch.
    fn stop(&mut self) -> Result<(), HardwareError>;
}

/// Non-volatile byte storage for calibration values.
pub trait CalibrationStore {
    /// Fill `buf` from `address` onward.
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), HardwareError>;

    /// Write `data` starting at `address`.
    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), HardwareError>;
}

impl<T: SensorSource + ?Sized> SensorSource for &mut T {
    fn read(&mut self, channel: SensorChannel) -> Result<bool, HardwareError> {
        (**self).read(channel)
    }
}

impl<T: CalibrationStore + ?Sized> CalibrationStore for &mut T {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), HardwareError> {
        (**self).read(address, buf)
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), HardwareError> {
        (**self).write(address, data)
    }
}
