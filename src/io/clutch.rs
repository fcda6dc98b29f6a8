//! H-bridge driven clutch actuator.

use embedded_hal::digital::OutputPin;

use crate::error::HardwareError;
use crate::motion::ClutchState;

use super::ClutchActuator;

/// Small DC actuator on an H-bridge with one input pin per direction.
pub struct HBridgeClutch<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    engage_pin: A,
    disengage_pin: B,
}

impl<A, B> HBridgeClutch<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    /// Create an actuator from the two bridge inputs.
    pub fn new(engage_pin: A, disengage_pin: B) -> Self {
        Self {
            engage_pin,
            disengage_pin,
        }
    }

    /// Give the pins back.
    pub fn release(self) -> (A, B) {
        (self.engage_pin, self.disengage_pin)
    }
}

impl<A, B> ClutchActuator for HBridgeClutch<A, B>
where
    A: OutputPin,
    B: OutputPin,
{
    fn start(&mut self, position: ClutchState) -> Result<(), HardwareError> {
        // Drop the opposing input first so the bridge never shorts.
        match position {
            ClutchState::Engaged => {
                self.disengage_pin.set_low().map_err(|_| HardwareError::Pin)?;
                self.engage_pin.set_high().map_err(|_| HardwareError::Pin)
            }
            ClutchState::Disengaged => {
                self.engage_pin.set_low().map_err(|_| HardwareError::Pin)?;
                self.disengage_pin.set_high().map_err(|_| HardwareError::Pin)
            }
        }
    }

    fn stop(&mut self) -> Result<(), HardwareError> {
        self.engage_pin.set_low().map_err(|_| HardwareError::Pin)?;
        self.disengage_pin.set_low().map_err(|_| HardwareError::Pin)
    }
}
