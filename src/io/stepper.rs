//! Four-wire unipolar stepper driver.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Rpm;
use crate::error::HardwareError;
use crate::motion::DriveDirection;

use super::StepperDrive;

/// Coil levels for each phase of the full-step sequence.
const FULL_STEP_SEQUENCE: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// Stepper driven directly through four coil pins.
///
/// Pacing happens inside [`StepperDrive::step`]: every step waits one step
/// interval for the configured speed.
pub struct FourWireStepper<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    coils: [P; 4],
    delay: D,
    steps_per_revolution: u16,
    step_interval_us: u32,
    phase: u8,
}

impl<P, D> FourWireStepper<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    /// Create a driver; coil pins are given in sequence order.
    pub fn new(coils: [P; 4], delay: D, steps_per_revolution: u16) -> Self {
        let step_interval_us = Rpm(1)
            .step_interval_us(steps_per_revolution)
            .unwrap_or(0);
        Self {
            coils,
            delay,
            steps_per_revolution,
            step_interval_us,
            phase: 0,
        }
    }

    /// Current delay between steps.
    #[inline]
    pub fn step_interval_us(&self) -> u32 {
        self.step_interval_us
    }

    /// Give the pins and delay back.
    pub fn release(self) -> ([P; 4], D) {
        (self.coils, self.delay)
    }

    fn write_phase(&mut self) -> Result<(), HardwareError> {
        let levels = FULL_STEP_SEQUENCE[self.phase as usize];
        for (pin, high) in self.coils.iter_mut().zip(levels) {
            if high {
                pin.set_high().map_err(|_| HardwareError::Pin)?;
            } else {
                pin.set_low().map_err(|_| HardwareError::Pin)?;
            }
        }
        Ok(())
    }
}

impl<P, D> StepperDrive for FourWireStepper<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    fn set_speed(&mut self, rpm: Rpm) -> Result<(), HardwareError> {
        // Zero would mean "step as fast as the loop runs"; crawl instead.
        let rpm = rpm.max(Rpm(1));
        if let Some(interval) = rpm.step_interval_us(self.steps_per_revolution) {
            self.step_interval_us = interval;
        }
        Ok(())
    }

    fn step(&mut self, direction: DriveDirection) -> Result<(), HardwareError> {
        self.phase = match direction {
            DriveDirection::Forward => (self.phase + 1) % 4,
            DriveDirection::Reverse => (self.phase + 3) % 4,
        };
        self.write_phase()?;
        self.delay.delay_us(self.step_interval_us);
        Ok(())
    }

    fn release_current(&mut self) -> Result<(), HardwareError> {
        for pin in self.coils.iter_mut() {
            pin.set_low().map_err(|_| HardwareError::Pin)?;
        }
        Ok(())
    }
}
