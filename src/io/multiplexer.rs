//! 16-channel digital multiplexer input.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::SensorChannel;
use crate::error::HardwareError;

use super::SensorSource;

/// Sensor source behind a 16:1 multiplexer with four selector lines.
///
/// Selector pin `n` carries bit `n` of the channel number.
pub struct Multiplexer<P, I, D>
where
    P: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    selectors: [P; 4],
    input: I,
    delay: D,
    settle_us: u32,
}

impl<P, I, D> Multiplexer<P, I, D>
where
    P: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    /// Create a multiplexer reader.
    pub fn new(selectors: [P; 4], input: I, delay: D, settle_us: u32) -> Self {
        Self {
            selectors,
            input,
            delay,
            settle_us,
        }
    }

    /// Give the pins and delay back.
    pub fn release(self) -> ([P; 4], I, D) {
        (self.selectors, self.input, self.delay)
    }

    fn select(&mut self, channel: SensorChannel) -> Result<(), HardwareError> {
        for (bit, pin) in self.selectors.iter_mut().enumerate() {
            if (channel.value() >> bit) & 1 == 1 {
                pin.set_high().map_err(|_| HardwareError::Pin)?;
            } else {
                pin.set_low().map_err(|_| HardwareError::Pin)?;
            }
        }
        Ok(())
    }
}

impl<P, I, D> SensorSource for Multiplexer<P, I, D>
where
    P: OutputPin,
    I: InputPin,
    D: DelayNs,
{
    fn read(&mut self, channel: SensorChannel) -> Result<bool, HardwareError> {
        if !channel.is_addressable() {
            return Err(HardwareError::ChannelOutOfRange(channel.value()));
        }

        self.select(channel)?;
        self.delay.delay_us(self.settle_us);
        self.input.is_high().map_err(|_| HardwareError::Pin)
    }
}
