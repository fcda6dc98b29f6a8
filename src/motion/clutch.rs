//! Horizontal clutch timing.

use embedded_hal::delay::DelayNs;

use crate::error::HardwareError;
use crate::io::ClutchActuator;

/// Position of the clutch between the drive motor and the horizontal gears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClutchState {
    /// Gears engaged; the stepper swings the arm.
    Engaged,
    /// Gears free; the record (or a hand) moves the arm.
    Disengaged,
}

impl ClutchState {
    /// Blocking settle time for a transition into this state.
    ///
    /// Engaging takes half as long again as disengaging because the clutch
    /// does not always come to rest in the same spot when released.
    #[inline]
    pub fn settle_ms(self, engagement_ms: u32) -> u32 {
        match self {
            ClutchState::Engaged => engagement_ms.saturating_add(engagement_ms / 2),
            ClutchState::Disengaged => engagement_ms,
        }
    }
}

/// Clutch actuator plus the state it was last driven to.
pub struct Clutch<C: ClutchActuator> {
    actuator: C,
    engagement_ms: u32,
    /// `None` after an actuation failed part way.
    state: Option<ClutchState>,
}

impl<C: ClutchActuator> Clutch<C> {
    /// Wrap an actuator. The clutch is assumed released at power-up.
    pub fn new(actuator: C, engagement_ms: u32) -> Self {
        Self {
            actuator,
            engagement_ms,
            state: Some(ClutchState::Disengaged),
        }
    }

    /// Last state reached, or `None` if unknown.
    #[inline]
    pub fn state(&self) -> Option<ClutchState> {
        self.state
    }

    /// Base engagement time.
    #[inline]
    pub fn engagement_ms(&self) -> u32 {
        self.engagement_ms
    }

    /// Drive the clutch to `state` using the configured engagement time.
    pub fn set<D: DelayNs>(&mut self, state: ClutchState, delay: &mut D) -> Result<(), HardwareError> {
        self.set_with(state, self.engagement_ms, delay)
    }

    /// Drive the clutch to `state`, blocking for its settle time.
    pub fn set_with<D: DelayNs>(
        &mut self,
        state: ClutchState,
        engagement_ms: u32,
        delay: &mut D,
    ) -> Result<(), HardwareError> {
        self.state = None;

        if let Err(e) = self.actuator.start(state) {
            let _ = self.actuator.stop();
            return Err(e);
        }

        delay.delay_ms(state.settle_ms(engagement_ms));
        self.actuator.stop()?;

        debug!("clutch {:?}", state);
        self.state = Some(state);
        Ok(())
    }

    /// Mutable access to the actuator.
    pub fn actuator_mut(&mut self) -> &mut C {
        &mut self.actuator
    }
}
