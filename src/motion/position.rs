//! Horizontal position tracking.
//!
//! The arm has no encoder, only binary sensors. The tracker remembers the last
//! landmark a horizontal seek reached, which is enough to decide which way to
//! swing toward the next one.

use crate::config::Landmark;

use super::direction::HorizontalDirection;

/// Last known horizontal landmark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmPosition {
    last: Option<Landmark>,
}

impl ArmPosition {
    /// Create a tracker with an unknown position.
    #[inline]
    pub const fn unknown() -> Self {
        Self { last: None }
    }

    /// Create a tracker at a known landmark.
    #[inline]
    pub const fn at(landmark: Landmark) -> Self {
        Self {
            last: Some(landmark),
        }
    }

    /// Last landmark reached, if still trusted.
    #[inline]
    pub fn landmark(&self) -> Option<Landmark> {
        self.last
    }

    /// Record arrival at a landmark.
    #[inline]
    pub fn arrive(&mut self, landmark: Landmark) {
        self.last = Some(landmark);
    }

    /// Forget the position after a failed or blind move of unknown extent.
    #[inline]
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Swing direction that reaches `target`.
    ///
    /// Landmarks sit in clockwise order from Home to Pickup. Home is always
    /// approached counterclockwise since nothing lies beyond it. A tripped home
    /// sensor overrides the remembered landmark; with no position at all the
    /// arm is assumed to be near home and swings clockwise.
    pub fn direction_toward(&self, target: Landmark, at_home: bool) -> HorizontalDirection {
        if target == Landmark::Home {
            return HorizontalDirection::Counterclockwise;
        }

        let from = if at_home { Some(Landmark::Home) } else { self.last };

        match from {
            Some(from) if from >= target => HorizontalDirection::Counterclockwise,
            _ => HorizontalDirection::Clockwise,
        }
    }
}
