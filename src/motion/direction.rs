//! Axis and direction types.
//!
//! Each axis has its own direction type so a vertical direction can never be
//! handed to the horizontal drive by accident. Both collapse into a
//! [`DriveDirection`] only at the stepper boundary.
//!
//! Canonical sign convention: clockwise drives the stepper forward, lifting
//! drives it in reverse. Either axis can be inverted through
//! [`MotionConfig`](crate::config::MotionConfig).

use serde::Deserialize;

/// One of the two steppable degrees of freedom of the tonearm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Lift axis (raises and lowers the stylus).
    Vertical,
    /// Swing axis (moves the arm across the platter).
    Horizontal,
}

/// Vertical movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VerticalDirection {
    /// Raise the tonearm toward the upper limit.
    Up,
    /// Lower the tonearm toward the lower limit.
    Down,
}

impl VerticalDirection {
    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            VerticalDirection::Up => VerticalDirection::Down,
            VerticalDirection::Down => VerticalDirection::Up,
        }
    }
}

/// Horizontal movement direction, viewed from above the platter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HorizontalDirection {
    /// Toward the spindle.
    Clockwise,
    /// Toward the home mount.
    Counterclockwise,
}

impl HorizontalDirection {
    /// Get the opposite direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            HorizontalDirection::Clockwise => HorizontalDirection::Counterclockwise,
            HorizontalDirection::Counterclockwise => HorizontalDirection::Clockwise,
        }
    }
}

/// Electrical step direction as seen by the stepper drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveDirection {
    /// Advance the coil sequence.
    Forward,
    /// Walk the coil sequence backwards.
    Reverse,
}

impl DriveDirection {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            DriveDirection::Forward => 1,
            DriveDirection::Reverse => -1,
        }
    }

    /// Apply an optional wiring inversion.
    #[inline]
    pub fn inverted_if(self, invert: bool) -> Self {
        match (self, invert) {
            (d, false) => d,
            (DriveDirection::Forward, true) => DriveDirection::Reverse,
            (DriveDirection::Reverse, true) => DriveDirection::Forward,
        }
    }
}

impl From<VerticalDirection> for DriveDirection {
    fn from(direction: VerticalDirection) -> Self {
        match direction {
            VerticalDirection::Up => DriveDirection::Reverse,
            VerticalDirection::Down => DriveDirection::Forward,
        }
    }
}

impl From<HorizontalDirection> for DriveDirection {
    fn from(direction: HorizontalDirection) -> Self {
        match direction {
            HorizontalDirection::Clockwise => DriveDirection::Forward,
            HorizontalDirection::Counterclockwise => DriveDirection::Reverse,
        }
    }
}

/// A direction bound to its axis.
///
/// Used by blind relative moves, the only place routine logic names a
/// direction explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisDirection {
    /// Vertical move.
    Vertical(VerticalDirection),
    /// Horizontal move.
    Horizontal(HorizontalDirection),
}

impl AxisDirection {
    /// Axis this direction moves.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            AxisDirection::Vertical(_) => Axis::Vertical,
            AxisDirection::Horizontal(_) => Axis::Horizontal,
        }
    }

    /// Get the opposite direction on the same axis.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            AxisDirection::Vertical(d) => AxisDirection::Vertical(d.opposite()),
            AxisDirection::Horizontal(d) => AxisDirection::Horizontal(d.opposite()),
        }
    }

    /// Electrical drive direction before wiring inversion.
    #[inline]
    pub fn drive(self) -> DriveDirection {
        match self {
            AxisDirection::Vertical(d) => d.into(),
            AxisDirection::Horizontal(d) => d.into(),
        }
    }
}

impl From<VerticalDirection> for AxisDirection {
    fn from(direction: VerticalDirection) -> Self {
        AxisDirection::Vertical(direction)
    }
}

impl From<HorizontalDirection> for AxisDirection {
    fn from(direction: HorizontalDirection) -> Self {
        AxisDirection::Horizontal(direction)
    }
}
