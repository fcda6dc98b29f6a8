//! Calibration storage layout and defaults.

use serde::Deserialize;

use crate::calibration::RecordSize;

use super::units::Rpm;

/// Width of one stored calibration value in bytes.
pub const SLOT_WIDTH: u16 = 2;

/// Storage layout and compiled-in default for one record size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CalibrationSlot {
    /// Offset used when storage holds nothing valid.
    pub default_offset: u16,
    /// Byte address of the little-endian value in non-volatile storage.
    pub address: u16,
    /// Speed of the offset move.
    #[serde(default = "default_offset_rpm")]
    pub rpm: Rpm,
}

fn default_offset_rpm() -> Rpm {
    Rpm(14)
}

impl CalibrationSlot {
    const fn new(default_offset: u16, address: u16) -> Self {
        Self {
            default_offset,
            address,
            rpm: Rpm(14),
        }
    }

    /// Check whether two slots share any storage byte.
    pub fn overlaps(&self, other: &CalibrationSlot) -> bool {
        let a = self.address as u32;
        let b = other.address as u32;
        a < b + SLOT_WIDTH as u32 && b < a + SLOT_WIDTH as u32
    }
}

/// Calibration configuration for all record sizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Largest offset accepted from storage or from the user.
    pub max_offset: u16,
    /// 7" records.
    pub seven: CalibrationSlot,
    /// 10" records.
    pub ten: CalibrationSlot,
    /// 12" records.
    pub twelve: CalibrationSlot,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            max_offset: 2500,
            seven: CalibrationSlot::new(7, 0),
            ten: CalibrationSlot::new(10, 2),
            twelve: CalibrationSlot::new(12, 4),
        }
    }
}

impl CalibrationConfig {
    /// Slot for a record size.
    pub fn slot(&self, size: RecordSize) -> &CalibrationSlot {
        match size {
            RecordSize::Seven => &self.seven,
            RecordSize::Ten => &self.ten,
            RecordSize::Twelve => &self.twelve,
        }
    }
}
