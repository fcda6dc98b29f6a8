//! Per-record-size calibration offsets.
//!
//! Each record size has a play sensor that gets the arm close to the lead-in
//! and a stored step offset that finishes the job. Offsets live in
//! non-volatile storage as little-endian `u16` values; anything above the
//! configured maximum (including erased storage) is replaced by the compiled
//! default on load.

use crate::config::units::{Rpm, SensorChannel};
use crate::config::{CalibrationConfig, ChannelMap, SLOT_WIDTH};
use crate::error::{CalibrationError, Result};
use crate::io::CalibrationStore;

/// Record size chosen on the selector switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordSize {
    /// 7 inch single.
    Seven,
    /// 10 inch.
    Ten,
    /// 12 inch LP.
    Twelve,
}

impl RecordSize {
    /// Every record size.
    pub const ALL: [RecordSize; 3] = [RecordSize::Seven, RecordSize::Ten, RecordSize::Twelve];

    /// Decode the two selector lines.
    ///
    /// The switch never drives both lines; if it does, 10" is the safe middle.
    pub fn from_selectors(selector_1: bool, selector_2: bool) -> Self {
        match (selector_1, selector_2) {
            (true, false) => RecordSize::Seven,
            (false, true) => RecordSize::Twelve,
            _ => RecordSize::Ten,
        }
    }

    /// Nominal diameter in inches.
    pub const fn inches(self) -> u8 {
        match self {
            RecordSize::Seven => 7,
            RecordSize::Ten => 10,
            RecordSize::Twelve => 12,
        }
    }

    const fn index(self) -> usize {
        match self {
            RecordSize::Seven => 0,
            RecordSize::Ten => 1,
            RecordSize::Twelve => 2,
        }
    }
}

/// Everything the play routine needs for one record size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationRecord {
    /// Record size the record belongs to.
    pub size: RecordSize,
    /// Play sensor that marks the coarse position.
    pub destination: SensorChannel,
    /// Steps past the sensor. Positive is clockwise.
    pub offset: i32,
    /// Speed of the offset move.
    pub rpm: Rpm,
}

/// Active calibration offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    config: CalibrationConfig,
    offsets: [u16; 3],
}

impl CalibrationTable {
    /// Table holding the compiled defaults.
    pub fn defaults(config: &CalibrationConfig) -> Self {
        let offsets = RecordSize::ALL.map(|size| config.slot(size).default_offset);
        Self {
            config: config.clone(),
            offsets,
        }
    }

    /// Load offsets from storage.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails. Out-of-range values
    /// fall back to the defaults.
    pub fn load<S: CalibrationStore>(store: &mut S, config: &CalibrationConfig) -> Result<Self> {
        let mut table = Self::defaults(config);

        for size in RecordSize::ALL {
            let slot = config.slot(size);
            let mut raw = [0u8; SLOT_WIDTH as usize];
            store.read(slot.address, &mut raw)?;
            let value = u16::from_le_bytes(raw);

            if value > config.max_offset {
                warn!(
                    "calibration for {}\" out of range ({}), using default {}",
                    size.inches(),
                    value,
                    slot.default_offset
                );
                continue;
            }
            table.offsets[size.index()] = value;
        }

        info!(
            "calibration loaded: 7\"={} 10\"={} 12\"={}",
            table.offsets[0],
            table.offsets[1],
            table.offsets[2]
        );
        Ok(table)
    }

    /// Largest accepted offset.
    #[inline]
    pub fn max_offset(&self) -> u16 {
        self.config.max_offset
    }

    /// Offset for a record size.
    #[inline]
    pub fn offset(&self, size: RecordSize) -> u16 {
        self.offsets[size.index()]
    }

    /// Replace an offset.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::OffsetOutOfRange`] above the maximum.
    pub fn set_offset(&mut self, size: RecordSize, value: u16) -> Result<()> {
        if value > self.config.max_offset {
            return Err(CalibrationError::OffsetOutOfRange {
                value,
                max: self.config.max_offset,
            }
            .into());
        }
        self.offsets[size.index()] = value;
        Ok(())
    }

    /// Nudge an offset by `delta`, clamped to `0..=max_offset`.
    pub fn adjust(&mut self, size: RecordSize, delta: i32) -> u16 {
        let current = self.offsets[size.index()] as i32;
        let value = current
            .saturating_add(delta)
            .clamp(0, self.config.max_offset as i32) as u16;
        self.offsets[size.index()] = value;
        value
    }

    /// Write every offset back to storage.
    pub fn persist<S: CalibrationStore>(&self, store: &mut S) -> Result<()> {
        for size in RecordSize::ALL {
            let slot = self.config.slot(size);
            store.write(slot.address, &self.offset(size).to_le_bytes())?;
        }
        debug!("calibration persisted");
        Ok(())
    }

    /// Destination sensor, offset and speed for a record size.
    pub fn record(&self, size: RecordSize, channels: &ChannelMap) -> CalibrationRecord {
        CalibrationRecord {
            size,
            destination: channels.play_sensor(size),
            offset: self.offset(size) as i32,
            rpm: self.config.slot(size).rpm,
        }
    }
}
