//! Platter speed measurement.
//!
//! The speed sensor interrupt calls [`SpeedMeter::record_edge`]; the main loop
//! calls [`SpeedMeter::reading`]. All shared state sits in one 64-bit atomic
//! word so a reading never sees half an update:
//!
//! ```text
//! bits 63..32  time of the last edge (ms, wrapping)
//! bit  31      at least one edge seen since reset
//! bits 30..0   interval between the last two edges (ms), 0 until the second edge
//! ```

use portable_atomic::{AtomicU64, Ordering};

use crate::config::SpeedConfig;

const EDGE_SEEN: u64 = 1 << 31;
const INTERVAL_MASK: u64 = EDGE_SEEN - 1;

/// Platter speed at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpeedReading {
    /// No edge within the stopped threshold, or not enough edges yet.
    Stopped,
    /// Platter turning.
    Spinning {
        /// Revolutions per minute.
        rpm: f32,
    },
}

impl SpeedReading {
    /// Speed in RPM; zero when stopped.
    #[inline]
    pub fn rpm(&self) -> f32 {
        match self {
            SpeedReading::Stopped => 0.0,
            SpeedReading::Spinning { rpm } => *rpm,
        }
    }

    /// Speed rounded to hundredths for a four-digit display.
    pub fn display_rpm(&self) -> f32 {
        libm::roundf(self.rpm() * 100.0) / 100.0
    }

    /// Check the platter is stopped.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, SpeedReading::Stopped)
    }
}

/// Interrupt-fed speed meter.
#[derive(Debug)]
pub struct SpeedMeter {
    state: AtomicU64,
    edges_per_revolution: u8,
    stopped_threshold_ms: u32,
}

impl SpeedMeter {
    /// Create a meter; usable in a `static`.
    pub const fn new(edges_per_revolution: u8, stopped_threshold_ms: u32) -> Self {
        Self {
            state: AtomicU64::new(0),
            edges_per_revolution,
            stopped_threshold_ms,
        }
    }

    /// Create a meter from configuration.
    pub fn from_config(config: &SpeedConfig) -> Self {
        Self::new(config.edges_per_revolution, config.stopped_threshold_ms)
    }

    /// Record a sensor edge at `now_ms`.
    ///
    /// An edge arriving after the stopped threshold starts a new measurement,
    /// so the platter reads as stopped until the next edge.
    ///
    /// Must only be called from a single context (the sensor interrupt).
    pub fn record_edge(&self, now_ms: u32) {
        let previous = self.state.load(Ordering::Acquire);
        let interval = if previous & EDGE_SEEN != 0 {
            let gap = now_ms.wrapping_sub((previous >> 32) as u32);
            if gap > self.stopped_threshold_ms {
                0
            } else {
                gap as u64 & INTERVAL_MASK
            }
        } else {
            0
        };
        let packed = ((now_ms as u64) << 32) | EDGE_SEEN | interval;
        self.state.store(packed, Ordering::Release);
    }

    /// Speed as of `now_ms`.
    pub fn reading(&self, now_ms: u32) -> SpeedReading {
        let state = self.state.load(Ordering::Acquire);
        if state & EDGE_SEEN == 0 {
            return SpeedReading::Stopped;
        }

        let last = (state >> 32) as u32;
        if now_ms.wrapping_sub(last) > self.stopped_threshold_ms {
            return SpeedReading::Stopped;
        }

        let interval = (state & INTERVAL_MASK) as u32;
        if interval == 0 || self.edges_per_revolution == 0 {
            return SpeedReading::Stopped;
        }

        let rpm = 60_000.0 / (interval as f32 * self.edges_per_revolution as f32);
        SpeedReading::Spinning { rpm }
    }

    /// Forget every edge.
    pub fn reset(&self) {
        self.state.store(0, Ordering::Release);
    }
}
