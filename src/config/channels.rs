//! Sensor channel layout.
//!
//! Maps every logical input role to its multiplexer channel. Resolved once at
//! startup and passed by reference into the motion engine.

use serde::Deserialize;

use crate::calibration::RecordSize;
use crate::motion::Axis;

use super::units::SensorChannel;

/// Logical role of a horizontal position sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Landmark {
    /// Rest position in the home mount.
    Home,
    /// Lead-in of a 12" record.
    Play12,
    /// Lead-in of a 10" record.
    Play10,
    /// Lead-in of a 7" record.
    Play7,
    /// Inner deadwax, where playback ends.
    Pickup,
}

impl Landmark {
    /// Play landmark for a record size.
    pub fn play(size: RecordSize) -> Self {
        match size {
            RecordSize::Seven => Landmark::Play7,
            RecordSize::Ten => Landmark::Play10,
            RecordSize::Twelve => Landmark::Play12,
        }
    }
}

/// Channel assignment for every sensor, switch and button.
///
/// The default matches the 16-input multiplexer harness.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelMap {
    /// Lower vertical limit switch (stylus down / arm on its rest).
    pub vertical_lower_limit: SensorChannel,
    /// Upper vertical limit switch (arm raised).
    pub vertical_upper_limit: SensorChannel,
    /// Play/home button.
    pub play_home_button: SensorChannel,
    /// Pause button.
    pub pause_button: SensorChannel,
    /// 7" play position optical sensor.
    pub play_7in: SensorChannel,
    /// 10" play position optical sensor.
    pub play_10in: SensorChannel,
    /// 12" play position optical sensor.
    pub play_12in: SensorChannel,
    /// Home position optical sensor.
    pub home: SensorChannel,
    /// First record size selector line.
    pub record_size_selector_1: SensorChannel,
    /// Second record size selector line.
    pub record_size_selector_2: SensorChannel,
    /// Pickup (inner deadwax) optical sensor.
    pub pickup: SensorChannel,
    /// Auto/manual mode switch.
    pub auto_manual_switch: SensorChannel,
    /// Button that shows the active calibration value.
    pub display_calibration_button: SensorChannel,
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self {
            vertical_lower_limit: SensorChannel(0),
            vertical_upper_limit: SensorChannel(1),
            play_home_button: SensorChannel(2),
            pause_button: SensorChannel(3),
            play_7in: SensorChannel(4),
            play_10in: SensorChannel(5),
            play_12in: SensorChannel(6),
            home: SensorChannel(7),
            record_size_selector_1: SensorChannel(8),
            record_size_selector_2: SensorChannel(9),
            pickup: SensorChannel(10),
            auto_manual_switch: SensorChannel(11),
            display_calibration_button: SensorChannel(13),
        }
    }
}

impl ChannelMap {
    /// Channel of a horizontal landmark sensor.
    pub fn landmark(&self, landmark: Landmark) -> SensorChannel {
        match landmark {
            Landmark::Home => self.home,
            Landmark::Play12 => self.play_12in,
            Landmark::Play10 => self.play_10in,
            Landmark::Play7 => self.play_7in,
            Landmark::Pickup => self.pickup,
        }
    }

    /// Reverse lookup of a horizontal sensor channel.
    pub fn landmark_at(&self, channel: SensorChannel) -> Option<Landmark> {
        [
            Landmark::Home,
            Landmark::Play12,
            Landmark::Play10,
            Landmark::Play7,
            Landmark::Pickup,
        ]
        .into_iter()
        .find(|l| self.landmark(*l) == channel)
    }

    /// Play sensor for a record size.
    pub fn play_sensor(&self, size: RecordSize) -> SensorChannel {
        self.landmark(Landmark::play(size))
    }

    /// Axis a channel positions, if it is a motion sensor at all.
    pub fn axis_of(&self, channel: SensorChannel) -> Option<Axis> {
        if channel == self.vertical_lower_limit || channel == self.vertical_upper_limit {
            Some(Axis::Vertical)
        } else if self.landmark_at(channel).is_some() {
            Some(Axis::Horizontal)
        } else {
            None
        }
    }

    /// Every role that takes part in motion or routine selection.
    ///
    /// These must be distinct for direction and target resolution to work.
    pub fn motion_channels(&self) -> [SensorChannel; 9] {
        [
            self.vertical_lower_limit,
            self.vertical_upper_limit,
            self.play_7in,
            self.play_10in,
            self.play_12in,
            self.home,
            self.pickup,
            self.record_size_selector_1,
            self.record_size_selector_2,
        ]
    }

    /// Every configured channel.
    pub fn all_channels(&self) -> [SensorChannel; 13] {
        [
            self.vertical_lower_limit,
            self.vertical_upper_limit,
            self.play_home_button,
            self.pause_button,
            self.play_7in,
            self.play_10in,
            self.play_12in,
            self.home,
            self.record_size_selector_1,
            self.record_size_selector_2,
            self.pickup,
            self.auto_manual_switch,
            self.display_calibration_button,
        ]
    }
}
