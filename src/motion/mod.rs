//! Motion module for tonearm-control.
//!
//! Provides the per-axis direction types, the shared-drive axis multiplexer,
//! clutch timing and the bounded seek and blind-move primitives.

mod axis;
mod builder;
mod clutch;
mod direction;
mod position;
mod tonearm;

pub use axis::{ActiveAxis, AxisMultiplexer};
pub use builder::TonearmBuilder;
pub use clutch::{Clutch, ClutchState};
pub use direction::{Axis, AxisDirection, DriveDirection, HorizontalDirection, VerticalDirection};
pub use position::ArmPosition;
pub use tonearm::Tonearm;
