pub use cgmath;
#[cfg(feature = "debug")]
pub use debug::take_debug_frame;
pub use error::ConfigError;
pub use math::{Bounds, PathSpace, Transform};
pub use path::{
    ClosestPoint, EndOfPath, PathOptions, PathQuery, PathSamples, TimeOnPath, VertexPath,
};
pub use road::{sample_road, RoadParams, TurnDirection, MAX_ROAD_VERTICES};
pub use shared::SharedPath;
pub use util::Interval;

mod debug;
mod error;
pub mod math;
mod path;
mod road;
mod shared;
mod util;
