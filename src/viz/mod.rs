mod mapper;
mod playback;
mod registry;
mod transition;
mod tween;

pub use mapper::{CoordinateMapper, PlotBounds, RankColor};
pub use playback::{Playback, PlaybackSpeed, PlaybackState};
pub use transition::{DEFAULT_TRANSITION, TransitionController};
pub use tween::NodeAnimator;
