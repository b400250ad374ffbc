mod common;

pub mod animator;
pub mod config;

pub mod component {
    pub mod rotator;
    pub mod transform3d;
}

pub mod system {
    pub mod rotator_system;
}

pub use animator::{FramePhase, HoldSchedule, Phase, RotationAnimator};
pub use common::{clamped_random_pick, round_to_tenth, ROTATION_GRID};
pub use component::{rotator::{Rotator, RotatorDisabled}, transform3d::{Transform3D, TransformHandle}};
pub use config::{AxisRange, ConfigError, RotatorConfig, TransitionKind};
pub use system::rotator_system::rotator_system_update;

/// Frame timing handed to every system
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeData {
    pub delta_time: f32,
    pub total_time: f32,
}
