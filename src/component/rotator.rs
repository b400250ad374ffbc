use crate::animator::RotationAnimator;

/// Running rotation animator. The rotator system inserts it in place of an accepted RotatorConfig
pub struct Rotator {
    pub animator: RotationAnimator,
}

/// Stops an entity's rotator from being started or ticked
#[derive(Clone, Copy, Debug, Default)]
pub struct RotatorDisabled {
}
