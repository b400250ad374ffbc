use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};

use crate::{common::{clamped_random_pick, lerp, round_to_tenth}, component::transform3d::TransformHandle, config::{ConfigError, RotatorConfig}};

/// Where the animator currently is in its hold/transition cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Hold { elapsed: f32 },
    Transition { elapsed: f32, from: Vec3, to: Vec3 },
}

/// What a single `tick` spent its frame on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePhase {
    Hold,
    Transition,
    /// Rate snapped onto the transition target, no rotation applied
    Settle,
}

/// The first hold lasts `initial`, every later one `steady`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoldSchedule {
    Initial { initial: f32, steady: f32 },
    Steady(f32),
}

impl HoldSchedule {
    pub fn active(&self) -> f32 {
        match *self {
            HoldSchedule::Initial { initial, .. } => initial,
            HoldSchedule::Steady(steady) => steady,
        }
    }

    fn finish_first_cycle(&mut self) {
        if let HoldSchedule::Initial { steady, .. } = *self {
            *self = HoldSchedule::Steady(steady);
        }
    }
}

/// Spins a transform at a held rate, then eases to a new random rate, forever.
///
/// The animator is driven by the host calling [`RotationAnimator::tick`] once per
/// frame with that frame's delta time. Rates are per-axis multipliers of
/// `rotation_speed`, not absolute angles.
pub struct RotationAnimator {
    config: RotatorConfig,
    rate: Vec3,
    phase: Phase,
    hold: HoldSchedule,
    rng: StdRng,
    started: bool,
}

impl RotationAnimator {
    pub fn new(config: &RotatorConfig) -> Result<RotationAnimator, ConfigError> {
        let config = config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(RotationAnimator {
            rate: config.initial_rotation,
            phase: Phase::Hold { elapsed: 0.0 },
            hold: HoldSchedule::Initial {
                initial: config.initial_delay,
                steady: config.hold_duration,
            },
            rng: StdRng::seed_from_u64(seed),
            started: false,
            config,
        })
    }

    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    pub fn rate(&self) -> Vec3 {
        self.rate
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hold_schedule(&self) -> HoldSchedule {
        self.hold
    }

    /// Reports `initial_delay` until the first transition settles, `hold_duration` after
    pub fn active_hold_duration(&self) -> f32 {
        self.hold.active()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Target rate of the transition in flight, if any
    pub fn target(&self) -> Option<Vec3> {
        match self.phase {
            Phase::Transition { to, .. } => Some(to),
            Phase::Hold { .. } => None,
        }
    }

    /// Picks the starting rate and applies one immediate kick of `rate * rotation_speed`.
    /// Calling this again after the first time does nothing.
    pub fn start<H: TransformHandle + ?Sized>(&mut self, handle: &mut H) {
        if self.started {
            return;
        }

        if self.config.randomize_start {
            self.rate = self.pick_rate(false);
        }

        handle.rotate_by(self.rate * self.config.rotation_speed);
        self.started = true;

        tracing::debug!(rate = ?self.rate, initial_hold = self.hold.active(), "rotator started");
    }

    /// Advances the animator by one frame. Starts it first if needed.
    pub fn tick<H: TransformHandle + ?Sized>(&mut self, delta_time: f32, handle: &mut H) -> FramePhase {
        if !self.started {
            self.start(handle);
        }

        let delta_time = delta_time.max(0.0);

        loop {
            match self.phase {
                Phase::Hold { elapsed } => {
                    if elapsed < self.hold.active() {
                        handle.rotate_by(self.rate * self.config.rotation_speed * delta_time);
                        self.phase = Phase::Hold { elapsed: elapsed + delta_time };
                        return FramePhase::Hold;
                    }

                    self.begin_transition();
                }
                Phase::Transition { elapsed, from, to } => {
                    let duration = self.config.transition_duration;

                    // non-positive durations fall straight through to the snap
                    if elapsed < duration {
                        let f = self.config.transition_kind.fraction(elapsed / duration, self.config.ease_power);
                        self.rate = Vec3::new(
                            lerp(from.x, to.x, f),
                            lerp(from.y, to.y, f),
                            lerp(from.z, to.z, f),
                        );

                        handle.rotate_by(self.rate * self.config.rotation_speed * delta_time);
                        self.phase = Phase::Transition { elapsed: elapsed + delta_time, from, to };
                        return FramePhase::Transition;
                    }

                    self.rate = to;
                    self.phase = Phase::Hold { elapsed: 0.0 };
                    self.hold.finish_first_cycle();

                    tracing::debug!(rate = ?self.rate, next_hold = self.hold.active(), "rotator settled");
                    return FramePhase::Settle;
                }
            }
        }
    }

    fn begin_transition(&mut self) {
        let to = self.pick_rate(true);
        tracing::debug!(from = ?self.rate, to = ?to, "rotator transition begins");

        self.phase = Phase::Transition { elapsed: 0.0, from: self.rate, to };
    }

    fn pick_rate(&mut self, round: bool) -> Vec3 {
        let mut rate = [0.0; 3];
        for (value, range) in rate.iter_mut().zip(self.config.ranges()) {
            let picked = clamped_random_pick(&range, &mut self.rng);
            // rounding can step off a bound that is not on the 0.1 grid
            *value = if round { range.clamp(round_to_tenth(picked)) } else { picked };
        }

        Vec3::from_array(rate)
    }
}
