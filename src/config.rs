use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating or parsing a rotator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{axis} range [{low}, {high}] lies entirely outside [-1, 1]")]
    RangeOutOfBounds { axis: &'static str, low: f32, high: f32 },
    #[error("ease_power must be positive, got {0}")]
    InvalidEasePower(f32),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Inclusive band of allowed rotation rates for one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub low: f32,
    pub high: f32,
}

impl AxisRange {
    pub const FULL: AxisRange = AxisRange { low: -1.0, high: 1.0 };

    pub const fn new(low: f32, high: f32) -> AxisRange {
        AxisRange { low, high }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.low).min(self.high)
    }

    fn normalized(self, axis: &'static str) -> Result<AxisRange, ConfigError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ConfigError::NonFinite { field: axis });
        }

        let mut range = self;
        if range.low > range.high {
            tracing::warn!(axis, low = range.low, high = range.high, "axis range is inverted, swapping bounds");
            std::mem::swap(&mut range.low, &mut range.high);
        }

        if range.high < AxisRange::FULL.low || range.low > AxisRange::FULL.high {
            return Err(ConfigError::RangeOutOfBounds { axis, low: range.low, high: range.high });
        }

        if range.low < AxisRange::FULL.low || range.high > AxisRange::FULL.high {
            tracing::warn!(axis, low = range.low, high = range.high, "axis range exceeds [-1, 1], trimming");
            range.low = range.low.max(AxisRange::FULL.low);
            range.high = range.high.min(AxisRange::FULL.high);
        }

        Ok(range)
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        AxisRange::FULL
    }
}

/// Curve used to move the rotation rate from its old value to the new target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    #[default]
    Linear,
    /// `t ^ ease_power`; above 1 eases in, below 1 eases out
    PowerEase,
}

impl TransitionKind {
    /// Interpolation fraction for normalized transition time `t`
    pub fn fraction(self, t: f32, ease_power: f32) -> f32 {
        match self {
            TransitionKind::Linear => t,
            TransitionKind::PowerEase => t.powf(ease_power),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    /// Degrees per second at a rate of 1.0
    pub rotation_speed: f32,
    /// Length of the very first hold, in seconds
    pub initial_delay: f32,
    /// Length of every later hold, in seconds
    pub hold_duration: f32,
    pub transition_duration: f32,
    pub randomize_start: bool,
    pub transition_kind: TransitionKind,
    pub ease_power: f32,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    pub z_range: AxisRange,
    /// Starting rate, used when `randomize_start` is off
    pub initial_rotation: Vec3,
    /// Fixed seed for the target picker; `None` draws one from the thread rng
    pub seed: Option<u64>,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        RotatorConfig {
            rotation_speed: 100.0,
            initial_delay: 0.0,
            hold_duration: 1.0,
            transition_duration: 1.0,
            randomize_start: true,
            transition_kind: TransitionKind::Linear,
            ease_power: 1.0,
            x_range: AxisRange::FULL,
            y_range: AxisRange::FULL,
            z_range: AxisRange::FULL,
            initial_rotation: Vec3::ZERO,
            seed: None,
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    }
    else {
        Err(ConfigError::NonFinite { field })
    }
}

impl RotatorConfig {
    pub fn from_toml_str(source: &str) -> Result<RotatorConfig, ConfigError> {
        let config: RotatorConfig = toml::from_str(source)?;
        config.validate()
    }

    /// Returns a normalized copy, or an error if the config cannot be animated
    pub fn validate(&self) -> Result<RotatorConfig, ConfigError> {
        let mut config = self.clone();

        finite("rotation_speed", config.rotation_speed)?;
        config.initial_delay = finite("initial_delay", config.initial_delay)?.max(0.0);
        config.hold_duration = finite("hold_duration", config.hold_duration)?.max(0.0);
        finite("transition_duration", config.transition_duration)?;

        let ease_power = finite("ease_power", config.ease_power)?;
        if ease_power <= 0.0 {
            return Err(ConfigError::InvalidEasePower(ease_power));
        }

        config.x_range = config.x_range.normalized("x")?;
        config.y_range = config.y_range.normalized("y")?;
        config.z_range = config.z_range.normalized("z")?;

        if !config.initial_rotation.is_finite() {
            return Err(ConfigError::NonFinite { field: "initial_rotation" });
        }
        config.initial_rotation = Vec3::new(
            config.x_range.clamp(config.initial_rotation.x),
            config.y_range.clamp(config.initial_rotation.y),
            config.z_range.clamp(config.initial_rotation.z),
        );

        Ok(config)
    }

    pub fn ranges(&self) -> [AxisRange; 3] {
        [self.x_range, self.y_range, self.z_range]
    }
}
