//! Scalar curves over normalized path position
//!
//! Used to taper the tube radius along a vine and to shape the grow cycle.

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// Easing curve on `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Smooth ease-in-out
    #[default]
    EaseInOut,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate
    EaseOut,
    /// Slow start, natural mid-acceleration, gentle finish
    Organic,
}

impl Easing {
    /// Apply to `t`, clamped into `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(2),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Organic => {
                let smooth = t * t * (3.0 - 2.0 * t);
                smooth * (1.0 + 0.3 * (1.0 - t).sin())
            }
        }
    }
}

/// One control point of a keyframed profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Radius multiplier as a function of normalized position along the path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RadiusProfile {
    Constant { value: f32 },
    Linear { start: f32, end: f32 },
    Eased { start: f32, end: f32, easing: Easing },
    /// Piecewise-linear keys, held constant outside the first/last key
    Keyframes { keys: Vec<Keyframe> },
}

impl Default for RadiusProfile {
    fn default() -> Self {
        RadiusProfile::Linear { start: 1.0, end: 0.2 }
    }
}

impl RadiusProfile {
    pub fn constant(value: f32) -> Self {
        RadiusProfile::Constant { value }
    }

    pub fn evaluate(&self, x: f32) -> f32 {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        match self {
            RadiusProfile::Constant { value } => *value,
            RadiusProfile::Linear { start, end } => start + (end - start) * x,
            RadiusProfile::Eased { start, end, easing } => start + (end - start) * easing.apply(x),
            RadiusProfile::Keyframes { keys } => evaluate_keys(keys, x),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let values: Vec<f32> = match self {
            RadiusProfile::Constant { value } => vec![*value],
            RadiusProfile::Linear { start, end } | RadiusProfile::Eased { start, end, .. } => vec![*start, *end],
            RadiusProfile::Keyframes { keys } => keys.iter().map(|k| k.value).collect(),
        };
        if let Some(&bad) = values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(ConfigError::ProfileValue(bad));
        }

        if let RadiusProfile::Keyframes { keys } = self {
            if keys.is_empty() {
                return Err(ConfigError::EmptyProfile);
            }
            let unordered = keys.iter().any(|k| !k.time.is_finite())
                || keys.windows(2).any(|w| w[0].time > w[1].time);
            if unordered {
                return Err(ConfigError::UnsortedProfile);
            }
        }
        Ok(())
    }
}

fn evaluate_keys(keys: &[Keyframe], x: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 1.0;
    };
    if x <= first.time {
        return first.value;
    }
    if x >= last.time {
        return last.value;
    }

    // First key strictly after x; x lies inside (first.time, last.time)
    let upper = keys.partition_point(|k| k.time <= x);
    let a = keys[upper - 1];
    let b = keys[upper];
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return b.value;
    }
    a.value + (b.value - a.value) * ((x - a.time) / span)
}
