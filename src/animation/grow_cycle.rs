//! Scalar driving the host's "grow" shader parameter
//!
//! The mesh itself is static; hosts reveal it progressively by feeding this
//! value to a material that clips the tube along its V coordinate.

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::math::Easing;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GrowCycle {
    /// Constant grow value in `[0, 1]`
    Fixed { value: f32 },
    /// Grows over `period` seconds, then recedes over the next `period`
    PingPong {
        period: f32,
        #[serde(default)]
        easing: Easing,
    },
}

impl Default for GrowCycle {
    fn default() -> Self {
        GrowCycle::Fixed { value: 1.0 }
    }
}

impl GrowCycle {
    pub fn ping_pong(period: f32) -> Self {
        GrowCycle::PingPong {
            period,
            easing: Easing::Linear,
        }
    }

    /// Grow value at `time` seconds
    pub fn value_at(&self, time: f32) -> f32 {
        match *self {
            GrowCycle::Fixed { value } => value,
            GrowCycle::PingPong { period, easing } => easing.apply(triangle_wave(time / period)),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            GrowCycle::Fixed { value } if !(0.0..=1.0).contains(&value) => Err(ConfigError::GrowValue(value)),
            GrowCycle::PingPong { period, .. } if !(period.is_finite() && period > 0.0) => {
                Err(ConfigError::GrowPeriod(period))
            }
            _ => Ok(()),
        }
    }
}

/// 0 → 1 → 0 over two units of `x`
fn triangle_wave(x: f32) -> f32 {
    let t = x.rem_euclid(2.0);
    if t > 1.0 {
        2.0 - t
    } else {
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_value() {
        let cycle = GrowCycle::Fixed { value: 0.3 };
        assert_eq!(cycle.value_at(0.0), 0.3);
        assert_eq!(cycle.value_at(123.0), 0.3);
    }

    #[test]
    fn test_default_fully_grown() {
        assert_eq!(GrowCycle::default().value_at(5.0), 1.0);
    }

    #[test]
    fn test_ping_pong_linear() {
        let cycle = GrowCycle::ping_pong(4.0);
        assert!((cycle.value_at(0.0) - 0.0).abs() < 0.0001);
        assert!((cycle.value_at(2.0) - 0.5).abs() < 0.0001);
        assert!((cycle.value_at(4.0) - 1.0).abs() < 0.0001);
        assert!((cycle.value_at(6.0) - 0.5).abs() < 0.0001);
        assert!((cycle.value_at(8.0) - 0.0).abs() < 0.0001);
        assert!((cycle.value_at(10.0) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_ping_pong_eased_stays_in_range() {
        let cycle = GrowCycle::PingPong {
            period: 1.5,
            easing: Easing::EaseInOut,
        };
        for i in 0..100 {
            let v = cycle.value_at(i as f32 * 0.07);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(GrowCycle::ping_pong(0.0).validate(), Err(ConfigError::GrowPeriod(0.0)));
        assert_eq!(
            GrowCycle::Fixed { value: 1.5 }.validate(),
            Err(ConfigError::GrowValue(1.5))
        );
        assert!(GrowCycle::ping_pong(2.0).validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let cycle: GrowCycle = serde_yaml::from_str("mode: ping_pong\nperiod: 3.0\n").unwrap();
        assert_eq!(
            cycle,
            GrowCycle::PingPong {
                period: 3.0,
                easing: Easing::EaseInOut,
            }
        );
    }
}
