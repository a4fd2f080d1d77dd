// extensions/easing.rs
//
// Pure easing functions for effect interpolation (Penner's equations).
// No dependencies on Entity/Scene, just math.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

const BACK_OVERSHOOT: f32 = 1.70158;
const BACK_OVERSHOOT_IN_OUT: f32 = BACK_OVERSHOOT * 1.525;
const ELASTIC_PERIOD: f32 = 0.3;
const ELASTIC_PERIOD_IN_OUT: f32 = ELASTIC_PERIOD * 1.5;

/// Curve shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFamily {
    /// Constant velocity.
    #[default]
    Linear,
    Quadratic,
    /// Dramatic acceleration / deceleration.
    Exponential,
    /// Overshoot then settle.
    Back,
    /// Decaying rebound.
    Bounce,
    /// Decaying oscillation.
    Elastic,
}

/// Which end of the curve is eased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseDirection {
    /// Slow start.
    In,
    /// Slow end.
    #[default]
    Out,
    /// Slow start and end.
    InOut,
}

/// A curve family paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Easing {
    pub family: EasingFamily,
    pub direction: EaseDirection,
}

impl Easing {
    pub const LINEAR: Easing = Easing::new(EasingFamily::Linear, EaseDirection::In);

    pub const fn new(family: EasingFamily, direction: EaseDirection) -> Self {
        Self { family, direction }
    }

    pub const fn ease_in(family: EasingFamily) -> Self {
        Self::new(family, EaseDirection::In)
    }

    pub const fn ease_out(family: EasingFamily) -> Self {
        Self::new(family, EaseDirection::Out)
    }

    pub const fn ease_in_out(family: EasingFamily) -> Self {
        Self::new(family, EaseDirection::InOut)
    }

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    ///
    /// The endpoints are exact: `apply(0.0) == 0.0` and `apply(1.0) == 1.0`
    /// for every curve. In between, Back and Elastic leave [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self.direction {
            EaseDirection::In => ease_in(self.family, t),
            EaseDirection::Out => ease_out(self.family, t),
            EaseDirection::InOut => ease_in_out(self.family, t),
        }
    }
}

fn ease_in(family: EasingFamily, t: f32) -> f32 {
    match family {
        EasingFamily::Linear => t,
        EasingFamily::Quadratic => t * t,
        EasingFamily::Exponential => 2.0_f32.powf(10.0 * (t - 1.0)),
        EasingFamily::Back => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
        EasingFamily::Bounce => 1.0 - bounce_out(1.0 - t),
        EasingFamily::Elastic => {
            let s = ELASTIC_PERIOD / 4.0;
            let u = t - 1.0;
            -(2.0_f32.powf(10.0 * u) * ((u - s) * (2.0 * PI) / ELASTIC_PERIOD).sin())
        }
    }
}

fn ease_out(family: EasingFamily, t: f32) -> f32 {
    match family {
        EasingFamily::Linear => t,
        EasingFamily::Quadratic => -t * (t - 2.0),
        EasingFamily::Exponential => 1.0 - 2.0_f32.powf(-10.0 * t),
        EasingFamily::Back => {
            let u = t - 1.0;
            u * u * ((BACK_OVERSHOOT + 1.0) * u + BACK_OVERSHOOT) + 1.0
        }
        EasingFamily::Bounce => bounce_out(t),
        EasingFamily::Elastic => {
            let s = ELASTIC_PERIOD / 4.0;
            2.0_f32.powf(-10.0 * t) * ((t - s) * (2.0 * PI) / ELASTIC_PERIOD).sin() + 1.0
        }
    }
}

fn ease_in_out(family: EasingFamily, t: f32) -> f32 {
    match family {
        EasingFamily::Linear => t,
        EasingFamily::Quadratic => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                let u = 2.0 * t - 1.0;
                -0.5 * (u * (u - 2.0) - 1.0)
            }
        }
        EasingFamily::Exponential => {
            if t < 0.5 {
                0.5 * 2.0_f32.powf(10.0 * (2.0 * t - 1.0))
            } else {
                0.5 * (2.0 - 2.0_f32.powf(-10.0 * (2.0 * t - 1.0)))
            }
        }
        EasingFamily::Back => {
            let s = BACK_OVERSHOOT_IN_OUT;
            let t2 = 2.0 * t;
            if t2 < 1.0 {
                0.5 * (t2 * t2 * ((s + 1.0) * t2 - s))
            } else {
                let u = t2 - 2.0;
                0.5 * (u * u * ((s + 1.0) * u + s) + 2.0)
            }
        }
        EasingFamily::Bounce => {
            if t < 0.5 {
                (1.0 - bounce_out(1.0 - 2.0 * t)) * 0.5
            } else {
                bounce_out(2.0 * t - 1.0) * 0.5 + 0.5
            }
        }
        EasingFamily::Elastic => {
            let p = ELASTIC_PERIOD_IN_OUT;
            let s = p / 4.0;
            let u = 2.0 * t - 1.0;
            let wave = ((u - s) * (2.0 * PI) / p).sin();
            if u < 0.0 {
                -0.5 * 2.0_f32.powf(10.0 * u) * wave
            } else {
                2.0_f32.powf(-10.0 * u) * wave * 0.5 + 1.0
            }
        }
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILIES: [EasingFamily; 6] = [
        EasingFamily::Linear,
        EasingFamily::Quadratic,
        EasingFamily::Exponential,
        EasingFamily::Back,
        EasingFamily::Bounce,
        EasingFamily::Elastic,
    ];
    const DIRECTIONS: [EaseDirection; 3] =
        [EaseDirection::In, EaseDirection::Out, EaseDirection::InOut];

    #[test]
    fn endpoints_are_exact_for_every_curve() {
        for family in FAMILIES {
            for direction in DIRECTIONS {
                let easing = Easing::new(family, direction);
                assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
                assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
            }
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        let easing = Easing::ease_out(EasingFamily::Elastic);
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(3.0), 1.0);
    }

    #[test]
    fn linear_midpoint() {
        assert_eq!(Easing::LINEAR.apply(0.5), 0.5);
    }

    #[test]
    fn quadratic_out_faster_start() {
        let mid = Easing::ease_out(EasingFamily::Quadratic).apply(0.5);
        assert!((mid - 0.75).abs() < 1e-6, "got {}", mid);
    }

    #[test]
    fn in_out_curves_pass_through_half() {
        for family in FAMILIES {
            let mid = Easing::ease_in_out(family).apply(0.5);
            assert!((mid - 0.5).abs() < 1e-3, "{:?} at 0.5 = {}", family, mid);
        }
    }

    #[test]
    fn back_in_dips_below_zero() {
        let early = Easing::ease_in(EasingFamily::Back).apply(0.2);
        assert!(early < 0.0, "BackIn should pull back first, got {}", early);
    }

    #[test]
    fn back_out_overshoots() {
        let late = Easing::ease_out(EasingFamily::Back).apply(0.8);
        assert!(late > 1.0, "BackOut should overshoot, got {}", late);
    }

    #[test]
    fn elastic_out_oscillates_around_one() {
        let samples: Vec<f32> = (1..20)
            .map(|i| Easing::ease_out(EasingFamily::Elastic).apply(i as f32 / 20.0))
            .collect();
        assert!(samples.iter().any(|&v| v > 1.0));
        assert!(samples.iter().any(|&v| v < 1.0));
    }

    #[test]
    fn bounce_out_stays_in_range() {
        for i in 0..=100 {
            let v = Easing::ease_out(EasingFamily::Bounce).apply(i as f32 / 100.0);
            assert!((0.0..=1.0 + 1e-6).contains(&v), "bounce out of range: {}", v);
        }
    }

    #[test]
    fn bounce_in_mirrors_bounce_out() {
        let t = 0.3;
        let a = Easing::ease_in(EasingFamily::Bounce).apply(t);
        let b = 1.0 - Easing::ease_out(EasingFamily::Bounce).apply(1.0 - t);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::LINEAR);
        assert!((result - 150.0).abs() < 0.001);
    }
}
