// extensions/mod.rs
//
// Time-based interpolation shared by every effect.
// Nothing here knows about entities: effects own tweens and apply the values.

pub mod easing;
pub mod tween;

pub use easing::{ease, lerp, EaseDirection, Easing, EasingFamily};
pub use tween::{Channel, Tween, TIME_EPSILON};
