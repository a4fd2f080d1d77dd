//! Cyclic effects: they flip their target at the end of every leg and never
//! finish on their own.

use glam::Vec2;

use super::{Effect, EffectClock};
use crate::components::visual::{Attr, Pose};
use crate::extensions::easing::{Easing, EasingFamily};
use crate::extensions::tween::{Channel, Tween};

/// Default sway distance either side of the resting position, in pixels.
pub const DEFAULT_SWAY_AMPLITUDE: f32 = 12.0;

/// Axis a [`Sway`] moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwayAxis {
    X,
    Y,
}

impl SwayAxis {
    fn get(self, v: Vec2) -> f32 {
        match self {
            SwayAxis::X => v.x,
            SwayAxis::Y => v.y,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            SwayAxis::X => v.x = value,
            SwayAxis::Y => v.y = value,
        }
    }
}

/// Continuous ease back and forth along one axis, `amplitude` either side
/// of the resting position. Each leg takes `duration` seconds.
#[derive(Debug, Clone)]
pub struct Sway {
    clock: EffectClock,
    axis: SwayAxis,
    amplitude: f32,
    origin: f32,
    tween: Option<(Tween, Channel)>,
}

impl Sway {
    pub fn new(axis: SwayAxis, amplitude: f32, clock: EffectClock) -> Self {
        Self { clock, axis, amplitude, origin: 0.0, tween: None }
    }

    pub fn axis(&self) -> SwayAxis {
        self.axis
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }
}

impl Effect for Sway {
    fn name(&self) -> &'static str {
        match self.axis {
            SwayAxis::X => "ease_x",
            SwayAxis::Y => "ease_y",
        }
    }

    fn clock(&self) -> &EffectClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut EffectClock {
        &mut self.clock
    }

    fn attrs(&self) -> &'static [Attr] {
        &[Attr::Position]
    }

    fn is_cyclic(&self) -> bool {
        true
    }

    fn run(&mut self, pose: &Pose) {
        self.clock.begin(pose);
        self.origin = self.axis.get(pose.home.position);
        let mut tween = Tween::new(
            Easing::ease_in_out(EasingFamily::Quadratic),
            self.clock.duration,
        );
        let channel = tween.track(self.axis.get(pose.live.position), self.origin + self.amplitude);
        self.tween = Some((tween, channel));
    }

    fn update(&mut self, dt: f32, pose: &mut Pose) {
        let Some(step) = self.clock.advance(dt) else { return };
        let Some((tween, channel)) = self.tween.as_mut() else { return };
        tween.step(step);
        self.axis.set(&mut pose.live.position, tween.value(*channel));

        if tween.is_finished() {
            let next = if tween.target(*channel) > self.origin {
                self.origin - self.amplitude
            } else {
                self.origin + self.amplitude
            };
            tween.retarget(*channel, next);
            tween.set_elapsed(0.0);
        }
    }
}

/// Continuous fade between transparent and the resting opacity.
#[derive(Debug, Clone)]
pub struct Pulse {
    clock: EffectClock,
    resting: f32,
    tween: Option<(Tween, Channel)>,
}

impl Pulse {
    pub fn new(clock: EffectClock) -> Self {
        Self { clock, resting: 255.0, tween: None }
    }
}

impl Effect for Pulse {
    fn name(&self) -> &'static str {
        "fade"
    }

    fn clock(&self) -> &EffectClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut EffectClock {
        &mut self.clock
    }

    fn attrs(&self) -> &'static [Attr] {
        &[Attr::Opacity]
    }

    fn is_cyclic(&self) -> bool {
        true
    }

    fn run(&mut self, pose: &Pose) {
        self.clock.begin(pose);
        self.resting = pose.home.opacity();
        let mut tween = Tween::new(
            Easing::ease_in_out(EasingFamily::Quadratic),
            self.clock.duration,
        );
        let channel = tween.track(pose.live.opacity(), 0.0);
        self.tween = Some((tween, channel));
    }

    fn update(&mut self, dt: f32, pose: &mut Pose) {
        let Some(step) = self.clock.advance(dt) else { return };
        let Some((tween, channel)) = self.tween.as_mut() else { return };
        tween.step(step);
        pose.live.set_opacity(tween.value(*channel));

        if tween.is_finished() {
            let next = if tween.target(*channel) > 0.0 { 0.0 } else { self.resting };
            tween.retarget(*channel, next);
            tween.set_elapsed(0.0);
        }
    }
}
