//! Timed visual effects applied to one entity at a time.
//!
//! Every effect follows the same lifecycle: it is bound to an entity's
//! geometry, `run()` restarts it, `update(dt)` waits out the delay and then
//! steps its tween(s), writing into the entity's live visual state, and
//! `stop()` finishes it and restores whatever it touched. Finite effects
//! report `is_finished()` when their tween completes; cyclic effects flip
//! their target and keep going until stopped.

mod factory;
mod fade;
mod geometry;
mod move_in;
mod move_out;
mod oscillate;
mod spin;

use glam::Vec2;

use crate::api::types::ShaderId;
use crate::components::visual::{Attr, Pose, Visual};
use crate::extensions::tween::TIME_EPSILON;

pub use factory::{EffectFactory, EffectType};
pub use fade::{Fade, FadeKind};
pub use geometry::{offscreen_offset, Edge};
pub use move_in::MoveIn;
pub use move_out::MoveOut;
pub use oscillate::{Pulse, Sway, SwayAxis, DEFAULT_SWAY_AMPLITUDE};
pub use spin::{Spin, SpinKind};

/// A single timed visual mutation bound to one entity.
///
/// Effects never hold a reference to their entity: the owning entity passes
/// its [`Pose`] into every call, and the effect writes interpolated values
/// into `pose.live`.
pub trait Effect {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Shared timing state.
    fn clock(&self) -> &EffectClock;
    fn clock_mut(&mut self) -> &mut EffectClock;

    /// Attributes this effect writes, restored by `stop()`.
    fn attrs(&self) -> &'static [Attr];

    /// Precompute geometry from the entity's current size and resting place.
    fn bind(&mut self, _pose: &Pose) {}

    /// Window the entity is drawn into. Only move effects care.
    fn set_window(&mut self, _window: Vec2) {}

    /// Restart from the entity's current state.
    fn run(&mut self, pose: &Pose);

    /// Advance by `dt` seconds.
    fn update(&mut self, dt: f32, pose: &mut Pose);

    /// Finish immediately and restore the attributes touched since `run()`.
    fn stop(&mut self, pose: &mut Pose) {
        let attrs = self.attrs();
        self.clock_mut().halt(pose, attrs);
    }

    fn is_finished(&self) -> bool {
        self.clock().is_finished()
    }

    /// Cyclic effects never finish on their own.
    fn is_cyclic(&self) -> bool {
        false
    }

    fn delay(&self) -> f32 {
        self.clock().delay
    }

    fn duration(&self) -> f32 {
        self.clock().duration
    }

    fn shader(&self) -> Option<ShaderId> {
        self.clock().shader
    }
}

impl std::fmt::Debug for dyn Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("name", &self.name())
            .field("clock", self.clock())
            .finish()
    }
}

/// Delay / duration / elapsed bookkeeping shared by every effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectClock {
    /// Seconds after `run()` before anything visibly changes.
    pub delay: f32,
    /// Seconds the tween takes once the delay has passed.
    pub duration: f32,
    /// Seconds since `run()`.
    elapsed: f32,
    /// True until `run()`, so updating an idle effect is a no-op.
    finished: bool,
    /// Optional shader applied while this effect is active.
    pub shader: Option<ShaderId>,
    /// Live state captured by `run()`, restored by `stop()`.
    baseline: Option<Visual>,
}

impl EffectClock {
    pub fn new(delay: f32, duration: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            duration: duration.max(0.0),
            elapsed: 0.0,
            finished: true,
            shader: None,
            baseline: None,
        }
    }

    pub fn with_shader(mut self, shader: Option<ShaderId>) -> Self {
        self.shader = shader;
        self
    }

    /// Reset for a new run, remembering the live state to restore on stop.
    pub fn begin(&mut self, pose: &Pose) {
        self.elapsed = 0.0;
        self.finished = false;
        self.baseline = Some(pose.live);
    }

    /// Advance the clock. Returns how far the tween should step this tick,
    /// or `None` while finished or still inside the delay window.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if self.finished {
            return None;
        }
        let before = self.elapsed;
        self.elapsed += dt.max(0.0);
        if self.elapsed + TIME_EPSILON < self.delay {
            return None;
        }
        if before < self.delay {
            Some((self.elapsed - self.delay).max(0.0))
        } else {
            Some(dt.max(0.0))
        }
    }

    /// Mark the effect done; the last written values stay in place.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Mark the effect done and put back the baseline. Safe to call twice
    /// or without a prior `begin()`.
    pub fn halt(&mut self, pose: &mut Pose, attrs: &[Attr]) {
        self.finished = true;
        if let Some(baseline) = self.baseline.take() {
            pose.live.restore(&baseline, attrs);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the delay window has passed since the last `run()`.
    pub fn is_active(&self) -> bool {
        !self.finished && self.elapsed + TIME_EPSILON >= self.delay
    }

    /// Seconds since the last `run()`.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
