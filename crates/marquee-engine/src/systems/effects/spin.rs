use std::f32::consts::TAU;

use glam::Vec2;

use super::{Effect, EffectClock};
use crate::components::visual::{Attr, Pose};
use crate::extensions::easing::{Easing, EasingFamily};
use crate::extensions::tween::{Channel, Tween};

/// Scale / rotation entrance variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinKind {
    /// Grows from nothing with an elastic wobble while spinning two turns.
    HardRoll,
    /// Grows from nothing while spinning one turn, smoothly.
    Roll,
    /// Grows from nothing with a slight overshoot, no rotation.
    Pop,
    /// Spins one turn into place at full size.
    Rotate,
}

impl SpinKind {
    fn scale_easing(self) -> Option<Easing> {
        match self {
            SpinKind::HardRoll => Some(Easing::ease_out(EasingFamily::Elastic)),
            SpinKind::Roll => Some(Easing::ease_out(EasingFamily::Quadratic)),
            SpinKind::Pop => Some(Easing::ease_out(EasingFamily::Back)),
            SpinKind::Rotate => None,
        }
    }

    /// Rotation easing and how many turns the entity spins in by.
    fn rotation(self) -> Option<(Easing, f32)> {
        match self {
            SpinKind::HardRoll => Some((Easing::ease_out(EasingFamily::Exponential), 2.0)),
            SpinKind::Roll => Some((Easing::ease_out(EasingFamily::Quadratic), 1.0)),
            SpinKind::Pop => None,
            SpinKind::Rotate => Some((Easing::ease_out(EasingFamily::Back), 1.0)),
        }
    }
}

/// Entrance that animates scale and/or rotation toward the resting values.
#[derive(Debug, Clone)]
pub struct Spin {
    clock: EffectClock,
    kind: SpinKind,
    scale: Option<(Tween, (Channel, Channel))>,
    rotation: Option<(Tween, Channel)>,
}

impl Spin {
    pub fn new(kind: SpinKind, clock: EffectClock) -> Self {
        Self { clock, kind, scale: None, rotation: None }
    }

    pub fn kind(&self) -> SpinKind {
        self.kind
    }
}

impl Effect for Spin {
    fn name(&self) -> &'static str {
        match self.kind {
            SpinKind::HardRoll => "hard_roll_in",
            SpinKind::Roll => "roll_in",
            SpinKind::Pop => "pop_in",
            SpinKind::Rotate => "rotate_in",
        }
    }

    fn clock(&self) -> &EffectClock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut EffectClock {
        &mut self.clock
    }

    fn attrs(&self) -> &'static [Attr] {
        match self.kind {
            SpinKind::HardRoll | SpinKind::Roll => &[Attr::Scale, Attr::Rotation],
            SpinKind::Pop => &[Attr::Scale],
            SpinKind::Rotate => &[Attr::Rotation],
        }
    }

    fn run(&mut self, pose: &Pose) {
        self.clock.begin(pose);
        let duration = self.clock.duration;

        self.scale = self.kind.scale_easing().map(|easing| {
            let mut tween = Tween::new(easing, duration);
            let channels = tween.track_vec2(Vec2::ZERO, pose.home.scale);
            (tween, channels)
        });

        self.rotation = self.kind.rotation().map(|(easing, turns)| {
            let resting = pose.home.rotation;
            let mut tween = Tween::new(easing, duration);
            let channel = tween.track(resting - turns * TAU, resting);
            (tween, channel)
        });
    }

    fn update(&mut self, dt: f32, pose: &mut Pose) {
        let Some(step) = self.clock.advance(dt) else { return };
        let mut done = true;

        if let Some((tween, channels)) = self.scale.as_mut() {
            tween.step(step);
            pose.live.scale = tween.vec2(*channels);
            done &= tween.is_finished();
        }
        if let Some((tween, channel)) = self.rotation.as_mut() {
            tween.step(step);
            pose.live.rotation = tween.value(*channel);
            done &= tween.is_finished();
        }

        if done {
            self.clock.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::visual::Visual;

    fn pose(scale: Vec2, rotation: f32) -> Pose {
        Pose::new(Visual { scale, rotation, ..Default::default() })
    }

    #[test]
    fn pop_in_single_jump_lands_on_scale() {
        let mut pose = pose(Vec2::ONE, 0.0);
        let mut effect = Spin::new(SpinKind::Pop, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(1.0, &mut pose);
        assert_eq!(pose.live.scale, Vec2::ONE);
        assert!(effect.is_finished());
    }

    #[test]
    fn pop_in_starts_from_nothing() {
        let mut pose = pose(Vec2::new(2.0, 2.0), 0.0);
        let mut effect = Spin::new(SpinKind::Pop, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.05, &mut pose);
        assert!(pose.live.scale.x < 1.0);
        assert_eq!(pose.live.rotation, 0.0);
    }

    #[test]
    fn hard_roll_converges_on_both_attributes() {
        let mut pose = pose(Vec2::new(1.5, 0.5), 0.25);
        let mut effect = Spin::new(SpinKind::HardRoll, EffectClock::new(0.2, 0.6));
        effect.run(&pose);
        for _ in 0..60 {
            effect.update(1.0 / 60.0, &mut pose);
        }
        assert!(effect.is_finished());
        assert_eq!(pose.live.scale, Vec2::new(1.5, 0.5));
        assert_eq!(pose.live.rotation, 0.25);
    }

    #[test]
    fn roll_in_spins_one_turn() {
        let mut pose = pose(Vec2::ONE, 0.0);
        let mut effect = Spin::new(SpinKind::Roll, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.0, &mut pose);
        assert!((pose.live.rotation + TAU).abs() < 1e-5);
    }

    #[test]
    fn rotate_in_leaves_scale_alone() {
        let mut pose = pose(Vec2::splat(3.0), 1.0);
        let mut effect = Spin::new(SpinKind::Rotate, EffectClock::new(0.0, 0.5));
        effect.run(&pose);
        effect.update(0.1, &mut pose);
        assert_eq!(pose.live.scale, Vec2::splat(3.0));
        effect.update(0.4, &mut pose);
        assert_eq!(pose.live.rotation, 1.0);
    }

    #[test]
    fn stop_restores_scale_and_rotation() {
        let mut pose = pose(Vec2::ONE, 0.0);
        let mut effect = Spin::new(SpinKind::HardRoll, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.3, &mut pose);
        effect.stop(&mut pose);
        assert_eq!(pose.live.scale, Vec2::ONE);
        assert_eq!(pose.live.rotation, 0.0);
    }
}
