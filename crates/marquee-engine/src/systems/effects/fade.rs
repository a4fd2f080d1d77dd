use super::{Effect, EffectClock};
use crate::components::visual::{Attr, Pose};
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Channel, Tween};

/// Direction of a one-shot fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeKind {
    /// Transparent → the entity's resting opacity.
    In,
    /// Current opacity → transparent.
    Out,
}

/// One-shot opacity change.
#[derive(Debug, Clone)]
pub struct Fade {
    clock: EffectClock,
    kind: FadeKind,
    tween: Option<(Tween, Channel)>,
}

impl Fade {
    pub fn new(kind: FadeKind, clock: EffectClock) -> Self {
        Self { clock, kind, tween: None }
    }

    pub fn fade_in(clock: EffectClock) -> Self {
        Self::new(FadeKind::In, clock)
    }

    pub fn fade_out(clock: EffectClock) -> Self {
        Self::new(FadeKind::Out, clock)
    }

    pub fn kind(&self) -> FadeKind {
        self.kind
    }
}

impl Effect for Fade {
    fn name(&self) -> &'static str {
        match self.kind {
            FadeKind::In => "fade_in",
            FadeKind::Out => "fade_out",
        }
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

    fn run(&mut self, pose: &Pose) {
        self.clock.begin(pose);
        let (from, to) = match self.kind {
            FadeKind::In => (0.0, pose.home.opacity()),
            FadeKind::Out => (pose.live.opacity(), 0.0),
        };
        let mut tween = Tween::new(Easing::LINEAR, self.clock.duration);
        let channel = tween.track(from, to);
        self.tween = Some((tween, channel));
    }

    fn update(&mut self, dt: f32, pose: &mut Pose) {
        let Some(step) = self.clock.advance(dt) else { return };
        let Some((tween, channel)) = self.tween.as_mut() else { return };
        tween.step(step);
        pose.live.set_opacity(tween.value(*channel));
        if tween.is_finished() {
            self.clock.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Color;
    use crate::components::visual::Visual;

    fn opaque() -> Pose {
        Pose::new(Visual { color: Color::WHITE, ..Default::default() })
    }

    #[test]
    fn fade_out_respects_delay_then_reaches_zero() {
        let mut pose = opaque();
        let mut effect = Fade::fade_out(EffectClock::new(0.1, 0.5));
        effect.run(&pose);

        effect.update(0.05, &mut pose);
        assert_eq!(pose.live.color.a, 255);

        effect.update(0.55, &mut pose);
        assert_eq!(pose.live.color.a, 0);
        assert!(effect.is_finished());
    }

    #[test]
    fn fade_out_in_small_steps_reaches_zero() {
        let mut pose = opaque();
        let mut effect = Fade::fade_out(EffectClock::new(0.1, 0.5));
        effect.run(&pose);
        for _ in 0..12 {
            effect.update(0.05, &mut pose);
        }
        assert_eq!(pose.live.color.a, 0);
        assert!(effect.is_finished());
    }

    #[test]
    fn fade_in_reaches_resting_alpha() {
        let mut pose = Pose::new(Visual { color: Color::WHITE.with_alpha(200), ..Default::default() });
        let mut effect = Fade::fade_in(EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.5, &mut pose);
        assert_eq!(pose.live.color.a, 100);
        effect.update(0.5, &mut pose);
        assert_eq!(pose.live.color.a, 200);
    }

    #[test]
    fn stop_restores_alpha() {
        let mut pose = opaque();
        let mut effect = Fade::fade_out(EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.25, &mut pose);
        assert!(pose.live.color.a < 255);
        effect.stop(&mut pose);
        assert_eq!(pose.live.color.a, 255);
    }
}
