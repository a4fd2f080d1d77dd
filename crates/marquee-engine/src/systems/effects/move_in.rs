use glam::Vec2;

use super::geometry::{offset_for, Edge};
use super::{Effect, EffectClock};
use crate::components::visual::{Attr, Pose};
use crate::extensions::easing::{Easing, EasingFamily};
use crate::extensions::tween::{Channel, Tween};

/// Slides an entity in from outside the window to its resting position.
#[derive(Debug, Clone)]
pub struct MoveIn {
    clock: EffectClock,
    edge: Edge,
    easing: Easing,
    window: Vec2,
    /// Offset from the resting position to the off-screen start.
    offset: Vec2,
    tween: Option<(Tween, (Channel, Channel))>,
}

impl MoveIn {
    pub fn new(edge: Edge, family: EasingFamily, window: Vec2, clock: EffectClock) -> Self {
        Self {
            clock,
            edge,
            easing: Easing::ease_out(family),
            window,
            offset: Vec2::ZERO,
            tween: None,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Off-screen offset computed by the last `bind()` / `run()`.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl Effect for MoveIn {
    fn name(&self) -> &'static str {
        "move_in"
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

    fn bind(&mut self, pose: &Pose) {
        self.offset = offset_for(self.edge, pose, self.window);
    }

    fn set_window(&mut self, window: Vec2) {
        self.window = window;
    }

    fn run(&mut self, pose: &Pose) {
        self.clock.begin(pose);
        self.bind(pose);
        let resting = pose.home.position;
        let mut tween = Tween::new(self.easing, self.clock.duration);
        let channels = tween.track_vec2(resting + self.offset, resting);
        self.tween = Some((tween, channels));
    }

    fn update(&mut self, dt: f32, pose: &mut Pose) {
        let Some(step) = self.clock.advance(dt) else { return };
        let Some((tween, channels)) = self.tween.as_mut() else { return };
        tween.step(step);
        pose.live.position = tween.vec2(*channels);
        if tween.is_finished() {
            self.clock.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::visual::{Pivot, Visual};

    const WINDOW: Vec2 = Vec2::new(800.0, 600.0);

    fn pose() -> Pose {
        let mut pose = Pose::new(Visual {
            position: Vec2::new(300.0, 200.0),
            ..Default::default()
        });
        pose.size = Vec2::new(100.0, 40.0);
        pose.origin = Pivot::Center.origin(pose.size);
        pose
    }

    #[test]
    fn starts_off_screen_and_lands_home() {
        let mut pose = pose();
        let mut effect = MoveIn::new(Edge::Left, EasingFamily::Back, WINDOW, EffectClock::new(0.0, 0.5));
        effect.run(&pose);

        effect.update(0.0001, &mut pose);
        assert!(pose.live.position.x < 0.0, "x = {}", pose.live.position.x);

        for _ in 0..40 {
            effect.update(1.0 / 60.0, &mut pose);
        }
        assert!(effect.is_finished());
        assert_eq!(pose.live.position, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn waits_out_delay_without_moving() {
        let mut pose = pose();
        let mut effect = MoveIn::new(Edge::Top, EasingFamily::Bounce, WINDOW, EffectClock::new(0.3, 0.5));
        effect.run(&pose);
        effect.update(0.2, &mut pose);
        assert_eq!(pose.live.position, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn bind_recomputes_for_new_window() {
        let pose = pose();
        let mut effect = MoveIn::new(Edge::Right, EasingFamily::Elastic, WINDOW, EffectClock::new(0.0, 1.0));
        effect.bind(&pose);
        assert_eq!(effect.offset().x, 800.0 - 300.0 + 50.0);

        effect.set_window(Vec2::new(1920.0, 1080.0));
        effect.bind(&pose);
        assert_eq!(effect.offset().x, 1920.0 - 300.0 + 50.0);
    }

    #[test]
    fn stop_restores_pre_run_position() {
        let mut pose = pose();
        let mut effect = MoveIn::new(Edge::Bottom, EasingFamily::Exponential, WINDOW, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.3, &mut pose);
        assert_ne!(pose.live.position, Vec2::new(300.0, 200.0));

        effect.stop(&mut pose);
        assert!(effect.is_finished());
        assert_eq!(pose.live.position, Vec2::new(300.0, 200.0));
    }

    #[test]
    fn update_before_run_is_noop() {
        let mut pose = pose();
        let mut effect = MoveIn::new(Edge::Left, EasingFamily::Back, WINDOW, EffectClock::new(0.0, 1.0));
        effect.update(0.5, &mut pose);
        assert_eq!(pose.live.position, Vec2::new(300.0, 200.0));
    }
}
