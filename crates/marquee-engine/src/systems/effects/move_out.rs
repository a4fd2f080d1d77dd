use glam::Vec2;

use super::geometry::{offset_for, Edge};
use super::{Effect, EffectClock};
use crate::components::visual::{Attr, Pose};
use crate::extensions::easing::{Easing, EasingFamily};
use crate::extensions::tween::{Channel, Tween};

/// Slides an entity from wherever it currently is to just outside the window.
#[derive(Debug, Clone)]
pub struct MoveOut {
    clock: EffectClock,
    edge: Edge,
    easing: Easing,
    window: Vec2,
    offset: Vec2,
    tween: Option<(Tween, (Channel, Channel))>,
}

impl MoveOut {
    pub fn new(edge: Edge, family: EasingFamily, window: Vec2, clock: EffectClock) -> Self {
        Self {
            clock,
            edge,
            easing: Easing::ease_in(family),
            window,
            offset: Vec2::ZERO,
            tween: None,
        }
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Off-screen offset computed by the last `bind()` / `run()`.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl Effect for MoveOut {
    fn name(&self) -> &'static str {
        "move_out"
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

    // The start is the live position, so a re-run mid-flight continues from
    // where the entity is instead of snapping back home first.
    fn run(&mut self, pose: &Pose) {
        self.clock.begin(pose);
        self.bind(pose);
        let destination = pose.home.position + self.offset;
        let mut tween = Tween::new(self.easing, self.clock.duration);
        let channels = tween.track_vec2(pose.live.position, destination);
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
    fn ends_exactly_at_offscreen_point() {
        let mut pose = pose();
        let mut effect = MoveOut::new(Edge::Right, EasingFamily::Back, WINDOW, EffectClock::new(0.0, 0.4));
        effect.run(&pose);
        effect.update(0.4, &mut pose);
        assert!(effect.is_finished());
        assert_eq!(pose.live.position, Vec2::new(300.0 + (800.0 - 300.0 + 50.0), 200.0));
    }

    #[test]
    fn rerun_continues_from_current_position() {
        let mut pose = pose();
        let mut effect = MoveOut::new(Edge::Left, EasingFamily::Back, WINDOW, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.7, &mut pose);
        let midway = pose.live.position;

        effect.run(&pose);
        effect.update(0.0, &mut pose);
        assert_eq!(pose.live.position, midway);
    }

    #[test]
    fn stop_mid_flight_restores_home() {
        let mut pose = pose();
        let mut effect = MoveOut::new(Edge::Top, EasingFamily::Back, WINDOW, EffectClock::new(0.0, 1.0));
        effect.run(&pose);
        effect.update(0.8, &mut pose);
        effect.stop(&mut pose);
        assert_eq!(pose.live.position, Vec2::new(300.0, 200.0));
        // Second stop is harmless.
        effect.stop(&mut pose);
        assert_eq!(pose.live.position, Vec2::new(300.0, 200.0));
    }
}
