// extensions/tween.rs
//
// Tween: advances one or more tracked values toward their targets over a
// fixed duration. Owns its values; effects copy `value()` out after each
// step instead of holding pointers into an entity.
//
// Usage:
//   let mut tween = Tween::new(Easing::ease_out(EasingFamily::Back), 0.5);
//   let x = tween.track(-100.0, 320.0);
//   tween.step(dt);
//   entity_x = tween.value(x);

use glam::Vec2;
use super::easing::{Easing, lerp};

/// Steps that land within this many seconds of the end count as the end,
/// so accumulated `f32` frame deltas still finish on the expected frame.
pub const TIME_EPSILON: f32 = 1e-5;

/// Index of a tracked value inside a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel(usize);

/// Start/target pair for one tracked value.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Track {
    start: f32,
    target: f32,
    current: f32,
}

/// A single tween over N tracked values sharing one easing and one clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Easing applied to every tracked value.
    pub easing: Easing,
    /// Duration in seconds.
    duration: f32,
    /// Elapsed time, always within [0, duration].
    elapsed: f32,
    tracks: Vec<Track>,
}

impl Tween {
    pub fn new(easing: Easing, duration: f32) -> Self {
        Self {
            easing,
            duration: duration.max(0.0),
            elapsed: 0.0,
            tracks: Vec::with_capacity(2),
        }
    }

    /// Track a value starting at `start` and heading for `target`.
    pub fn track(&mut self, start: f32, target: f32) -> Channel {
        self.tracks.push(Track { start, target, current: start });
        Channel(self.tracks.len() - 1)
    }

    /// Track both components of a vector.
    pub fn track_vec2(&mut self, start: Vec2, target: Vec2) -> (Channel, Channel) {
        (self.track(start.x, target.x), self.track(start.y, target.y))
    }

    /// Advance by `dt` seconds and recompute every tracked value.
    ///
    /// Once the clock reaches the duration every value is snapped to its
    /// target, so repeated legs never accumulate rounding error.
    pub fn step(&mut self, dt: f32) {
        let elapsed = self.elapsed + dt.max(0.0);
        self.elapsed = if elapsed >= self.duration - TIME_EPSILON {
            self.duration
        } else {
            elapsed
        };
        let finished = self.is_finished();
        let eased = self.easing.apply(self.progress());
        for track in &mut self.tracks {
            track.current = if finished {
                track.target
            } else {
                lerp(track.start, track.target, eased)
            };
        }
    }

    /// Current value of a tracked channel.
    pub fn value(&self, channel: Channel) -> f32 {
        self.tracks.get(channel.0).map_or(0.0, |t| t.current)
    }

    /// Current value of a pair of channels as a vector.
    pub fn vec2(&self, (x, y): (Channel, Channel)) -> Vec2 {
        Vec2::new(self.value(x), self.value(y))
    }

    /// Target of a tracked channel.
    pub fn target(&self, channel: Channel) -> f32 {
        self.tracks.get(channel.0).map_or(0.0, |t| t.target)
    }

    /// Restart a channel from its current value toward a new target.
    pub fn retarget(&mut self, channel: Channel, target: f32) {
        if let Some(track) = self.tracks.get_mut(channel.0) {
            track.start = track.current;
            track.target = target;
        }
    }

    /// Rewind (or fast-forward) the clock without recomputing values.
    pub fn set_elapsed(&mut self, elapsed: f32) {
        self.elapsed = elapsed.clamp(0.0, self.duration);
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::easing::EasingFamily;

    #[test]
    fn linear_halfway_and_end() {
        let mut tween = Tween::new(Easing::LINEAR, 1.0);
        let x = tween.track(0.0, 100.0);

        tween.step(0.5);
        assert!((tween.value(x) - 50.0).abs() < 0.01);
        assert!(!tween.is_finished());

        tween.step(0.5);
        assert_eq!(tween.value(x), 100.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn elapsed_never_exceeds_duration() {
        let mut tween = Tween::new(Easing::LINEAR, 0.25);
        tween.track(0.0, 1.0);
        tween.step(10.0);
        assert_eq!(tween.elapsed(), 0.25);
    }

    #[test]
    fn final_step_lands_exactly_on_target() {
        // Odd values and many small steps to provoke float drift.
        let mut tween = Tween::new(Easing::ease_out(EasingFamily::Elastic), 0.7);
        let ch = tween.track(13.37, -271.828);
        for _ in 0..200 {
            tween.step(1.0 / 60.0);
        }
        assert_eq!(tween.value(ch), -271.828);
    }

    #[test]
    fn accumulated_frame_deltas_finish_on_time() {
        let mut tween = Tween::new(Easing::LINEAR, 0.6);
        let ch = tween.track(255.0, 0.0);
        for _ in 0..12 {
            tween.step(0.05);
        }
        assert!(tween.is_finished());
        assert_eq!(tween.value(ch), 0.0);
    }

    #[test]
    fn tracks_several_values_together() {
        let mut tween = Tween::new(Easing::LINEAR, 2.0);
        let pos = tween.track_vec2(Vec2::ZERO, Vec2::new(10.0, -10.0));
        let rot = tween.track(0.0, 4.0);
        tween.step(1.0);
        assert_eq!(tween.vec2(pos), Vec2::new(5.0, -5.0));
        assert_eq!(tween.value(rot), 2.0);
    }

    #[test]
    fn retarget_and_rewind_start_new_leg() {
        let mut tween = Tween::new(Easing::LINEAR, 1.0);
        let ch = tween.track(0.0, 10.0);
        tween.step(1.0);
        tween.retarget(ch, -10.0);
        tween.set_elapsed(0.0);
        assert!(!tween.is_finished());

        tween.step(0.5);
        assert_eq!(tween.value(ch), 0.0);
        tween.step(0.5);
        assert_eq!(tween.value(ch), -10.0);
    }

    #[test]
    fn zero_duration_finishes_on_first_step() {
        let mut tween = Tween::new(Easing::LINEAR, 0.0);
        let ch = tween.track(1.0, 2.0);
        assert!(tween.is_finished());
        tween.step(0.0);
        assert_eq!(tween.value(ch), 2.0);
    }

    #[test]
    fn identical_inputs_are_bit_reproducible() {
        let run = || {
            let mut tween = Tween::new(Easing::ease_in_out(EasingFamily::Back), 0.9);
            let ch = tween.track(5.0, 95.0);
            let mut samples = Vec::new();
            for _ in 0..30 {
                tween.step(1.0 / 60.0);
                samples.push(tween.value(ch).to_bits());
            }
            samples
        };
        assert_eq!(run(), run());
    }
}
