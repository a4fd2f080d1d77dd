//! Maps the closed set of effect identifiers used by layouts onto
//! configured effect instances.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fade::Fade;
use super::geometry::Edge;
use super::move_in::MoveIn;
use super::move_out::MoveOut;
use super::oscillate::{Pulse, Sway, SwayAxis, DEFAULT_SWAY_AMPLITUDE};
use super::spin::{Spin, SpinKind};
use super::{Effect, EffectClock};
use crate::api::types::ShaderId;
use crate::extensions::easing::EasingFamily;

/// Every effect a layout can ask for, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    MoveInBack,
    MoveInBackLeft,
    MoveInBackRight,
    MoveInBackTop,
    MoveInBackBottom,
    MoveInBounce,
    MoveInBounceLeft,
    MoveInBounceRight,
    MoveInBounceTop,
    MoveInBounceBottom,
    MoveInEase,
    MoveInEaseLeft,
    MoveInEaseRight,
    MoveInEaseTop,
    MoveInEaseBottom,
    MoveInElastic,
    MoveInElasticLeft,
    MoveInElasticRight,
    MoveInElasticTop,
    MoveInElasticBottom,
    MoveOutBack,
    MoveOutBackLeft,
    MoveOutBackRight,
    MoveOutBackTop,
    MoveOutBackBottom,
    FadeIn,
    FadeOut,
    HardRollIn,
    PopIn,
    RollIn,
    RotateIn,
    EaseX,
    EaseY,
    Fade,
}

/// What an [`EffectType`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recipe {
    MoveIn(EasingFamily, Edge),
    MoveOut(EasingFamily, Edge),
    FadeIn,
    FadeOut,
    Spin(SpinKind),
    Sway(SwayAxis),
    Pulse,
}

impl EffectType {
    pub const ALL: [EffectType; 34] = [
        EffectType::MoveInBack,
        EffectType::MoveInBackLeft,
        EffectType::MoveInBackRight,
        EffectType::MoveInBackTop,
        EffectType::MoveInBackBottom,
        EffectType::MoveInBounce,
        EffectType::MoveInBounceLeft,
        EffectType::MoveInBounceRight,
        EffectType::MoveInBounceTop,
        EffectType::MoveInBounceBottom,
        EffectType::MoveInEase,
        EffectType::MoveInEaseLeft,
        EffectType::MoveInEaseRight,
        EffectType::MoveInEaseTop,
        EffectType::MoveInEaseBottom,
        EffectType::MoveInElastic,
        EffectType::MoveInElasticLeft,
        EffectType::MoveInElasticRight,
        EffectType::MoveInElasticTop,
        EffectType::MoveInElasticBottom,
        EffectType::MoveOutBack,
        EffectType::MoveOutBackLeft,
        EffectType::MoveOutBackRight,
        EffectType::MoveOutBackTop,
        EffectType::MoveOutBackBottom,
        EffectType::FadeIn,
        EffectType::FadeOut,
        EffectType::HardRollIn,
        EffectType::PopIn,
        EffectType::RollIn,
        EffectType::RotateIn,
        EffectType::EaseX,
        EffectType::EaseY,
        EffectType::Fade,
    ];

    /// Layout name, e.g. `"move_in_bounce_left"`.
    pub fn name(self) -> &'static str {
        match self {
            EffectType::MoveInBack => "move_in_back",
            EffectType::MoveInBackLeft => "move_in_back_left",
            EffectType::MoveInBackRight => "move_in_back_right",
            EffectType::MoveInBackTop => "move_in_back_top",
            EffectType::MoveInBackBottom => "move_in_back_bottom",
            EffectType::MoveInBounce => "move_in_bounce",
            EffectType::MoveInBounceLeft => "move_in_bounce_left",
            EffectType::MoveInBounceRight => "move_in_bounce_right",
            EffectType::MoveInBounceTop => "move_in_bounce_top",
            EffectType::MoveInBounceBottom => "move_in_bounce_bottom",
            EffectType::MoveInEase => "move_in_ease",
            EffectType::MoveInEaseLeft => "move_in_ease_left",
            EffectType::MoveInEaseRight => "move_in_ease_right",
            EffectType::MoveInEaseTop => "move_in_ease_top",
            EffectType::MoveInEaseBottom => "move_in_ease_bottom",
            EffectType::MoveInElastic => "move_in_elastic",
            EffectType::MoveInElasticLeft => "move_in_elastic_left",
            EffectType::MoveInElasticRight => "move_in_elastic_right",
            EffectType::MoveInElasticTop => "move_in_elastic_top",
            EffectType::MoveInElasticBottom => "move_in_elastic_bottom",
            EffectType::MoveOutBack => "move_out_back",
            EffectType::MoveOutBackLeft => "move_out_back_left",
            EffectType::MoveOutBackRight => "move_out_back_right",
            EffectType::MoveOutBackTop => "move_out_back_top",
            EffectType::MoveOutBackBottom => "move_out_back_bottom",
            EffectType::FadeIn => "fade_in",
            EffectType::FadeOut => "fade_out",
            EffectType::HardRollIn => "hard_roll_in",
            EffectType::PopIn => "pop_in",
            EffectType::RollIn => "roll_in",
            EffectType::RotateIn => "rotate_in",
            EffectType::EaseX => "ease_x",
            EffectType::EaseY => "ease_y",
            EffectType::Fade => "fade",
        }
    }

    /// Look up a layout name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<EffectType> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn recipe(self) -> Recipe {
        use EasingFamily::{Back, Bounce, Elastic, Exponential};
        match self {
            EffectType::MoveInBack => Recipe::MoveIn(Back, Edge::Nearest),
            EffectType::MoveInBackLeft => Recipe::MoveIn(Back, Edge::Left),
            EffectType::MoveInBackRight => Recipe::MoveIn(Back, Edge::Right),
            EffectType::MoveInBackTop => Recipe::MoveIn(Back, Edge::Top),
            EffectType::MoveInBackBottom => Recipe::MoveIn(Back, Edge::Bottom),
            EffectType::MoveInBounce => Recipe::MoveIn(Bounce, Edge::Nearest),
            EffectType::MoveInBounceLeft => Recipe::MoveIn(Bounce, Edge::Left),
            EffectType::MoveInBounceRight => Recipe::MoveIn(Bounce, Edge::Right),
            EffectType::MoveInBounceTop => Recipe::MoveIn(Bounce, Edge::Top),
            EffectType::MoveInBounceBottom => Recipe::MoveIn(Bounce, Edge::Bottom),
            EffectType::MoveInEase => Recipe::MoveIn(Exponential, Edge::Nearest),
            EffectType::MoveInEaseLeft => Recipe::MoveIn(Exponential, Edge::Left),
            EffectType::MoveInEaseRight => Recipe::MoveIn(Exponential, Edge::Right),
            EffectType::MoveInEaseTop => Recipe::MoveIn(Exponential, Edge::Top),
            EffectType::MoveInEaseBottom => Recipe::MoveIn(Exponential, Edge::Bottom),
            EffectType::MoveInElastic => Recipe::MoveIn(Elastic, Edge::Nearest),
            EffectType::MoveInElasticLeft => Recipe::MoveIn(Elastic, Edge::Left),
            EffectType::MoveInElasticRight => Recipe::MoveIn(Elastic, Edge::Right),
            EffectType::MoveInElasticTop => Recipe::MoveIn(Elastic, Edge::Top),
            EffectType::MoveInElasticBottom => Recipe::MoveIn(Elastic, Edge::Bottom),
            EffectType::MoveOutBack => Recipe::MoveOut(Back, Edge::Nearest),
            EffectType::MoveOutBackLeft => Recipe::MoveOut(Back, Edge::Left),
            EffectType::MoveOutBackRight => Recipe::MoveOut(Back, Edge::Right),
            EffectType::MoveOutBackTop => Recipe::MoveOut(Back, Edge::Top),
            EffectType::MoveOutBackBottom => Recipe::MoveOut(Back, Edge::Bottom),
            EffectType::FadeIn => Recipe::FadeIn,
            EffectType::FadeOut => Recipe::FadeOut,
            EffectType::HardRollIn => Recipe::Spin(SpinKind::HardRoll),
            EffectType::PopIn => Recipe::Spin(SpinKind::Pop),
            EffectType::RollIn => Recipe::Spin(SpinKind::Roll),
            EffectType::RotateIn => Recipe::Spin(SpinKind::Rotate),
            EffectType::EaseX => Recipe::Sway(SwayAxis::X),
            EffectType::EaseY => Recipe::Sway(SwayAxis::Y),
            EffectType::Fade => Recipe::Pulse,
        }
    }

    /// Whether effects of this type loop forever.
    pub fn is_cyclic(self) -> bool {
        matches!(self.recipe(), Recipe::Sway(_) | Recipe::Pulse)
    }
}

impl std::fmt::Display for EffectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds effects for entities drawn into a window of a known size.
#[derive(Debug, Clone)]
pub struct EffectFactory {
    window: Vec2,
    sway_amplitude: f32,
}

impl EffectFactory {
    pub fn new(window: Vec2) -> Self {
        Self {
            window,
            sway_amplitude: DEFAULT_SWAY_AMPLITUDE,
        }
    }

    pub fn with_sway_amplitude(mut self, amplitude: f32) -> Self {
        self.sway_amplitude = amplitude;
        self
    }

    pub fn window(&self) -> Vec2 {
        self.window
    }

    pub fn set_window(&mut self, window: Vec2) {
        self.window = window;
    }

    /// Build an effect. The caller owns the result; handing it to an entity
    /// with `add_effect` binds it to that entity.
    pub fn create(&self, kind: EffectType, delay: f32, duration: f32) -> Box<dyn Effect> {
        self.create_with_shader(kind, delay, duration, None)
    }

    pub fn create_with_shader(
        &self,
        kind: EffectType,
        delay: f32,
        duration: f32,
        shader: Option<ShaderId>,
    ) -> Box<dyn Effect> {
        let clock = EffectClock::new(delay, duration).with_shader(shader);
        match kind.recipe() {
            Recipe::MoveIn(family, edge) => Box::new(MoveIn::new(edge, family, self.window, clock)),
            Recipe::MoveOut(family, edge) => Box::new(MoveOut::new(edge, family, self.window, clock)),
            Recipe::FadeIn => Box::new(Fade::fade_in(clock)),
            Recipe::FadeOut => Box::new(Fade::fade_out(clock)),
            Recipe::Spin(spin) => Box::new(Spin::new(spin, clock)),
            Recipe::Sway(axis) => Box::new(Sway::new(axis, self.sway_amplitude, clock)),
            Recipe::Pulse => Box::new(Pulse::new(clock)),
        }
    }

    /// Build an effect from its layout name. Unknown names are not an
    /// error: the entity simply goes without that flourish.
    pub fn create_named(&self, name: &str, delay: f32, duration: f32) -> Option<Box<dyn Effect>> {
        self.create_named_with_shader(name, delay, duration, None)
    }

    pub fn create_named_with_shader(
        &self,
        name: &str,
        delay: f32,
        duration: f32,
        shader: Option<ShaderId>,
    ) -> Option<Box<dyn Effect>> {
        match EffectType::from_name(name) {
            Some(kind) => Some(self.create_with_shader(kind, delay, duration, shader)),
            None => {
                log::warn!("effect '{}' is not available, skipping", name);
                None
            }
        }
    }
}
