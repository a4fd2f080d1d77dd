use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityId(pub u32);

/// Opaque handle to a shader registered with the resource registry.
/// The engine never inspects shaders; the renderer looks them up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// A sound event emitted by the frontend.
/// The numeric value maps to a sound declared in the asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// An event communicated from the frontend to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StageEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl StageEvent {
    pub const FLOATS: usize = 4;
}

/// RGBA tint. Alpha doubles as the entity's opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Component-wise multiply, the way a tint is inherited down the tree.
    pub fn modulate(self, other: Color) -> Color {
        fn mul(a: u8, b: u8) -> u8 {
            ((a as u16 * b as u16) / 255) as u8
        }
        Color {
            r: mul(self.r, other.r),
            g: mul(self.g, other.g),
            b: mul(self.b, other.b),
            a: mul(self.a, other.a),
        }
    }

    /// Normalized [0, 1] channels for the renderer.
    pub fn to_unit(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Color { r, g, b, a }
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Convert an interpolated opacity back to a channel value.
pub fn alpha_from_f32(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_with_white_is_identity() {
        let c = Color::rgba(10, 20, 30, 40);
        assert_eq!(c.modulate(Color::WHITE), c);
    }

    #[test]
    fn modulate_halves_alpha() {
        let half = Color::WHITE.with_alpha(128);
        let child = Color::WHITE.modulate(half);
        assert_eq!(child.a, 128);
        assert_eq!(Color::WHITE.with_alpha(200).modulate(half).a, 100);
    }

    #[test]
    fn color_parses_from_array() {
        let c: Color = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(c, Color::rgba(1, 2, 3, 4));
    }

    #[test]
    fn alpha_conversion_clamps() {
        assert_eq!(alpha_from_f32(-3.0), 0);
        assert_eq!(alpha_from_f32(127.6), 128);
        assert_eq!(alpha_from_f32(400.0), 255);
    }

    #[test]
    fn stage_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<StageEvent>(), StageEvent::FLOATS * 4);
    }
}
