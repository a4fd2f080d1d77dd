use glam::Vec2;

use crate::assets::registry::{FontHandle, TextureHandle};

/// What an entity draws, if anything. Content decides the entity's
/// unscaled size and therefore where its pivot sits.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    /// Groups and anchors: no drawing of their own.
    #[default]
    Empty,
    Image {
        texture: TextureHandle,
    },
    Text {
        font: FontHandle,
        text: String,
        /// Pixels per character cell.
        char_size: f32,
    },
    /// Solid box tinted by the entity color.
    Rect {
        size: Vec2,
    },
}

impl Content {
    pub fn image(texture: TextureHandle) -> Self {
        Content::Image { texture }
    }

    pub fn text(font: FontHandle, text: impl Into<String>, char_size: f32) -> Self {
        Content::Text {
            font,
            text: text.into(),
            char_size,
        }
    }

    pub fn rect(size: Vec2) -> Self {
        Content::Rect { size }
    }

    /// Unscaled bounding box size.
    pub fn size(&self) -> Vec2 {
        match self {
            Content::Empty => Vec2::ZERO,
            Content::Image { texture } => texture.size,
            Content::Text { font, text, char_size } => font.measure(text, *char_size),
            Content::Rect { size } => *size,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// Per-frame content step, run after the entity's effects and before its
    /// children. Every current variant is static.
    pub fn update(&mut self, _dt: f32) {}
}
