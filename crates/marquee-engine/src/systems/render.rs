use glam::{Affine2, Vec2};

use crate::api::types::{Color, ShaderId};
use crate::components::content::Content;
use crate::renderer::instance::{InstanceKind, RenderBuffer, RenderInstance, TextRun};

/// Draw state accumulated down the entity tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStates {
    /// Parent-to-screen transform.
    pub transform: Affine2,
    /// Shader inherited from an ancestor's active effect.
    pub shader: Option<ShaderId>,
}

impl RenderStates {
    pub const DEFAULT: RenderStates = RenderStates {
        transform: Affine2::IDENTITY,
        shader: None,
    };

    /// States for a child: this transform composed on top, and this shader
    /// if one is set, else the inherited one.
    pub fn compose(&self, local: Affine2, shader: Option<ShaderId>) -> RenderStates {
        RenderStates {
            transform: self.transform * local,
            shader: shader.or(self.shader),
        }
    }
}

impl Default for RenderStates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Emit one instance for `content` placed by `world`. Empty content emits
/// nothing.
pub fn push_content(
    buffer: &mut RenderBuffer,
    content: &Content,
    world: Affine2,
    size: Vec2,
    tint: Color,
    shader: Option<ShaderId>,
) {
    let (kind, resource) = match content {
        Content::Empty => return,
        Content::Image { texture } => (InstanceKind::Image, texture.id),
        Content::Text { font, text, char_size } => {
            let index = buffer.push_text(TextRun {
                font: font.id,
                text: text.clone(),
                char_size: *char_size,
            });
            (InstanceKind::Text, index)
        }
        Content::Rect { .. } => (InstanceKind::Rect, 0),
    };
    buffer.push(RenderInstance::new(kind, resource, world, size, tint, shader));
}
