use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use serde::Serialize;

use crate::api::types::{Color, ShaderId};
use crate::error::Result;

/// What a [`RenderInstance`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InstanceKind {
    /// A textured quad; `resource` is the texture id.
    Image = 0,
    /// A run of glyphs; `resource` indexes [`RenderBuffer::texts`].
    Text = 1,
    /// A solid quad tinted by the instance color.
    Rect = 2,
}

/// Per-instance render data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
///
/// The quad spans `(0,0)..(width,height)` in local space and is placed by
/// the affine `m00 m01 m10 m11 tx ty` (column-major, as `glam::Affine2`).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub m00: f32,
    pub m01: f32,
    pub m10: f32,
    pub m11: f32,
    pub tx: f32,
    pub ty: f32,
    /// Unscaled content width.
    pub width: f32,
    /// Unscaled content height.
    pub height: f32,
    /// Tint, normalized.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub a: f32,
    /// [`InstanceKind`] as a float.
    pub kind: f32,
    /// Texture id or text-table index, depending on `kind`.
    pub resource: f32,
    /// Shader id, or -1.0 for none.
    pub shader: f32,
    /// Draw order within the frame.
    pub depth: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(
        kind: InstanceKind,
        resource: u32,
        world: Affine2,
        size: Vec2,
        tint: Color,
        shader: Option<ShaderId>,
    ) -> Self {
        let [r, g, b, a] = tint.to_unit();
        let cols = world.matrix2.to_cols_array();
        Self {
            m00: cols[0],
            m01: cols[1],
            m10: cols[2],
            m11: cols[3],
            tx: world.translation.x,
            ty: world.translation.y,
            width: size.x,
            height: size.y,
            r,
            g,
            b,
            a,
            kind: kind as u8 as f32,
            resource: resource as f32,
            shader: shader.map_or(-1.0, |s| s.0 as f32),
            depth: 0.0,
        }
    }

    /// Where local point `p` ends up on screen.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.m00 * p.x + self.m10 * p.y + self.tx,
            self.m01 * p.x + self.m11 * p.y + self.ty,
        )
    }
}

/// A string to draw, referenced by text instances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub font: u32,
    pub text: String,
    pub char_size: f32,
}

/// Render buffer containing all instances for a frame, in draw order, and
/// the text table text instances point into.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
    pub texts: Vec<TextRun>,
    capacity: usize,
    dropped: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// A buffer that holds at most `capacity` instances per frame.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            texts: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.texts.clear();
        self.dropped = 0;
    }

    /// Append an instance. Instances past capacity are counted and dropped.
    pub fn push(&mut self, mut instance: RenderInstance) {
        if self.instances.len() >= self.capacity {
            if self.dropped == 0 {
                log::warn!("render buffer full ({} instances), dropping the rest", self.capacity);
            }
            self.dropped += 1;
            return;
        }
        instance.depth = self.instances.len() as f32;
        self.instances.push(instance);
    }

    /// Add a string to the text table and return its index.
    pub fn push_text(&mut self, run: TextRun) -> u32 {
        self.texts.push(run);
        (self.texts.len() - 1) as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instances dropped this frame for lack of room.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// The text table as a JSON array, for hosts that cannot read strings
    /// out of linear memory.
    pub fn texts_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.texts)?)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_16_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 64);
        assert_eq!(RenderInstance::FLOATS, 16);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.instances[1].depth, 1.0);
    }

    #[test]
    fn overflow_is_dropped() {
        let mut buf = RenderBuffer::with_capacity(1);
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 1);
        assert_eq!(buf.dropped(), 1);
        buf.clear();
        assert_eq!(buf.dropped(), 0);
    }

    #[test]
    fn instance_carries_transform_and_tint() {
        let world = Affine2::from_translation(Vec2::new(10.0, 20.0));
        let inst = RenderInstance::new(
            InstanceKind::Rect,
            0,
            world,
            Vec2::new(4.0, 2.0),
            Color::WHITE.with_alpha(0),
            Some(ShaderId(2)),
        );
        assert_eq!(inst.transform_point(Vec2::new(4.0, 2.0)), Vec2::new(14.0, 22.0));
        assert_eq!(inst.a, 0.0);
        assert_eq!(inst.shader, 2.0);
        assert_eq!(inst.kind, 2.0);
    }

    #[test]
    fn text_table_as_json() {
        let mut buf = RenderBuffer::new();
        let index = buf.push_text(TextRun {
            font: 1,
            text: "Arcade".to_string(),
            char_size: 24.0,
        });
        assert_eq!(index, 0);
        assert_eq!(
            buf.texts_json().unwrap(),
            r#"[{"font":1,"text":"Arcade","char_size":24.0}]"#
        );
    }
}
