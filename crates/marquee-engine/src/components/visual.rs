//! Visual state shared between an entity and the effect running on it.
//!
//! An entity keeps two copies of its visual state: `home`, the resting values
//! assigned by the layout, and `live`, the values actually drawn. Effects read
//! `home` to find where they should land and write only into `live`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{alpha_from_f32, Color};

/// Anchor point (of 9) that an entity's position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Pivot {
    TopLeft = 0,
    Top = 1,
    TopRight = 2,
    Left = 3,
    #[default]
    Center = 4,
    Right = 5,
    BottomLeft = 6,
    Bottom = 7,
    BottomRight = 8,
}

impl Pivot {
    /// Total number of pivots.
    pub const COUNT: usize = 9;

    /// Convert from a grid index (row-major, top-left first).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::TopLeft),
            1 => Some(Self::Top),
            2 => Some(Self::TopRight),
            3 => Some(Self::Left),
            4 => Some(Self::Center),
            5 => Some(Self::Right),
            6 => Some(Self::BottomLeft),
            7 => Some(Self::Bottom),
            8 => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Fraction of the bounding box the pivot sits at, (0,0) = top-left.
    pub fn fraction(self) -> Vec2 {
        let index = self as u8;
        Vec2::new((index % 3) as f32 * 0.5, (index / 3) as f32 * 0.5)
    }

    /// Local origin offset for content of the given size.
    pub fn origin(self, size: Vec2) -> Vec2 {
        size * self.fraction()
    }
}

/// Independent horizontal / vertical mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flip {
    pub x: bool,
    pub y: bool,
}

/// Attributes an effect may mutate (and must restore on stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Position,
    Rotation,
    Scale,
    Opacity,
}

/// Position / rotation (radians) / scale / tint of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
    pub color: Color,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            color: Color::WHITE,
        }
    }
}

impl Visual {
    pub fn opacity(&self) -> f32 {
        self.color.a as f32
    }

    pub fn set_opacity(&mut self, value: f32) {
        self.color.a = alpha_from_f32(value);
    }

    /// Copy the listed attributes from `from`.
    pub fn restore(&mut self, from: &Visual, attrs: &[Attr]) {
        for attr in attrs {
            match attr {
                Attr::Position => self.position = from.position,
                Attr::Rotation => self.rotation = from.rotation,
                Attr::Scale => self.scale = from.scale,
                Attr::Opacity => self.color.a = from.color.a,
            }
        }
    }
}

/// Everything an effect needs to know about the entity it animates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Resting values assigned by the layout.
    pub home: Visual,
    /// Values drawn this frame.
    pub live: Visual,
    /// Unscaled content size.
    pub size: Vec2,
    /// Local origin derived from the pivot.
    pub origin: Vec2,
}

impl Pose {
    pub fn new(visual: Visual) -> Self {
        Self {
            home: visual,
            live: visual,
            ..Default::default()
        }
    }

    /// Half of the scaled bounding box.
    pub fn half_extent(&self) -> Vec2 {
        self.size * self.home.scale.abs() * 0.5
    }

    /// Centre of the bounding box at the resting position, in parent space.
    /// Rotation is ignored: offscreen travel only needs an axis-aligned box.
    pub fn resting_center(&self) -> Vec2 {
        self.home.position + (self.size * 0.5 - self.origin) * self.home.scale
    }
}
