//! Theme layouts: which entities a scene holds, what they draw, where they
//! rest and which effects they play. Loaded from JSON at runtime.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Color, EntityId};
use crate::assets::registry::ResourceRegistry;
use crate::components::content::Content;
use crate::components::entity::Entity;
use crate::components::visual::{Flip, Pivot};
use crate::error::Result;
use crate::input::controls::Action;
use crate::systems::effects::EffectFactory;

/// A whole scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDef {
    pub name: String,
    /// Default for entities that do not say whether their effects loop.
    #[serde(default)]
    pub cyclic: bool,
    pub root: EntityDef,
    /// Entities re-run when an action fires.
    #[serde(default)]
    pub triggers: HashMap<Action, Vec<String>>,
    /// Sound played when an action fires.
    #[serde(default)]
    pub sounds: HashMap<Action, String>,
}

/// One entity and its subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: KindDef,
    #[serde(default)]
    pub position: [f32; 2],
    /// Radians.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "unit_scale")]
    pub scale: [f32; 2],
    #[serde(default)]
    pub pivot: Pivot,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub flip: Flip,
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Overrides the layout-wide `cyclic` flag.
    #[serde(default)]
    pub cyclic: Option<bool>,
    #[serde(default)]
    pub effects: Vec<EffectDef>,
    #[serde(default)]
    pub children: Vec<EntityDef>,
}

/// Content an entity draws, by resource name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindDef {
    #[default]
    Empty,
    Image {
        texture: String,
    },
    Text {
        font: String,
        text: String,
        #[serde(default = "default_char_size")]
        char_size: f32,
    },
    Rect {
        size: [f32; 2],
    },
}

/// An effect in an entity's sequence, by factory name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub delay: f32,
    pub duration: f32,
    /// Shader name from the asset manifest.
    #[serde(default)]
    pub shader: Option<String>,
}

fn unit_scale() -> [f32; 2] {
    [1.0, 1.0]
}

fn enabled() -> bool {
    true
}

fn default_char_size() -> f32 {
    24.0
}

impl LayoutDef {
    /// Parse a layout from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the entity tree.
    ///
    /// Unknown effect names are skipped with a warning; unknown textures,
    /// fonts or sounds fail the whole layout.
    pub fn instantiate<F>(
        &self,
        resources: &ResourceRegistry,
        factory: &EffectFactory,
        id_gen: &mut F,
    ) -> Result<Entity>
    where
        F: FnMut() -> EntityId,
    {
        for sound in self.sounds.values() {
            resources.sound(sound)?;
        }
        let root = self.root.instantiate(resources, factory, self.cyclic, id_gen)?;
        log::info!("layout '{}': {} entities", self.name, root.count());
        Ok(root)
    }

    /// Entity names listed under `action`.
    pub fn trigger(&self, action: Action) -> &[String] {
        self.triggers.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl KindDef {
    fn content(&self, resources: &ResourceRegistry) -> Result<Content> {
        Ok(match self {
            KindDef::Empty => Content::Empty,
            KindDef::Image { texture } => Content::image(resources.texture(texture)?),
            KindDef::Text { font, text, char_size } => {
                Content::text(resources.font(font)?, text.clone(), *char_size)
            }
            KindDef::Rect { size } => Content::rect(Vec2::from(*size)),
        })
    }
}

impl EntityDef {
    fn instantiate<F>(
        &self,
        resources: &ResourceRegistry,
        factory: &EffectFactory,
        cyclic: bool,
        id_gen: &mut F,
    ) -> Result<Entity>
    where
        F: FnMut() -> EntityId,
    {
        // Geometry first so effects bind against the final size and pivot.
        let mut entity = Entity::new(id_gen())
            .with_name(self.name.clone())
            .with_window(factory.window())
            .with_content(self.kind.content(resources)?)
            .with_pivot(self.pivot)
            .with_scale(Vec2::from(self.scale))
            .with_flip(self.flip.x, self.flip.y)
            .with_rotation(self.rotation)
            .with_position(Vec2::from(self.position))
            .with_color(self.color)
            .with_cyclic_effects(self.cyclic.unwrap_or(cyclic));
        entity.enabled = self.enabled;

        for def in &self.effects {
            let shader = def.shader.as_deref().and_then(|name| resources.shader(name));
            if let Some(effect) = factory.create_named_with_shader(&def.kind, def.delay, def.duration, shader) {
                entity.add_effect(effect);
            }
        }

        for child in &self.children {
            entity.add_child(child.instantiate(resources, factory, cyclic, id_gen)?);
        }
        Ok(entity)
    }
}
