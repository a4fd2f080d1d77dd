use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, SoundEvent, StageEvent};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::ResourceRegistry;
use crate::core::scene::Scene;
use crate::error::Result;
use crate::input::controls::ControlMap;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
use crate::systems::effects::EffectFactory;

/// Stage configuration, provided by the theme. Missing JSON fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Window width in pixels.
    pub window_width: f32,
    /// Window height in pixels.
    pub window_height: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of stage events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            window_width: 1280.0,
            window_height: 720.0,
            max_instances: 512,
            max_events: 32,
            max_sounds: 32,
        }
    }
}

impl StageConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn window(&self) -> Vec2 {
        Vec2::new(self.window_width, self.window_height)
    }
}

/// The behaviour of one frontend: what it shows and how it reacts.
pub trait Theme {
    /// Return stage configuration. Called once before init.
    fn config(&self) -> StageConfig {
        StageConfig::default()
    }

    /// Build the scene. May be called again after new assets are loaded.
    fn init(&mut self, ctx: &mut StageContext);

    /// React to this step's input. The scene itself is advanced by the
    /// caller right after.
    fn update(&mut self, ctx: &mut StageContext, input: &InputQueue);

    /// Optional read-only render pass for extra instances drawn on top.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Hands out entity ids, unique for the lifetime of a stage.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable access to stage state, passed to Theme::init and Theme::update.
pub struct StageContext {
    pub scene: Scene,
    pub resources: ResourceRegistry,
    pub factory: EffectFactory,
    pub controls: ControlMap,
    pub ids: IdAllocator,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<StageEvent>,
}

impl StageContext {
    pub fn new(config: &StageConfig) -> Self {
        let window = config.window();
        Self {
            scene: Scene::new(window),
            resources: ResourceRegistry::new(),
            factory: EffectFactory::new(window),
            controls: ControlMap::default(),
            ids: IdAllocator::new(),
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    /// Replace the resource registry with one built from `manifest`.
    pub fn load_manifest(&mut self, manifest: &AssetManifest) -> Result<()> {
        self.resources = ResourceRegistry::from_manifest(manifest)?;
        Ok(())
    }

    /// New window size for the scene and for effects built from now on.
    pub fn resize(&mut self, window: Vec2) {
        self.factory.set_window(window);
        self.scene.resize(window);
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a stage event to be forwarded to the host.
    pub fn emit_event(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
    pub scene: &'a Scene,
}
