use glam::Vec2;

use crate::api::types::{Color, EntityId};
use crate::components::entity::Entity;
use crate::renderer::instance::RenderBuffer;
use crate::systems::render::RenderStates;

/// The tree currently on screen: exactly one root entity and the window it
/// is drawn into.
pub struct Scene {
    root: Entity,
    window: Vec2,
}

impl Scene {
    /// An empty scene (an unnamed root with nothing under it).
    pub fn new(window: Vec2) -> Self {
        Self {
            root: Entity::new(EntityId::default()).with_window(window),
            window,
        }
    }

    /// Replace the root. The previous tree is stopped and returned.
    pub fn set_root(&mut self, mut root: Entity) -> Entity {
        root.set_window(self.window);
        self.root.stop_all();
        std::mem::replace(&mut self.root, root)
    }

    pub fn root(&self) -> &Entity {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Entity {
        &mut self.root
    }

    pub fn window(&self) -> Vec2 {
        self.window
    }

    /// Find the first entity with the given name, depth-first.
    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.root.find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.root.find_mut(name)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.root.find_id(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.root.find_id_mut(id)
    }

    /// Run every entity's effect sequence from the start.
    pub fn start(&mut self) {
        self.root.run_all();
    }

    pub fn stop(&mut self) {
        self.root.stop_all();
    }

    /// Advance the whole tree by one fixed step. Parents update before
    /// their children.
    pub fn update(&mut self, dt: f32) {
        self.root.update(dt, Color::WHITE);
    }

    /// Emit the tree into `buffer`, clearing it first.
    pub fn draw(&self, buffer: &mut RenderBuffer) {
        buffer.clear();
        self.root.draw(buffer, &RenderStates::DEFAULT);
    }

    /// New window size; move effects recompute their off-screen points.
    pub fn resize(&mut self, window: Vec2) {
        self.window = window;
        self.root.set_window(window);
    }

    /// Number of entities, root included.
    pub fn len(&self) -> usize {
        self.root.count()
    }
}
