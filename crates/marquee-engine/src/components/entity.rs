use glam::{Affine2, Vec2};

use crate::api::types::{Color, EntityId};
use crate::components::content::Content;
use crate::components::visual::{Flip, Pivot, Pose, Visual};
use crate::renderer::instance::RenderBuffer;
use crate::systems::effects::Effect;
use crate::systems::render::{push_content, RenderStates};

/// Whether an entity's effect chain is advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Stopped,
    Started,
}

/// Axis-aligned box in parent space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// A drawable, transformable node in the scene tree.
///
/// An entity exclusively owns its children and its effects; dropping it
/// drops the whole subtree. Effects run one at a time in sequence order and
/// only ever touch `pose.live`, so `stop()` can always put the resting
/// values back.
#[derive(Debug)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Name used by layouts and triggers to find this entity.
    pub name: String,
    /// Disabled entities keep animating but are not drawn (nor their children).
    pub enabled: bool,
    status: Status,
    pivot: Pivot,
    pose: Pose,
    flip: Flip,
    content: Content,
    children: Vec<Entity>,
    effects: Vec<Box<dyn Effect>>,
    active: Option<usize>,
    cyclic_effects: bool,
    window: Vec2,
    /// Live color modulated by the ancestors' tint, as of the last update.
    tint: Color,
}

impl Entity {
    /// Create a new, empty entity at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            enabled: true,
            status: Status::Stopped,
            pivot: Pivot::default(),
            pose: Pose::default(),
            flip: Flip::default(),
            content: Content::Empty,
            children: Vec::new(),
            effects: Vec::new(),
            active: None,
            cyclic_effects: false,
            window: Vec2::ZERO,
            tint: Color::WHITE,
        }
    }

    // -- Builder pattern --

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.set_content(content);
        self
    }

    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.set_pivot(pivot);
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_flip(mut self, x: bool, y: bool) -> Self {
        self.set_flip(x, y);
        self
    }

    pub fn with_child(mut self, child: Entity) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_effect(mut self, effect: Box<dyn Effect>) -> Self {
        self.add_effect(effect);
        self
    }

    pub fn with_cyclic_effects(mut self, cyclic: bool) -> Self {
        self.cyclic_effects = cyclic;
        self
    }

    pub fn with_window(mut self, window: Vec2) -> Self {
        self.set_window(window);
        self
    }

    // -- Visual state --

    /// Anchor subsequent positions to `pivot`.
    pub fn set_pivot(&mut self, pivot: Pivot) {
        self.pivot = pivot;
        self.refresh_geometry();
    }

    /// Set tint and opacity, both resting and live.
    pub fn set_color(&mut self, color: Color) {
        self.pose.home.color = color;
        self.pose.live.color = color;
        self.tint = color;
    }

    /// Set only the alpha channel.
    pub fn set_opacity(&mut self, alpha: u8) {
        self.set_color(self.pose.home.color.with_alpha(alpha));
    }

    /// Mirror along either axis. Re-applying the current state changes nothing.
    pub fn set_flip(&mut self, x: bool, y: bool) {
        if x != self.flip.x {
            self.pose.home.scale.x = -self.pose.home.scale.x;
            self.pose.live.scale.x = -self.pose.live.scale.x;
        }
        if y != self.flip.y {
            self.pose.home.scale.y = -self.pose.home.scale.y;
            self.pose.live.scale.y = -self.pose.live.scale.y;
        }
        self.flip = Flip { x, y };
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.pose.home.position = position;
        self.pose.live.position = position;
        self.rebind_effects();
    }

    /// Rotation in radians.
    pub fn set_rotation(&mut self, rotation: f32) {
        self.pose.home.rotation = rotation;
        self.pose.live.rotation = rotation;
    }

    /// Scale magnitude; the current flip is kept.
    pub fn set_scale(&mut self, scale: Vec2) {
        let signs = Vec2::new(
            if self.flip.x { -1.0 } else { 1.0 },
            if self.flip.y { -1.0 } else { 1.0 },
        );
        self.pose.home.scale = scale * signs;
        self.pose.live.scale = scale * signs;
        self.rebind_effects();
    }

    pub fn set_content(&mut self, content: Content) {
        self.content = content;
        self.refresh_geometry();
    }

    /// Replace the string of a text entity. Other content is left alone.
    pub fn set_text(&mut self, value: impl Into<String>) {
        match &mut self.content {
            Content::Text { text, .. } => {
                *text = value.into();
                self.refresh_geometry();
            }
            _ => log::debug!("entity '{}': set_text on non-text content", self.name),
        }
    }

    /// Propagate the window size to effects and children.
    pub fn set_window(&mut self, window: Vec2) {
        self.window = window;
        for effect in &mut self.effects {
            effect.set_window(window);
            effect.bind(&self.pose);
        }
        for child in &mut self.children {
            child.set_window(window);
        }
    }

    fn refresh_geometry(&mut self) {
        self.pose.size = self.content.size();
        self.pose.origin = self.pivot.origin(self.pose.size);
        self.rebind_effects();
    }

    fn rebind_effects(&mut self) {
        for effect in &mut self.effects {
            effect.bind(&self.pose);
        }
    }

    // -- Accessors --

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Started
    }

    pub fn pivot(&self) -> Pivot {
        self.pivot
    }

    pub fn flip(&self) -> Flip {
        self.flip
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Values drawn this frame.
    pub fn live(&self) -> &Visual {
        &self.pose.live
    }

    /// Resting values.
    pub fn home(&self) -> &Visual {
        &self.pose.home
    }

    pub fn color(&self) -> Color {
        self.pose.live.color
    }

    pub fn opacity(&self) -> u8 {
        self.pose.live.color.a
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Unscaled content size.
    pub fn size(&self) -> Vec2 {
        self.pose.size
    }

    pub fn window(&self) -> Vec2 {
        self.window
    }

    pub fn cyclic_effects(&self) -> bool {
        self.cyclic_effects
    }

    /// Index of the effect currently driving this entity.
    pub fn active_effect(&self) -> Option<usize> {
        self.active
    }

    pub fn effects(&self) -> &[Box<dyn Effect>] {
        &self.effects
    }

    pub fn children(&self) -> &[Entity] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Entity] {
        &mut self.children
    }

    // -- Tree --

    /// Take ownership of `child`. It is drawn after existing children.
    pub fn add_child(&mut self, mut child: Entity) -> EntityId {
        if self.window != Vec2::ZERO {
            child.set_window(self.window);
        }
        let id = child.id;
        self.children.push(child);
        id
    }

    /// Detach a direct child. Missing ids are ignored.
    pub fn remove_child(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.children.iter().position(|c| c.id == id)?;
        Some(self.children.remove(index))
    }

    /// Depth-first search by name, starting with this entity.
    pub fn find(&self, name: &str) -> Option<&Entity> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Entity> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// Depth-first search by id, starting with this entity.
    pub fn find_id(&self, id: EntityId) -> Option<&Entity> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_id(id))
    }

    pub fn find_id_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_id_mut(id))
    }

    /// This entity plus every descendant.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Entity::count).sum::<usize>()
    }

    // -- Effects --

    /// Append an effect to the sequence and bind it to this entity.
    pub fn add_effect(&mut self, mut effect: Box<dyn Effect>) {
        if self.window != Vec2::ZERO {
            effect.set_window(self.window);
        }
        effect.bind(&self.pose);
        self.effects.push(effect);
    }

    /// Replace the whole sequence. The running effect is stopped first; a
    /// started entity restarts on the new sequence.
    pub fn set_effect_sequence(&mut self, effects: Vec<Box<dyn Effect>>) {
        if let Some(index) = self.active.take() {
            self.effects[index].stop(&mut self.pose);
        }
        self.effects.clear();
        for effect in effects {
            self.add_effect(effect);
        }
        if self.status == Status::Started {
            self.start_first();
        }
    }

    /// Loop the sequence forever instead of resting on the last effect.
    pub fn set_cyclic_effects(&mut self, cyclic: bool) {
        self.cyclic_effects = cyclic;
    }

    // -- Lifecycle --

    /// Start (or restart) the effect sequence from the first effect. A later
    /// effect that is still active is stopped first.
    pub fn run(&mut self) {
        if let Some(index) = self.active {
            if index != 0 {
                self.effects[index].stop(&mut self.pose);
            }
        }
        self.status = Status::Started;
        self.start_first();
    }

    /// Run this entity and every descendant.
    pub fn run_all(&mut self) {
        self.run();
        for child in &mut self.children {
            child.run_all();
        }
    }

    /// Stop the active effect, restoring whatever it changed.
    pub fn stop(&mut self) {
        self.status = Status::Stopped;
        if let Some(index) = self.active.take() {
            self.effects[index].stop(&mut self.pose);
        }
    }

    pub fn stop_all(&mut self) {
        self.stop();
        for child in &mut self.children {
            child.stop_all();
        }
    }

    fn start_first(&mut self) {
        if self.effects.is_empty() {
            self.active = None;
            return;
        }
        self.active = Some(0);
        self.effects[0].run(&self.pose);
    }

    /// Advance by `dt` seconds. `inherited` is the parent's tint.
    ///
    /// At most one effect transition happens per call: a finished effect
    /// hands over to the next one, which runs and steps immediately. Wrapping
    /// a cyclic sequence only restarts the first effect; it steps on the
    /// following update.
    pub fn update(&mut self, dt: f32, inherited: Color) {
        if self.status != Status::Started {
            return;
        }

        if let Some(mut index) = self.active {
            let mut wrapped = false;
            if self.effects[index].is_finished() {
                if index + 1 < self.effects.len() {
                    index += 1;
                    log::debug!(
                        "entity '{}': effect {} -> {} ({})",
                        self.name,
                        index - 1,
                        index,
                        self.effects[index].name()
                    );
                    self.effects[index].run(&self.pose);
                } else if self.cyclic_effects {
                    index = 0;
                    wrapped = true;
                    log::debug!("entity '{}': effect sequence wrapped", self.name);
                    self.effects[0].run(&self.pose);
                }
            }
            self.active = Some(index);
            if !wrapped {
                self.effects[index].update(dt, &mut self.pose);
            }
        }

        self.content.update(dt);

        self.tint = self.pose.live.color.modulate(inherited);
        let tint = self.tint;
        for child in &mut self.children {
            child.update(dt, tint);
        }
    }

    // -- Drawing --

    /// Local transform: pivot offset, then scale, rotation and translation.
    pub fn local_transform(&self) -> Affine2 {
        let live = &self.pose.live;
        Affine2::from_scale_angle_translation(live.scale, live.rotation, live.position)
            * Affine2::from_translation(-self.pose.origin)
    }

    /// Current content box in parent space.
    pub fn bounds(&self) -> Bounds {
        let local = self.local_transform();
        let size = self.pose.size;
        let corners = [
            Vec2::ZERO,
            Vec2::new(size.x, 0.0),
            Vec2::new(0.0, size.y),
            size,
        ]
        .map(|c| local.transform_point2(c));
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        Bounds { min, max }
    }

    /// Emit this entity and its subtree into `buffer`, children in
    /// insertion order after their parent.
    pub fn draw(&self, buffer: &mut RenderBuffer, states: &RenderStates) {
        if !self.enabled {
            return;
        }
        let shader = self.active.and_then(|i| self.effects[i].shader());
        let states = states.compose(self.local_transform(), shader);
        push_content(buffer, &self.content, states.transform, self.pose.size, self.tint, states.shader);
        for child in &self.children {
            child.draw(buffer, &states);
        }
    }
}
