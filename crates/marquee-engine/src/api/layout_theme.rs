use crate::api::theme::{StageConfig, StageContext, Theme};
use crate::api::types::StageEvent;
use crate::assets::layout::LayoutDef;
use crate::assets::manifest::AssetManifest;
use crate::error::Result;
use crate::input::queue::InputQueue;

/// `StageEvent::kind` for "an action fired"; `a` carries the action index.
pub const EVENT_ACTION: f32 = 1.0;

/// A theme driven entirely by data: the scene comes from a [`LayoutDef`],
/// and each mapped action re-runs the entities listed under its trigger,
/// plays its sound and reports a [`StageEvent`].
pub struct LayoutTheme {
    layout: LayoutDef,
    manifest: Option<AssetManifest>,
    config: StageConfig,
}

impl LayoutTheme {
    pub fn new(layout: LayoutDef, config: StageConfig) -> Self {
        Self {
            layout,
            manifest: None,
            config,
        }
    }

    /// Parse the layout from JSON.
    pub fn from_json(layout_json: &str, config: StageConfig) -> Result<Self> {
        Ok(Self::new(LayoutDef::from_json(layout_json)?, config))
    }

    /// Assets to register before the layout is built.
    pub fn with_manifest(mut self, manifest: AssetManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn layout(&self) -> &LayoutDef {
        &self.layout
    }

    fn build(&self, ctx: &mut StageContext) -> Result<()> {
        if let Some(manifest) = &self.manifest {
            ctx.load_manifest(manifest)?;
        }
        let StageContext { resources, factory, ids, .. } = ctx;
        let root = self.layout.instantiate(resources, factory, &mut || ids.next_id())?;
        ctx.scene.set_root(root);
        ctx.scene.start();
        Ok(())
    }
}

impl Theme for LayoutTheme {
    fn config(&self) -> StageConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut StageContext) {
        if let Err(err) = self.build(ctx) {
            log::warn!("layout '{}' failed to load: {}", self.layout.name, err);
        }
    }

    fn update(&mut self, ctx: &mut StageContext, input: &InputQueue) {
        for action in ctx.controls.actions(input) {
            for name in self.layout.trigger(action) {
                match ctx.scene.find_mut(name) {
                    Some(entity) => entity.run(),
                    None => log::debug!("trigger {:?}: no entity named '{}'", action, name),
                }
            }
            if let Some(sound) = self.layout.sounds.get(&action) {
                match ctx.resources.sound(sound) {
                    Ok(event) => ctx.emit_sound(event),
                    Err(err) => log::warn!("{}", err),
                }
            }
            ctx.emit_event(StageEvent {
                kind: EVENT_ACTION,
                a: action as u32 as f32,
                b: 0.0,
                c: 0.0,
            });
        }
    }
}
