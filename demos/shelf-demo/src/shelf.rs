use glam::Vec2;
use marquee_engine::{
    Action, AssetManifest, InputQueue, LayoutTheme, Result, StageConfig, StageContext, Theme,
};

const LAYOUT: &str = include_str!("../assets/shelf.json");
const MANIFEST: &str = include_str!("../assets/manifest.json");

/// Names of the cover entities, left to right.
const COVERS: [&str; 4] = ["cover-0", "cover-1", "cover-2", "cover-3"];

/// A row of game covers with a cursor that Left/Right move between them.
/// Everything else (entrance animations, sounds, Select/Back triggers)
/// comes from the layout.
pub struct ShelfTheme {
    layout: LayoutTheme,
    selected: usize,
}

impl ShelfTheme {
    pub fn load() -> Result<Self> {
        let manifest = AssetManifest::from_json(MANIFEST)?;
        let layout = LayoutTheme::from_json(LAYOUT, StageConfig::default())?.with_manifest(manifest);
        Ok(Self { layout, selected: 0 })
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn move_cursor(&mut self, ctx: &mut StageContext, step: isize) {
        let count = COVERS.len() as isize;
        self.selected = (self.selected as isize + step).rem_euclid(count) as usize;

        let Some(target) = ctx.scene.find(COVERS[self.selected]).map(|c| c.home().position) else {
            return;
        };
        log::debug!("cursor -> {}", COVERS[self.selected]);
        if let Some(cursor) = ctx.scene.find_mut("cursor") {
            cursor.stop();
            cursor.set_position(target);
            cursor.run();
        }
    }
}

impl Theme for ShelfTheme {
    fn config(&self) -> StageConfig {
        self.layout.config()
    }

    fn init(&mut self, ctx: &mut StageContext) {
        self.layout.init(ctx);
        self.selected = 0;
    }

    fn update(&mut self, ctx: &mut StageContext, input: &InputQueue) {
        self.layout.update(ctx, input);
        for action in ctx.controls.actions(input) {
            match action {
                Action::Left => self.move_cursor(ctx, -1),
                Action::Right => self.move_cursor(ctx, 1),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_engine::{InputEvent, SoundEvent};

    fn started() -> (ShelfTheme, StageContext) {
        let mut theme = ShelfTheme::load().unwrap();
        let mut ctx = StageContext::new(&theme.config());
        theme.init(&mut ctx);
        (theme, ctx)
    }

    fn press(theme: &mut ShelfTheme, ctx: &mut StageContext, key_code: u32) {
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code });
        theme.update(ctx, &input);
    }

    #[test]
    fn embedded_layout_builds() {
        let (_, ctx) = started();
        // root, logo, covers, four covers, cursor, caption
        assert_eq!(ctx.scene.len(), 9);
        assert!(ctx.scene.find("cursor").unwrap().is_running());
    }

    #[test]
    fn right_moves_cursor_and_wraps() {
        let (mut theme, mut ctx) = started();
        press(&mut theme, &mut ctx, 39);
        assert_eq!(theme.selected(), 1);
        assert_eq!(ctx.sounds, vec![SoundEvent(1)]);
        let cover = ctx.scene.find("cover-1").unwrap().home().position;
        assert_eq!(ctx.scene.find("cursor").unwrap().home().position, cover);

        press(&mut theme, &mut ctx, 37);
        press(&mut theme, &mut ctx, 37);
        assert_eq!(theme.selected(), 3);
    }

    #[test]
    fn cursor_tracks_cover_home() {
        let (mut theme, mut ctx) = started();
        press(&mut theme, &mut ctx, 39);
        press(&mut theme, &mut ctx, 39);
        assert_eq!(ctx.scene.find("cursor").unwrap().home().position, Vec2::new(766.0, 0.0));
    }
}
