use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

use glam::Vec2;

use crate::api::types::{ShaderId, SoundEvent};
use crate::assets::manifest::AssetManifest;
use crate::error::{EngineError, Result};

/// A texture known to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureInfo {
    /// Index the renderer uses to pick the texture.
    pub id: u32,
    pub name: String,
    pub path: String,
    /// Pixel size.
    pub size: Vec2,
}

/// A bitmap font known to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub id: u32,
    pub name: String,
    pub path: String,
    /// Line height as a multiple of the character size.
    pub line_height: f32,
    /// Glyph advance as a multiple of the character size.
    pub advance: f32,
}

impl FontInfo {
    /// Unscaled box of `text` drawn at `char_size` pixels per character.
    pub fn measure(&self, text: &str, char_size: f32) -> Vec2 {
        let mut widest = 0usize;
        let mut lines = 0usize;
        for line in text.lines() {
            widest = widest.max(line.chars().count());
            lines += 1;
        }
        if lines == 0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            widest as f32 * self.advance * char_size,
            lines as f32 * self.line_height * char_size,
        )
    }
}

/// Shared reference to a registered texture. Entities hold these; the
/// registry drops entries nobody holds any more on [`ResourceRegistry::prune`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextureHandle(Rc<TextureInfo>);

/// Shared reference to a registered font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle(Rc<FontInfo>);

impl Deref for TextureHandle {
    type Target = TextureInfo;

    fn deref(&self) -> &TextureInfo {
        &self.0
    }
}

impl Deref for FontHandle {
    type Target = FontInfo;

    fn deref(&self) -> &FontInfo {
        &self.0
    }
}

impl TextureHandle {
    /// Build a handle outside any registry (tests, procedurally made art).
    pub fn detached(id: u32, name: impl Into<String>, size: Vec2) -> Self {
        Self(Rc::new(TextureInfo {
            id,
            name: name.into(),
            path: String::new(),
            size,
        }))
    }
}

impl FontHandle {
    pub fn detached(id: u32, name: impl Into<String>, line_height: f32, advance: f32) -> Self {
        Self(Rc::new(FontInfo {
            id,
            name: name.into(),
            path: String::new(),
            line_height,
            advance,
        }))
    }
}

/// Textures, fonts, sounds and shaders available to one stage.
///
/// Constructed explicitly from a manifest and passed to whatever builds
/// entities; there is no process-wide instance.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    textures: HashMap<String, TextureHandle>,
    fonts: HashMap<String, FontHandle>,
    sounds: HashMap<String, SoundEvent>,
    shaders: HashMap<String, ShaderId>,
    next_texture: u32,
    next_font: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self> {
        let mut registry = Self::new();

        for desc in &manifest.textures {
            let size = Vec2::new(desc.width as f32, desc.height as f32);
            registry.add_texture(&desc.name, &desc.path, size)?;
        }
        for desc in &manifest.fonts {
            registry.add_font(&desc.name, &desc.path, desc.line_height, desc.advance)?;
        }
        for (index, desc) in manifest.shaders.iter().enumerate() {
            if registry.shaders.insert(desc.name.clone(), ShaderId(index as u32)).is_some() {
                return Err(EngineError::DuplicateResource {
                    kind: "shader",
                    name: desc.name.clone(),
                });
            }
        }

        // Sounds without an explicit id get one after the highest explicit id,
        // in name order so the assignment is stable across runs.
        let mut next_sound = manifest
            .sounds
            .values()
            .filter_map(|s| s.event_id)
            .max()
            .map_or(1, |id| id + 1);
        let mut names: Vec<&String> = manifest.sounds.keys().collect();
        names.sort();
        for name in names {
            let id = match manifest.sounds[name].event_id {
                Some(id) => id,
                None => {
                    next_sound += 1;
                    next_sound - 1
                }
            };
            registry.sounds.insert(name.clone(), SoundEvent(id));
        }

        log::debug!(
            "registry: {} textures, {} fonts, {} sounds, {} shaders",
            registry.textures.len(),
            registry.fonts.len(),
            registry.sounds.len(),
            registry.shaders.len()
        );
        Ok(registry)
    }

    /// Register a texture under `name`.
    pub fn add_texture(&mut self, name: &str, path: &str, size: Vec2) -> Result<TextureHandle> {
        if self.textures.contains_key(name) {
            return Err(EngineError::DuplicateResource {
                kind: "texture",
                name: name.to_string(),
            });
        }
        let handle = TextureHandle(Rc::new(TextureInfo {
            id: self.next_texture,
            name: name.to_string(),
            path: path.to_string(),
            size,
        }));
        self.next_texture += 1;
        self.textures.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    /// Register a font under `name`.
    pub fn add_font(&mut self, name: &str, path: &str, line_height: f32, advance: f32) -> Result<FontHandle> {
        if self.fonts.contains_key(name) {
            return Err(EngineError::DuplicateResource {
                kind: "font",
                name: name.to_string(),
            });
        }
        let handle = FontHandle(Rc::new(FontInfo {
            id: self.next_font,
            name: name.to_string(),
            path: path.to_string(),
            line_height,
            advance,
        }));
        self.next_font += 1;
        self.fonts.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    pub fn texture(&self, name: &str) -> Result<TextureHandle> {
        self.textures
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownTexture(name.to_string()))
    }

    pub fn font(&self, name: &str) -> Result<FontHandle> {
        self.fonts
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownFont(name.to_string()))
    }

    pub fn sound(&self, name: &str) -> Result<SoundEvent> {
        self.sounds
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::UnknownSound(name.to_string()))
    }

    /// Look up a shader. A missing shader means "draw without one".
    pub fn shader(&self, name: &str) -> Option<ShaderId> {
        let id = self.shaders.get(name).copied();
        if id.is_none() {
            log::warn!("shader '{}' is not registered, drawing without it", name);
        }
        id
    }

    /// Drop textures and fonts that no entity references. Returns how many
    /// entries were released.
    pub fn prune(&mut self) -> usize {
        let before = self.textures.len() + self.fonts.len();
        self.textures.retain(|_, handle| Rc::strong_count(&handle.0) > 1);
        self.fonts.retain(|_, handle| Rc::strong_count(&handle.0) > 1);
        let released = before - self.textures.len() - self.fonts.len();
        if released > 0 {
            log::debug!("registry: released {} unused resources", released);
        }
        released
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }
}
