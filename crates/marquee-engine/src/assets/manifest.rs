use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Asset manifest describing every texture, font, sound and shader a theme
/// may reference. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
    #[serde(default)]
    pub fonts: Vec<FontDescriptor>,
    /// Named sounds: name → file + event id.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
    #[serde(default)]
    pub shaders: Vec<ShaderDescriptor>,
}

/// A single image the renderer uploads as one texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub name: String,
    /// Relative path to the image file (e.g., "logos/arcade.png").
    pub path: String,
    /// Pixel width, used as the entity's content size.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
}

/// A bitmap font. Metrics are fractions of the character size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub name: String,
    pub path: String,
    /// Line height as a multiple of the character size (default: 1.0).
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Horizontal advance per glyph as a multiple of the character size
    /// (e.g., 0.55 for tight, 1.0 for monospace).
    #[serde(default = "default_advance")]
    pub advance: f32,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID the host plays this sound for. Assigned
    /// automatically when omitted.
    #[serde(default)]
    pub event_id: Option<u32>,
}

/// An opaque shader program, referenced by effects through its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderDescriptor {
    pub name: String,
    pub path: String,
}

fn default_line_height() -> f32 {
    1.0
}

fn default_advance() -> f32 {
    0.55
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_sounds() {
        let json = r#"{
            "sounds": {
                "click": { "path": "click.mp3", "event_id": 1 },
                "bg_music": { "path": "music.ogg" }
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.sounds.len(), 2);

        let click = &manifest.sounds["click"];
        assert_eq!(click.path, "click.mp3");
        assert_eq!(click.event_id, Some(1));

        let music = &manifest.sounds["bg_music"];
        assert_eq!(music.path, "music.ogg");
        assert_eq!(music.event_id, None);
    }

    #[test]
    fn font_metrics_default() {
        let json = r#"{
            "textures": [
                { "name": "logo", "path": "logo.png", "width": 320, "height": 120 }
            ],
            "fonts": [
                { "name": "title", "path": "title.png" },
                { "name": "mono", "path": "mono.png", "advance": 1.0, "line_height": 1.2 }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures[0].width, 320);
        assert_eq!(manifest.fonts[0].advance, 0.55);
        assert_eq!(manifest.fonts[0].line_height, 1.0);
        assert_eq!(manifest.fonts[1].advance, 1.0);
        assert!(manifest.shaders.is_empty());
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        assert!(AssetManifest::from_json("{ \"textures\": 3 }").is_err());
    }
}
