use thiserror::Error;

/// Errors raised while loading configuration, manifests and layouts.
///
/// The animation core never returns these: effects and entities treat
/// missing pieces as "nothing to do".
#[derive(Error, Debug)]
pub enum EngineError {
    /// A JSON document failed to parse.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A layout referred to a texture the manifest does not declare.
    #[error("unknown texture '{0}'")]
    UnknownTexture(String),

    /// A layout referred to a font the manifest does not declare.
    #[error("unknown font '{0}'")]
    UnknownFont(String),

    /// A layout referred to a sound the manifest does not declare.
    #[error("unknown sound '{0}'")]
    UnknownSound(String),

    /// Two resources of the same kind share a name.
    #[error("duplicate {kind} '{name}'")]
    DuplicateResource {
        /// Resource kind (texture, font, sound, shader).
        kind: &'static str,
        name: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
