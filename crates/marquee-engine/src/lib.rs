pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::theme::{Theme, StageConfig, StageContext, RenderContext, IdAllocator};
pub use api::layout_theme::{LayoutTheme, EVENT_ACTION};
pub use api::types::{Color, EntityId, ShaderId, SoundEvent, StageEvent};
pub use components::content::Content;
pub use components::entity::{Bounds, Entity, Status};
pub use components::visual::{Attr, Flip, Pivot, Pose, Visual};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::instance::{InstanceKind, RenderBuffer, RenderInstance, TextRun};
pub use input::controls::{Action, Binding, ControlMap};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::layout::{EffectDef, EntityDef, KindDef, LayoutDef};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{FontHandle, ResourceRegistry, TextureHandle};
pub use bridge::protocol::ProtocolLayout;
pub use error::{EngineError, Result};
pub use systems::effects::{Effect, EffectClock, EffectFactory, EffectType, Edge};
pub use systems::render::RenderStates;

// Extensions: easing and tweening
pub use extensions::{ease, lerp, EaseDirection, Easing, EasingFamily, Tween};
