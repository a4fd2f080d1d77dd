pub mod layout_theme;
pub mod theme;
pub mod types;
