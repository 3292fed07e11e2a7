//! Cosmetic themes: catalog, definitions and the style recipe.

pub mod apply;
pub mod data;
pub mod types;

pub use apply::{apply_theme, background_declarations, StyleScope};
pub use data::{all_themes, default_theme, find_theme, CATALOG_VERSION, THEMES};
pub use types::{BackgroundKind, BackgroundSpec, ThemeDefinition};
