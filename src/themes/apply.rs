//! Applying a theme to a style scope.
//!
//! Palette variables are written as custom properties. The background is
//! cleared first and then painted with the recipe for its kind; image
//! backgrounds tile vertically at a fixed width and stay put while the page
//! scrolls.

use super::types::{BackgroundKind, BackgroundSpec, ThemeDefinition};
use crate::constants::IMAGE_BACKGROUND_SIZE;
use std::collections::BTreeMap;
use std::fmt::Write;

/// The set of style declarations a theme controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleScope {
    /// Custom properties, e.g. `--accent-color`
    pub vars: BTreeMap<String, String>,
    /// Background properties in application order
    pub background: Vec<(&'static str, String)>,
    /// Id of the theme last applied to this scope
    pub theme_id: Option<String>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Last value written for a background property.
    pub fn background_property(&self, property: &str) -> Option<&str> {
        self.background
            .iter()
            .rev()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Render the scope as a CSS rule for `selector`.
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = format!("{} {{\n", selector);
        for (name, value) in &self.vars {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        for (property, value) in &self.background {
            let _ = writeln!(css, "  {}: {};", property, value);
        }
        css.push('}');
        css
    }
}

/// Declarations painting `spec`, starting from a cleared background.
pub fn background_declarations(spec: &BackgroundSpec) -> Vec<(&'static str, String)> {
    let mut decls = vec![
        ("background", "none".to_string()),
        ("background-image", "none".to_string()),
    ];
    match spec.kind {
        BackgroundKind::Solid | BackgroundKind::Gradient => {
            decls.push(("background", spec.value.to_string()));
        }
        BackgroundKind::Image => {
            decls.push(("background-image", format!("url({})", spec.value)));
            decls.push(("background-size", IMAGE_BACKGROUND_SIZE.to_string()));
            decls.push(("background-repeat", "repeat-y".to_string()));
            decls.push(("background-position", "center top".to_string()));
            decls.push(("background-attachment", "fixed".to_string()));
        }
    }
    decls
}

/// Write the theme's palette and background into `scope`.
pub fn apply_theme(scope: &mut StyleScope, theme: &ThemeDefinition) {
    for (name, value) in theme.palette_vars {
        scope.vars.insert((*name).to_string(), (*value).to_string());
    }
    scope.background = background_declarations(&theme.background);
    scope.theme_id = Some(theme.id.to_string());
    tracing::debug!(theme = theme.id, css = %scope.to_css(":root"), "theme applied");
}
