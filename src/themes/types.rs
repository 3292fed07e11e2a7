//! Theme catalog data structures.

use serde::{Deserialize, Serialize};

/// How a theme paints the page background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundSpec {
    pub kind: BackgroundKind,
    /// Color, gradient expression or image URL depending on `kind`
    pub value: &'static str,
}

/// A purchasable cosmetic theme. Read-only catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub price: u64,
    /// Style variable name -> color value
    pub palette_vars: &'static [(&'static str, &'static str)],
    pub background: BackgroundSpec,
}

impl ThemeDefinition {
    pub fn is_free(&self) -> bool {
        self.price == 0
    }

    pub fn palette_var(&self, name: &str) -> Option<&'static str> {
        self.palette_vars
            .iter()
            .find(|(var, _)| *var == name)
            .map(|(_, value)| *value)
    }
}
