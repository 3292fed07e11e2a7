//! The static theme catalog.

use super::types::{BackgroundKind, BackgroundSpec, ThemeDefinition};
use crate::constants::DEFAULT_THEME_ID;

/// Bumped whenever catalog entries change.
pub const CATALOG_VERSION: u32 = 1;

pub static THEMES: [ThemeDefinition; 3] = [
    ThemeDefinition {
        id: DEFAULT_THEME_ID,
        display_name: "Default Theme",
        description: "Classic banana yellow atmosphere.",
        price: 0,
        palette_vars: &[
            ("--bg-color", "#fff06c"),
            ("--text-color", "#000000"),
            ("--accent-color", "#FFD600"),
            ("--title-color", "#000000"),
        ],
        background: BackgroundSpec {
            kind: BackgroundKind::Solid,
            value: "#fff06c",
        },
    },
    ThemeDefinition {
        id: "dark",
        display_name: "Dark Ocean",
        description: "Deep ocean blue theme.",
        price: 50,
        palette_vars: &[
            ("--bg-color", "#00000000"),
            ("--text-color", "#000000"),
            ("--accent-color", "#00eaff"),
            ("--title-color", "#ffffff"),
        ],
        background: BackgroundSpec {
            kind: BackgroundKind::Gradient,
            value: "linear-gradient(135deg, #00253a, #00eaff)",
        },
    },
    ThemeDefinition {
        id: "royal",
        display_name: "Outer galaxy",
        description: "Outer space night background.",
        price: 100,
        palette_vars: &[
            ("--bg-color", "#fff7d1"),
            ("--text-color", "#444444"),
            ("--accent-color", "#e4b400"),
            ("--title-color", "#FFFFFF"),
        ],
        background: BackgroundSpec {
            kind: BackgroundKind::Image,
            value: "/src/styles/space-blk.jpg",
        },
    },
];

pub fn all_themes() -> &'static [ThemeDefinition] {
    &THEMES
}

pub fn find_theme(id: &str) -> Option<&'static ThemeDefinition> {
    THEMES.iter().find(|t| t.id == id)
}

pub fn default_theme() -> &'static ThemeDefinition {
    &THEMES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_theme_is_free_and_first() {
        let theme = default_theme();
        assert_eq!(theme.id, "default");
        assert!(theme.is_free());
    }

    #[test]
    fn test_only_default_is_free() {
        let free: Vec<_> = all_themes().iter().filter(|t| t.is_free()).collect();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, DEFAULT_THEME_ID);
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = all_themes().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), all_themes().len());
    }

    #[test]
    fn test_every_theme_sets_core_palette() {
        for theme in all_themes() {
            for var in ["--bg-color", "--text-color", "--accent-color", "--title-color"] {
                assert!(
                    theme.palette_var(var).is_some(),
                    "{} missing {}",
                    theme.id,
                    var
                );
            }
        }
    }

    #[test]
    fn test_find_theme() {
        assert_eq!(find_theme("dark").map(|t| t.price), Some(50));
        assert_eq!(find_theme("royal").map(|t| t.price), Some(100));
        assert!(find_theme("neon").is_none());
    }
}
