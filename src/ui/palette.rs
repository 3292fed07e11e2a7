//! Terminal colors derived from the applied theme.

use banamatix::themes::StyleScope;
use ratatui::style::Color;

/// Colors the scenes draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub title: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Reset,
            text: Color::White,
            accent: Color::Yellow,
            title: Color::White,
        }
    }
}

impl Palette {
    /// Read the palette out of a style scope. Anything unparseable keeps the
    /// terminal default.
    pub fn from_scope(scope: &StyleScope) -> Self {
        let fallback = Self::default();
        let background = scope
            .background_property("background")
            .and_then(first_hex_color)
            .or_else(|| scope.var("--bg-color").and_then(hex_color))
            .unwrap_or(fallback.background);
        Self {
            background,
            text: scope.var("--text-color").and_then(hex_color).unwrap_or(fallback.text),
            accent: scope
                .var("--accent-color")
                .and_then(hex_color)
                .unwrap_or(fallback.accent),
            title: scope
                .var("--title-color")
                .and_then(hex_color)
                .unwrap_or(fallback.title),
        }
    }

    /// Text color readable on `background`. Dark text on a dark background
    /// (e.g. the ocean gradient) is swapped for the title color.
    pub fn readable_text(&self) -> Color {
        match (luminance(self.background), luminance(self.text)) {
            (Some(bg), Some(fg)) if bg < 0.35 && fg < 0.35 => self.title,
            _ => self.text,
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. A fully transparent color yields `None`.
pub fn hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut chars = hex.chars();
            let mut next = || {
                let c = chars.next()?;
                channel(&format!("{c}{c}"))
            };
            Some(Color::Rgb(next()?, next()?, next()?))
        }
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        8 => {
            if channel(&hex[6..8])? == 0 {
                return None;
            }
            Some(Color::Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            ))
        }
        _ => None,
    }
}

/// First hex color inside a CSS value such as a gradient.
fn first_hex_color(value: &str) -> Option<Color> {
    value
        .split(|c: char| c == ',' || c == '(' || c == ')' || c.is_whitespace())
        .find(|token| token.starts_with('#'))
        .and_then(hex_color)
}

fn luminance(color: Color) -> Option<f32> {
    match color {
        Color::Rgb(r, g, b) => {
            Some((0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)) / 255.0)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banamatix::themes::{apply_theme, find_theme};

    fn palette_for(id: &str) -> Palette {
        let mut scope = StyleScope::new();
        apply_theme(&mut scope, find_theme(id).unwrap());
        Palette::from_scope(&scope)
    }

    #[test]
    fn test_hex_color_forms() {
        assert_eq!(hex_color("#fff06c"), Some(Color::Rgb(0xff, 0xf0, 0x6c)));
        assert_eq!(hex_color("#FFF"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(hex_color("#00000000"), None);
        assert_eq!(hex_color("fff06c"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_default_theme_is_banana_yellow() {
        let palette = palette_for("default");
        assert_eq!(palette.background, Color::Rgb(0xff, 0xf0, 0x6c));
        assert_eq!(palette.readable_text(), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_gradient_uses_first_stop() {
        let palette = palette_for("dark");
        assert_eq!(palette.background, Color::Rgb(0x00, 0x25, 0x3a));
        assert_eq!(palette.readable_text(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_image_theme_falls_back_to_bg_var() {
        let palette = palette_for("royal");
        assert_eq!(palette.background, Color::Rgb(0xff, 0xf7, 0xd1));
    }
}
