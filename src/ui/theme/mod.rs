//! Light/dark color palettes and the active theme state.
//!
//! Every color the presentation layer draws resolves through a [`Palette`],
//! so switching [`ThemeMode`] swaps the whole bundle at once.

use crossterm::style::Color;
use std::collections::BTreeMap;

mod controller;

pub use controller::ThemeController;

/// Semantic color token carried by every palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeToken {
    Background,
    Text,
    Primary,
    Secondary,
    Overlay,
}

impl ThemeToken {
    /// Stable config key for this token (used by `[theme.<mode>]` overrides).
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Text => "text",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Overlay => "overlay",
        }
    }

    pub fn all() -> &'static [ThemeToken] {
        &[
            Self::Background,
            Self::Text,
            Self::Primary,
            Self::Secondary,
            Self::Overlay,
        ]
    }

    fn from_key(key: &str) -> Option<Self> {
        let normalized = key.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|token| token.key() == normalized)
    }
}

/// RGBA color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThemeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ThemeColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Terminal color used when rendering a swatch. Alpha is dropped.
    pub fn to_terminal(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Active appearance variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Only an explicit dark preference selects the dark variant.
    pub fn from_appearance(appearance: crate::host::Appearance) -> Self {
        match appearance {
            crate::host::Appearance::Dark => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Immutable bundle of named colors for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: ThemeColor,
    pub text: ThemeColor,
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub overlay: ThemeColor,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: ThemeColor::rgb(0xff, 0xff, 0xff),
        text: ThemeColor::rgb(0x1b, 0x1b, 0x1b),
        primary: ThemeColor::rgb(0x2e, 0x7d, 0x32),
        secondary: ThemeColor::rgb(0xf9, 0xa8, 0x25),
        overlay: ThemeColor::rgba(0x00, 0x00, 0x00, 0x80),
    };

    pub const DARK: Palette = Palette {
        background: ThemeColor::rgb(0x12, 0x12, 0x12),
        text: ThemeColor::rgb(0xf5, 0xf5, 0xf5),
        primary: ThemeColor::rgb(0x81, 0xc7, 0x84),
        secondary: ThemeColor::rgb(0xff, 0xd5, 0x4f),
        overlay: ThemeColor::rgba(0x00, 0x00, 0x00, 0xb3),
    };

    /// Resolve one token.
    pub fn color(&self, token: ThemeToken) -> ThemeColor {
        match token {
            ThemeToken::Background => self.background,
            ThemeToken::Text => self.text,
            ThemeToken::Primary => self.primary,
            ThemeToken::Secondary => self.secondary,
            ThemeToken::Overlay => self.overlay,
        }
    }

    fn slot(&mut self, token: ThemeToken) -> &mut ThemeColor {
        match token {
            ThemeToken::Background => &mut self.background,
            ThemeToken::Text => &mut self.text,
            ThemeToken::Primary => &mut self.primary,
            ThemeToken::Secondary => &mut self.secondary,
            ThemeToken::Overlay => &mut self.overlay,
        }
    }

    /// Copy of this palette with `overrides` (token key -> color) applied.
    ///
    /// Unknown keys are skipped; an unparsable color rejects the whole set so
    /// a palette is never half-applied.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, String>) -> Result<Palette, String> {
        let mut palette = *self;
        for (key, value) in overrides {
            let Some(token) = ThemeToken::from_key(key) else {
                tracing::warn!(key = key.as_str(), "ignoring unknown theme token");
                continue;
            };
            *palette.slot(token) = parse_color(value)?;
        }
        Ok(palette)
    }
}

/// Light and dark palettes used by a [`ThemeController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSet {
    pub light: Palette,
    pub dark: Palette,
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self {
            light: Palette::LIGHT,
            dark: Palette::DARK,
        }
    }
}

impl PaletteSet {
    /// Built-ins with per-mode overrides from `[theme.light]` / `[theme.dark]`.
    pub fn from_overrides(
        light: &BTreeMap<String, String>,
        dark: &BTreeMap<String, String>,
    ) -> Result<Self, String> {
        Ok(Self {
            light: Palette::LIGHT
                .with_overrides(light)
                .map_err(|e| format!("theme.light: {e}"))?,
            dark: Palette::DARK
                .with_overrides(dark)
                .map_err(|e| format!("theme.dark: {e}"))?,
        })
    }

    pub fn for_mode(&self, mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => self.light,
            ThemeMode::Dark => self.dark,
        }
    }
}

/// Active mode plus its full palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub palette: Palette,
}

impl ThemeState {
    pub fn new(mode: ThemeMode, palettes: &PaletteSet) -> Self {
        Self {
            mode,
            palette: palettes.for_mode(mode),
        }
    }

    pub fn color(&self, token: ThemeToken) -> ThemeColor {
        self.palette.color(token)
    }
}

/// Parse `#rrggbb`, `#rrggbbaa`, `transparent`, or a basic color name.
pub fn parse_color(input: &str) -> Result<ThemeColor, String> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err("theme color value cannot be empty".to_string());
    }
    if let Some(hex) = normalized.strip_prefix('#') {
        if hex.len() != 6 && hex.len() != 8 {
            return Err(format!(
                "invalid hex color `{input}` (expected #RRGGBB or #RRGGBBAA)"
            ));
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| format!("invalid hex color `{input}`"))
        };
        let alpha = if hex.len() == 8 { channel(6..8)? } else { 0xff };
        return Ok(ThemeColor::rgba(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            alpha,
        ));
    }

    let color = match normalized.as_str() {
        "black" => ThemeColor::rgb(0, 0, 0),
        "white" => ThemeColor::rgb(0xff, 0xff, 0xff),
        "grey" | "gray" => ThemeColor::rgb(0x80, 0x80, 0x80),
        "red" => ThemeColor::rgb(0xff, 0, 0),
        "green" => ThemeColor::rgb(0, 0x80, 0),
        "blue" => ThemeColor::rgb(0, 0, 0xff),
        "orange" => ThemeColor::rgb(0xff, 0xa5, 0),
        "transparent" => ThemeColor::rgba(0, 0, 0, 0),
        _ => return Err(format!("unsupported color value `{input}`")),
    };
    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Appearance;

    #[test]
    fn mode_from_appearance_only_dark_is_dark() {
        assert_eq!(ThemeMode::from_appearance(Appearance::Dark), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_appearance(Appearance::Light), ThemeMode::Light);
        assert_eq!(
            ThemeMode::from_appearance(Appearance::Unspecified),
            ThemeMode::Light
        );
    }

    #[test]
    fn state_carries_full_palette_for_mode() {
        let palettes = PaletteSet::default();
        let dark = ThemeState::new(ThemeMode::Dark, &palettes);
        assert_eq!(dark.palette, Palette::DARK);
        assert_eq!(dark.color(ThemeToken::Background).to_hex(), "#121212");
        assert_eq!(dark.color(ThemeToken::Overlay).to_hex(), "#000000b3");
    }

    #[test]
    fn custom_override_applies() {
        let mut light = BTreeMap::new();
        light.insert("primary".to_string(), "#aabbcc".to_string());
        light.insert("sparkle".to_string(), "#000000".to_string());
        let palettes = PaletteSet::from_overrides(&light, &BTreeMap::new()).expect("overrides");
        assert_eq!(palettes.light.primary, ThemeColor::rgb(0xaa, 0xbb, 0xcc));
        assert_eq!(palettes.light.text, Palette::LIGHT.text);
        assert_eq!(palettes.dark, Palette::DARK);
    }

    #[test]
    fn invalid_override_rejects_palette() {
        let mut dark = BTreeMap::new();
        dark.insert("text".to_string(), "#12".to_string());
        let err = PaletteSet::from_overrides(&BTreeMap::new(), &dark).expect_err("must reject");
        assert!(err.starts_with("theme.dark:"), "got: {err}");
    }

    #[test]
    fn parse_color_supports_hex_alpha_and_names() {
        assert_eq!(
            parse_color("#010203").expect("hex"),
            ThemeColor::rgb(1, 2, 3)
        );
        assert_eq!(
            parse_color("#01020380").expect("hex alpha"),
            ThemeColor::rgba(1, 2, 3, 0x80)
        );
        assert_eq!(parse_color(" White ").expect("named"), ThemeColor::rgb(255, 255, 255));
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("chartreuse").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn terminal_color_drops_alpha() {
        assert_eq!(
            ThemeColor::rgba(1, 2, 3, 4).to_terminal(),
            Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }
}
