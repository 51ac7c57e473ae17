//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use ratatui::style::Color;
use shricktris::{BrickKind, ColorKey};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Brick colours plus UI colours loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Brick colours indexed by colour key - 1 (O, I, L, J, T, S, Z).
    pub bricks: [Color; 7],
    /// Empty grid cells, and the stuck figure after game over.
    pub grid: Color,
    /// Playfield background.
    pub bg: Color,
    /// Border lines.
    pub div_line: Color,
    /// Text (score, speed).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// Theme keys for each brick, in colour-key order.
const BRICK_KEYS: [&str; 7] = [
    "brick_o", "brick_i", "brick_l", "brick_j", "brick_t", "brick_s", "brick_z",
];

const CLASSIC_BRICKS: [Color; 7] = [
    Color::Rgb(240, 240, 20), // O yellow
    Color::Rgb(20, 240, 240), // I cyan
    Color::Rgb(240, 140, 0),  // L orange
    Color::Rgb(0, 0, 240),    // J blue
    Color::Rgb(120, 0, 120),  // T purple
    Color::Rgb(0, 240, 0),    // S green
    Color::Rgb(240, 0, 0),    // Z red
];

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Classic shricktris colours on a dark background.
    pub fn classic() -> Self {
        Self {
            bricks: CLASSIC_BRICKS,
            grid: Color::Rgb(128, 128, 128),
            bg: Color::Rgb(0x1E, 0x1E, 0x1E),
            div_line: Color::Rgb(0x5C, 0x63, 0x70),
            main_fg: Color::Rgb(0xE0, 0xE0, 0xE0),
            title: Color::Rgb(20, 240, 240),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to the classic colours if path is None or the file is missing.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map)?;
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: crate::Palette) -> Self {
        let mut t = Self::classic();
        t.apply_palette(palette);
        t
    }

    /// Override brick colours for high-contrast or colorblind.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.bricks = [
                    Color::Rgb(0xFF, 0xFF, 0x00),
                    Color::Rgb(0x00, 0xFF, 0xFF),
                    Color::Rgb(0xFF, 0x88, 0x00),
                    Color::Rgb(0x00, 0x88, 0xFF),
                    Color::Rgb(0xFF, 0x00, 0xFF),
                    Color::Rgb(0x00, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0x00, 0x00),
                ];
            }
            crate::Palette::Colorblind => {
                // Okabe-Ito
                self.bricks = [
                    Color::Rgb(0xF0, 0xE4, 0x42),
                    Color::Rgb(0x56, 0xB4, 0xE9),
                    Color::Rgb(0xE6, 0x9F, 0x00),
                    Color::Rgb(0x00, 0x72, 0xB2),
                    Color::Rgb(0xCC, 0x79, 0xA7),
                    Color::Rgb(0x00, 0x9E, 0x73),
                    Color::Rgb(0xD5, 0x5E, 0x00),
                ];
            }
        }
    }

    /// Missing keys keep the classic colour; a present key with a bad value is an error.
    fn from_map(map: &HashMap<String, String>) -> Result<Self, ThemeError> {
        let mut theme = Self::classic();
        let get = |key: &str| map.get(key).map(|v| parse_hex(v)).transpose();
        for (slot, key) in theme.bricks.iter_mut().zip(BRICK_KEYS) {
            if let Some(c) = get(key)? {
                *slot = c;
            }
        }
        for (slot, key) in [
            (&mut theme.grid, "grid"),
            (&mut theme.bg, "main_bg"),
            (&mut theme.div_line, "div_line"),
            (&mut theme.main_fg, "main_fg"),
            (&mut theme.title, "title"),
        ] {
            if let Some(c) = get(key)? {
                *slot = c;
            }
        }
        Ok(theme)
    }

    /// Colour for a frozen cell or figure; unknown keys fall back to the grid colour.
    #[inline]
    pub fn brick_color(&self, key: ColorKey) -> Color {
        (key as usize)
            .checked_sub(1)
            .and_then(|i| self.bricks.get(i))
            .copied()
            .unwrap_or(self.grid)
    }

    #[inline]
    pub fn kind_color(&self, kind: BrickKind) -> Color {
        self.brick_color(kind.color_key())
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("theme[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(eq) = rest.find('=') {
                    let value = rest[eq + 1..]
                        .trim()
                        .trim_matches('"')
                        .trim_matches('\'')
                        .to_string();
                    if !value.is_empty() {
                        map.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(invalid)
    };
    let (r, g, b) = match s.len() {
        6 => (channel(0..2)?, channel(2..4)?, channel(4..6)?),
        3 => (channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#GG0000").is_err());
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(r##"theme[brick_t]="#31353F""##);
        assert_eq!(map.get("brick_t"), Some(&"#31353F".to_string()));
    }

    #[test]
    fn test_theme_file_overrides_some_keys() {
        let map = parse_theme_file(
            "# comment\ntheme[brick_i]=\"#000001\"\ntheme[grid]='#222'\ntheme[unknown]=\"#fff\"\n",
        );
        let theme = Theme::from_map(&map).unwrap();
        assert_eq!(theme.kind_color(BrickKind::I), Color::Rgb(0, 0, 1));
        assert_eq!(theme.grid, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(theme.kind_color(BrickKind::O), CLASSIC_BRICKS[0]);
    }

    #[test]
    fn test_bad_value_in_theme_file_is_an_error() {
        let map = parse_theme_file("theme[brick_o]=\"yellow\"");
        assert!(matches!(Theme::from_map(&map), Err(ThemeError::InvalidHex(_))));
    }

    #[test]
    fn test_brick_color_by_key() {
        let theme = Theme::classic();
        assert_eq!(theme.brick_color(0), theme.grid);
        assert_eq!(theme.brick_color(7), CLASSIC_BRICKS[6]);
        assert_eq!(theme.brick_color(8), theme.grid);
    }
}
