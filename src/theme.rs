//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use hanafuda_pon::Kind;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// 16-colour palette particles are drawn with (indices from the engine).
const PARTICLE_PALETTE: [&str; 16] = [
    "#000000", "#2B335F", "#7E2072", "#19959C", "#8B4852", "#395C98", "#A9C1FF", "#EEEEEE",
    "#D4186C", "#D38441", "#E9C35B", "#70C6A9", "#7696DE", "#A3A3A3", "#FF9798", "#EDC7B0",
];

/// One Dark palette and UI colours loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Card colours by kind: bright, red ribbon, blue ribbon, ribbon, seed, chaff.
    pub kinds: [Color; 6],
    /// Particle colours, indexed by palette slot 0..16.
    pub particles: [Color; 16],
    /// Board background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, labels).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Selected card outline.
    pub selected: Color,
    /// Secondary text (hints, empty cells).
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

/// Hex constant that is known to parse; falls back to gray instead of panicking.
fn hex(s: &str) -> Color {
    parse_hex(s).unwrap_or(Color::Gray)
}

impl Theme {
    /// One Dark defaults.
    pub fn onedark_default() -> Self {
        Self {
            kinds: [
                hex("#E5C07B"), // bright / yellow
                hex("#E06C75"), // red ribbon
                hex("#61AFEF"), // blue ribbon
                hex("#C678DD"), // ribbon / magenta
                hex("#98C379"), // seed / green
                hex("#56B6C2"), // chaff / cyan
            ],
            particles: PARTICLE_PALETTE.map(hex),
            bg: hex("#31353F"),
            div_line: hex("#3F444F"),
            main_fg: hex("#ABB2BF"),
            title: hex("#E5C07B"),
            selected: hex("#98C379"),
            inactive_fg: hex("#5C6370"),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to One Dark defaults if path is None or the file is missing.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: crate::Palette) -> Self {
        let mut t = Self::onedark_default();
        t.apply_palette(palette);
        t
    }

    /// Override kind colours for high-contrast or colorblind play.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.kinds = [
                    hex("#FFFF00"),
                    hex("#FF0000"),
                    hex("#0088FF"),
                    hex("#FF00FF"),
                    hex("#00FF00"),
                    hex("#00FFFF"),
                ];
                self.selected = hex("#FFFFFF");
            }
            crate::Palette::Colorblind => {
                self.kinds = [
                    hex("#BBBB00"), // yellow
                    hex("#EE7733"), // orange
                    hex("#0077BB"), // blue
                    hex("#EE3377"), // magenta
                    hex("#009988"), // teal
                    hex("#BBBBBB"), // gray
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .and_then(|v| parse_hex(v.trim_matches('"').trim_matches('\'').trim()).ok())
        };
        let d = Self::onedark_default();
        Self {
            kinds: [
                get("title").or_else(|| get("cpu_mid")).unwrap_or(d.kinds[0]),
                get("cpu_end").or_else(|| get("temp_end")).unwrap_or(d.kinds[1]),
                get("cpu_box").unwrap_or(d.kinds[2]),
                get("net_box").unwrap_or(d.kinds[3]),
                get("mem_box").or_else(|| get("cpu_start")).unwrap_or(d.kinds[4]),
                get("hi_fg").or_else(|| get("proc_misc")).unwrap_or(d.kinds[5]),
            ],
            particles: d.particles,
            bg: get("meter_bg").unwrap_or(d.bg),
            div_line: get("div_line").unwrap_or(d.div_line),
            main_fg: get("main_fg").unwrap_or(d.main_fg),
            title: get("title").unwrap_or(d.title),
            selected: get("selected_bg").or_else(|| get("mem_box")).unwrap_or(d.selected),
            inactive_fg: get("inactive_fg").unwrap_or(d.inactive_fg),
        }
    }

    #[inline]
    pub fn kind_color(&self, kind: Kind) -> Color {
        self.kinds[(kind.color_index() as usize) % 6]
    }

    #[inline]
    pub fn particle_color(&self, index: u8) -> Color {
        self.particles[(index as usize) % 16]
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
    let channel = |part: &str| {
        u8::from_str_radix(part, 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))
    };
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(ThemeError::InvalidHex(s.to_string())),
    };
    Ok(Color::Rgb(r, g, b))
}
