//! Static color palettes
//!
//! Every level names one of these; the renderer never invents colors.

use serde::{Deserialize, Serialize};

/// Convert `0xRRGGBB` to an opaque RGBA color
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Palette identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeId {
    #[default]
    Default,
    Tax,
    Geo,
}

impl ThemeId {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(ThemeId::Default),
            "tax" => Some(ThemeId::Tax),
            "geo" => Some(ThemeId::Geo),
            _ => None,
        }
    }
}

/// A complete palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: [f32; 4],
    pub ground: [f32; 4],
    pub ground_line: [f32; 4],
    pub player: [f32; 4],
    pub player_outline: [f32; 4],
    pub spike: [f32; 4],
    pub block: [f32; 4],
    pub block_outline: [f32; 4],
    pub platform: [f32; 4],
    pub coin: [f32; 4],
    pub shield: [f32; 4],
    pub magnet: [f32; 4],
    pub slow_motion: [f32; 4],
    pub double_score: [f32; 4],
    pub button: [f32; 4],
    pub button_outline: [f32; 4],
}

const DEFAULT: Theme = Theme {
    background: rgb(0x0f0f1e),
    ground: rgb(0x1c1c3a),
    ground_line: rgb(0x00ffcc),
    player: rgb(0xffd400),
    player_outline: rgb(0x000000),
    spike: rgb(0xff3860),
    block: rgb(0x3a3a6e),
    block_outline: rgb(0x8080ff),
    platform: rgb(0x00b894),
    coin: rgb(0xffe066),
    shield: rgb(0x4dd2ff),
    magnet: rgb(0xff6bd6),
    slow_motion: rgb(0x9b8cff),
    double_score: rgb(0x7dff6b),
    button: rgb(0x00ff00),
    button_outline: rgb(0xffffff),
};

const TAX: Theme = Theme {
    background: rgb(0x1a1a1a),
    ground: rgb(0x2b2b2b),
    ground_line: rgb(0x33cc33),
    player: rgb(0x33cc33),
    player_outline: rgb(0x0a0a0a),
    spike: rgb(0xe04040),
    block: rgb(0x444444),
    block_outline: rgb(0x999999),
    platform: rgb(0x7a7a7a),
    coin: rgb(0xd4af37),
    shield: rgb(0x66ccff),
    magnet: rgb(0xcc66ff),
    slow_motion: rgb(0x6699ff),
    double_score: rgb(0x99ff66),
    button: rgb(0x33cc33),
    button_outline: rgb(0xeeeeee),
};

const GEO: Theme = Theme {
    background: rgb(0x0a0a2e),
    ground: rgb(0x141450),
    ground_line: rgb(0x00d0ff),
    player: rgb(0x00ff99),
    player_outline: rgb(0x001a10),
    spike: rgb(0xff4fa3),
    block: rgb(0x23236e),
    block_outline: rgb(0x6ad5ff),
    platform: rgb(0x4f7dff),
    coin: rgb(0xfff27a),
    shield: rgb(0x7af0ff),
    magnet: rgb(0xff7af0),
    slow_motion: rgb(0xb28cff),
    double_score: rgb(0x9dff7a),
    button: rgb(0x00ff00),
    button_outline: rgb(0xffffff),
};

impl Theme {
    pub fn get(id: ThemeId) -> &'static Theme {
        match id {
            ThemeId::Default => &DEFAULT,
            ThemeId::Tax => &TAX,
            ThemeId::Geo => &GEO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgb(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let c = rgb(0x0f0f1e);
        assert!((c[0] - 15.0 / 255.0).abs() < 1e-6);
        assert!((c[2] - 30.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_theme_names_parse() {
        assert_eq!(ThemeId::from_str("default"), Some(ThemeId::Default));
        assert_eq!(ThemeId::from_str("tax"), Some(ThemeId::Tax));
        assert_eq!(ThemeId::from_str("GEO"), Some(ThemeId::Geo));
        assert_eq!(ThemeId::from_str("neon"), None);
    }

    #[test]
    fn test_backgrounds_differ() {
        let a = Theme::get(ThemeId::Default).background;
        let b = Theme::get(ThemeId::Tax).background;
        let c = Theme::get(ThemeId::Geo).background;
        assert_ne!(a, b);
        assert_ne!(b, c);
    }
}
