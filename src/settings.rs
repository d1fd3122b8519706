//! Game settings and preferences
//!
//! Built from defaults, a JSON blob, or the page's URL query string.
//! Settings live for the page session only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::ThemeId;

/// Why a settings source could not be applied
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown quality preset `{0}`")]
    UnknownQuality(String),
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles drawn for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 256,
        }
    }

    /// Segments used for coins and rings
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 24,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Screen shake on crashes
    pub screen_shake: bool,
    /// Particle effects (bursts on coins, power-ups, crashes)
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,

    // === Run ===
    /// Force a palette instead of the level's own
    pub theme: Option<ThemeId>,
    /// Fixed run seed (random when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            // Visual effects - all on by default
            screen_shake: true,
            particles: true,

            // HUD
            show_fps: false,

            // Audio
            sfx_volume: 0.8,
            mute_on_blur: true,

            // Accessibility
            reduced_motion: false,

            theme: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset disables particles for performance
        if preset == QualityPreset::Low {
            self.particles = false;
        }
    }

    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Apply `key=value` pairs from a URL query string (`?seed=42&theme=geo`)
    ///
    /// Unknown keys are ignored so the page can carry its own parameters.
    pub fn apply_query(&mut self, query: &str) -> Result<(), SettingsError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => self.seed = Some(parse_value(key, value)?),
                "quality" => {
                    let preset = QualityPreset::from_str(value)
                        .ok_or_else(|| SettingsError::UnknownQuality(value.to_string()))?;
                    self.apply_preset(preset);
                }
                "theme" => {
                    let theme = ThemeId::from_str(value)
                        .ok_or_else(|| SettingsError::UnknownTheme(value.to_string()))?;
                    self.theme = Some(theme);
                }
                "fps" => self.show_fps = parse_value(key, value)?,
                "shake" => self.screen_shake = parse_value(key, value)?,
                "particles" => self.particles = parse_value(key, value)?,
                "reduced_motion" => self.reduced_motion = parse_value(key, value)?,
                "volume" => {
                    let volume: f32 = parse_value(key, value)?;
                    self.sfx_volume = volume.clamp(0.0, 1.0);
                }
                _ => log::debug!("Ignoring query parameter `{key}`"),
            }
        }
        Ok(())
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.effective_screen_shake());
        assert_eq!(settings.max_particles(), 128);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_low_preset_disables_particles() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion_overrides_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"seed": 42, "theme": "Geo"}"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.theme, Some(ThemeId::Geo));
        assert!(settings.particles);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            show_fps: true,
            seed: Some(7),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_query() {
        let mut settings = Settings::default();
        settings
            .apply_query("?seed=99&theme=tax&quality=high&fps=true&volume=3&utm=x")
            .unwrap();
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.theme, Some(ThemeId::Tax));
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.show_fps);
        assert_eq!(settings.sfx_volume, 1.0);
    }

    #[test]
    fn test_query_errors() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.apply_query("seed=abc"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            settings.apply_query("quality=ultra"),
            Err(SettingsError::UnknownQuality(_))
        ));
        assert!(matches!(
            settings.apply_query("theme=neon"),
            Err(SettingsError::UnknownTheme(_))
        ));
        assert!(settings.apply_query("").is_ok());
    }
}
