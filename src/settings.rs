//! Session settings and preferences
//!
//! Persisted in LocalStorage as JSON. Native builds always use defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Samples per full turn when tessellating circles, ellipses and blobs
    pub fn curve_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tessellation quality
    pub quality: QualityPreset,

    // === Simulation ===
    /// Shapes spawned per second at startup
    pub spawn_rate: u32,
    /// Gravity at startup (pixels per frame unit)
    pub gravity: f32,
    /// Circumradius of every spawned shape
    pub shape_size: f32,

    // === Display ===
    /// Canvas clear colour (0xRRGGBB)
    pub background_color: u32,
    /// Show the shape count / area panel
    pub show_stats: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            spawn_rate: DEFAULT_SPAWN_RATE,
            gravity: DEFAULT_GRAVITY,
            shape_size: SHAPE_SIZE,
            background_color: BACKGROUND_COLOR,
            show_stats: true,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Clamp values the controls could never produce back into range
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.spawn_rate = self.spawn_rate.clamp(MIN_SPAWN_RATE, MAX_SPAWN_RATE);
        if !self.gravity.is_finite() {
            self.gravity = defaults.gravity;
        }
        self.gravity = self.gravity.max(MIN_GRAVITY);
        if !self.shape_size.is_finite() || self.shape_size <= 0.0 {
            self.shape_size = defaults.shape_size;
        }
        self.background_color &= 0xff_ffff;
        self
    }

    /// Parse settings JSON, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "shape_rain_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.spawn_rate, 1);
        assert_eq!(s.gravity, 1.0);
        assert_eq!(s.shape_size, 30.0);
        assert_eq!(s.background_color, 0x96d1e3);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(Settings::from_preset(QualityPreset::Low).quality.curve_segments(), 16);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let s = Settings::from_json(r#"{"spawn_rate": 4}"#);
        assert_eq!(s.spawn_rate, 4);
        assert_eq!(s.gravity, DEFAULT_GRAVITY);
        assert_eq!(s.quality, QualityPreset::Medium);
    }

    #[test]
    fn test_json_rate_above_ceiling_is_clamped() {
        let s = Settings::from_json(r#"{"spawn_rate": 4294967295}"#);
        assert_eq!(s.spawn_rate, MAX_SPAWN_RATE);
    }

    #[test]
    fn test_json_garbage_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitize_out_of_range() {
        let s = Settings {
            spawn_rate: 0,
            gravity: -3.0,
            shape_size: 0.0,
            background_color: 0xff12_3456,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.spawn_rate, MIN_SPAWN_RATE);
        assert_eq!(s.gravity, MIN_GRAVITY);
        assert_eq!(s.shape_size, SHAPE_SIZE);
        assert_eq!(s.background_color, 0x12_3456);
    }

    #[test]
    fn test_roundtrip_json() {
        let s = Settings {
            gravity: 2.4,
            quality: QualityPreset::High,
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json), s);
    }
}
