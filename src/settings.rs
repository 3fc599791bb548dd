//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web; natively in the JSON file named by
//! `RETRO_PLATFORMER_SETTINGS`, if set.

use serde::{Deserialize, Serialize};

use crate::consts::{ANALOG_DEADZONE, ANALOG_MOVE_MULTIPLIER, MAX_MOVE_SPEED, MOVE_SPEED};

/// How reaching the level score target is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelAdvanceRule {
    /// Advance once the score reaches or passes the next multiple
    #[default]
    Crossed,
    /// Advance only when the score lands exactly on a multiple.
    /// A score that steps over the multiple never advances.
    ExactMultiple,
}

impl LevelAdvanceRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelAdvanceRule::Crossed => "crossed",
            LevelAdvanceRule::ExactMultiple => "exact",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "crossed" | "cross" => Some(LevelAdvanceRule::Crossed),
            "exact" | "exact-multiple" | "modulo" => Some(LevelAdvanceRule::ExactMultiple),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Keyboard ===
    /// Walking speed while a direction key is down (units per tick)
    pub keyboard_move_speed: f32,

    // === Gamepad ===
    /// Stick magnitude ignored around center (0.0 - 1.0)
    pub analog_deadzone: f32,
    /// Scale applied after the response curve
    pub analog_multiplier: f32,
    /// Top speed reachable with the stick (units per tick)
    pub analog_max_speed: f32,

    // === Rules ===
    pub level_advance: LevelAdvanceRule,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keyboard_move_speed: MOVE_SPEED,
            analog_deadzone: ANALOG_DEADZONE,
            analog_multiplier: ANALOG_MOVE_MULTIPLIER,
            analog_max_speed: MAX_MOVE_SPEED,
            level_advance: LevelAdvanceRule::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Pull out-of-range values back into something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.analog_deadzone.is_finite() {
            self.analog_deadzone = defaults.analog_deadzone;
        }
        self.analog_deadzone = self.analog_deadzone.clamp(0.0, 0.95);
        if !(self.analog_multiplier.is_finite() && self.analog_multiplier > 0.0) {
            self.analog_multiplier = defaults.analog_multiplier;
        }
        if !(self.analog_max_speed.is_finite() && self.analog_max_speed > 0.0) {
            self.analog_max_speed = defaults.analog_max_speed;
        }
        self.analog_max_speed = self.analog_max_speed.min(MAX_MOVE_SPEED);
        if !(self.keyboard_move_speed.is_finite() && self.keyboard_move_speed > 0.0) {
            self.keyboard_move_speed = defaults.keyboard_move_speed;
        }
        self.keyboard_move_speed = self.keyboard_move_speed.min(MAX_MOVE_SPEED);
        self
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "retro_platformer_settings";

    /// Environment variable naming a native settings file
    pub const PATH_ENV_VAR: &'static str = "RETRO_PLATFORMER_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Encode and hand the settings to `write` under `STORAGE_KEY`.
    /// Returns whether they were stored; failures are logged.
    fn persist<E: std::fmt::Debug>(&self, write: impl FnOnce(&str, &str) -> Result<(), E>) -> bool {
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode settings: {}", e);
                return false;
            }
        };
        match write(Self::STORAGE_KEY, &json) {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings: {:?}", e);
                false
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable; settings not saved");
            return;
        };
        self.persist(|key, json| storage.set_item(key, json));
    }

    /// Load settings from the file named by `RETRO_PLATFORMER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings file {}: {}; using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to the file named by `RETRO_PLATFORMER_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Ok(path) = std::env::var(Self::PATH_ENV_VAR) else {
            log::warn!("{} not set; settings not saved", Self::PATH_ENV_VAR);
            return;
        };
        self.persist(|_, json| std::fs::write(&path, json));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let settings = Settings::default();
        assert_eq!(settings.analog_deadzone, ANALOG_DEADZONE);
        assert_eq!(settings.keyboard_move_speed, MOVE_SPEED);
        assert_eq!(settings.level_advance, LevelAdvanceRule::Crossed);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "level_advance": "ExactMultiple" }"#).expect("parses");
        assert_eq!(settings.level_advance, LevelAdvanceRule::ExactMultiple);
        assert_eq!(settings.analog_multiplier, ANALOG_MOVE_MULTIPLIER);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            analog_deadzone: 0.25,
            ..Default::default()
        };
        let json = settings.to_json().expect("serializes");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitize_clamps() {
        let settings = Settings {
            analog_deadzone: 3.0,
            analog_multiplier: -1.0,
            analog_max_speed: 500.0,
            keyboard_move_speed: f32::NAN,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.analog_deadzone, 0.95);
        assert_eq!(settings.analog_multiplier, ANALOG_MOVE_MULTIPLIER);
        assert_eq!(settings.analog_max_speed, MAX_MOVE_SPEED);
        assert_eq!(settings.keyboard_move_speed, MOVE_SPEED);
    }

    #[test]
    fn test_persist_writes_under_storage_key() {
        let settings = Settings::default();
        let mut stored = None;
        let saved = settings.persist(|key, json| {
            stored = Some((key.to_string(), json.to_string()));
            Ok::<(), ()>(())
        });
        assert!(saved);
        let (key, json) = stored.expect("writer called");
        assert_eq!(key, "retro_platformer_settings");
        assert_eq!(Settings::from_json(&json).expect("parses"), settings);
    }

    #[test]
    fn test_persist_reports_write_failure() {
        let saved = Settings::default().persist(|_, _| Err("QuotaExceededError"));
        assert!(!saved);
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(LevelAdvanceRule::parse("EXACT"), Some(LevelAdvanceRule::ExactMultiple));
        assert_eq!(LevelAdvanceRule::parse("crossed"), Some(LevelAdvanceRule::Crossed));
        assert_eq!(LevelAdvanceRule::parse("sometimes"), None);
        assert_eq!(LevelAdvanceRule::Crossed.as_str(), "crossed");
    }
}
