//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Presentation preferences (never affect gameplay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Crash particle effects
    pub particles: bool,
    /// Scrolling background layers
    pub parallax: bool,
    /// Score / high score text
    pub show_hud: bool,
    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause: bool,
    /// Sound effects
    pub sound: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            parallax: true,
            show_hud: true,
            auto_pause: true,
            sound: true,
            volume: 0.8,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "parallax_dash_settings";

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Flip sound on/off and persist; returns the new effective volume
    pub fn toggle_sound(&mut self, store: &mut dyn KeyValueStore) -> f32 {
        self.sound = !self.sound;
        log::info!("Sound {}", if self.sound { "on" } else { "off" });
        self.save(store);
        self.effective_volume()
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("Loaded settings");
                return settings;
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            if store.set(Self::STORAGE_KEY, &json) {
                log::info!("Settings saved");
            }
        }
    }
}
