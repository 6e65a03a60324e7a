//! Display preferences
//!
//! Persisted in LocalStorage, separately from any game state. The
//! simulation never reads these; only the drawing path does.

use serde::{Deserialize, Serialize};

/// Display/accessibility preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Soft glow pass under the blade trail
    pub trail_glow: bool,
    /// Sparkle flecks at the blade tip
    pub sparkles: bool,
    /// Minimize decorative motion
    pub reduced_motion: bool,
    /// FPS counter in the corner
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trail_glow: true,
            sparkles: true,
            reduced_motion: false,
            show_fps: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "fruit_slash_settings";

    /// Effective sparkles (respects reduced_motion)
    pub fn effective_sparkles(&self) -> bool {
        self.sparkles && !self.reduced_motion
    }

    /// Effective trail glow (respects reduced_motion)
    pub fn effective_trail_glow(&self) -> bool {
        self.trail_glow && !self.reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
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
