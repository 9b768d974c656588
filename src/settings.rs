//! Game configuration and the persisted mute preference
//!
//! `GameConfig` is data-driven tuning loaded from JSON. The only thing that
//! persists between sessions is the mute flag (LocalStorage on web).

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::sim::effects::{BlastWaveConfig, BurstConfig, StarStreamConfig};

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

    /// Multiplier applied to effect element counts
    pub fn particle_factor(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.4,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.6,
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of lanes; `None` plays in open mode
    pub lanes: Option<u32>,
    pub lives: i32,

    // === Speed ===
    /// Obstacle descent speed at the start of a run
    pub start_speed: f32,
    /// Added to the speed every play frame
    pub speed_increment: f32,
    pub max_speed: f32,
    /// Player horizontal speed in open mode
    pub player_speed: f32,

    // === Spawning ===
    pub spawn_interval: u64,
    pub ramp_frames: u64,
    pub crowd_factor: f32,

    // === Throttles (ms) ===
    pub life_ms: f64,
    pub burst_ms: f64,
    pub blast_ms: f64,
    /// Delay between the effects draining after game over and the score report
    pub score_report_delay_ms: f64,

    // === Colors (hex) ===
    pub background_color: String,
    pub player_color: String,
    pub obstacle_color: String,
    pub burst_color: String,
    pub blast_color: String,
    pub star_color: String,

    // === Effects ===
    pub quality: QualityPreset,
    pub burst: BurstConfig,
    pub blast: BlastWaveConfig,
    pub stars: StarStreamConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lanes: None,
            lives: 3,

            start_speed: 4.0,
            speed_increment: 0.002,
            max_speed: 14.0,
            player_speed: 7.0,

            spawn_interval: 60,
            ramp_frames: 300,
            crowd_factor: 3.0,

            life_ms: 1200.0,
            burst_ms: 300.0,
            blast_ms: 600.0,
            score_report_delay_ms: 500.0,

            background_color: "#0b0b1a".to_string(),
            player_color: "#35d0ba".to_string(),
            obstacle_color: "#e84a5f".to_string(),
            burst_color: "#ffb400".to_string(),
            blast_color: "#ff6f3c".to_string(),
            star_color: "#9ad0ff".to_string(),

            quality: QualityPreset::Medium,
            burst: BurstConfig::default(),
            blast: BlastWaveConfig::default(),
            stars: StarStreamConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(GameError::Config)
    }

    /// Star stream population after the quality preset is applied
    pub fn star_count(&self) -> usize {
        ((self.stars.n as f32) * self.quality.particle_factor()).round() as usize
    }

    /// Burst shard count after the quality preset is applied
    pub fn burst_count(&self) -> usize {
        ((self.burst.n as f32) * self.quality.particle_factor()).round() as usize
    }
}

/// The single persisted setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutePreference {
    pub muted: bool,
}

impl MutePreference {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dodgefall_muted";

    /// Load the mute flag from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(pref) = serde_json::from_str(&json) {
                    log::info!("Loaded mute preference from LocalStorage");
                    return pref;
                }
            }
        }

        Self::default()
    }

    /// Save the mute flag to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
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
