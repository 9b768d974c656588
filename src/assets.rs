//! Asset manifest and loading
//!
//! Sprites are drawn procedurally, so a sprite entry only carries an optional
//! tint. Sounds are keyed by name; every `Sound` the game fires must resolve.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::audio::Sound;
use crate::color::EffectColor;
use crate::error::GameError;

/// Sprites the game cannot start without
pub const REQUIRED_SPRITES: [&str; 2] = ["player", "obstacle"];

/// Asset manifest describing named sprites and sounds.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Hex tint overriding the configured color
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Source of the sound (`procedural:<key>` for generated ones)
    pub path: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(GameError::Manifest)
    }

    /// Manifest for the built-in procedural sprites and sounds
    pub fn builtin() -> Self {
        let sprites = REQUIRED_SPRITES
            .iter()
            .map(|name| (name.to_string(), SpriteDescriptor::default()))
            .collect();
        let sounds = Sound::ALL
            .iter()
            .map(|s| {
                (
                    s.key().to_string(),
                    SoundDescriptor {
                        path: format!("procedural:{}", s.key()),
                    },
                )
            })
            .collect();
        Self { sprites, sounds }
    }
}

/// Resolved, ready-to-use assets
#[derive(Debug, Clone, Default)]
pub struct Assets {
    /// Sprite tints by name (`None` keeps the configured color)
    pub tints: HashMap<String, Option<EffectColor>>,
    pub sounds: HashMap<Sound, String>,
}

impl Assets {
    pub fn tint(&self, sprite: &str) -> Option<&EffectColor> {
        self.tints.get(sprite).and_then(Option::as_ref)
    }
}

/// Resolves a manifest before the game may leave `loading`
pub trait AssetLoader {
    fn load(&mut self, manifest: &AssetManifest) -> Result<Assets, GameError>;
}

/// Loader that checks the manifest is complete and parses its tints
#[derive(Debug, Default)]
pub struct ManifestLoader;

impl AssetLoader for ManifestLoader {
    fn load(&mut self, manifest: &AssetManifest) -> Result<Assets, GameError> {
        let mut assets = Assets::default();

        for name in REQUIRED_SPRITES {
            let sprite = manifest.sprites.get(name).ok_or_else(|| GameError::AssetLoad {
                name: name.to_string(),
                reason: "sprite missing from manifest".to_string(),
            })?;
            let tint = sprite.color.as_deref().map(EffectColor::from_hex).transpose()?;
            assets.tints.insert(name.to_string(), tint);
        }

        for sound in Sound::ALL {
            let desc = manifest.sounds.get(sound.key()).ok_or_else(|| GameError::AssetLoad {
                name: sound.key().to_string(),
                reason: "sound missing from manifest".to_string(),
            })?;
            if desc.path.is_empty() {
                return Err(GameError::AssetLoad {
                    name: sound.key().to_string(),
                    reason: "empty path".to_string(),
                });
            }
            assets.sounds.insert(sound, desc.path.clone());
        }

        log::info!(
            "Loaded {} sprites, {} sounds",
            assets.tints.len(),
            assets.sounds.len()
        );
        Ok(assets)
    }
}
