//! Effect color descriptors
//!
//! Effects are configured with a hex string; particles carry a hue offset and
//! alpha that get combined with the base HSL at draw time.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Color descriptor: source hex plus derived RGB and HSL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectColor {
    pub hex: String,
    pub rgb: [u8; 3],
    /// Hue in degrees [0, 360), saturation and lightness in [0, 1]
    pub hsl: [f32; 3],
}

impl EffectColor {
    /// Parse `#rrggbb` or `#rgb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, GameError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(GameError::InvalidColor(hex.to_string()));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(GameError::InvalidColor(hex.to_string())),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| GameError::InvalidColor(hex.to_string()))
        };
        let rgb = [channel(0)?, channel(2)?, channel(4)?];

        Ok(Self {
            hex: format!("#{}", expanded.to_lowercase()),
            rgb,
            hsl: rgb_to_hsl(rgb),
        })
    }

    /// Linear RGBA for this color at the given alpha
    pub fn rgba(&self, alpha: f32) -> [f32; 4] {
        [
            self.rgb[0] as f32 / 255.0,
            self.rgb[1] as f32 / 255.0,
            self.rgb[2] as f32 / 255.0,
            alpha.clamp(0.0, 1.0),
        ]
    }

    /// RGBA with the base hue rotated by `hue_offset` degrees
    pub fn shifted(&self, hue_offset: f32, alpha: f32) -> [f32; 4] {
        let [h, s, l] = self.hsl;
        hsla_to_rgba(h + hue_offset, s, l, alpha)
    }
}

/// Convert 8-bit RGB to HSL (hue degrees, s/l in [0, 1])
pub fn rgb_to_hsl(rgb: [u8; 3]) -> [f32; 3] {
    let r = rgb[0] as f32 / 255.0;
    let g = rgb[1] as f32 / 255.0;
    let b = rgb[2] as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta.abs() < f32::EPSILON {
        return [0.0, 0.0, l];
    }

    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    [h * 60.0, s, l]
}

/// Convert HSLA (hue in degrees, wrapped) to linear RGBA
pub fn hsla_to_rgba(hue: f32, s: f32, l: f32, alpha: f32) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l, alpha.clamp(0.0, 1.0)];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
        alpha.clamp(0.0, 1.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let c = EffectColor::from_hex("#FF0000").unwrap();
        assert_eq!(c.rgb, [255, 0, 0]);
        assert_eq!(c.hex, "#ff0000");
        assert!((c.hsl[0] - 0.0).abs() < 1e-3);
        assert!((c.hsl[1] - 1.0).abs() < 1e-3);
        assert!((c.hsl[2] - 0.5).abs() < 1e-3);

        let short = EffectColor::from_hex("0f0").unwrap();
        assert_eq!(short.rgb, [0, 255, 0]);
        assert!((short.hsl[0] - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_reject_bad_hex() {
        assert!(EffectColor::from_hex("#12345").is_err());
        assert!(EffectColor::from_hex("#gggggg").is_err());
        assert!(EffectColor::from_hex("").is_err());
    }

    #[test]
    fn test_hsl_round_trip_through_rgba() {
        let c = EffectColor::from_hex("#3366cc").unwrap();
        let rgba = c.shifted(0.0, 1.0);
        assert!((rgba[0] - 0.2).abs() < 0.01);
        assert!((rgba[1] - 0.4).abs() < 0.01);
        assert!((rgba[2] - 0.8).abs() < 0.01);
    }

    #[test]
    fn test_hue_wraps() {
        let a = hsla_to_rgba(-120.0, 1.0, 0.5, 1.0);
        let b = hsla_to_rgba(240.0, 1.0, 0.5, 1.0);
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < 1e-5);
        }
    }
}
