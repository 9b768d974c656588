//! Stateless particle and wave factories
//!
//! A spec resolves each attribute independently per element, so `n` calls
//! produce `n` independent samples. Emitting is pure apart from the RNG.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::effects::{Particle, Wave};
use super::param::Param;
use crate::error::GameError;

/// Per-attribute description of a particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSpec {
    pub x: Param,
    pub y: Param,
    pub vx: Param,
    pub vy: Param,
    pub radius: Param,
    /// Hue offset (degrees) from the owning effect's base color
    pub hue: Param,
    pub alpha: Param,
}

impl Default for ParticleSpec {
    fn default() -> Self {
        Self {
            x: Param::Fixed(0.0),
            y: Param::Fixed(0.0),
            vx: Param::Fixed(0.0),
            vy: Param::Fixed(0.0),
            radius: Param::Fixed(1.0),
            hue: Param::Fixed(0.0),
            alpha: Param::Fixed(1.0),
        }
    }
}

impl ParticleSpec {
    pub fn validate(&self) -> Result<(), GameError> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.vx.validate("vx")?;
        self.vy.validate("vy")?;
        self.radius.validate("radius")?;
        self.hue.validate("hue")?;
        self.alpha.validate("alpha")
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Particle {
        Particle {
            pos: Vec2::new(self.x.resolve(rng), self.y.resolve(rng)),
            vel: Vec2::new(self.vx.resolve(rng), self.vy.resolve(rng)),
            radius: self.radius.resolve(rng),
            hue: self.hue.resolve(rng),
            alpha: self.alpha.resolve(rng),
        }
    }
}

/// Per-attribute description of a concentric wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSpec {
    pub x: Param,
    pub y: Param,
    pub radius: Param,
    pub width: Param,
    pub hue: Param,
    pub alpha: Param,
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self {
            x: Param::Fixed(0.0),
            y: Param::Fixed(0.0),
            radius: Param::Fixed(1.0),
            width: Param::Fixed(1.0),
            hue: Param::Fixed(0.0),
            alpha: Param::Fixed(1.0),
        }
    }
}

impl WaveSpec {
    pub fn validate(&self) -> Result<(), GameError> {
        self.x.validate("x")?;
        self.y.validate("y")?;
        self.radius.validate("radius")?;
        self.width.validate("width")?;
        self.hue.validate("hue")?;
        self.alpha.validate("alpha")
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> Wave {
        Wave {
            pos: Vec2::new(self.x.resolve(rng), self.y.resolve(rng)),
            radius: self.radius.resolve(rng),
            width: self.width.resolve(rng),
            hue: self.hue.resolve(rng),
            alpha: self.alpha.resolve(rng),
        }
    }
}

/// Emit `n` particles from `spec`
pub fn emit_particles<R: Rng>(spec: &ParticleSpec, n: usize, rng: &mut R) -> Vec<Particle> {
    (0..n).map(|_| spec.sample(rng)).collect()
}

/// Emit `n` waves from `spec`
pub fn emit_waves<R: Rng>(spec: &WaveSpec, n: usize, rng: &mut R) -> Vec<Wave> {
    (0..n).map(|_| spec.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(emit_particles(&ParticleSpec::default(), 0, &mut rng).is_empty());
        assert!(emit_waves(&WaveSpec::default(), 0, &mut rng).is_empty());
    }

    #[test]
    fn test_fixed_attributes_exact() {
        let mut rng = Pcg32::seed_from_u64(2);
        let spec = WaveSpec {
            x: Param::Fixed(12.5),
            y: Param::Fixed(-3.0),
            width: Param::Range(5.0, 9.0),
            ..Default::default()
        };
        for wave in emit_waves(&spec, 20, &mut rng) {
            assert_eq!(wave.pos, Vec2::new(12.5, -3.0));
            assert_eq!(wave.alpha, 1.0);
            assert!((5.0..=9.0).contains(&wave.width));
        }
    }

    #[test]
    fn test_inverted_range_rejected() {
        let spec = ParticleSpec {
            radius: Param::Range(10.0, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(GameError::InvalidParam { field: "radius", .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_ranged_attributes_within_bounds(
            seed in any::<u64>(),
            n in 0usize..64,
            vx_min in -50.0f32..0.0,
            vx_span in 0.0f32..100.0,
            r_min in 0.0f32..20.0,
            r_span in 0.0f32..30.0,
            fixed_y in -500.0f32..500.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let spec = ParticleSpec {
                y: Param::Fixed(fixed_y),
                vx: Param::Range(vx_min, vx_min + vx_span),
                radius: Param::Range(r_min, r_min + r_span),
                ..Default::default()
            };
            let particles = emit_particles(&spec, n, &mut rng);
            prop_assert_eq!(particles.len(), n);
            for p in particles {
                prop_assert!(p.vel.x >= vx_min && p.vel.x <= vx_min + vx_span);
                prop_assert!(p.radius >= r_min && p.radius <= r_min + r_span);
                prop_assert_eq!(p.pos.y, fixed_y);
            }
        }
    }
}
