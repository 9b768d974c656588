//! Effects engine: bursts, blast waves and star streams
//!
//! Each effect owns its elements and decays them once per tick. One-shot
//! effects (Burst, BlastWave) go inactive permanently once their collection
//! empties; StarStream replenishes forever and is dropped by its owner.
//!
//! Removal uses `retain_mut`, so every element is visited exactly once per
//! tick regardless of how many neighbours are removed around it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::emitter::{ParticleSpec, WaveSpec, emit_particles, emit_waves};
use super::param::Param;
use crate::color::EffectColor;
use crate::consts::*;
use crate::error::GameError;
use crate::renderer::FrameBuilder;

/// Transient visual unit owned by a Burst or StarStream
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hue offset (degrees) from the owner's base color
    pub hue: f32,
    pub alpha: f32,
}

/// Transient concentric ring owned by a BlastWave
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub pos: Vec2,
    pub radius: f32,
    /// Stroke width
    pub width: f32,
    pub hue: f32,
    pub alpha: f32,
}

fn check_burn_rate(field: &'static str, rate: f32) -> Result<f32, GameError> {
    if rate.is_finite() && rate > 0.0 && rate < 1.0 {
        Ok(rate)
    } else {
        Err(GameError::InvalidParam {
            field,
            reason: format!("burn rate {} outside (0, 1)", rate),
        })
    }
}

// ============================================================================
// Burst
// ============================================================================

/// Declarative burst description (position supplied at spawn time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub n: usize,
    pub vx: Param,
    pub vy: Param,
    pub radius: Param,
    pub hue: Param,
    /// Fraction of radius lost per tick, in (0, 1)
    pub burn_rate: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            n: 40,
            vx: Param::Range(-8.0, 8.0),
            vy: Param::Range(-8.0, 8.0),
            radius: Param::Range(2.0, 12.0),
            hue: Param::Range(-20.0, 20.0),
            burn_rate: 0.08,
        }
    }
}

impl BurstConfig {
    fn spec_at(&self, origin: Vec2) -> ParticleSpec {
        ParticleSpec {
            x: Param::Fixed(origin.x),
            y: Param::Fixed(origin.y),
            vx: self.vx,
            vy: self.vy,
            radius: self.radius,
            hue: self.hue,
            alpha: Param::Fixed(1.0),
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.spec_at(Vec2::ZERO).validate()?;
        check_burn_rate("burn_rate", self.burn_rate)?;
        Ok(())
    }

    /// Same burst with shard count and size multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |p: Param| match p {
            Param::Fixed(v) => Param::Fixed(v * factor),
            Param::Range(a, b) => Param::Range(a * factor, b * factor),
        };
        Self {
            n: ((self.n as f32) * factor).round() as usize,
            vx: scale(self.vx),
            vy: scale(self.vy),
            radius: scale(self.radius),
            ..self.clone()
        }
    }
}

/// One-shot outward explosion of shards
#[derive(Debug, Clone)]
pub struct Burst {
    shards: Vec<Particle>,
    burn_rate: f32,
    color: EffectColor,
    active: bool,
}

impl Burst {
    pub fn new<R: Rng>(
        origin: Vec2,
        config: &BurstConfig,
        color: EffectColor,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let spec = config.spec_at(origin);
        spec.validate()?;
        let burn_rate = check_burn_rate("burn_rate", config.burn_rate)?;
        Ok(Self::from_shards(emit_particles(&spec, config.n, rng), burn_rate, color))
    }

    /// Build from pre-made shards (burn rate assumed valid)
    pub fn from_shards(shards: Vec<Particle>, burn_rate: f32, color: EffectColor) -> Self {
        Self {
            shards,
            burn_rate,
            color,
            active: true,
        }
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        let burn = self.burn_rate;
        self.shards.retain_mut(|shard| {
            shard.pos += shard.vel;
            shard.radius -= shard.radius * burn;
            shard.alpha -= shard.alpha * burn * 0.5;
            shard.hue += HUE_DRIFT;
            shard.radius >= SHARD_MIN_RADIUS && shard.alpha > MIN_ALPHA
        });
        self.active = !self.shards.is_empty();
    }

    pub fn draw(&self, frame: &mut FrameBuilder) {
        for shard in &self.shards {
            frame.circle(shard.pos, shard.radius, self.color.shifted(shard.hue, shard.alpha));
        }
    }

    pub fn shards(&self) -> &[Particle] {
        &self.shards
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

// ============================================================================
// BlastWave
// ============================================================================

/// Declarative blast wave description (position supplied at spawn time)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlastWaveConfig {
    pub n: usize,
    pub radius: Param,
    pub width: Param,
    pub hue: Param,
    /// Percent of width lost per tick; ranges are resolved once per instance
    pub burn_rate: Param,
}

impl Default for BlastWaveConfig {
    fn default() -> Self {
        Self {
            n: 3,
            radius: Param::Range(4.0, 16.0),
            width: Param::Range(10.0, 24.0),
            hue: Param::Range(-15.0, 15.0),
            burn_rate: Param::Range(6.0, 12.0),
        }
    }
}

impl BlastWaveConfig {
    fn spec_at(&self, origin: Vec2) -> WaveSpec {
        WaveSpec {
            x: Param::Fixed(origin.x),
            y: Param::Fixed(origin.y),
            radius: self.radius,
            width: self.width,
            hue: self.hue,
            alpha: Param::Fixed(1.0),
        }
    }

    /// Checks the whole burn-rate range, not just one resolved sample
    pub fn validate(&self) -> Result<(), GameError> {
        self.spec_at(Vec2::ZERO).validate()?;
        self.burn_rate.validate("burn_rate")?;
        check_burn_rate("burn_rate", self.burn_rate.min() / 100.0)?;
        check_burn_rate("burn_rate", self.burn_rate.max() / 100.0)?;
        Ok(())
    }

    /// Same blast with ring radius and stroke multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        let scale = |p: Param| match p {
            Param::Fixed(v) => Param::Fixed(v * factor),
            Param::Range(a, b) => Param::Range(a * factor, b * factor),
        };
        Self {
            radius: scale(self.radius),
            width: scale(self.width),
            ..self.clone()
        }
    }
}

/// One-shot expanding ring effect
#[derive(Debug, Clone)]
pub struct BlastWave {
    waves: Vec<Wave>,
    /// Per-tick multiplier (percent / 100), fixed for the instance's lifetime
    burn_rate: f32,
    color: EffectColor,
    active: bool,
}

impl BlastWave {
    pub fn new<R: Rng>(
        origin: Vec2,
        config: &BlastWaveConfig,
        color: EffectColor,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let spec = config.spec_at(origin);
        spec.validate()?;
        config.burn_rate.validate("burn_rate")?;
        let burn_rate = check_burn_rate("burn_rate", config.burn_rate.resolve(rng) / 100.0)?;
        Ok(Self {
            waves: emit_waves(&spec, config.n, rng),
            burn_rate,
            color,
            active: true,
        })
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        let burn = self.burn_rate;
        self.waves.retain_mut(|wave| {
            wave.radius += wave.width;
            wave.width -= wave.width * burn;
            wave.alpha -= wave.alpha * burn * 0.5;
            wave.hue += HUE_DRIFT;
            wave.width >= WAVE_MIN_WIDTH
        });
        self.active = !self.waves.is_empty();
    }

    pub fn draw(&self, frame: &mut FrameBuilder) {
        for wave in &self.waves {
            frame.ring(
                wave.pos,
                wave.radius,
                wave.radius + wave.width,
                self.color.shifted(wave.hue, wave.alpha),
            );
        }
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn burn_rate(&self) -> f32 {
        self.burn_rate
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

// ============================================================================
// StarStream
// ============================================================================

/// Declarative star stream description (x spans the screen, stars fall in y)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarStreamConfig {
    /// Target population
    pub n: usize,
    pub vy: Param,
    pub radius: Param,
    pub hue: Param,
    pub alpha: Param,
}

impl Default for StarStreamConfig {
    fn default() -> Self {
        Self {
            n: 60,
            vy: Param::Range(2.0, 6.0),
            radius: Param::Range(1.0, 3.0),
            hue: Param::Range(-30.0, 30.0),
            alpha: Param::Fixed(0.7),
        }
    }
}

impl StarStreamConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        self.spec(Vec2::ONE, Param::Fixed(0.0)).validate()?;
        if self.vy.min() < 0.0 {
            return Err(GameError::InvalidParam {
                field: "vy",
                reason: "stars must not rise".to_string(),
            });
        }
        Ok(())
    }

    /// Same stream with a different target population
    pub fn with_population(&self, n: usize) -> Self {
        Self { n, ..self.clone() }
    }

    fn spec(&self, screen: Vec2, y: Param) -> ParticleSpec {
        ParticleSpec {
            x: Param::Range(0.0, screen.x.max(0.0)),
            y,
            vx: Param::Fixed(0.0),
            vy: self.vy,
            radius: self.radius,
            hue: self.hue,
            alpha: self.alpha,
        }
    }
}

/// Continuous background emitter; never goes inactive on its own
#[derive(Debug, Clone)]
pub struct StarStream {
    stars: Vec<Particle>,
    target: usize,
    config: StarStreamConfig,
    color: EffectColor,
}

impl StarStream {
    /// Create a stream whose initial stars are scattered over the whole screen
    pub fn new<R: Rng>(
        screen: Vec2,
        config: &StarStreamConfig,
        color: EffectColor,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let scatter = config.spec(screen, Param::Range(0.0, screen.y.max(0.0)));
        scatter.validate()?;
        Ok(Self {
            stars: emit_particles(&scatter, config.n, rng),
            target: config.n,
            config: config.clone(),
            color,
        })
    }

    pub fn tick<R: Rng>(&mut self, screen: Vec2, rng: &mut R) {
        self.stars.retain_mut(|star| {
            star.pos += star.vel;
            star.hue -= STAR_HUE_DECREMENT;
            star.pos.y - star.radius <= screen.y
        });

        let missing = self.target.saturating_sub(self.stars.len());
        if missing > 0 {
            let top = self
                .config
                .spec(screen, Param::Fixed(-self.config.radius.max()));
            self.stars.extend(emit_particles(&top, missing, rng));
        }
    }

    pub fn draw(&self, frame: &mut FrameBuilder) {
        for star in &self.stars {
            frame.circle(star.pos, star.radius, self.color.shifted(star.hue, star.alpha));
        }
    }

    pub fn stars(&self) -> &[Particle] {
        &self.stars
    }
}

// ============================================================================
// Effect sum type + owning list
// ============================================================================

/// Any effect the game can own
#[derive(Debug, Clone)]
pub enum Effect {
    Burst(Burst),
    BlastWave(BlastWave),
    StarStream(StarStream),
}

impl Effect {
    pub fn tick<R: Rng>(&mut self, screen: Vec2, rng: &mut R) {
        match self {
            Effect::Burst(b) => b.tick(),
            Effect::BlastWave(w) => w.tick(),
            Effect::StarStream(s) => s.tick(screen, rng),
        }
    }

    pub fn draw(&self, frame: &mut FrameBuilder) {
        match self {
            Effect::Burst(b) => b.draw(frame),
            Effect::BlastWave(w) => w.draw(frame),
            Effect::StarStream(s) => s.draw(frame),
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Effect::Burst(b) => b.is_active(),
            Effect::BlastWave(w) => w.is_active(),
            Effect::StarStream(_) => true,
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Effect::StarStream(_))
    }
}

impl From<Burst> for Effect {
    fn from(b: Burst) -> Self {
        Effect::Burst(b)
    }
}

impl From<BlastWave> for Effect {
    fn from(w: BlastWave) -> Self {
        Effect::BlastWave(w)
    }
}

impl From<StarStream> for Effect {
    fn from(s: StarStream) -> Self {
        Effect::StarStream(s)
    }
}

/// The game's live effects, swept after every tick
#[derive(Debug, Clone, Default)]
pub struct EffectList {
    effects: Vec<Effect>,
}

impl EffectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: impl Into<Effect>) {
        self.effects.push(effect.into());
    }

    /// Tick every effect, draw the survivors' elements, then sweep spent ones
    pub fn update<R: Rng>(&mut self, screen: Vec2, rng: &mut R, frame: &mut FrameBuilder) {
        for effect in &mut self.effects {
            effect.tick(screen, rng);
            effect.draw(frame);
        }
        self.effects.retain(Effect::is_active);
    }

    /// Externally terminate continuous emitters
    pub fn remove_streams(&mut self) {
        self.effects.retain(|e| !e.is_stream());
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }
}
