//! The per-frame game loop and phase machine
//!
//! Phases run `loading -> ready -> play -> over -> ready ...`, with `stop` as
//! an explicit terminal teardown. Entry actions for a phase run exactly once,
//! guarded by `GameState::just_entered`.
//!
//! Within a play frame the order is fixed: spawn, effects, player movement,
//! obstacle movement + collision, player draw, terminal check. Collisions are
//! therefore always tested against this frame's post-movement positions.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::FrameClock;
use super::collision::obstacle_hits_player;
use super::effects::{
    BlastWave, BlastWaveConfig, Burst, BurstConfig, Effect, EffectList, StarStream,
    StarStreamConfig,
};
use super::entity::{MoveFlags, Obstacle, Player};
use super::spawn::SpawnPolicy;
use super::state::{GameState, LaneLayout, Phase, StateUpdate};
use super::throttle::Throttle;
use crate::assets::{AssetLoader, AssetManifest, Assets};
use crate::audio::{Audio, PlaybackOpts, Sound};
use crate::color::EffectColor;
use crate::error::GameError;
use crate::overlay::{Overlay, OverlayElement};
use crate::renderer::FrameBuilder;
use crate::renderer::vertex::colors;
use crate::settings::{GameConfig, MutePreference};

/// Input sampled by the platform once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// A tap/click/start key arrived since the last frame
    pub tap: bool,
}

/// What the scheduler should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule the next frame
    Continue,
    /// Paused; wait for a resume
    Paused,
    /// Terminal; schedule nothing
    Stop,
}

/// Receives the final score once per game over
pub type ScoreReporter = Box<dyn FnMut(u64)>;

/// Colors resolved from hex strings at construction
#[derive(Debug, Clone)]
struct Palette {
    background: [f32; 4],
    player: [f32; 4],
    obstacle: [f32; 4],
    burst: EffectColor,
    blast: EffectColor,
    star: EffectColor,
}

impl Palette {
    fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            background: EffectColor::from_hex(&config.background_color)?.rgba(1.0),
            player: EffectColor::from_hex(&config.player_color)?.rgba(1.0),
            obstacle: EffectColor::from_hex(&config.obstacle_color)?.rgba(1.0),
            burst: EffectColor::from_hex(&config.burst_color)?,
            blast: EffectColor::from_hex(&config.blast_color)?,
            star: EffectColor::from_hex(&config.star_color)?,
        })
    }
}

/// One game session
pub struct Game {
    config: GameConfig,
    state: GameState,
    clock: FrameClock,
    rng: Pcg32,
    screen: Vec2,
    palette: Palette,

    // Effect configs with the quality preset applied
    burst: BurstConfig,
    blast: BlastWaveConfig,
    stars: StarStreamConfig,

    effects: EffectList,
    player: Player,
    obstacles: Vec<Obstacle>,
    spawn: SpawnPolicy,
    /// Frames since the current run entered play
    play_frames: u64,

    life_throttle: Throttle,
    burst_throttle: Throttle,
    blast_throttle: Throttle,

    prev_input: TickInput,
    /// When the effect list first read empty after game over
    drained_at: Option<f64>,
    score_reported: bool,

    frame: FrameBuilder,
    assets: Option<Assets>,
    audio: Box<dyn Audio>,
    overlay: Box<dyn Overlay>,
    reporter: Option<ScoreReporter>,
}

impl Game {
    /// Build a session in `loading`. Fails on invalid colors or effect params.
    pub fn new(
        config: GameConfig,
        screen: Vec2,
        seed: u64,
        audio: Box<dyn Audio>,
        overlay: Box<dyn Overlay>,
    ) -> Result<Self, GameError> {
        let palette = Palette::from_config(&config)?;

        let burst = BurstConfig {
            n: config.burst_count(),
            ..config.burst.clone()
        };
        let blast = config.blast.clone();
        let stars = config.stars.with_population(config.star_count());
        burst.validate()?;
        blast.validate()?;
        stars.validate()?;

        let lanes = config.lanes.map(|n| LaneLayout::new(n, screen.x));
        let state = GameState::new(config.lives, config.start_speed, false, lanes);
        let player = Player::new(screen, state.lanes.as_ref(), config.player_speed, palette.player);
        let spawn = SpawnPolicy {
            interval: config.spawn_interval,
            ramp_frames: config.ramp_frames,
            crowd_factor: config.crowd_factor,
        };

        log::info!(
            "Game created ({}, {} lives, seed {})",
            match config.lanes {
                Some(n) => format!("{n} lanes"),
                None => "open mode".to_string(),
            },
            config.lives,
            seed
        );

        Ok(Self {
            life_throttle: Throttle::new(config.life_ms),
            burst_throttle: Throttle::new(config.burst_ms),
            blast_throttle: Throttle::new(config.blast_ms),
            config,
            state,
            clock: FrameClock::new(),
            rng: Pcg32::seed_from_u64(seed),
            screen,
            palette,
            burst,
            blast,
            stars,
            effects: EffectList::new(),
            player,
            obstacles: Vec::new(),
            spawn,
            play_frames: 0,
            prev_input: TickInput::default(),
            drained_at: None,
            score_reported: false,
            frame: FrameBuilder::new(),
            assets: None,
            audio,
            overlay,
            reporter: None,
        })
    }

    /// Build a session and load its assets; any load failure aborts startup
    pub fn create(
        config: GameConfig,
        manifest: &AssetManifest,
        loader: &mut dyn AssetLoader,
        screen: Vec2,
        seed: u64,
        audio: Box<dyn Audio>,
        overlay: Box<dyn Overlay>,
    ) -> Result<Self, GameError> {
        let mut game = Self::new(config, screen, seed, audio, overlay)?;
        game.load(loader, manifest)?;
        Ok(game)
    }

    /// Apply the persisted mute flag
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.state.set_state(StateUpdate::default().with_muted(muted));
        self.audio.set_muted(muted);
        self.overlay.set_mute(muted);
        self
    }

    /// Callback fired with the final score after each game over
    pub fn on_score(mut self, reporter: impl FnMut(u64) + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Resolve assets and leave `loading`
    pub fn load(&mut self, loader: &mut dyn AssetLoader, manifest: &AssetManifest) -> Result<(), GameError> {
        if self.state.current != Phase::Loading {
            return Ok(());
        }
        let assets = loader.load(manifest).inspect_err(|e| {
            log::error!("Asset loading failed, not starting: {e}");
        })?;

        if let Some(tint) = assets.tint("player") {
            self.palette.player = tint.rgba(1.0);
            self.player.color = self.palette.player;
        }
        if let Some(tint) = assets.tint("obstacle") {
            self.palette.obstacle = tint.rgba(1.0);
        }
        self.assets = Some(assets);
        self.enter(Phase::Ready);
        Ok(())
    }

    // === Accessors ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Direct access for scripted scenarios (demo, tests)
    pub fn obstacles_mut(&mut self) -> &mut Vec<Obstacle> {
        &mut self.obstacles
    }

    pub fn effects(&self) -> &EffectList {
        &self.effects
    }

    pub fn assets(&self) -> Option<&Assets> {
        self.assets.as_ref()
    }

    /// Vertices produced by the last frame
    pub fn last_frame(&self) -> &FrameBuilder {
        &self.frame
    }

    pub fn background(&self) -> [f32; 4] {
        self.palette.background
    }

    // === Commands ===

    /// Start trigger: `ready -> play`, or `over -> ready` (restart)
    ///
    /// Taps in `over` are ignored until the death sequence has drained and
    /// the score has been reported.
    pub fn tap(&mut self) {
        match self.state.current {
            Phase::Ready => self.start_run(),
            Phase::Over if self.score_reported => self.enter(Phase::Ready),
            _ => {}
        }
    }

    /// Toggle pause; only valid during play. Returns true if the state changed.
    pub fn toggle_pause(&mut self) -> bool {
        if self.state.current != Phase::Play {
            return false;
        }
        let paused = !self.state.paused;
        self.state.set_state(StateUpdate::default().with_paused(paused));
        if !paused {
            self.clock.reset_baseline();
        }
        self.overlay.set_pause(paused);
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        true
    }

    /// Toggle mute in any phase and persist the choice
    pub fn toggle_mute(&mut self) {
        let muted = !self.state.muted;
        self.state.set_state(StateUpdate::default().with_muted(muted));
        self.audio.set_muted(muted);
        self.overlay.set_mute(muted);
        MutePreference { muted }.save();
        log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
    }

    /// Explicit teardown; the loop stops scheduling frames
    pub fn stop(&mut self) {
        self.enter(Phase::Stop);
    }

    /// Adopt a new screen size
    pub fn resize(&mut self, screen: Vec2) {
        if screen == self.screen {
            return;
        }
        self.screen = screen;
        if self.state.lanes.is_some() {
            let lanes = self.config.lanes.unwrap_or(1).max(1);
            self.state
                .set_state(StateUpdate::default().with_lane_size(screen.x / lanes as f32));
        }
        let color = self.player.color;
        self.player = Player::new(screen, self.state.lanes.as_ref(), self.config.player_speed, color);
        log::debug!("Resized to {}x{}", screen.x, screen.y);
    }

    // === Frame ===

    /// Run one frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64, input: TickInput) -> FrameOutcome {
        match self.state.current {
            Phase::Stop => return FrameOutcome::Stop,
            Phase::Play if self.state.paused => return FrameOutcome::Paused,
            _ => {}
        }

        self.clock.advance(now_ms, self.screen.y);
        self.frame.clear();
        self.draw_background();

        if input.tap {
            self.tap();
        }

        match self.state.current {
            Phase::Loading | Phase::Stop => {}
            Phase::Ready => {
                self.effects.update(self.screen, &mut self.rng, &mut self.frame);
                self.player.update(MoveFlags::default(), self.state.lanes.as_ref(), &self.clock, self.screen);
                self.player.draw(&mut self.frame);
            }
            Phase::Play => self.play_frame(now_ms, input),
            Phase::Over => self.over_frame(now_ms),
        }

        self.prev_input = input;
        if self.state.current == Phase::Stop {
            FrameOutcome::Stop
        } else {
            FrameOutcome::Continue
        }
    }

    fn play_frame(&mut self, now_ms: f64, input: TickInput) {
        self.play_frames += 1;
        self.apply_lane_input(input);

        let speed = (self.state.game_speed + self.config.speed_increment).min(self.config.max_speed);
        if speed > self.state.game_speed {
            self.state.set_state(StateUpdate::default().with_game_speed(speed));
        }

        self.spawn.try_spawn(
            self.play_frames,
            &mut self.rng,
            self.screen,
            self.state.lanes.as_ref(),
            &mut self.obstacles,
        );

        self.effects.update(self.screen, &mut self.rng, &mut self.frame);

        let flags = MoveFlags {
            left: input.left,
            right: input.right,
        };
        self.player.update(flags, self.state.lanes.as_ref(), &self.clock, self.screen);

        let (passed, hit) = self.update_obstacles();
        if passed > 0 {
            let score = self.state.score + passed;
            self.state.set_state(StateUpdate::default().with_score(score));
            self.overlay.set_score(score);
        }
        if hit {
            self.on_collision(now_ms);
        }

        self.player.draw(&mut self.frame);

        if self.state.lives < 1 {
            self.enter(Phase::Over);
        }
    }

    fn over_frame(&mut self, now_ms: f64) {
        self.effects.update(self.screen, &mut self.rng, &mut self.frame);
        if self.score_reported || !self.effects.is_empty() {
            return;
        }
        let drained_at = *self.drained_at.get_or_insert(now_ms);
        if now_ms - drained_at >= self.config.score_report_delay_ms {
            self.report_score();
        }
    }

    /// Move, cull, collide and draw obstacles. Returns (passed, hit).
    fn update_obstacles(&mut self) -> (u64, bool) {
        let speed = self.state.game_speed;
        let clock = &self.clock;
        let screen = self.screen;
        let player = &self.player.body;
        let player_lane = self.state.lanes.as_ref().map(|l| l.player_lane);
        let color = self.palette.obstacle;
        let frame = &mut self.frame;

        let mut passed = 0;
        let mut hit = false;
        self.obstacles.retain_mut(|obstacle| {
            obstacle.update(speed, clock);
            if obstacle.is_off_screen(screen) {
                passed += 1;
                return false;
            }
            hit |= obstacle_hits_player(obstacle, player, player_lane);
            obstacle.draw(frame, color);
            true
        });
        (passed, hit)
    }

    /// Throttled reactions to an overlap: life loss, burst, blast + hit sound
    fn on_collision(&mut self, now_ms: f64) {
        let center = self.player.body.center();

        if self.life_throttle.try_fire(now_ms) {
            let lives = self.state.lives - 1;
            self.state.set_state(StateUpdate::default().with_lives(lives));
            self.overlay.set_lives(lives);
            log::info!("Hit! {lives} lives left");
        }

        if self.burst_throttle.try_fire(now_ms) {
            let burst = Burst::new(center, &self.burst, self.palette.burst.clone(), &mut self.rng);
            self.push_effect(burst);
        }

        if self.blast_throttle.try_fire(now_ms) {
            let blast = BlastWave::new(center, &self.blast, self.palette.blast.clone(), &mut self.rng);
            if self.push_effect(blast) {
                self.audio.playback(Sound::Hit, PlaybackOpts::default());
            }
        }
    }

    fn push_effect<E: Into<Effect>>(&mut self, effect: Result<E, GameError>) -> bool {
        match effect {
            Ok(effect) => {
                self.effects.push(effect);
                true
            }
            Err(e) => {
                log::warn!("Effect rejected: {e}");
                false
            }
        }
    }

    fn apply_lane_input(&mut self, input: TickInput) {
        let Some(layout) = self.state.lanes.as_ref() else {
            return;
        };
        let left = input.left && !self.prev_input.left;
        let right = input.right && !self.prev_input.right;
        let delta = match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => return,
        };
        let lane = layout.shifted(delta);
        if lane != layout.player_lane {
            self.state.set_state(StateUpdate::default().with_player_lane(lane));
        }
    }

    fn draw_background(&mut self) {
        self.frame.rect(Vec2::ZERO, self.screen, self.palette.background);
        if let Some(layout) = &self.state.lanes {
            for i in 1..layout.lanes {
                let x = layout.lane_size * i as f32;
                self.frame
                    .rect(Vec2::new(x - 1.0, 0.0), Vec2::new(2.0, self.screen.y), colors::LANE_DIVIDER);
            }
        }
    }

    fn report_score(&mut self) {
        let score = self.state.score;
        log::info!("Reporting score {score}");
        if let Some(reporter) = self.reporter.as_mut() {
            reporter(score);
        }
        self.score_reported = true;
    }

    // === Phase transitions ===

    /// Reset the run and enter play
    fn start_run(&mut self) {
        let lanes = self.config.lanes.map(|n| LaneLayout::new(n, self.screen.x));
        let middle = lanes.as_ref().map(|l| l.player_lane);
        let mut update = StateUpdate::default()
            .with_score(0)
            .with_lives(self.config.lives)
            .with_game_speed(self.config.start_speed)
            .with_paused(false);
        if let Some(lane) = middle {
            update = update.with_player_lane(lane);
        }
        self.state.set_state(update);

        self.player = Player::new(self.screen, self.state.lanes.as_ref(), self.config.player_speed, self.palette.player);
        self.obstacles.clear();
        self.play_frames = 0;
        self.life_throttle.reset();
        self.burst_throttle.reset();
        self.blast_throttle.reset();
        self.drained_at = None;
        self.score_reported = false;

        self.audio.playback(Sound::Start, PlaybackOpts::default());
        self.overlay.hide(OverlayElement::Banner);
        self.overlay.hide(OverlayElement::Button);
        self.overlay.hide(OverlayElement::Instructions);
        self.overlay.set_lives(self.state.lives);
        self.overlay.set_score(0);
        self.overlay.set_pause(false);
        self.overlay.show(OverlayElement::Lives);
        self.overlay.show(OverlayElement::Score);
        self.overlay.show(OverlayElement::Pause);

        self.enter(Phase::Play);
    }

    /// Switch phase and run its entry action once
    fn enter(&mut self, phase: Phase) {
        self.state.set_state(StateUpdate::phase(phase));
        if !self.state.just_entered(phase) {
            return;
        }
        match phase {
            Phase::Loading => {}
            Phase::Ready => self.on_enter_ready(),
            Phase::Play => self.on_enter_play(),
            Phase::Over => self.on_enter_over(),
            Phase::Stop => self.on_enter_stop(),
        }
        // Re-affirm so `prev` catches up with `current`
        self.state.set_state(StateUpdate::phase(phase));
    }

    fn on_enter_ready(&mut self) {
        let instructions = if self.state.lanes.is_some() {
            "Tap or press left/right to switch lanes"
        } else {
            "Hold left/right to dodge"
        };
        if self.state.prev == Phase::Over {
            self.overlay.set_banner("Game Over");
            self.overlay.set_button("Play again");
        } else {
            self.overlay.set_banner("Dodgefall");
            self.overlay.set_button("Start");
        }
        self.overlay.set_instructions(instructions);
        self.overlay.set_mute(self.state.muted);
        self.overlay.show(OverlayElement::Banner);
        self.overlay.show(OverlayElement::Button);
        self.overlay.show(OverlayElement::Instructions);
        self.overlay.show(OverlayElement::Mute);
        self.overlay.hide(OverlayElement::Pause);
    }

    fn on_enter_play(&mut self) {
        let stream = StarStream::new(self.screen, &self.stars, self.palette.star.clone(), &mut self.rng);
        self.push_effect(stream);
        self.audio.playback(Sound::PowerUp, PlaybackOpts::looped());
    }

    /// Cleanup plus the death sequence: two bursts, three shrinking blasts
    fn on_enter_over(&mut self) {
        log::info!("Game over with score {}", self.state.score);
        self.effects.remove_streams();
        self.obstacles.clear();
        self.audio.stop_playback(Sound::PowerUp);
        self.audio.playback(Sound::GameOver, PlaybackOpts::default());
        self.overlay.set_pause(false);
        self.overlay.hide(OverlayElement::Pause);

        let center = self.player.body.center();
        for factor in [1.5, 1.0] {
            let config = self.burst.scaled(factor);
            let burst = Burst::new(center, &config, self.palette.burst.clone(), &mut self.rng);
            self.push_effect(burst);
        }
        for factor in [2.0, 1.4, 0.8] {
            let config = self.blast.scaled(factor);
            let blast = BlastWave::new(center, &config, self.palette.blast.clone(), &mut self.rng);
            self.push_effect(blast);
        }
        self.drained_at = None;
        self.score_reported = false;
    }

    fn on_enter_stop(&mut self) {
        log::info!("Stopping");
        self.audio.stop_playlist();
        self.overlay.hide(OverlayElement::Pause);
        self.effects.clear();
        self.obstacles.clear();
        self.frame.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ManifestLoader;
    use crate::audio::SilentAudio;
    use crate::overlay::NullOverlay;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SCREEN: Vec2 = Vec2::new(400.0, 800.0);

    fn game_with(config: GameConfig) -> Game {
        Game::create(
            config,
            &AssetManifest::builtin(),
            &mut ManifestLoader,
            SCREEN,
            42,
            Box::new(SilentAudio),
            Box::new(NullOverlay),
        )
        .unwrap()
    }

    fn playing(config: GameConfig) -> Game {
        let mut game = game_with(config);
        game.frame(0.0, TickInput::default());
        game.tap();
        assert_eq!(game.state().current, Phase::Play);
        game
    }

    /// Put an obstacle right on top of the player
    fn place_hit(game: &mut Game) {
        let center = game.player().body.center();
        let lane = game.state().lanes.as_ref().map(|l| l.player_lane);
        game.obstacles_mut().push(Obstacle::new(center, lane));
    }

    fn stream_count(game: &Game) -> usize {
        game.effects().iter().filter(|e| e.is_stream()).count()
    }

    #[test]
    fn test_create_enters_ready() {
        let game = game_with(GameConfig::default());
        assert_eq!(game.state().current, Phase::Ready);
        assert_eq!(game.state().prev, Phase::Ready);
        assert!(game.assets().is_some());
    }

    #[test]
    fn test_asset_failure_aborts_startup() {
        let mut manifest = AssetManifest::builtin();
        manifest.sprites.remove("player");
        let result = Game::create(
            GameConfig::default(),
            &manifest,
            &mut ManifestLoader,
            SCREEN,
            1,
            Box::new(SilentAudio),
            Box::new(NullOverlay),
        );
        assert!(matches!(result, Err(GameError::AssetLoad { .. })));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let config = GameConfig {
            burst_color: "nope".to_string(),
            ..GameConfig::default()
        };
        let result = Game::new(config, SCREEN, 1, Box::new(SilentAudio), Box::new(NullOverlay));
        assert!(matches!(result, Err(GameError::InvalidColor(_))));
    }

    #[test]
    fn test_loading_runs_no_simulation() {
        let mut game =
            Game::new(GameConfig::default(), SCREEN, 1, Box::new(SilentAudio), Box::new(NullOverlay)).unwrap();
        game.frame(0.0, TickInput { tap: true, ..Default::default() });
        assert_eq!(game.state().current, Phase::Loading);
        assert!(game.obstacles().is_empty());
    }

    #[test]
    fn test_play_entry_runs_once() {
        let mut game = playing(GameConfig::default());
        assert_eq!(stream_count(&game), 1);

        // Further taps and frames in play must not re-run the entry action
        game.tap();
        for i in 1..10 {
            game.frame(i as f64 * 16.0, TickInput { tap: true, ..Default::default() });
        }
        assert_eq!(stream_count(&game), 1);
    }

    #[test]
    fn test_life_loss_throttled_100ms() {
        let mut game = playing(GameConfig::default());
        place_hit(&mut game);
        game.frame(1000.0, TickInput::default());
        place_hit(&mut game);
        game.frame(1100.0, TickInput::default());
        assert_eq!(game.state().lives, 2);
    }

    #[test]
    fn test_life_loss_1300ms_apart() {
        let mut game = playing(GameConfig::default());
        place_hit(&mut game);
        game.frame(1000.0, TickInput::default());
        place_hit(&mut game);
        game.frame(2300.0, TickInput::default());
        assert_eq!(game.state().lives, 1);
    }

    #[test]
    fn test_hit_spawns_burst_and_blast() {
        let mut game = playing(GameConfig::default());
        place_hit(&mut game);
        game.frame(1000.0, TickInput::default());
        let bursts = game.effects().iter().filter(|e| matches!(e, Effect::Burst(_))).count();
        let blasts = game.effects().iter().filter(|e| matches!(e, Effect::BlastWave(_))).count();
        assert_eq!((bursts, blasts), (1, 1));
    }

    #[test]
    fn test_death_sequence_and_score_report() {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = reported.clone();
        let config = GameConfig {
            lives: 1,
            ..GameConfig::default()
        };
        let mut game = game_with(config).on_score(move |s| sink.borrow_mut().push(s));
        game.tap();

        place_hit(&mut game);
        game.frame(1000.0, TickInput::default());
        assert_eq!(game.state().current, Phase::Over);
        assert!(game.obstacles().is_empty());
        assert_eq!(stream_count(&game), 0);
        let bursts = game.effects().iter().filter(|e| matches!(e, Effect::Burst(_))).count();
        let blasts = game.effects().iter().filter(|e| matches!(e, Effect::BlastWave(_))).count();
        // Collision burst/blast plus the death sequence
        assert_eq!((bursts, blasts), (3, 4));

        let mut now = 1000.0;
        while !game.effects().is_empty() && now < 60_000.0 {
            now += 16.0;
            game.frame(now, TickInput::default());
        }
        assert!(game.effects().is_empty());
        assert!(reported.borrow().is_empty());

        for _ in 0..100 {
            now += 16.0;
            game.frame(now, TickInput::default());
        }
        assert_eq!(*reported.borrow(), vec![0]);
    }

    #[test]
    fn test_restart_cycle() {
        let config = GameConfig {
            lives: 1,
            ..GameConfig::default()
        };
        let mut game = playing(config);
        place_hit(&mut game);
        game.frame(1000.0, TickInput::default());
        assert_eq!(game.state().current, Phase::Over);

        let mut now = 1000.0;
        while !game.score_reported && now < 60_000.0 {
            now += 16.0;
            game.frame(now, TickInput::default());
        }
        game.tap();
        assert_eq!(game.state().current, Phase::Ready);
        game.tap();
        assert_eq!(game.state().current, Phase::Play);
        assert_eq!(game.state().lives, 1);
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_tap_while_draining_is_ignored() {
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = reported.clone();
        let config = GameConfig {
            lives: 1,
            ..GameConfig::default()
        };
        let mut game = game_with(config).on_score(move |s| sink.borrow_mut().push(s));
        game.tap();
        place_hit(&mut game);
        game.frame(16.0, TickInput::default());
        assert_eq!(game.state().current, Phase::Over);

        let live = game.effects().len();
        game.frame(32.0, TickInput { tap: true, ..Default::default() });
        game.tap();
        assert_eq!(game.state().current, Phase::Over);
        assert!(reported.borrow().is_empty());
        assert!(game.effects().len() <= live);

        // Once drained and reported, a tap restarts
        let mut now = 32.0;
        while reported.borrow().is_empty() && now < 60_000.0 {
            now += 16.0;
            game.frame(now, TickInput::default());
        }
        assert!(game.effects().is_empty());
        assert_eq!(*reported.borrow(), vec![0]);
        game.tap();
        assert_eq!(game.state().current, Phase::Ready);
        assert_eq!(*reported.borrow(), vec![0]);
    }

    #[test]
    fn test_pause_only_in_play() {
        let mut game = game_with(GameConfig::default());
        assert!(!game.toggle_pause());
        assert!(!game.state().paused);

        game.tap();
        assert!(game.toggle_pause());
        assert_eq!(game.frame(100.0, TickInput::default()), FrameOutcome::Paused);
        assert!(game.toggle_pause());
        assert_eq!(game.frame(5000.0, TickInput::default()), FrameOutcome::Continue);
        assert_eq!(game.clock().rate, 0.0);
    }

    #[test]
    fn test_mute_any_phase() {
        let mut game = game_with(GameConfig::default());
        game.toggle_mute();
        assert!(game.state().muted);
        assert_eq!(game.state().current, Phase::Ready);
    }

    #[test]
    fn test_lane_change_on_rising_edge() {
        let config = GameConfig {
            lanes: Some(5),
            ..GameConfig::default()
        };
        let mut game = playing(config);
        let lane = |g: &Game| g.state().lanes.as_ref().unwrap().player_lane;
        assert_eq!(lane(&game), 2);

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        game.frame(16.0, left);
        game.frame(32.0, left);
        game.frame(48.0, left);
        assert_eq!(lane(&game), 1);

        game.frame(64.0, TickInput::default());
        game.frame(80.0, left);
        assert_eq!(lane(&game), 0);
        assert_eq!(
            game.player().body.center().x,
            game.state().lanes.as_ref().unwrap().lane_center(0)
        );
    }

    #[test]
    fn test_lane_gate_blocks_other_lane() {
        let config = GameConfig {
            lanes: Some(3),
            ..GameConfig::default()
        };
        let mut game = playing(config);
        let center = game.player().body.center();
        game.obstacles_mut().push(Obstacle::new(center, Some(0)));
        game.frame(1000.0, TickInput::default());
        assert_eq!(game.state().lives, 3);
    }

    #[test]
    fn test_speed_monotone_and_capped() {
        let config = GameConfig {
            speed_increment: 1.0,
            max_speed: 6.0,
            ..GameConfig::default()
        };
        let mut game = playing(config);
        let mut last = game.state().game_speed;
        for i in 1..10 {
            game.frame(i as f64 * 16.0, TickInput::default());
            assert!(game.state().game_speed >= last);
            last = game.state().game_speed;
        }
        assert_eq!(last, 6.0);
    }

    #[test]
    fn test_score_counts_passed_obstacles() {
        let mut game = playing(GameConfig::default());
        game.obstacles_mut()
            .push(Obstacle::new(Vec2::new(20.0, SCREEN.y + 40.0), None));
        game.frame(16.0, TickInput::default());
        assert_eq!(game.state().score, 1);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut game = playing(GameConfig::default());
        game.stop();
        assert_eq!(game.frame(16.0, TickInput::default()), FrameOutcome::Stop);
        game.tap();
        assert_eq!(game.state().current, Phase::Stop);
        assert!(game.effects().is_empty());
    }
}
