//! Integration test harness.
//!
//! Games run headless: recording doubles stand in for audio and the overlay,
//! and frames are stepped by hand with explicit timestamps.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dodgefall::assets::{AssetManifest, ManifestLoader};
use dodgefall::audio::{Audio, PlaybackOpts, Sound};
use dodgefall::overlay::{Overlay, OverlayElement};
use dodgefall::settings::GameConfig;
use dodgefall::sim::{Game, Obstacle};
use glam::Vec2;

pub const SCREEN: Vec2 = Vec2::new(400.0, 800.0);

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    Play(Sound, bool),
    Stop(Sound),
    StopAll,
    Muted(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCall {
    Banner(String),
    Button(String),
    Instructions(String),
    Lives(i32),
    Score(u64),
    Mute(bool),
    Pause(bool),
    Show(OverlayElement),
    Hide(OverlayElement),
}

pub type Log<T> = Rc<RefCell<Vec<T>>>;

pub struct RecordingAudio(pub Log<AudioEvent>);

impl Audio for RecordingAudio {
    fn playback(&mut self, sound: Sound, opts: PlaybackOpts) {
        self.0.borrow_mut().push(AudioEvent::Play(sound, opts.looped));
    }

    fn stop_playback(&mut self, sound: Sound) {
        self.0.borrow_mut().push(AudioEvent::Stop(sound));
    }

    fn stop_playlist(&mut self) {
        self.0.borrow_mut().push(AudioEvent::StopAll);
    }

    fn set_muted(&mut self, muted: bool) {
        self.0.borrow_mut().push(AudioEvent::Muted(muted));
    }
}

pub struct RecordingOverlay(pub Log<OverlayCall>);

impl Overlay for RecordingOverlay {
    fn set_banner(&mut self, text: &str) {
        self.0.borrow_mut().push(OverlayCall::Banner(text.to_string()));
    }

    fn set_button(&mut self, text: &str) {
        self.0.borrow_mut().push(OverlayCall::Button(text.to_string()));
    }

    fn set_instructions(&mut self, text: &str) {
        self.0.borrow_mut().push(OverlayCall::Instructions(text.to_string()));
    }

    fn set_lives(&mut self, lives: i32) {
        self.0.borrow_mut().push(OverlayCall::Lives(lives));
    }

    fn set_score(&mut self, score: u64) {
        self.0.borrow_mut().push(OverlayCall::Score(score));
    }

    fn set_mute(&mut self, muted: bool) {
        self.0.borrow_mut().push(OverlayCall::Mute(muted));
    }

    fn set_pause(&mut self, paused: bool) {
        self.0.borrow_mut().push(OverlayCall::Pause(paused));
    }

    fn show(&mut self, element: OverlayElement) {
        self.0.borrow_mut().push(OverlayCall::Show(element));
    }

    fn hide(&mut self, element: OverlayElement) {
        self.0.borrow_mut().push(OverlayCall::Hide(element));
    }
}

/// A loaded game (in `ready`) plus the logs of its collaborators
pub struct Harness {
    pub game: Game,
    pub audio: Log<AudioEvent>,
    pub overlay: Log<OverlayCall>,
}

pub fn harness(config: GameConfig) -> Harness {
    let audio = Log::default();
    let overlay = Log::default();
    let game = Game::create(
        config,
        &AssetManifest::builtin(),
        &mut ManifestLoader,
        SCREEN,
        1234,
        Box::new(RecordingAudio(audio.clone())),
        Box::new(RecordingOverlay(overlay.clone())),
    )
    .expect("game should load");
    Harness {
        game,
        audio,
        overlay,
    }
}

/// Drop an obstacle right on the player (same lane in lane mode)
pub fn place_hit(game: &mut Game) {
    let center = game.player().body.center();
    let lane = game.state().lanes.as_ref().map(|l| l.player_lane);
    game.obstacles_mut().push(Obstacle::new(center, lane));
}

pub fn count<T: PartialEq>(log: &Log<T>, item: &T) -> usize {
    log.borrow().iter().filter(|e| *e == item).count()
}
