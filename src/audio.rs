//! Audio playback collaborator
//!
//! The game only fires and stops named sounds. On web the sounds are
//! procedurally generated with the Web Audio API; no external files needed.

use std::fmt;

/// Named sounds the game triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Run started
    Start,
    /// Background loop during play
    PowerUp,
    /// Player struck (once per blast wave)
    Hit,
    GameOver,
}

impl Sound {
    pub const ALL: [Sound; 4] = [Sound::Start, Sound::PowerUp, Sound::Hit, Sound::GameOver];

    /// Key used in asset manifests
    pub fn key(&self) -> &'static str {
        match self {
            Sound::Start => "start",
            Sound::PowerUp => "powerUp",
            Sound::Hit => "hit",
            Sound::GameOver => "gameOver",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Optional playback window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaybackOpts {
    /// Repeat until stopped
    pub looped: bool,
    /// Offset (seconds) before the sound starts
    pub start: f64,
    /// Absolute cut-off (seconds after the call); `None` plays to the end
    pub end: Option<f64>,
}

impl PlaybackOpts {
    pub fn looped() -> Self {
        Self {
            looped: true,
            ..Default::default()
        }
    }
}

/// What the game needs from a sound backend
pub trait Audio {
    fn playback(&mut self, sound: Sound, opts: PlaybackOpts);

    /// Halt every in-flight instance of `sound`
    fn stop_playback(&mut self, sound: Sound);

    /// Halt everything
    fn stop_playlist(&mut self);

    /// Suspend (or resume) the whole output rather than individual sounds
    fn set_muted(&mut self, muted: bool);
}

/// Backend that plays nothing (native builds, headless runs)
#[derive(Debug, Default)]
pub struct SilentAudio;

impl Audio for SilentAudio {
    fn playback(&mut self, sound: Sound, _opts: PlaybackOpts) {
        log::debug!("(silent) play {sound}");
    }

    fn stop_playback(&mut self, _sound: Sound) {}

    fn stop_playlist(&mut self) {}

    fn set_muted(&mut self, _muted: bool) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{Audio, PlaybackOpts, Sound};

    /// Procedural Web Audio backend
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
        /// Oscillators still scheduled, per sound, so they can be cut short
        voices: HashMap<Sound, Vec<OscillatorNode>>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.8,
                muted: false,
                voices: HashMap::new(),
            }
        }

        /// Resume a context the browser suspended before the first gesture
        fn unlock(&self, ctx: &AudioContext) {
            if !self.muted && ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Schedule a note; returns the node so it can be tracked
        #[allow(clippy::too_many_arguments)]
        fn note(
            ctx: &AudioContext,
            freq: f32,
            to_freq: Option<f32>,
            osc_type: OscillatorType,
            level: f32,
            at: f64,
            len: f64,
            cut: Option<f64>,
        ) -> Option<OscillatorNode> {
            let (osc, gain) = Self::create_osc(ctx, freq, osc_type)?;
            gain.gain().set_value_at_time(level, at).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, at + len)
                .ok();
            if let Some(to) = to_freq {
                osc.frequency().set_value_at_time(freq, at).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to, at + len)
                    .ok();
            }
            osc.start_with_when(at).ok();
            let stop = cut.map_or(at + len + 0.05, |c| c.min(at + len + 0.05));
            osc.stop_with_when(stop).ok();
            Some(osc)
        }

        fn render(&self, ctx: &AudioContext, sound: Sound, opts: PlaybackOpts) -> Vec<OscillatorNode> {
            let vol = self.volume;
            let t = ctx.current_time() + opts.start.max(0.0);
            let cut = opts.end.map(|e| ctx.current_time() + e);
            let mut nodes = Vec::new();

            match sound {
                Sound::Start => {
                    for (i, freq) in [300.0, 450.0, 600.0].iter().enumerate() {
                        let at = t + i as f64 * 0.08;
                        nodes.extend(Self::note(ctx, *freq, None, OscillatorType::Triangle, vol * 0.3, at, 0.15, cut));
                    }
                }
                Sound::Hit => {
                    nodes.extend(Self::note(ctx, 100.0, Some(30.0), OscillatorType::Sawtooth, vol * 0.5, t, 0.4, cut));
                    nodes.extend(Self::note(ctx, 1500.0, None, OscillatorType::Square, vol * 0.2, t, 0.1, cut));
                }
                Sound::GameOver => {
                    for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                        let at = t + i as f64 * 0.2;
                        nodes.extend(Self::note(ctx, *freq, None, OscillatorType::Sine, vol * 0.3, at, 0.3, cut));
                    }
                }
                Sound::PowerUp if opts.looped => {
                    // Low drone wobbled by an LFO, running until stopped
                    if let Some((osc, gain)) = Self::create_osc(ctx, 110.0, OscillatorType::Triangle) {
                        gain.gain().set_value_at_time(vol * 0.08, t).ok();
                        if let Some((lfo, depth)) = Self::create_osc(ctx, 0.5, OscillatorType::Sine) {
                            lfo.disconnect().ok();
                            lfo.connect_with_audio_node(&depth).ok();
                            depth.disconnect().ok();
                            depth.gain().set_value(20.0);
                            depth.connect_with_audio_param(&osc.frequency()).ok();
                            lfo.start_with_when(t).ok();
                            nodes.push(lfo);
                        }
                        osc.start_with_when(t).ok();
                        if let Some(c) = cut {
                            osc.stop_with_when(c).ok();
                        }
                        nodes.push(osc);
                    }
                }
                Sound::PowerUp => {
                    nodes.extend(Self::note(ctx, 200.0, Some(800.0), OscillatorType::Square, vol * 0.2, t, 0.3, cut));
                }
            }
            nodes
        }
    }

    impl Audio for WebAudio {
        fn playback(&mut self, sound: Sound, opts: PlaybackOpts) {
            let Some(ctx) = &self.ctx else { return };
            self.unlock(ctx);
            let nodes = self.render(ctx, sound, opts);
            let voices = self.voices.entry(sound).or_default();
            // Only the latest one-shot is tracked; loops accumulate until stopped
            if !opts.looped {
                voices.clear();
            }
            voices.extend(nodes);
        }

        fn stop_playback(&mut self, sound: Sound) {
            if let Some(nodes) = self.voices.remove(&sound) {
                for osc in nodes {
                    let _ = osc.stop();
                }
            }
        }

        fn stop_playlist(&mut self) {
            for sound in Sound::ALL {
                self.stop_playback(sound);
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            let Some(ctx) = &self.ctx else { return };
            let result = if muted { ctx.suspend() } else { ctx.resume() };
            if result.is_err() {
                log::warn!("Failed to {} audio context", if muted { "suspend" } else { "resume" });
            }
        }
    }
}
