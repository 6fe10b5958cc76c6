//! Audio cue catalogue and sinks
//!
//! The simulation never waits on audio: cues are fire-and-forget and the
//! sink decides what, if anything, to play.

use crate::Settings;
use crate::sim::Side;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits the left paddle
    Paddle1Hit,
    /// Ball hits the right paddle
    Paddle2Hit,
    /// Someone scored
    ScoreChanged,
    /// Looping background track
    Music,
}

impl SoundEffect {
    /// Cue for a paddle hit on `side`
    pub fn paddle_hit(side: Side) -> Self {
        match side {
            Side::Left => SoundEffect::Paddle1Hit,
            Side::Right => SoundEffect::Paddle2Hit,
        }
    }

    /// Asset file the cue is loaded from (relative to the data directory)
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Paddle1Hit => "dyingwoman.wav",
            SoundEffect::Paddle2Hit => "dyingman.wav",
            SoundEffect::ScoreChanged => "yes.ogg",
            SoundEffect::Music => "bgm.wav",
        }
    }
}

/// Anything that can play cues
pub trait AudioSink {
    /// Play a one-shot effect
    fn play(&mut self, effect: SoundEffect);
    /// Start the looping background track
    fn start_music(&mut self);
}

/// Audio sink that logs cues instead of playing them
#[derive(Debug, Clone)]
pub struct LogAudio {
    sfx_volume: f32,
    music_volume: f32,
    music_playing: bool,
}

impl LogAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music_playing: false,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        log::debug!(
            "Playing {} at volume {:.2}",
            effect.asset_name(),
            self.sfx_volume
        );
    }

    fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        self.music_playing = true;
        if self.music_volume > 0.0 {
            log::info!(
                "Looping {} at volume {:.2}",
                SoundEffect::Music.asset_name(),
                self.music_volume
            );
        }
    }
}
