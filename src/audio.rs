//! Sound cues
//!
//! The simulation only names the cue it wants played. Each cue maps to a small
//! table of procedural voices (oscillator or noise bursts) that an output
//! backend can synthesize; nothing here blocks or reports back.

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Enemy destroyed
    EnemyHit,
    /// Player destroyed
    PlayerHit,
    /// Power-up collected or shield absorbed a hit
    PowerUp,
    WaveComplete,
    GameOver,
    /// Energy dropped below the warning threshold
    EnergyWarning,
    ExtraLife,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 8] = [
        SoundEffect::Shoot,
        SoundEffect::EnemyHit,
        SoundEffect::PlayerHit,
        SoundEffect::PowerUp,
        SoundEffect::WaveComplete,
        SoundEffect::GameOver,
        SoundEffect::EnergyWarning,
        SoundEffect::ExtraLife,
    ];

    /// Cue name as used by front ends
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::EnemyHit => "enemyHit",
            SoundEffect::PlayerHit => "playerHit",
            SoundEffect::PowerUp => "powerUp",
            SoundEffect::WaveComplete => "waveComplete",
            SoundEffect::GameOver => "gameOver",
            SoundEffect::EnergyWarning => "energyWarning",
            SoundEffect::ExtraLife => "extraLife",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|effect| effect.name() == name)
    }

    /// Voices making up this cue, at unit volume
    pub fn voices(self) -> &'static [Voice] {
        match self {
            SoundEffect::Shoot => SHOOT,
            SoundEffect::EnemyHit => ENEMY_HIT,
            SoundEffect::PlayerHit => PLAYER_HIT,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::WaveComplete => WAVE_COMPLETE,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::EnergyWarning => ENERGY_WARNING,
            SoundEffect::ExtraLife => EXTRA_LIFE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    /// Low-passed white noise; `start_hz`/`end_hz` sweep the cutoff
    Noise,
}

/// One oscillator (or noise burst) with an exponential sweep and decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Offset from the cue trigger (seconds)
    pub delay: f32,
    pub duration: f32,
    pub gain: f32,
}

const fn tone(waveform: Waveform, hz: f32, delay: f32, duration: f32, gain: f32) -> Voice {
    Voice {
        waveform,
        start_hz: hz,
        end_hz: hz,
        delay,
        duration,
        gain,
    }
}

const fn sweep(waveform: Waveform, from: f32, to: f32, duration: f32, gain: f32) -> Voice {
    Voice {
        waveform,
        start_hz: from,
        end_hz: to,
        delay: 0.0,
        duration,
        gain,
    }
}

const SHOOT: &[Voice] = &[sweep(Waveform::Square, 880.0, 220.0, 0.1, 0.3)];

const ENEMY_HIT: &[Voice] = &[
    sweep(Waveform::Square, 200.0, 80.0, 0.15, 0.4),
    // Boing overtone
    sweep(Waveform::Sine, 600.0, 300.0, 0.1, 0.2),
];

const PLAYER_HIT: &[Voice] = &[sweep(Waveform::Noise, 2000.0, 100.0, 0.5, 0.5)];

const POWER_UP: &[Voice] = &[
    tone(Waveform::Sine, 440.0, 0.0, 0.15, 0.3),
    tone(Waveform::Sine, 550.0, 0.05, 0.15, 0.3),
    tone(Waveform::Sine, 660.0, 0.10, 0.15, 0.3),
    tone(Waveform::Sine, 880.0, 0.15, 0.15, 0.3),
];

const WAVE_COMPLETE: &[Voice] = &[
    tone(Waveform::Square, 523.0, 0.0, 0.3, 0.25),
    tone(Waveform::Square, 659.0, 0.1, 0.3, 0.25),
    tone(Waveform::Square, 784.0, 0.2, 0.3, 0.25),
    tone(Waveform::Square, 1047.0, 0.3, 0.3, 0.25),
];

const GAME_OVER: &[Voice] = &[
    tone(Waveform::Sawtooth, 440.0, 0.0, 0.4, 0.3),
    tone(Waveform::Sawtooth, 392.0, 0.2, 0.4, 0.3),
    tone(Waveform::Sawtooth, 349.0, 0.4, 0.4, 0.3),
    tone(Waveform::Sawtooth, 294.0, 0.6, 0.4, 0.3),
];

// Two short beeps
const ENERGY_WARNING: &[Voice] = &[
    tone(Waveform::Square, 440.0, 0.0, 0.05, 0.15),
    tone(Waveform::Square, 440.0, 0.1, 0.05, 0.15),
];

const EXTRA_LIFE: &[Voice] = &[
    tone(Waveform::Sine, 523.0, 0.0, 0.2, 0.3),
    tone(Waveform::Sine, 659.0, 0.08, 0.2, 0.3),
    tone(Waveform::Sine, 784.0, 0.16, 0.2, 0.3),
    tone(Waveform::Sine, 659.0, 0.24, 0.2, 0.3),
    tone(Waveform::Sine, 784.0, 0.32, 0.2, 0.3),
    tone(Waveform::Sine, 1047.0, 0.40, 0.2, 0.3),
];

/// Fire-and-forget cue sink the simulation talks to
pub trait AudioCue {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Remembers cues in order (tests, replays)
#[derive(Debug, Clone, Default)]
pub struct CueRecorder {
    pub cues: Vec<SoundEffect>,
}

impl CueRecorder {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.cues.iter().filter(|&&cue| cue == effect).count()
    }

    pub fn clear(&mut self) {
        self.cues.clear();
    }
}

impl AudioCue for CueRecorder {
    fn play(&mut self, effect: SoundEffect) {
        self.cues.push(effect);
    }
}

/// Volume-aware cue scheduler
///
/// Turns cues into gain-scaled voices. Without an output device attached the
/// voices are only logged.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.sound_volume.clamp(0.0, 1.0),
            muted: settings.sound_muted,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Voices for `effect` with gains scaled by the current volume; empty when silent
    pub fn schedule(&self, effect: SoundEffect) -> Vec<Voice> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Vec::new();
        }
        effect
            .voices()
            .iter()
            .map(|voice| Voice {
                gain: voice.gain * vol,
                ..*voice
            })
            .collect()
    }

    /// Number of cues that produced sound
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioCue for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let voices = self.schedule(effect);
        if voices.is_empty() {
            return;
        }
        self.played += 1;
        log::debug!("cue {} ({} voices)", effect.name(), voices.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_name(effect.name()), Some(effect));
        }
        assert_eq!(SoundEffect::from_name("laser"), None);
    }

    #[test]
    fn test_every_cue_has_voices() {
        for effect in SoundEffect::ALL {
            assert!(!effect.voices().is_empty(), "{effect:?}");
        }
    }

    #[test]
    fn test_volume_scales_gain() {
        let mut audio = AudioManager::default();
        audio.set_master_volume(0.5);
        let voices = audio.schedule(SoundEffect::Shoot);
        assert_eq!(voices.len(), 1);
        assert!((voices[0].gain - 0.15).abs() < 1e-6);
        assert_eq!(voices[0].start_hz, 880.0);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::default();
        audio.set_muted(true);
        audio.play(SoundEffect::GameOver);
        assert!(audio.schedule(SoundEffect::GameOver).is_empty());
        assert_eq!(audio.played(), 0);

        audio.set_muted(false);
        audio.play(SoundEffect::GameOver);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_recorder_counts() {
        let mut recorder = CueRecorder::default();
        recorder.play(SoundEffect::Shoot);
        recorder.play(SoundEffect::Shoot);
        recorder.play(SoundEffect::EnemyHit);
        assert_eq!(recorder.count(SoundEffect::Shoot), 2);
        assert_eq!(recorder.cues.len(), 3);
    }
}
