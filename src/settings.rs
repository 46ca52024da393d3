//! Game settings and preferences
//!
//! Persisted separately from the high score as a JSON file. Fields missing
//! from a stored file take their defaults, so older files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LIVES, STARTING_LIVES};
use crate::persistence;

/// Enemy difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "med" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Enemy speed multiplier
    pub fn speed_mult(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        }
    }

    /// Enemy fire cooldown multiplier (above 1 means fewer shots)
    pub fn fire_rate_mult(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.7,
        }
    }
}

/// Particle density preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParticleLevel {
    Off,
    Low,
    #[default]
    High,
}

impl ParticleLevel {
    pub fn multiplier(&self) -> f32 {
        match self {
            ParticleLevel::Off => 0.0,
            ParticleLevel::Low => 0.5,
            ParticleLevel::High => 1.0,
        }
    }
}

/// Simulation-facing configuration derived from [`Settings`].
///
/// Passed by value into the game and wave manager constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub speed_mult: f32,
    pub fire_rate_mult: f32,
    pub starting_lives: u32,
    pub particle_mult: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            speed_mult: 1.0,
            fire_rate_mult: 1.0,
            starting_lives: STARTING_LIVES,
            particle_mult: 1.0,
        }
    }
}

impl SimConfig {
    /// Scale a base particle count, rounding to the nearest whole particle
    pub fn particles(&self, base: u32) -> u32 {
        (base as f32 * self.particle_mult).round().max(0.0) as u32
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound volume (0.0 - 1.0)
    pub sound_volume: f32,
    pub sound_muted: bool,
    pub difficulty: Difficulty,
    pub particle_level: ParticleLevel,
    /// Lives at the start of a game (3 - 6)
    pub starting_lives: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_volume: 0.3,
            sound_muted: false,
            difficulty: Difficulty::Normal,
            particle_level: ParticleLevel::High,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Settings {
    /// Volume the audio collaborator should actually use
    pub fn effective_volume(&self) -> f32 {
        if self.sound_muted {
            0.0
        } else {
            self.sound_volume
        }
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_starting_lives(&mut self, lives: u32) {
        self.starting_lives = lives.clamp(STARTING_LIVES, MAX_LIVES);
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    /// Re-apply the clamps to values that came from outside (e.g. a hand-edited file)
    pub fn sanitized(mut self) -> Self {
        self.set_sound_volume(self.sound_volume);
        self.set_starting_lives(self.starting_lives);
        self
    }

    /// Configuration the simulation reads
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            speed_mult: self.difficulty.speed_mult(),
            fire_rate_mult: self.difficulty.fire_rate_mult(),
            starting_lives: self.starting_lives.clamp(STARTING_LIVES, MAX_LIVES),
            particle_mult: self.particle_level.multiplier(),
        }
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match persistence::read_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::info!("Using default settings ({e})");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, path: &Path) {
        match persistence::write_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {e}"),
        }
    }
}
