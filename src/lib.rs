//! Megamania - a fixed-screen wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, waves, scoring, game state machine)
//! - `settings`: Player preferences and the difficulty config derived from them
//! - `persistence`: High score cell and JSON file helpers
//! - `input`: Held keys to per-frame edge-triggered snapshots
//! - `audio`: Named sound cues and the playback capability
//! - `render`: Read-only draw walk over the simulation

pub mod audio;
pub mod input;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, ParticleLevel, Settings, SimConfig};

/// Game configuration constants
pub mod consts {
    /// Internal playfield resolution
    pub const GAME_WIDTH: f32 = 480.0;
    pub const GAME_HEIGHT: f32 = 640.0;

    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Maximum horizontal speed (px/s)
    pub const PLAYER_MAX_SPEED: f32 = 300.0;
    pub const PLAYER_ACCELERATION: f32 = 1200.0;
    pub const PLAYER_FRICTION: f32 = 8.0;
    /// Gap between the ship and the bottom edge
    pub const PLAYER_Y_OFFSET: f32 = 60.0;
    pub const PLAYER_MAX_BULLETS: usize = 3;
    /// Milliseconds between shots
    pub const PLAYER_FIRE_RATE_MS: f64 = 150.0;
    pub const STARTING_LIVES: u32 = 3;
    pub const MAX_LIVES: u32 = 6;
    pub const EXTRA_LIFE_SCORE: u32 = 10_000;
    /// Invincibility after (re)spawn, in milliseconds
    pub const INVINCIBLE_TIME_MS: f32 = 2000.0;

    /// Player bullet
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 16.0;
    pub const BULLET_SPEED: f32 = 600.0;

    /// Enemy bullet
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 250.0;
    /// Fraction of bullet speed used to lead toward the player
    pub const ENEMY_AIM_FACTOR: f32 = 0.3;
    /// Per-frame chance that a ready enemy actually fires
    pub const ENEMY_FIRE_CHANCE: f64 = 0.02;

    /// Energy (per-wave fuel)
    pub const ENERGY_MAX: f32 = 80.0;
    /// Units drained per second
    pub const ENERGY_DRAIN_RATE: f32 = 2.0;
    pub const ENERGY_WARNING_THRESHOLD: f32 = 20.0;

    /// Waves
    pub const WAVE_ENEMY_COUNT: usize = 8;
    pub const WAVE_TRANSITION_MS: f32 = 2000.0;
    pub const PLAYER_DEATH_MS: f32 = 1500.0;

    /// Scoring
    pub const POWER_UP_SCORE: u32 = 100;
    pub const MAX_SCORE: u32 = 999_999;
    /// Flat point value for every enemy after the first megacycle
    pub const LATE_CYCLE_POINTS: u32 = 90;

    /// Power-ups
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;
    pub const POWERUP_WIDTH: f32 = 24.0;
    pub const POWERUP_HEIGHT: f32 = 24.0;
    pub const POWERUP_FALL_SPEED: f32 = 100.0;
    pub const RAPID_FIRE_DURATION_MS: f64 = 10_000.0;
    pub const RAPID_FIRE_RATE_MS: f64 = 75.0;
    pub const ENERGY_BOOST: f32 = 20.0;
    pub const SCORE_MULTIPLIER: u32 = 2;
    pub const SCORE_MULTIPLIER_DURATION_MS: f64 = 15_000.0;

    /// Difficulty escalation per repeated megacycle
    pub const CYCLE_SPEED_STEP: f32 = 0.08;
    pub const CYCLE_FIRE_RATE_DECAY: f32 = 0.95;

    /// Enemy animation frame period (ms) and frame count
    pub const ENEMY_ANIM_PERIOD_MS: f32 = 150.0;
    pub const ENEMY_ANIM_FRAMES: u8 = 4;

    /// Base particle counts before the settings multiplier
    pub const ENEMY_EXPLOSION_PARTICLES: u32 = 15;
    pub const PLAYER_EXPLOSION_PARTICLES: u32 = 32;
    pub const POWERUP_COLLECT_PARTICLES: u32 = 8;
    pub const DEATH_SHAKE: f32 = 15.0;
}
