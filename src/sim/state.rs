//! Game state and orchestration
//!
//! [`Game`] owns every live collection. Only the tick and collision passes
//! mutate it; renderers and front ends read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyKind;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::projectile::{EnemyBullet, PlayerBullet};
use super::score::ScoreManager;
use super::wave::WaveManager;
use crate::audio::{AudioCue, SoundEffect};
use crate::consts::*;
use crate::persistence::HighScoreStore;
use crate::settings::SimConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start input
    Title,
    Playing,
    Paused,
    /// Between-wave banner (2 seconds)
    WaveTransition,
    /// Explosion delay before respawn or game over
    PlayerDeath,
    GameOver,
    /// Score cap reached
    Victory,
}

/// Visual event for the particle/camera collaborator.
///
/// Particle counts are already scaled by the configured particle level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    EnemyExplosion {
        pos: Vec2,
        kind: EnemyKind,
        particles: u32,
    },
    PlayerExplosion { pos: Vec2, particles: u32 },
    PowerUpCollect {
        pos: Vec2,
        kind: PowerUpKind,
        particles: u32,
    },
    ScreenShake { intensity: f32 },
}

/// Serializable snapshot for HUDs and the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    /// 0-based index into the wave order
    pub wave: usize,
    pub mega_cycle: u32,
    /// Banner name of the current (or upcoming, between waves) wave
    pub wave_name: String,
    pub energy: f32,
    /// Energy at or below the warning threshold
    pub low_energy: bool,
    /// Score multiplier window still open
    pub multiplier_active: bool,
    pub enemies_killed: u32,
    pub phase: GamePhase,
}

/// Complete game state
#[derive(Debug)]
pub struct Game {
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub power_ups: Vec<PowerUp>,
    pub waves: WaveManager,
    pub score: ScoreManager,
    pub lives: u32,
    /// Drains continuously; refilled each wave
    pub energy: f32,
    pub energy_warning_played: bool,
    /// Remaining wave-transition delay (ms)
    pub transition_ms: f32,
    /// Remaining death delay (ms)
    pub death_ms: f32,
    /// Simulation clock (ms), advanced only by simulated frames
    pub now_ms: f64,
    /// Current camera shake, decays every frame
    pub shake: f32,
    pub enemies_killed: u32,
    pub(crate) rng: Pcg32,
    config: SimConfig,
    effects: Vec<Effect>,
}

impl Game {
    /// New game sitting on the title screen; the high score is loaded from `store`
    pub fn new(config: SimConfig, seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        Self {
            phase: GamePhase::Title,
            player: Player::new(),
            bullets: Vec::with_capacity(PLAYER_MAX_BULLETS),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            waves: WaveManager::new(config),
            score: ScoreManager::new(store),
            lives: config.starting_lives,
            energy: ENERGY_MAX,
            energy_warning_played: false,
            transition_ms: 0.0,
            death_ms: 0.0,
            now_ms: 0.0,
            shake: 0.0,
            enemies_killed: 0,
            rng: Pcg32::seed_from_u64(seed),
            config,
            effects: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            score: self.score.score(),
            high_score: self.score.high_score(),
            lives: self.lives,
            wave: self.waves.wave(),
            mega_cycle: self.waves.cycle(),
            wave_name: self.waves.current_kind().name().to_string(),
            energy: self.energy,
            low_energy: self.energy <= ENERGY_WARNING_THRESHOLD,
            multiplier_active: self.score.has_multiplier(self.now_ms),
            enemies_killed: self.enemies_killed,
            phase: self.phase,
        }
    }

    /// Take the effects emitted since the last call
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn emit(&mut self, effect: Effect) {
        if let Effect::ScreenShake { intensity } = effect {
            self.shake = intensity;
        }
        self.effects.push(effect);
    }

    pub(crate) fn enemy_explosion(&mut self, pos: Vec2, kind: EnemyKind) {
        let particles = self.config.particles(ENEMY_EXPLOSION_PARTICLES);
        self.emit(Effect::EnemyExplosion {
            pos,
            kind,
            particles,
        });
    }

    /// Full restart: score, waves, player, collections, lives and energy
    pub(crate) fn start_game(&mut self) {
        self.score.reset();
        self.waves.reset();
        self.player.reset();
        self.player.shield = false;
        self.player.rapid_fire = false;
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.power_ups.clear();
        self.effects.clear();
        self.lives = self.config.starting_lives;
        self.energy = ENERGY_MAX;
        self.energy_warning_played = false;
        self.enemies_killed = 0;
        self.waves.spawn_wave(&mut self.rng);
        self.phase = GamePhase::Playing;
        log::info!("Game started with {} lives", self.lives);
    }

    /// Lose a life and start the death delay
    pub(crate) fn kill_player(&mut self, audio: &mut dyn AudioCue) {
        self.lives = self.lives.saturating_sub(1);
        audio.play(SoundEffect::PlayerHit);

        let pos = self.player.rect.center();
        let particles = self.config.particles(PLAYER_EXPLOSION_PARTICLES);
        self.emit(Effect::PlayerExplosion { pos, particles });
        self.emit(Effect::ScreenShake {
            intensity: DEATH_SHAKE,
        });

        self.player.active = false;
        self.death_ms = PLAYER_DEATH_MS;
        self.phase = GamePhase::PlayerDeath;
        log::info!("Player destroyed, {} lives left", self.lives);
    }

    /// Award the energy bonus and move to the next wave's banner
    pub(crate) fn complete_wave(&mut self, audio: &mut dyn AudioCue) {
        let bonus_energy = self.energy.max(0.0).floor() as u32;
        self.score
            .add_bonus_points(self.waves.current_wave_points(), bonus_energy, self.now_ms);
        audio.play(SoundEffect::WaveComplete);
        log::info!(
            "Wave {} cleared, bonus {} x {}",
            self.waves.wave() + 1,
            self.waves.current_wave_points(),
            bonus_energy
        );

        self.waves.next_wave();
        self.transition_ms = WAVE_TRANSITION_MS;
        self.phase = GamePhase::WaveTransition;

        self.bullets.clear();
        self.enemy_bullets.clear();
    }

    /// Grant a life if the score just crossed another threshold
    pub(crate) fn check_extra_life(&mut self, audio: &mut dyn AudioCue) {
        if self.score.check_extra_life() && self.lives < MAX_LIVES {
            self.lives += 1;
            audio.play(SoundEffect::ExtraLife);
            log::info!("Extra life, now {}", self.lives);
        }
    }
}
