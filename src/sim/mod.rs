//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Time comes only from the clamped frame delta (`Game::now_ms`)
//! - Seeded RNG only
//! - No rendering, audio output or platform dependencies

pub mod collision;
pub mod enemy;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{apply_power_up, resolve_collisions};
pub use enemy::{Behavior, Enemy, EnemyKind, WAVE_ORDER};
pub use player::Player;
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::{EnemyBullet, PlayerBullet};
pub use rect::Rect;
pub use score::ScoreManager;
pub use state::{Effect, Game, GamePhase, GameStats};
pub use tick::{TickInput, tick};
pub use wave::WaveManager;
