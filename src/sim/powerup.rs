//! Falling collectibles dropped by destroyed enemies

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    EnergyBoost,
    ScoreMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::EnergyBoost,
        PowerUpKind::ScoreMultiplier,
    ];

    /// Uniform pick over all kinds
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Glyph drawn on the capsule
    pub fn symbol(self) -> &'static str {
        match self {
            PowerUpKind::RapidFire => "R",
            PowerUpKind::Shield => "S",
            PowerUpKind::EnergyBoost => "E",
            PowerUpKind::ScoreMultiplier => "x2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "RAPID_FIRE" => Some(PowerUpKind::RapidFire),
            "SHIELD" => Some(PowerUpKind::Shield),
            "ENERGY_BOOST" => Some(PowerUpKind::EnergyBoost),
            "SCORE_MULTIPLIER" => Some(PowerUpKind::ScoreMultiplier),
            _ => None,
        }
    }
}

/// Roll the per-kill drop chance
pub fn should_drop<R: Rng>(rng: &mut R) -> bool {
    rng.random_bool(POWERUP_DROP_CHANCE)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub active: bool,
    /// Render-only bob phase
    pub bob_time: f32,
}

impl PowerUp {
    /// Centered horizontally on `x`, top edge at `y`
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::new(x - POWERUP_WIDTH / 2.0, y, POWERUP_WIDTH, POWERUP_HEIGHT),
            kind,
            active: true,
            bob_time: 0.0,
        }
    }

    pub fn random<R: Rng>(x: f32, y: f32, rng: &mut R) -> Self {
        Self::new(x, y, PowerUpKind::random(rng))
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.y += POWERUP_FALL_SPEED * dt;
        self.bob_time += dt * 5.0;

        if self.rect.y > GAME_HEIGHT {
            self.active = false;
        }
    }

    /// Vertical draw offset for the bobbing animation
    pub fn bob_offset(&self) -> f32 {
        self.bob_time.sin() * 3.0
    }
}
