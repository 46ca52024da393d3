//! The player's ship

use serde::{Deserialize, Serialize};

use super::projectile::PlayerBullet;
use super::rect::Rect;
use super::tick::TickInput;
use crate::consts::*;

fn spawn_x() -> f32 {
    GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub active: bool,
    pub vel_x: f32,
    /// Remaining invincibility (ms), counts down each update
    pub invincible_ms: f32,
    /// One-hit shield; cleared only by absorbing a hit
    pub shield: bool,
    pub rapid_fire: bool,
    /// Simulation time at which rapid fire lapses
    pub rapid_fire_end_ms: f64,
    last_fire_ms: Option<f64>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(
                spawn_x(),
                GAME_HEIGHT - PLAYER_Y_OFFSET - PLAYER_HEIGHT,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            active: true,
            vel_x: 0.0,
            invincible_ms: 0.0,
            shield: false,
            rapid_fire: false,
            rapid_fire_end_ms: 0.0,
            last_fire_ms: None,
        }
    }

    /// Re-center, stop, and re-arm invincibility (respawn)
    pub fn reset(&mut self) {
        self.rect.x = spawn_x();
        self.vel_x = 0.0;
        self.invincible_ms = INVINCIBLE_TIME_MS;
        self.active = true;
    }

    /// Apply left/right thrust, then clamp to max speed
    pub fn handle_input(&mut self, input: &TickInput, dt: f32) {
        if input.left {
            self.vel_x -= PLAYER_ACCELERATION * dt;
        }
        if input.right {
            self.vel_x += PLAYER_ACCELERATION * dt;
        }
        self.vel_x = self.vel_x.clamp(-PLAYER_MAX_SPEED, PLAYER_MAX_SPEED);
    }

    pub fn update(&mut self, dt: f32) {
        if self.invincible_ms > 0.0 {
            self.invincible_ms -= dt * 1000.0;
        }

        self.vel_x *= 1.0 - PLAYER_FRICTION * dt;
        self.rect.x += self.vel_x * dt;

        if self.rect.x < 0.0 {
            self.rect.x = 0.0;
            self.vel_x = 0.0;
        }
        if self.rect.right() > GAME_WIDTH {
            self.rect.x = GAME_WIDTH - self.rect.width;
            self.vel_x = 0.0;
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    /// Render-only: hidden on alternate 100 ms slices while invincible
    pub fn blink_hidden(&self) -> bool {
        self.is_invincible() && (self.invincible_ms / 100.0).floor() as i64 % 2 == 0
    }

    pub fn fire_cooldown_ms(&self) -> f64 {
        if self.rapid_fire {
            RAPID_FIRE_RATE_MS
        } else {
            PLAYER_FIRE_RATE_MS
        }
    }

    pub fn can_fire(&self, live_bullets: usize, now_ms: f64) -> bool {
        let cooled = match self.last_fire_ms {
            None => true,
            Some(last) => now_ms - last >= self.fire_cooldown_ms(),
        };
        live_bullets < PLAYER_MAX_BULLETS && cooled
    }

    pub fn fire(&mut self, now_ms: f64) -> PlayerBullet {
        self.last_fire_ms = Some(now_ms);
        PlayerBullet::new(self.rect.center_x(), self.rect.y)
    }

    /// Rapid fire is an absolute deadline, so re-collecting extends it
    pub fn grant_rapid_fire(&mut self, now_ms: f64) {
        self.rapid_fire = true;
        self.rapid_fire_end_ms = now_ms + RAPID_FIRE_DURATION_MS;
    }

    pub fn expire_rapid_fire(&mut self, now_ms: f64) {
        if self.rapid_fire && now_ms >= self.rapid_fire_end_ms {
            self.rapid_fire = false;
        }
    }

    /// Consume the shield if present; true when the hit was absorbed
    pub fn absorb_hit(&mut self) -> bool {
        std::mem::replace(&mut self.shield, false)
    }
}
