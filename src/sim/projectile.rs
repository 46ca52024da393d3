//! Player and enemy bullets: straight-line motion, off-screen deactivation

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// A shot fired upward by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub rect: Rect,
    pub vel_y: f32,
    pub active: bool,
}

impl PlayerBullet {
    /// Spawn centered horizontally on `x` with its top edge at `y`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x - BULLET_WIDTH / 2.0, y, BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: -BULLET_SPEED,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.y += self.vel_y * dt;

        if self.rect.bottom() < 0.0 || self.rect.top() > GAME_HEIGHT {
            self.active = false;
        }
    }
}

/// A shot fired downward by an enemy, with an optional sideways lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub rect: Rect,
    pub vel: Vec2,
    pub active: bool,
}

impl EnemyBullet {
    pub fn new(x: f32, y: f32, vel_x: f32) -> Self {
        Self {
            rect: Rect::new(
                x - ENEMY_BULLET_WIDTH / 2.0,
                y,
                ENEMY_BULLET_WIDTH,
                ENEMY_BULLET_HEIGHT,
            ),
            vel: Vec2::new(vel_x, ENEMY_BULLET_SPEED),
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.rect.translate(self.vel, dt);

        // Never leaves through the top: it spawns on-screen heading down
        if self.rect.y > GAME_HEIGHT || self.rect.x < 0.0 || self.rect.x > GAME_WIDTH {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_bullet_moves_up_and_expires() {
        let mut bullet = PlayerBullet::new(100.0, 20.0);
        assert_eq!(bullet.rect.x, 98.0);

        // Bottom edge still on-screen at y = -10 (bottom = 6)
        bullet.update(0.05);
        assert!((bullet.rect.y + 10.0).abs() < 1e-4);
        assert!(bullet.active);

        bullet.update(0.05);
        assert!(!bullet.active);
    }

    #[test]
    fn test_enemy_bullet_leaves_sides_and_bottom() {
        let mut down = EnemyBullet::new(240.0, 630.0, 0.0);
        down.update(0.1);
        assert!(!down.active);

        let mut left = EnemyBullet::new(3.0, 100.0, -100.0);
        left.update(0.1);
        assert!(!left.active);

        let mut right = EnemyBullet::new(478.0, 100.0, 100.0);
        right.update(0.1);
        assert!(!right.active);

        let mut fine = EnemyBullet::new(240.0, 100.0, 30.0);
        fine.update(0.1);
        assert!(fine.active);
        assert!((fine.rect.y - 125.0).abs() < 1e-4);
    }
}
