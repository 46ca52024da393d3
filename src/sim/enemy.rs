//! Enemy variants
//!
//! Eight enemy types share one base record ([`Enemy`]) and differ only in the
//! per-variant state carried by [`Behavior`]. Movement is a pure function of
//! that state ([`Enemy::movement_pattern`]); random decisions (pauses, dives,
//! column changes) are rolled separately, once per frame, before moving.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::EnemyBullet;
use super::rect::Rect;
use crate::consts::*;
use crate::settings::SimConfig;

/// Enemy type, in wave order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Hamburger,
    Cookie,
    Bug,
    RadialTire,
    Diamond,
    SteamIron,
    BowTie,
    SpaceDice,
}

/// The order waves are played in; wrapping back to the start begins a new megacycle
pub const WAVE_ORDER: [EnemyKind; 8] = [
    EnemyKind::Hamburger,
    EnemyKind::Cookie,
    EnemyKind::Bug,
    EnemyKind::RadialTire,
    EnemyKind::Diamond,
    EnemyKind::SteamIron,
    EnemyKind::BowTie,
    EnemyKind::SpaceDice,
];

/// Target columns a SteamIron moves between (center x)
pub const STEAM_IRON_COLUMNS: [f32; 3] = [80.0, GAME_WIDTH / 2.0, GAME_WIDTH - 80.0];

/// Vertical band a BowTie bounces inside
pub const BOW_TIE_TOP: f32 = 50.0;
pub const BOW_TIE_BOTTOM: f32 = GAME_HEIGHT * 0.6;

/// Distance a Hamburger drops each time it reverses at a wall
pub const HAMBURGER_DROP: f32 = 20.0;
/// How long a late-cycle Hamburger hesitates
pub const HAMBURGER_PAUSE_MS: f32 = 300.0;

const HAMBURGER_PAUSE_CHANCE: f64 = 0.002;
const COOKIE_DIVE_CHANCE: f64 = 0.003;
const STEAM_IRON_RETARGET_CHANCE: f64 = 0.01;

/// Unscaled stats for an enemy type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub points: u32,
    /// px/s
    pub speed: f32,
    /// Cooldown between shots (ms)
    pub fire_rate_ms: f32,
}

impl EnemyKind {
    pub fn base_stats(self) -> BaseStats {
        let (points, speed, fire_rate_ms) = match self {
            EnemyKind::Hamburger => (20, 120.0, 3000.0),
            EnemyKind::Cookie => (30, 80.0, 2500.0),
            EnemyKind::Bug => (40, 100.0, 2000.0),
            EnemyKind::RadialTire => (50, 150.0, 2500.0),
            EnemyKind::Diamond => (60, 110.0, 1500.0),
            EnemyKind::SteamIron => (70, 90.0, 2000.0),
            EnemyKind::BowTie => (80, 100.0, 1200.0),
            EnemyKind::SpaceDice => (90, 130.0, 1800.0),
        };
        BaseStats {
            points,
            speed,
            fire_rate_ms,
        }
    }

    /// Sprite bounds (width, height)
    pub fn size(self) -> (f32, f32) {
        match self {
            EnemyKind::Hamburger => (28.0, 20.0),
            EnemyKind::Cookie => (24.0, 24.0),
            EnemyKind::Bug => (24.0, 16.0),
            EnemyKind::RadialTire => (26.0, 26.0),
            EnemyKind::Diamond => (18.0, 22.0),
            EnemyKind::SteamIron => (28.0, 20.0),
            EnemyKind::BowTie => (30.0, 16.0),
            EnemyKind::SpaceDice => (24.0, 24.0),
        }
    }

    /// Banner name shown between waves
    pub fn name(self) -> &'static str {
        match self {
            EnemyKind::Hamburger => "HAMBURGER",
            EnemyKind::Cookie => "COOKIE",
            EnemyKind::Bug => "BUG",
            EnemyKind::RadialTire => "RADIAL TIRE",
            EnemyKind::Diamond => "DIAMOND",
            EnemyKind::SteamIron => "STEAM IRON",
            EnemyKind::BowTie => "BOW TIE",
            EnemyKind::SpaceDice => "SPACE DICE",
        }
    }

    /// Points awarded for a kill in the given megacycle
    pub fn points_for_cycle(self, mega_cycle: u32) -> u32 {
        if mega_cycle > 1 {
            LATE_CYCLE_POINTS
        } else {
            self.base_stats().points
        }
    }
}

/// `base * (1 + (cycle - 1) * 0.08)`
pub fn cycle_speed(base: f32, mega_cycle: u32) -> f32 {
    base * (1.0 + mega_cycle.saturating_sub(1) as f32 * CYCLE_SPEED_STEP)
}

/// `base * 0.95^(cycle - 1)`: the cooldown shrinks every repeated cycle
pub fn cycle_fire_rate(base: f32, mega_cycle: u32) -> f32 {
    base * CYCLE_FIRE_RATE_DECAY.powi(mega_cycle.saturating_sub(1) as i32)
}

/// Per-variant movement state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Side-to-side sweep, dropping at each wall
    Hamburger { direction: f32, pause_ms: f32 },
    /// Sine weave with a slow drift; may commit to a dive
    Cookie { wave_offset: f32, diving: bool },
    Bug { direction: f32, wave_offset: f32 },
    RadialTire { wave_offset: f32, row_sign: f32 },
    Diamond { direction: f32, wave_offset: f32 },
    /// Seeks one of [`STEAM_IRON_COLUMNS`]
    SteamIron { column: usize, target_x: f32 },
    BowTie { direction: f32, vertical: f32 },
    /// `angle` is measured so that PI points straight down
    SpaceDice { angle: f32, face: u8 },
}

impl Behavior {
    pub fn kind(&self) -> EnemyKind {
        match self {
            Behavior::Hamburger { .. } => EnemyKind::Hamburger,
            Behavior::Cookie { .. } => EnemyKind::Cookie,
            Behavior::Bug { .. } => EnemyKind::Bug,
            Behavior::RadialTire { .. } => EnemyKind::RadialTire,
            Behavior::Diamond { .. } => EnemyKind::Diamond,
            Behavior::SteamIron { .. } => EnemyKind::SteamIron,
            Behavior::BowTie { .. } => EnemyKind::BowTie,
            Behavior::SpaceDice { .. } => EnemyKind::SpaceDice,
        }
    }
}

/// Sweepers start heading toward the far side of the screen
fn initial_direction(x: f32) -> f32 {
    if x < GAME_WIDTH / 2.0 { 1.0 } else { -1.0 }
}

/// True when moving with horizontal velocity `dx` pushes further into a touched wall
fn heading_into_wall(dx: f32, at_left: bool, at_right: bool) -> bool {
    (at_left && dx < 0.0) || (at_right && dx > 0.0)
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub active: bool,
    /// Fixed at spawn (flat 90 after the first megacycle)
    pub points: u32,
    /// px/s after cycle and difficulty scaling
    pub speed: f32,
    /// Shot cooldown (ms) after cycle and difficulty scaling
    pub fire_rate_ms: f32,
    pub mega_cycle: u32,
    /// Local elapsed time (seconds) driving periodic motion
    pub t: f32,
    /// Render-only animation frame, 0..4
    pub anim_frame: u8,
    pub behavior: Behavior,
    last_fire_ms: Option<f64>,
    anim_timer_ms: f32,
}

impl Enemy {
    fn new(x: f32, y: f32, behavior: Behavior, mega_cycle: u32, config: &SimConfig) -> Self {
        let kind = behavior.kind();
        let (width, height) = kind.size();
        let base = kind.base_stats();
        Self {
            rect: Rect::new(x, y, width, height),
            active: true,
            points: kind.points_for_cycle(mega_cycle),
            speed: cycle_speed(base.speed, mega_cycle) * config.speed_mult,
            fire_rate_ms: cycle_fire_rate(base.fire_rate_ms, mega_cycle) * config.fire_rate_mult,
            mega_cycle,
            t: 0.0,
            anim_frame: 0,
            behavior,
            last_fire_ms: None,
            anim_timer_ms: 0.0,
        }
    }

    pub fn hamburger(x: f32, y: f32, mega_cycle: u32, config: &SimConfig) -> Self {
        let behavior = Behavior::Hamburger {
            direction: initial_direction(x),
            pause_ms: 0.0,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    pub fn cookie(x: f32, y: f32, wave_offset: f32, mega_cycle: u32, config: &SimConfig) -> Self {
        let behavior = Behavior::Cookie {
            wave_offset,
            diving: false,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    pub fn bug(x: f32, y: f32, wave_offset: f32, mega_cycle: u32, config: &SimConfig) -> Self {
        let behavior = Behavior::Bug {
            direction: initial_direction(x),
            wave_offset,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    /// Even rows weave one way, odd rows the other
    pub fn radial_tire(
        x: f32,
        y: f32,
        wave_offset: f32,
        row: usize,
        mega_cycle: u32,
        config: &SimConfig,
    ) -> Self {
        let row_sign = if row % 2 == 0 { 1.0 } else { -1.0 };
        let behavior = Behavior::RadialTire {
            wave_offset,
            row_sign,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    pub fn diamond(x: f32, y: f32, wave_offset: f32, mega_cycle: u32, config: &SimConfig) -> Self {
        let behavior = Behavior::Diamond {
            direction: initial_direction(x),
            wave_offset,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    /// Starts seeking its own spawn position
    pub fn steam_iron(x: f32, y: f32, column: usize, mega_cycle: u32, config: &SimConfig) -> Self {
        let behavior = Behavior::SteamIron {
            column: column % STEAM_IRON_COLUMNS.len(),
            target_x: x,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    pub fn bow_tie(x: f32, y: f32, mega_cycle: u32, config: &SimConfig) -> Self {
        let behavior = Behavior::BowTie {
            direction: initial_direction(x),
            vertical: 1.0,
        };
        Self::new(x, y, behavior, mega_cycle, config)
    }

    /// Falls straight down in the first megacycle, on a random 45° diagonal after
    pub fn space_dice<R: Rng>(
        x: f32,
        y: f32,
        mega_cycle: u32,
        config: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let face = rng.random_range(1..=6u8);
        let angle = if mega_cycle > 1 {
            if rng.random_bool(0.5) {
                3.0 * PI / 4.0
            } else {
                5.0 * PI / 4.0
            }
        } else {
            PI
        };
        Self::new(x, y, Behavior::SpaceDice { angle, face }, mega_cycle, config)
    }

    pub fn kind(&self) -> EnemyKind {
        self.behavior.kind()
    }

    /// Per-frame velocity (px/s) for the current behavior state
    pub fn movement_pattern(&self) -> Vec2 {
        let speed = self.speed;
        let t = self.t;
        match self.behavior {
            Behavior::Hamburger {
                direction,
                pause_ms,
            } => {
                if pause_ms > 0.0 {
                    Vec2::ZERO
                } else {
                    Vec2::new(speed * direction, 0.0)
                }
            }
            Behavior::Cookie {
                wave_offset,
                diving,
            } => {
                if diving {
                    Vec2::new(0.0, speed * 3.0)
                } else {
                    Vec2::new((t * 3.0 + wave_offset).sin() * speed, speed * 0.3)
                }
            }
            Behavior::Bug {
                direction,
                wave_offset,
            } => {
                let undulation = if self.mega_cycle > 1 {
                    (t * 4.0 + wave_offset).sin() * 30.0
                } else {
                    0.0
                };
                Vec2::new(speed * direction + undulation, speed * 0.15)
            }
            Behavior::RadialTire {
                wave_offset,
                row_sign,
            } => Vec2::new(
                (t * 4.0 + wave_offset).sin() * speed * row_sign,
                speed * 0.8,
            ),
            Behavior::Diamond {
                direction,
                wave_offset,
            } => {
                let undulation = (t * 5.0 + wave_offset).sin() * 40.0;
                Vec2::new(speed * direction + undulation, speed * 0.2)
            }
            Behavior::SteamIron { target_x, .. } => {
                Vec2::new((target_x - self.rect.x) * 3.0, speed * 0.5)
            }
            Behavior::BowTie {
                direction,
                vertical,
            } => Vec2::new(speed * direction, speed * 0.5 * vertical),
            Behavior::SpaceDice { angle, .. } => {
                let heading = angle - PI / 2.0;
                Vec2::new(heading.cos() * speed, heading.sin() * speed)
            }
        }
    }

    /// Random state changes for this frame
    fn roll_behavior<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        let late_cycle = self.mega_cycle > 1;
        let width = self.rect.width;
        match &mut self.behavior {
            Behavior::Hamburger { pause_ms, .. } => {
                if *pause_ms > 0.0 {
                    *pause_ms = (*pause_ms - dt * 1000.0).max(0.0);
                } else if late_cycle && rng.random_bool(HAMBURGER_PAUSE_CHANCE) {
                    *pause_ms = HAMBURGER_PAUSE_MS;
                }
            }
            Behavior::Cookie { diving, .. } => {
                if late_cycle && !*diving && rng.random_bool(COOKIE_DIVE_CHANCE) {
                    *diving = true;
                }
            }
            Behavior::SteamIron { column, target_x } => {
                if rng.random_bool(STEAM_IRON_RETARGET_CHANCE) {
                    // Always one of the other two columns
                    let next = (*column + rng.random_range(1..=2usize)) % STEAM_IRON_COLUMNS.len();
                    *column = next;
                    *target_x = STEAM_IRON_COLUMNS[next] - width / 2.0;
                }
            }
            _ => {}
        }
    }

    /// Reverse whichever directions are pushing into a boundary
    fn bounce(&mut self) {
        let at_left = self.rect.left() <= 0.0;
        let at_right = self.rect.right() >= GAME_WIDTH;
        let y = self.rect.y;

        match &mut self.behavior {
            Behavior::Hamburger { direction, .. } => {
                if heading_into_wall(*direction, at_left, at_right) {
                    *direction = -*direction;
                    self.rect.y += HAMBURGER_DROP;
                }
            }
            Behavior::Bug { direction, .. } | Behavior::Diamond { direction, .. } => {
                if heading_into_wall(*direction, at_left, at_right) {
                    *direction = -*direction;
                }
            }
            Behavior::BowTie {
                direction,
                vertical,
            } => {
                if heading_into_wall(*direction, at_left, at_right) {
                    *direction = -*direction;
                }
                let into_top = y <= BOW_TIE_TOP && *vertical < 0.0;
                let into_bottom = y >= BOW_TIE_BOTTOM && *vertical > 0.0;
                if into_top || into_bottom {
                    *vertical = -*vertical;
                }
            }
            Behavior::SpaceDice { angle, .. } => {
                let dx = (*angle - PI / 2.0).cos();
                if heading_into_wall(dx, at_left, at_right) {
                    *angle = -*angle;
                }
            }
            Behavior::Cookie { .. } | Behavior::RadialTire { .. } | Behavior::SteamIron { .. } => {}
        }
    }

    /// Advance one frame: roll, move, bounce, then the shared clock/wrap/clamp step
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        self.roll_behavior(dt, rng);
        let vel = self.movement_pattern();
        self.rect.translate(vel, dt);
        self.bounce();

        self.t += dt;
        self.anim_timer_ms += dt * 1000.0;
        if self.anim_timer_ms > ENEMY_ANIM_PERIOD_MS {
            self.anim_timer_ms = 0.0;
            self.anim_frame = (self.anim_frame + 1) % ENEMY_ANIM_FRAMES;
        }

        // Falling off the bottom re-enters from the top
        if self.rect.y > GAME_HEIGHT + self.rect.height {
            self.rect.y = -self.rect.height;
        }

        self.rect.x = self.rect.x.clamp(0.0, GAME_WIDTH - self.rect.width);
    }

    /// Cooldown currently in force (BowTies fire twice as often below mid-screen)
    pub fn effective_fire_rate_ms(&self) -> f32 {
        match self.behavior {
            Behavior::BowTie { .. } if self.rect.y > GAME_HEIGHT / 2.0 => self.fire_rate_ms * 0.5,
            _ => self.fire_rate_ms,
        }
    }

    pub fn can_fire(&self, now_ms: f64) -> bool {
        match self.last_fire_ms {
            None => true,
            Some(last) => now_ms - last >= self.effective_fire_rate_ms() as f64,
        }
    }

    /// Fire toward `player_x` with a weak lead, if the cooldown allows
    pub fn fire(&mut self, player_x: f32, now_ms: f64) -> Option<EnemyBullet> {
        if !self.can_fire(now_ms) {
            return None;
        }
        self.last_fire_ms = Some(now_ms);

        let dx = player_x - self.rect.center_x();
        let vel_x = dx / GAME_HEIGHT * ENEMY_BULLET_SPEED * ENEMY_AIM_FACTOR;
        Some(EnemyBullet::new(self.rect.center_x(), self.rect.bottom(), vel_x))
    }
}
