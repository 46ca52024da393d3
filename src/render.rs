//! Draw walk over the simulation
//!
//! `render_game` turns the current [`Game`] into a list of shapes for a
//! [`Renderer`] backend. It only reads game state.

use glam::Vec2;

use crate::sim::{Behavior, EnemyKind, Game, PowerUpKind, Rect};

/// Linear RGBA
pub type Color = [f32; 4];

/// `0xRRGGBB` to an opaque color
pub fn rgb(hex: u32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xFF) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

pub fn enemy_color(kind: EnemyKind) -> Color {
    rgb(match kind {
        EnemyKind::Hamburger => 0xD4A24C,
        EnemyKind::Cookie => 0xD2691E,
        EnemyKind::Bug => 0x228B22,
        EnemyKind::RadialTire => 0x333333,
        EnemyKind::Diamond => 0x00DDFF,
        EnemyKind::SteamIron => 0x708090,
        EnemyKind::BowTie => 0xFF1493,
        EnemyKind::SpaceDice => 0xFFFFFF,
    })
}

/// Color lookup by type name (`"BOW_TIE"`); unknown names draw white
pub fn enemy_color_by_name(name: &str) -> Color {
    let kind = match name {
        "HAMBURGER" => EnemyKind::Hamburger,
        "COOKIE" => EnemyKind::Cookie,
        "BUG" => EnemyKind::Bug,
        "RADIAL_TIRE" => EnemyKind::RadialTire,
        "DIAMOND" => EnemyKind::Diamond,
        "STEAM_IRON" => EnemyKind::SteamIron,
        "BOW_TIE" => EnemyKind::BowTie,
        "SPACE_DICE" => EnemyKind::SpaceDice,
        _ => return WHITE,
    };
    enemy_color(kind)
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    rgb(match kind {
        PowerUpKind::RapidFire => 0xFF6600,
        PowerUpKind::Shield => 0x00FFFF,
        PowerUpKind::EnergyBoost => 0x00FF00,
        PowerUpKind::ScoreMultiplier => 0xFFFF00,
    })
}

const PLAYER_BODY: u32 = 0x00AAFF;
const PLAYER_TRIM: u32 = 0x0066AA;
const PLAYER_BULLET: u32 = 0xFFFF00;
const ENEMY_BULLET: u32 = 0xFF4444;
const SHIELD_RING: Color = [0.0, 1.0, 1.0, 0.5];

/// Something to draw, in playfield coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    PowerUp {
        rect: Rect,
        color: Color,
        symbol: &'static str,
    },
    Enemy {
        rect: Rect,
        kind: EnemyKind,
        color: Color,
        /// Animation frame, 0..4
        frame: u8,
        /// Pip count for dice
        face: Option<u8>,
    },
    Bullet { rect: Rect, color: Color },
    Player {
        rect: Rect,
        body: Color,
        trim: Color,
    },
    Ring {
        center: Vec2,
        radius: f32,
        color: Color,
    },
}

/// Drawing backend
pub trait Renderer {
    fn draw(&mut self, shape: Shape);
}

/// Collects shapes (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct ShapeList {
    pub shapes: Vec<Shape>,
}

impl Renderer for ShapeList {
    fn draw(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

/// Draw order: power-ups, enemies, enemy bullets, player, player bullets
pub fn render_game<R: Renderer>(game: &Game, renderer: &mut R) {
    for power_up in game.power_ups.iter().filter(|p| p.active) {
        let mut rect = power_up.rect;
        rect.y += power_up.bob_offset();
        renderer.draw(Shape::PowerUp {
            rect,
            color: power_up_color(power_up.kind),
            symbol: power_up.kind.symbol(),
        });
    }

    for enemy in game.waves.enemies().iter().filter(|e| e.active) {
        let face = match enemy.behavior {
            Behavior::SpaceDice { face, .. } => Some(face.clamp(1, 6)),
            _ => None,
        };
        renderer.draw(Shape::Enemy {
            rect: enemy.rect,
            kind: enemy.kind(),
            color: enemy_color(enemy.kind()),
            frame: enemy.anim_frame,
            face,
        });
    }

    for bullet in game.enemy_bullets.iter().filter(|b| b.active) {
        renderer.draw(Shape::Bullet {
            rect: bullet.rect,
            color: rgb(ENEMY_BULLET),
        });
    }

    let player = &game.player;
    if player.active && !player.blink_hidden() {
        renderer.draw(Shape::Player {
            rect: player.rect,
            body: rgb(PLAYER_BODY),
            trim: rgb(PLAYER_TRIM),
        });
        if player.shield {
            renderer.draw(Shape::Ring {
                center: player.rect.center(),
                radius: player.rect.width * 0.75,
                color: SHIELD_RING,
            });
        }
    }

    for bullet in game.bullets.iter().filter(|b| b.active) {
        renderer.draw(Shape::Bullet {
            rect: bullet.rect,
            color: rgb(PLAYER_BULLET),
        });
    }
}
