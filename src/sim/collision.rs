//! Collision resolution for a PLAYING frame
//!
//! One pass per frame, in a fixed order. Hits only flip `active` flags while
//! the collections are being scanned; dead entries are swept afterwards.

use glam::Vec2;

use super::enemy::EnemyKind;
use super::powerup::{self, PowerUp, PowerUpKind};
use super::state::{Effect, Game};
use crate::audio::{AudioCue, SoundEffect};
use crate::consts::*;

/// An enemy destroyed by a player bullet
#[derive(Debug, Clone, Copy)]
struct Kill {
    pos: Vec2,
    kind: EnemyKind,
    points: u32,
}

/// Resolve every overlap for this frame.
///
/// Order: player bullets vs enemies, then (unless invincible) enemy bullets
/// vs player, enemy bodies vs player, and power-up pickups. A player death
/// ends the pass.
pub fn resolve_collisions(game: &mut Game, audio: &mut dyn AudioCue) {
    for kill in bullets_vs_enemies(game) {
        award_kill(game, kill, audio);
    }

    if !game.player.is_invincible() && !damage_player(game, audio) {
        collect_power_ups(game, audio);
    }

    sweep(game);
}

/// Each bullet stops at the first enemy it overlaps
fn bullets_vs_enemies(game: &mut Game) -> Vec<Kill> {
    let mut kills = Vec::new();
    let enemies = game.waves.enemies_mut();

    for bullet in game.bullets.iter_mut().filter(|b| b.active) {
        let hit = enemies
            .iter_mut()
            .find(|enemy| enemy.active && bullet.rect.intersects(&enemy.rect));
        if let Some(enemy) = hit {
            bullet.active = false;
            enemy.active = false;
            kills.push(Kill {
                pos: enemy.rect.center(),
                kind: enemy.kind(),
                points: enemy.points,
            });
        }
    }
    kills
}

fn award_kill(game: &mut Game, kill: Kill, audio: &mut dyn AudioCue) {
    game.score.add_score(kill.points, game.now_ms);
    game.enemies_killed += 1;
    audio.play(SoundEffect::EnemyHit);
    game.enemy_explosion(kill.pos, kill.kind);

    if powerup::should_drop(&mut game.rng) {
        let drop = PowerUp::random(kill.pos.x, kill.pos.y, &mut game.rng);
        log::debug!("{:?} dropped", drop.kind);
        game.power_ups.push(drop);
    }

    game.check_extra_life(audio);
}

/// Enemy bullets, then enemy bodies. Returns true if the player died.
fn damage_player(game: &mut Game, audio: &mut dyn AudioCue) -> bool {
    let player_rect = game.player.rect;

    for i in 0..game.enemy_bullets.len() {
        let bullet = &mut game.enemy_bullets[i];
        if !bullet.active || !bullet.rect.intersects(&player_rect) {
            continue;
        }
        bullet.active = false;

        if game.player.absorb_hit() {
            audio.play(SoundEffect::PowerUp);
        } else {
            game.kill_player(audio);
            return true;
        }
    }

    for i in 0..game.waves.enemies().len() {
        let enemy = &game.waves.enemies()[i];
        if !enemy.active || !enemy.rect.intersects(&player_rect) {
            continue;
        }
        let (pos, kind) = (enemy.rect.center(), enemy.kind());

        if game.player.absorb_hit() {
            // Rammed through the shield: destroyed, but worth nothing
            game.waves.enemies_mut()[i].active = false;
            game.enemies_killed += 1;
            game.enemy_explosion(pos, kind);
            audio.play(SoundEffect::PowerUp);
        } else {
            game.kill_player(audio);
            return true;
        }
    }

    false
}

fn collect_power_ups(game: &mut Game, audio: &mut dyn AudioCue) {
    let player_rect = game.player.rect;
    let mut collected = Vec::new();

    for power_up in game.power_ups.iter_mut().filter(|p| p.active) {
        if power_up.rect.intersects(&player_rect) {
            power_up.active = false;
            collected.push((power_up.rect.center(), power_up.kind));
        }
    }

    for (pos, kind) in collected {
        apply_power_up(game, kind, pos, audio);
    }
}

/// Pickup bonus, cue, burst, then the kind's effect
pub fn apply_power_up(game: &mut Game, kind: PowerUpKind, pos: Vec2, audio: &mut dyn AudioCue) {
    let now = game.now_ms;
    game.score.add_score(POWER_UP_SCORE, now);
    audio.play(SoundEffect::PowerUp);

    let particles = game.config().particles(POWERUP_COLLECT_PARTICLES);
    game.emit(Effect::PowerUpCollect {
        pos,
        kind,
        particles,
    });

    match kind {
        PowerUpKind::RapidFire => game.player.grant_rapid_fire(now),
        PowerUpKind::Shield => game.player.shield = true,
        PowerUpKind::EnergyBoost => {
            game.energy = (game.energy + ENERGY_BOOST).min(ENERGY_MAX);
            game.energy_warning_played = false;
        }
        PowerUpKind::ScoreMultiplier => game.score.activate_multiplier(now),
    }
    log::info!("Collected {:?}", kind);
}

/// Drop everything deactivated during this pass
fn sweep(game: &mut Game) {
    game.bullets.retain(|b| b.active);
    game.enemy_bullets.retain(|b| b.active);
    game.power_ups.retain(|p| p.active);
    game.waves.remove_inactive();
}
