//! Per-frame simulation step
//!
//! Drives the phase state machine and, while playing, the fixed update order:
//! player, player fire, bullets, enemies, enemy fire, power-ups, energy,
//! collisions, wave completion, victory.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::state::{Game, GamePhase};
use crate::audio::{AudioCue, SoundEffect};
use crate::consts::*;

/// Input snapshot for a single frame
///
/// `pause` and `start` are edge-triggered: true only on the press frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
    pub start: bool,
}

/// Shake multiplier applied every frame
const SHAKE_DECAY: f32 = 0.9;
const SHAKE_CUTOFF: f32 = 0.1;

/// Advance the game by one frame of `dt` seconds (clamped to [`MAX_FRAME_DT`])
///
/// A non-finite `dt` counts as a zero-length frame.
pub fn tick(game: &mut Game, input: &TickInput, dt: f32, audio: &mut dyn AudioCue) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    match game.phase {
        GamePhase::Title | GamePhase::GameOver | GamePhase::Victory => {
            if input.start {
                game.start_game();
            }
        }
        GamePhase::Paused => {
            if input.pause || input.start {
                game.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => {
            if input.pause {
                game.phase = GamePhase::Paused;
            } else {
                advance_clock(game, dt);
                update_playing(game, input, dt, audio);
            }
        }
        GamePhase::WaveTransition => {
            advance_clock(game, dt);
            game.transition_ms -= dt * 1000.0;
            if game.transition_ms <= 0.0 {
                game.waves.spawn_wave(&mut game.rng);
                game.energy = ENERGY_MAX;
                game.energy_warning_played = false;
                game.phase = GamePhase::Playing;
            }
        }
        GamePhase::PlayerDeath => {
            advance_clock(game, dt);
            game.death_ms -= dt * 1000.0;
            if game.death_ms <= 0.0 {
                end_death(game, audio);
            }
        }
    }

    game.shake *= SHAKE_DECAY;
    if game.shake < SHAKE_CUTOFF {
        game.shake = 0.0;
    }
}

fn advance_clock(game: &mut Game, dt: f32) {
    game.now_ms += dt as f64 * 1000.0;
}

/// Respawn, or end the run when no lives are left
fn end_death(game: &mut Game, audio: &mut dyn AudioCue) {
    if game.lives > 0 {
        game.player.reset();
        game.enemy_bullets.clear();
        // An empty tank would kill the fresh ship on its first frame
        if game.energy <= 0.0 {
            game.energy = ENERGY_MAX;
            game.energy_warning_played = false;
        }
        game.phase = GamePhase::Playing;
    } else {
        audio.play(SoundEffect::GameOver);
        game.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} (high {}{})",
            game.score.score(),
            game.score.high_score(),
            if game.score.is_new_high_score() { ", new" } else { "" }
        );
    }
}

fn update_playing(game: &mut Game, input: &TickInput, dt: f32, audio: &mut dyn AudioCue) {
    let now = game.now_ms;

    game.player.expire_rapid_fire(now);
    game.player.handle_input(input, dt);
    game.player.update(dt);

    if input.fire && game.player.can_fire(game.bullets.len(), now) {
        let bullet = game.player.fire(now);
        game.bullets.push(bullet);
        audio.play(SoundEffect::Shoot);
    }

    for bullet in &mut game.bullets {
        bullet.update(dt);
    }
    game.bullets.retain(|b| b.active);
    for bullet in &mut game.enemy_bullets {
        bullet.update(dt);
    }
    game.enemy_bullets.retain(|b| b.active);

    game.waves.update(dt, &mut game.rng);
    enemy_fire(game, now);

    for power_up in &mut game.power_ups {
        power_up.update(dt);
    }
    game.power_ups.retain(|p| p.active);

    if drain_energy(game, dt, audio) {
        log::info!("Energy depleted");
        game.kill_player(audio);
        return;
    }

    resolve_collisions(game, audio);
    if game.phase != GamePhase::Playing {
        return;
    }

    if game.waves.is_wave_complete() {
        game.complete_wave(audio);
    }

    if game.score.is_victory() {
        game.phase = GamePhase::Victory;
        log::info!("Score cap reached");
    }
}

/// Each ready enemy gets a small per-frame chance to shoot
fn enemy_fire(game: &mut Game, now: f64) {
    let player_x = game.player.rect.center_x();
    for enemy in game.waves.enemies_mut() {
        if enemy.can_fire(now) && game.rng.random_bool(ENEMY_FIRE_CHANCE) {
            if let Some(bullet) = enemy.fire(player_x, now) {
                game.enemy_bullets.push(bullet);
            }
        }
    }
}

/// Drain energy, cueing the one-shot warning; true once the tank is empty
fn drain_energy(game: &mut Game, dt: f32, audio: &mut dyn AudioCue) -> bool {
    game.energy = (game.energy - ENERGY_DRAIN_RATE * dt).max(0.0);

    if game.energy <= ENERGY_WARNING_THRESHOLD && !game.energy_warning_played {
        audio.play(SoundEffect::EnergyWarning);
        game.energy_warning_played = true;
    }

    game.energy <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use crate::persistence::MemoryStore;
    use crate::settings::SimConfig;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> Game {
        Game::new(SimConfig::default(), 3, Box::new(MemoryStore::default()))
    }

    fn press_start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    fn press_pause() -> TickInput {
        TickInput {
            pause: true,
            ..Default::default()
        }
    }

    fn started(audio: &mut CueRecorder) -> Game {
        let mut game = game();
        tick(&mut game, &press_start(), DT, audio);
        game
    }

    #[test]
    fn test_title_waits_for_start() {
        let mut game = game();
        let mut audio = CueRecorder::default();
        tick(&mut game, &TickInput::default(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Title);
        assert_eq!(game.now_ms, 0.0);

        tick(&mut game, &press_start(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.waves.enemies().len(), WAVE_ENEMY_COUNT);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        tick(&mut game, &TickInput::default(), 5.0, &mut audio);
        assert!((game.now_ms - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        tick(&mut game, &TickInput::default(), DT, &mut audio);
        let before_pause = game.now_ms;

        // The press frame itself does not simulate
        tick(&mut game, &press_pause(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Paused);
        assert_eq!(game.now_ms, before_pause);
        let now = game.now_ms;
        let energy = game.energy;
        let first = game.waves.enemies()[0].rect;

        for _ in 0..30 {
            tick(&mut game, &TickInput::default(), DT, &mut audio);
        }
        assert_eq!(game.now_ms, now);
        assert_eq!(game.energy, energy);
        assert_eq!(game.waves.enemies()[0].rect, first);

        // Either start or pause resumes
        tick(&mut game, &press_start(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Playing);
        tick(&mut game, &press_pause(), DT, &mut audio);
        tick(&mut game, &press_pause(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_non_finite_dt_is_an_empty_frame() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        let x = game.player.rect.x;

        tick(&mut game, &TickInput::default(), f32::NAN, &mut audio);
        tick(&mut game, &TickInput::default(), f32::INFINITY, &mut audio);
        assert_eq!(game.now_ms, 0.0);
        assert_eq!(game.energy, ENERGY_MAX);
        assert_eq!(game.player.rect.x, x);

        // The clock still runs and the ship can still shoot
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut game, &fire, DT, &mut audio);
        assert!(game.now_ms > 0.0);
        assert_eq!(game.bullets.len(), 1);
    }

    #[test]
    fn test_playing_enemies_open_fire() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        for _ in 0..600 {
            tick(&mut game, &TickInput::default(), DT, &mut audio);
            if !game.enemy_bullets.is_empty() {
                break;
            }
        }
        assert!(!game.enemy_bullets.is_empty());
    }

    #[test]
    fn test_ready_enemies_still_roll_to_fire() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);

        // Every call lands long after every cooldown
        let calls = 1_000;
        let mut now = 0.0;
        for _ in 0..calls {
            now += 100_000.0;
            enemy_fire(&mut game, now);
        }
        let shots = game.enemy_bullets.len();
        assert!(shots > 0);
        // About 2% of the chances, far below one shot per ready enemy
        assert!(shots < calls * WAVE_ENEMY_COUNT / 10);
    }

    #[test]
    fn test_cooldown_blocks_enemy_fire() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        for enemy in game.waves.enemies_mut() {
            assert!(enemy.fire(240.0, 1_000.0).is_some());
        }
        for _ in 0..500 {
            enemy_fire(&mut game, 1_010.0);
        }
        assert!(game.enemy_bullets.is_empty());
    }

    #[test]
    fn test_fire_spawns_bullet_and_cue() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut game, &fire, DT, &mut audio);
        assert_eq!(game.bullets.len(), 1);
        assert_eq!(audio.count(SoundEffect::Shoot), 1);

        // Cooldown holds the next shot back
        tick(&mut game, &fire, DT, &mut audio);
        assert_eq!(audio.count(SoundEffect::Shoot), 1);
    }

    #[test]
    fn test_energy_warning_plays_once() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.energy = ENERGY_WARNING_THRESHOLD + 0.01;
        for _ in 0..10 {
            tick(&mut game, &TickInput::default(), DT, &mut audio);
        }
        assert!(game.energy_warning_played);
        assert_eq!(audio.count(SoundEffect::EnergyWarning), 1);
    }

    #[test]
    fn test_empty_energy_kills_then_respawns_with_full_tank() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.energy = 0.01;
        tick(&mut game, &TickInput::default(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::PlayerDeath);
        assert_eq!(game.lives, 2);

        for _ in 0..20 {
            tick(&mut game, &TickInput::default(), 0.1, &mut audio);
        }
        assert_eq!(game.phase, GamePhase::Playing);
        assert!(game.player.active);
        assert!(game.player.is_invincible());
        assert!(game.energy > ENERGY_MAX - 2.0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.lives = 1;
        game.kill_player(&mut audio);
        assert_eq!(game.lives, 0);

        for _ in 0..20 {
            tick(&mut game, &TickInput::default(), 0.1, &mut audio);
        }
        assert_eq!(game.phase, GamePhase::GameOver);
        assert_eq!(audio.count(SoundEffect::GameOver), 1);

        // Start restarts from scratch
        tick(&mut game, &press_start(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.lives, STARTING_LIVES);
        assert_eq!(game.score.score(), 0);
    }

    #[test]
    fn test_death_respawn_clears_enemy_bullets() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.kill_player(&mut audio);
        game.enemy_bullets
            .push(crate::sim::projectile::EnemyBullet::new(100.0, 100.0, 0.0));
        while game.phase == GamePhase::PlayerDeath {
            tick(&mut game, &TickInput::default(), 0.1, &mut audio);
        }
        assert_eq!(game.phase, GamePhase::Playing);
        assert!(game.enemy_bullets.is_empty());
    }

    #[test]
    fn test_transition_spawns_next_wave() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.energy = 12.0;
        game.energy_warning_played = true;
        game.complete_wave(&mut audio);

        tick(&mut game, &TickInput::default(), 0.1, &mut audio);
        assert_eq!(game.phase, GamePhase::WaveTransition);

        for _ in 0..25 {
            if game.phase != GamePhase::WaveTransition {
                break;
            }
            tick(&mut game, &TickInput::default(), 0.1, &mut audio);
        }
        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.energy, ENERGY_MAX);
        assert!(!game.energy_warning_played);
        assert!(
            game.waves
                .enemies()
                .iter()
                .all(|e| e.kind() == crate::sim::enemy::EnemyKind::Cookie)
        );
    }

    #[test]
    fn test_victory_at_score_cap() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.score.add_score(MAX_SCORE, 0.0);
        tick(&mut game, &TickInput::default(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Victory);

        tick(&mut game, &press_start(), DT, &mut audio);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shake_decays() {
        let mut audio = CueRecorder::default();
        let mut game = started(&mut audio);
        game.kill_player(&mut audio);
        tick(&mut game, &TickInput::default(), DT, &mut audio);
        assert!((game.shake - DEATH_SHAKE * 0.9).abs() < 1e-4);
        for _ in 0..60 {
            tick(&mut game, &TickInput::default(), DT, &mut audio);
        }
        assert_eq!(game.shake, 0.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut audio = CueRecorder::default();
            let mut game = Game::new(SimConfig::default(), seed, Box::new(MemoryStore::default()));
            tick(&mut game, &press_start(), DT, &mut audio);
            let input = TickInput {
                fire: true,
                right: true,
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut game, &input, DT, &mut audio);
            }
            (game.stats(), audio.cues)
        };
        assert_eq!(run(11), run(11));
    }
}
