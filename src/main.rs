//! Megamania headless runner
//!
//! Plays a simple autopilot through the full state machine at 60 Hz and
//! prints the final stats as JSON.
//!
//! Usage: `megamania [frames] [seed]`
//!
//! `MEGAMANIA_SETTINGS` points at a settings JSON file and
//! `MEGAMANIA_HIGHSCORE` at a high score file; both are optional.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use megamania::Settings;
    use megamania::audio::AudioManager;
    use megamania::input::{InputTracker, Key};
    use megamania::persistence::{FileStore, HighScoreStore, MemoryStore};
    use megamania::render::{ShapeList, render_game};
    use megamania::sim::{Game, GamePhase, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(60 * 120);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(0x4D45_4741);

    let settings = match std::env::var_os("MEGAMANIA_SETTINGS") {
        Some(path) => Settings::load(std::path::Path::new(&path)),
        None => Settings::default(),
    };
    let store: Box<dyn HighScoreStore> = match std::env::var_os("MEGAMANIA_HIGHSCORE") {
        Some(path) => Box::new(FileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    };

    log::info!(
        "Megamania (headless) starting: {} frames, seed {}, difficulty {}",
        frames,
        seed,
        settings.difficulty.as_str()
    );

    let mut game = Game::new(settings.sim_config(), seed, store);
    let mut audio = AudioManager::from_settings(&settings);
    let mut input = InputTracker::new();
    let mut shapes = ShapeList::default();
    let dt = 1.0 / 60.0;

    for frame in 0..frames {
        if game.phase == GamePhase::GameOver {
            break;
        }
        autopilot(&game, &mut input, frame);

        let snapshot = input.snapshot();
        tick(&mut game, &snapshot, dt, &mut audio);
        input.end_frame();

        let effects = game.drain_effects();
        if !effects.is_empty() {
            log::debug!("frame {frame}: {} effects", effects.len());
        }

        shapes.shapes.clear();
        render_game(&game, &mut shapes);
    }

    log::info!("{} cues played", audio.played());
    match serde_json::to_string(&game.stats()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Failed to serialize stats: {e}"),
    }

    /// Chase the lowest enemy and hold fire; press Enter on the title screen
    fn autopilot(game: &Game, input: &mut InputTracker, frame: u64) {
        input.clear();
        if game.phase == GamePhase::Title {
            // Alternate so the press registers as a fresh edge
            if frame % 2 == 0 {
                input.key_down(Key::Enter);
            }
            return;
        }

        let target = game
            .waves
            .enemies()
            .iter()
            .filter(|e| e.active)
            .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
            .map(|e| e.rect.center_x());

        if let Some(target) = target {
            let x = game.player.rect.center_x();
            if target < x - 8.0 {
                input.key_down(Key::Left);
            } else if target > x + 8.0 {
                input.key_down(Key::Right);
            }
        }
        input.key_down(Key::Space);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page; nothing to run here
}
