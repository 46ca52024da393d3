//! Wave progression and enemy formations

use rand::Rng;

use super::enemy::{Enemy, EnemyKind, STEAM_IRON_COLUMNS, WAVE_ORDER};
use crate::consts::WAVE_ENEMY_COUNT;
use crate::settings::SimConfig;

/// Owns the live enemy roster and the wave/megacycle counters
#[derive(Debug, Clone)]
pub struct WaveManager {
    /// Index into [`WAVE_ORDER`]
    wave: usize,
    /// Starts at 1 and never resets within a game
    mega_cycle: u32,
    enemies: Vec<Enemy>,
    config: SimConfig,
}

impl WaveManager {
    pub fn new(config: SimConfig) -> Self {
        Self {
            wave: 0,
            mega_cycle: 1,
            enemies: Vec::with_capacity(WAVE_ENEMY_COUNT),
            config,
        }
    }

    pub fn reset(&mut self) {
        self.wave = 0;
        self.mega_cycle = 1;
        self.enemies.clear();
    }

    pub fn wave(&self) -> usize {
        self.wave
    }

    pub fn cycle(&self) -> u32 {
        self.mega_cycle
    }

    pub fn current_kind(&self) -> EnemyKind {
        WAVE_ORDER[self.wave]
    }

    /// Points per kill in the current wave (used for the end-of-wave bonus)
    pub fn current_wave_points(&self) -> u32 {
        self.current_kind().points_for_cycle(self.mega_cycle)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Replace the roster with the current wave's formation
    pub fn spawn_wave<R: Rng>(&mut self, rng: &mut R) {
        let kind = self.current_kind();
        let cycle = self.mega_cycle;
        let config = self.config;

        self.enemies.clear();
        for i in 0..WAVE_ENEMY_COUNT {
            let col = (i % 4) as f32;
            let row = i / 4;
            let rowf = row as f32;
            let idx = i as f32;

            let enemy = match kind {
                EnemyKind::Hamburger => {
                    Enemy::hamburger(50.0 + col * 100.0, 60.0 + rowf * 50.0, cycle, &config)
                }
                EnemyKind::Cookie => Enemy::cookie(
                    60.0 + col * 100.0,
                    40.0 + rowf * 40.0,
                    idx * 0.5,
                    cycle,
                    &config,
                ),
                EnemyKind::Bug => Enemy::bug(
                    50.0 + col * 100.0,
                    80.0 + rowf * 40.0,
                    idx * 0.3,
                    cycle,
                    &config,
                ),
                EnemyKind::RadialTire => Enemy::radial_tire(
                    60.0 + col * 100.0,
                    30.0 + rowf * 50.0,
                    idx * 0.4,
                    row,
                    cycle,
                    &config,
                ),
                EnemyKind::Diamond => Enemy::diamond(
                    50.0 + col * 100.0,
                    60.0 + rowf * 45.0,
                    idx * 0.6,
                    cycle,
                    &config,
                ),
                EnemyKind::SteamIron => {
                    // Three columns, stacked top to bottom
                    let column = i % STEAM_IRON_COLUMNS.len();
                    let (width, _) = EnemyKind::SteamIron.size();
                    let x = STEAM_IRON_COLUMNS[column] - width / 2.0;
                    let y = 40.0 + (i / STEAM_IRON_COLUMNS.len()) as f32 * 60.0;
                    Enemy::steam_iron(x, y, column, cycle, &config)
                }
                EnemyKind::BowTie => {
                    Enemy::bow_tie(60.0 + col * 100.0, 60.0 + rowf * 50.0, cycle, &config)
                }
                EnemyKind::SpaceDice => Enemy::space_dice(
                    50.0 + col * 100.0,
                    30.0 + rowf * 50.0,
                    cycle,
                    &config,
                    rng,
                ),
            };
            self.enemies.push(enemy);
        }

        log::info!(
            "Wave {} ({}) spawned, megacycle {}",
            self.wave + 1,
            kind.name(),
            cycle
        );
    }

    /// Advance to the next wave type, wrapping into a new megacycle
    pub fn next_wave(&mut self) {
        self.wave += 1;
        if self.wave >= WAVE_ORDER.len() {
            self.wave = 0;
            self.mega_cycle += 1;
            log::info!("Megacycle {} begins", self.mega_cycle);
        }
    }

    /// True only once every enemy has been destroyed
    pub fn is_wave_complete(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Move every enemy, then sweep out the destroyed ones
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        for enemy in self.enemies.iter_mut().filter(|e| e.active) {
            enemy.update(dt, rng);
        }
        self.remove_inactive();
    }

    pub fn remove_inactive(&mut self) {
        self.enemies.retain(|e| e.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_wave_hamburger_grid() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut waves = WaveManager::new(SimConfig::default());
        waves.spawn_wave(&mut rng);

        assert_eq!(waves.enemies().len(), 8);
        for (i, enemy) in waves.enemies().iter().enumerate() {
            assert_eq!(enemy.kind(), EnemyKind::Hamburger);
            assert_eq!(enemy.rect.x, 50.0 + (i % 4) as f32 * 100.0);
            assert_eq!(enemy.rect.y, 60.0 + (i / 4) as f32 * 50.0);
            assert_eq!(enemy.points, 20);
        }
    }

    #[test]
    fn test_every_formation_has_eight() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut waves = WaveManager::new(SimConfig::default());
        for kind in WAVE_ORDER {
            assert_eq!(waves.current_kind(), kind);
            waves.spawn_wave(&mut rng);
            assert_eq!(waves.enemies().len(), 8);
            assert!(waves.enemies().iter().all(|e| e.kind() == kind));
            waves.next_wave();
        }
    }

    #[test]
    fn test_steam_iron_columns() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut waves = WaveManager::new(SimConfig::default());
        for _ in 0..5 {
            waves.next_wave();
        }
        waves.spawn_wave(&mut rng);
        let first = &waves.enemies()[0];
        assert_eq!(first.rect.x, 66.0);
        assert_eq!(first.rect.y, 40.0);
        let fourth = &waves.enemies()[3];
        assert_eq!(fourth.rect.x, 66.0);
        assert_eq!(fourth.rect.y, 100.0);
    }

    #[test]
    fn test_wrap_increments_megacycle_once() {
        let mut waves = WaveManager::new(SimConfig::default());
        for _ in 0..7 {
            waves.next_wave();
            assert_eq!(waves.cycle(), 1);
        }
        assert_eq!(waves.wave(), 7);
        waves.next_wave();
        assert_eq!(waves.wave(), 0);
        assert_eq!(waves.cycle(), 2);
        assert_eq!(waves.current_wave_points(), 90);
    }

    #[test]
    fn test_complete_only_when_destroyed() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut waves = WaveManager::new(SimConfig::default());
        waves.spawn_wave(&mut rng);

        // Run long enough for enemies to wrap; none should vanish
        for _ in 0..2000 {
            waves.update(1.0 / 60.0, &mut rng);
        }
        assert_eq!(waves.enemies().len(), 8);
        assert!(!waves.is_wave_complete());

        for enemy in waves.enemies_mut() {
            enemy.active = false;
        }
        waves.remove_inactive();
        assert!(waves.is_wave_complete());
    }

    #[test]
    fn test_reset() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut waves = WaveManager::new(SimConfig::default());
        for _ in 0..9 {
            waves.next_wave();
        }
        waves.spawn_wave(&mut rng);
        waves.reset();
        assert_eq!(waves.wave(), 0);
        assert_eq!(waves.cycle(), 1);
        assert!(waves.is_wave_complete());
    }
}
