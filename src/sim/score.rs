//! Score, multiplier window, extra-life thresholds and the high score

use crate::consts::*;
use crate::persistence::HighScoreStore;

#[derive(Debug)]
pub struct ScoreManager {
    score: u32,
    high_score: u32,
    multiplier: u32,
    multiplier_end_ms: f64,
    /// Score at the last extra-life award
    last_extra_life_score: u32,
    store: Box<dyn HighScoreStore>,
}

impl ScoreManager {
    /// Loads the stored high score once, up front
    pub fn new(mut store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load().min(MAX_SCORE);
        Self {
            score: 0,
            high_score,
            multiplier: 1,
            multiplier_end_ms: 0.0,
            last_extra_life_score: 0,
            store,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Whether a boosted multiplier is in force at `now_ms` (HUD query)
    pub fn has_multiplier(&self, now_ms: f64) -> bool {
        self.multiplier > 1 && now_ms < self.multiplier_end_ms
    }

    /// New game: everything but the high score
    pub fn reset(&mut self) {
        self.score = 0;
        self.multiplier = 1;
        self.multiplier_end_ms = 0.0;
        self.last_extra_life_score = 0;
    }

    /// Add points through the multiplier, clamped at [`MAX_SCORE`].
    ///
    /// An expired multiplier is only noticed here, on the next award.
    pub fn add_score(&mut self, points: u32, now_ms: f64) {
        if now_ms >= self.multiplier_end_ms {
            self.multiplier = 1;
        }

        let awarded = points as u64 * self.multiplier as u64;
        self.score = (self.score as u64 + awarded).min(MAX_SCORE as u64) as u32;

        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
    }

    /// End-of-wave bonus: wave points times whole units of energy left
    pub fn add_bonus_points(&mut self, wave_points: u32, remaining_energy: u32, now_ms: f64) {
        self.add_score(wave_points.saturating_mul(remaining_energy), now_ms);
    }

    /// True once per newly crossed multiple of [`EXTRA_LIFE_SCORE`]
    pub fn check_extra_life(&mut self) -> bool {
        let earned = self.score / EXTRA_LIFE_SCORE;
        let previous = self.last_extra_life_score / EXTRA_LIFE_SCORE;
        if earned > previous {
            self.last_extra_life_score = self.score;
            true
        } else {
            false
        }
    }

    pub fn activate_multiplier(&mut self, now_ms: f64) {
        self.multiplier = SCORE_MULTIPLIER;
        self.multiplier_end_ms = now_ms + SCORE_MULTIPLIER_DURATION_MS;
    }

    pub fn is_victory(&self) -> bool {
        self.score >= MAX_SCORE
    }

    pub fn is_new_high_score(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn fresh() -> ScoreManager {
        ScoreManager::new(Box::new(MemoryStore::default()))
    }

    proptest! {
        #[test]
        fn prop_score_never_exceeds_cap(awards in proptest::collection::vec(0u32..2_000_000, 1..40)) {
            let mut score = fresh();
            let mut last = 0;
            for points in awards {
                score.add_score(points, 0.0);
                prop_assert!(score.score() <= MAX_SCORE);
                prop_assert!(score.score() >= last);
                last = score.score();
            }
        }
    }

    #[test]
    fn test_add_at_cap_is_noop() {
        let mut score = fresh();
        score.add_score(MAX_SCORE, 0.0);
        assert!(score.is_victory());
        score.add_score(50, 0.0);
        assert_eq!(score.score(), MAX_SCORE);
    }

    #[test]
    fn test_extra_life_once_per_threshold() {
        let mut score = fresh();
        score.add_score(9_999, 0.0);
        assert!(!score.check_extra_life());

        score.add_score(2, 0.0);
        assert_eq!(score.score(), 10_001);
        assert!(score.check_extra_life());

        score.add_score(0, 0.0);
        assert!(!score.check_extra_life());

        score.add_score(9_999, 0.0);
        assert_eq!(score.score(), 20_000);
        assert!(score.check_extra_life());
        assert!(!score.check_extra_life());
    }

    #[test]
    fn test_multiplier_window_reverts_lazily() {
        let mut score = fresh();
        score.activate_multiplier(1_000.0);
        score.add_score(100, 2_000.0);
        assert_eq!(score.score(), 200);
        assert!(score.has_multiplier(15_999.0));

        // Still reports 2 until the next award notices expiry
        assert_eq!(score.multiplier(), 2);
        score.add_score(100, 16_000.0);
        assert_eq!(score.score(), 300);
        assert_eq!(score.multiplier(), 1);
    }

    #[test]
    fn test_wave_bonus() {
        let mut score = fresh();
        score.add_bonus_points(20, 73, 0.0);
        assert_eq!(score.score(), 1_460);
    }

    #[test]
    fn test_high_score_loaded_and_saved_on_increase() {
        let mut score = ScoreManager::new(Box::new(MemoryStore::with_value(500)));
        assert_eq!(score.high_score(), 500);

        score.add_score(400, 0.0);
        assert_eq!(score.high_score(), 500);
        assert!(!score.is_new_high_score());

        score.add_score(200, 0.0);
        assert_eq!(score.high_score(), 600);
        assert!(score.is_new_high_score());

        score.reset();
        assert_eq!(score.score(), 0);
        assert_eq!(score.high_score(), 600);
    }
}
