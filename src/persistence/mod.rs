//! High score cell and JSON file helpers
//!
//! The simulation treats the high score as an injected read/write cell
//! ([`HighScoreStore`]). Storage failures never reach the game loop: loads fall
//! back to zero/defaults and saves are skipped with a warning.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a file could not be read or written
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// File exists but does not hold a score
    #[error("not a score: {0:?}")]
    Parse(String),
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Write to `<path>.tmp`, then rename over `path`
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Where the best score lives between sessions
pub trait HighScoreStore: fmt::Debug {
    /// Stored score, or 0 when nothing usable is stored
    fn load(&mut self) -> u32;
    /// Called whenever the high score rises
    fn save(&mut self, score: u32);
}

/// In-process store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: u32,
    /// Number of saves received
    pub writes: u32,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self { value, writes: 0 }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) {
        self.value = score;
        self.writes += 1;
    }
}

/// Plain-text file holding the score as a decimal integer
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32, PersistError> {
        let raw = fs::read_to_string(&self.path)?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| PersistError::Parse(raw.trim().to_string()))
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> u32 {
        match self.read() {
            Ok(score) => {
                log::info!("Loaded high score {score}");
                score
            }
            Err(e) => {
                log::info!("No high score found, starting fresh ({e})");
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(e) = fs::write(&self.path, score.to_string()) {
            log::warn!("Failed to save high score: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::with_value(500);
        assert_eq!(store.load(), 500);
        store.save(900);
        assert_eq!(store.load(), 900);
        assert_eq!(store.writes, 1);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("highscore"));
        assert_eq!(store.load(), 0);
        store.save(12_345);
        assert_eq!(store.load(), 12_345);
    }

    #[test]
    fn test_file_store_garbage_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore");
        fs::write(&path, "lots").unwrap();
        let mut store = FileStore::new(&path);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_file_store_unwritable_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        // A directory path cannot be written as a file
        let mut store = FileStore::new(dir.path());
        store.save(10);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_errors_convert_and_describe() {
        let dir = tempfile::tempdir().unwrap();
        let missing: Result<Vec<u32>, _> = read_json(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(PersistError::Io(_))));

        let path = dir.path().join("bad.json");
        fs::write(&path, "{").unwrap();
        let err = read_json::<Vec<u32>>(&path).unwrap_err();
        assert!(matches!(err, PersistError::Json(_)));
        assert!(err.to_string().starts_with("invalid json: "));

        fs::write(&path, "lots").unwrap();
        let err = FileStore::new(&path).read().unwrap_err();
        assert_eq!(err.to_string(), "not a score: \"lots\"");
    }
}
