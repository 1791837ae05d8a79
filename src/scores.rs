//! High-score persistence.
//!
//! The engine never talks to a store directly; the driver pushes the final
//! score when a game ends and queries the list for display. A store failure
//! is reported to the caller and must never affect in-memory game state.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::HIGH_SCORE_CAPACITY;

/// Save/query interface for the high-score list.
///
/// Ranking and truncation are the store's concern; callers treat the returned
/// sequence as opaque display data.
pub trait ScoreStore {
    /// Record a finished game's score
    fn save_score(&mut self, score: u32) -> Result<()>;

    /// The stored scores, best first
    fn scores(&self) -> Result<Vec<u32>>;
}

/// On-disk file layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScoreFile {
    scores: Vec<u32>,
}

/// JSON-file backed store
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file reads as an empty list; anything else is an error.
    fn load(&self) -> Result<ScoreFile> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ScoreFile::default()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading score file {}", self.path.display()))
            }
        };
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing score file {}", self.path.display()))
    }

    fn store(&self, file: &ScoreFile) -> Result<()> {
        let json = serde_json::to_vec_pretty(file).context("encoding score file")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing score file {}", self.path.display()))
    }
}

impl ScoreStore for JsonScoreStore {
    fn save_score(&mut self, score: u32) -> Result<()> {
        let mut file = self.load()?;
        file.scores.push(score);
        file.scores.sort_unstable_by(|a, b| b.cmp(a));
        file.scores.truncate(HIGH_SCORE_CAPACITY);
        self.store(&file)
    }

    fn scores(&self) -> Result<Vec<u32>> {
        Ok(self.load()?.scores)
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: Vec<u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_score(&mut self, score: u32) -> Result<()> {
        self.scores.push(score);
        self.scores.sort_unstable_by(|a, b| b.cmp(a));
        self.scores.truncate(HIGH_SCORE_CAPACITY);
        Ok(())
    }

    fn scores(&self) -> Result<Vec<u32>> {
        Ok(self.scores.clone())
    }
}
