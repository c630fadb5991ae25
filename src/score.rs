use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR_NAME: &str = "gridsnake";
const SCORE_FILE_NAME: &str = "highscore.json";

/// Running score and high-score counters for one player.
///
/// The current score only grows during a session; the high score is a
/// snapshot taken by [`ScoreManager::record_high`], never updated implicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreManager {
    current_score: u32,
    high_score: u32,
}

impl ScoreManager {
    /// Creates a manager seeded with a previously persisted high score.
    #[must_use]
    pub fn new(high_score: u32) -> Self {
        Self {
            current_score: 0,
            high_score,
        }
    }

    /// Adds `points` to the current score.
    pub fn add(&mut self, points: u32) {
        self.current_score += points;
    }

    /// Resets the current score for a new game. The high score is kept.
    pub fn reset(&mut self) {
        self.current_score = 0;
    }

    /// Snapshots the current score into the high score when it beats it,
    /// returning the (possibly updated) high score for persistence.
    pub fn record_high(&mut self) -> u32 {
        if self.current_score > self.high_score {
            self.high_score = self.current_score;
        }
        self.high_score
    }

    /// Current session score.
    #[must_use]
    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    /// Best recorded score.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// Loads the persisted high score.
///
/// A missing file reads as 0 (first run); an unreadable or malformed file is
/// an error the caller can surface before entering raw terminal mode.
pub fn load_high_score() -> io::Result<u32> {
    load_high_score_from_path(&scores_path())
}

/// Persists the high score, creating parent directories when needed.
pub fn save_high_score(score: u32) -> io::Result<()> {
    save_high_score_to_path(&scores_path(), score)
}

fn load_high_score_from_path(path: &Path) -> io::Result<u32> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.high_score)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn save_high_score_to_path(path: &Path, score: u32) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;

    fs::write(path, json)
}
