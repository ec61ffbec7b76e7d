//! High score leaderboard storage
//!
//! Scores are an append-only record set; readers ask for the top N.
//! The file store keeps one JSON object per line so a partial write only
//! ever damages the line being written.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Append-only score record store
pub trait ScoreStore {
    /// Record a finished run
    fn append(&mut self, name: &str, score: u32) -> Result<()>;

    /// Best `n` entries, highest score first; ties keep insertion order
    fn top_entries(&self, n: usize) -> Result<Vec<ScoreEntry>>;
}

/// Sort descending by score and keep the first `n`.
///
/// The sort is stable, so equal scores stay in record order.
pub fn rank(mut entries: Vec<ScoreEntry>, n: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(n);
    entries
}

/// Scores persisted as JSON lines in a file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every readable record in file order. A missing file is an empty board.
    fn read_all(&self) -> Result<Vec<ScoreEntry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No score file at {}, starting fresh", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<ScoreEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!(
                    "Skipping malformed score record {}:{}: {}",
                    self.path.display(),
                    number + 1,
                    e
                ),
            }
        }
        Ok(entries)
    }
}

impl ScoreStore for FileScoreStore {
    fn append(&mut self, name: &str, score: u32) -> Result<()> {
        let record = serde_json::to_string(&ScoreEntry::new(name, score))?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", record)?;
        log::info!("High score saved: {} {}", name, score);
        Ok(())
    }

    fn top_entries(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        Ok(rank(self.read_all()?, n))
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub entries: Vec<ScoreEntry>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn append(&mut self, name: &str, score: u32) -> Result<()> {
        self.entries.push(ScoreEntry::new(name, score));
        Ok(())
    }

    fn top_entries(&self, n: usize) -> Result<Vec<ScoreEntry>> {
        Ok(rank(self.entries.clone(), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("asteroid-field-{}-{}.jsonl", std::process::id(), tag));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let entries = vec![
            ScoreEntry::new("AAA", 5),
            ScoreEntry::new("BBB", 9),
            ScoreEntry::new("CCC", 5),
            ScoreEntry::new("DDD", 1),
        ];
        let top = rank(entries, 3);
        assert_eq!(
            top,
            vec![
                ScoreEntry::new("BBB", 9),
                ScoreEntry::new("AAA", 5),
                ScoreEntry::new("CCC", 5),
            ]
        );
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let mut store = FileScoreStore::new(&path);
        store.append("ZZZ", 100).unwrap();
        store.append("YYY", 10).unwrap();
        store.append("ABC", 42).unwrap();

        let top = store.top_entries(5).unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[1], ScoreEntry::new("ABC", 42));
        assert_eq!(top[0].score, 100);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = FileScoreStore::new(temp_path("missing"));
        assert!(store.top_entries(5).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let path = temp_path("malformed");
        fs::write(&path, "{\"name\":\"AAA\",\"score\":3}\nnot json\n\n{\"name\":\"BBB\",\"score\":7}\n").unwrap();
        let store = FileScoreStore::new(&path);
        let top = store.top_entries(5).unwrap();
        assert_eq!(top, vec![ScoreEntry::new("BBB", 7), ScoreEntry::new("AAA", 3)]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_store_is_an_error() {
        // A directory cannot be read as a score file
        let store = FileScoreStore::new(std::env::temp_dir());
        assert!(store.top_entries(5).is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        store.append("ABC", 42).unwrap();
        store.append("XYZ", 50).unwrap();
        assert_eq!(store.top_entries(1).unwrap(), vec![ScoreEntry::new("XYZ", 50)]);
    }
}
