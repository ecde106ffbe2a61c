//! Highscore table
//!
//! Winning runs are appended to a JSON array on disk. The file is always
//! read and written whole.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::save_game::SaveError;

/// Entries shown on the highscore screen
pub const TOP_ENTRIES: usize = 10;

/// One finished winning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighscoreEntry {
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub gold: u32,
    /// Seconds played
    #[serde(default)]
    pub playtime: f64,
    #[serde(default)]
    pub timestamp: String,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

fn first_level() -> u32 {
    1
}

/// Load every recorded entry. A missing or unreadable file counts as empty.
pub fn load_highscores(path: &Path) -> Vec<HighscoreEntry> {
    if !path.exists() {
        return Vec::new();
    }

    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to parse highscores {:?}: {}", path, e);
                Vec::new()
            }
        },
        Err(e) => {
            log::warn!("Failed to read highscores {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Append an entry and rewrite the whole file
pub fn append_highscore(path: &Path, entry: HighscoreEntry) -> Result<(), SaveError> {
    let mut entries = load_highscores(path);
    entries.push(entry);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(&entries)?;
    fs::write(path, json)?;

    log::info!("Highscore recorded in {:?} ({} entries)", path, entries.len());
    Ok(())
}

/// Best `n` entries, highest score first. Ties keep file order.
pub fn top_scores(mut entries: Vec<HighscoreEntry>, n: usize) -> Vec<HighscoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(n);
    entries
}

/// Format seconds as `MM:SS` (minutes wrap at an hour)
pub fn format_playtime(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32) -> HighscoreEntry {
        HighscoreEntry {
            name: name.to_string(),
            score,
            level: 2,
            kills: 3,
            gold: 150,
            playtime: 95.4,
            timestamp: "2024-01-01T00:00:00".to_string(),
        }
    }

    #[test]
    fn test_append_keeps_previous_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");

        append_highscore(&path, entry("First", 10)).unwrap();
        append_highscore(&path, entry("Second", 30)).unwrap();

        let entries = load_highscores(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "First");
        assert_eq!(entries[1].score, 30);
    }

    #[test]
    fn test_top_scores_sorted_and_capped() {
        let entries: Vec<_> = (0..15).map(|i| entry(&format!("P{}", i), i * 10)).collect();
        let top = top_scores(entries, TOP_ENTRIES);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].score, 140);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        fs::write(&path, r#"[{"score": 42}]"#).unwrap();

        let entries = load_highscores(&path);
        assert_eq!(entries[0].name, "Unknown");
        assert_eq!(entries[0].level, 1);
        assert_eq!(entries[0].score, 42);
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        fs::write(&path, "garbage").unwrap();
        assert!(load_highscores(&path).is_empty());

        append_highscore(&path, entry("Fresh", 5)).unwrap();
        assert_eq!(load_highscores(&path).len(), 1);
    }

    #[test]
    fn test_format_playtime() {
        assert_eq!(format_playtime(0.0), "00:00");
        assert_eq!(format_playtime(95.4), "01:35");
        assert_eq!(format_playtime(3_725.0), "02:05");
    }
}
