//! CSV writer for match results.
//!
//! Format: timestamp,game_id,seed,blue_agent,green_agent,winner,turns,blue_score,green_score

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::arena::game_match::MatchOutcome;
use crate::game::board::Color;
use crate::strategy::agent::AgentKind;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp: String,
    pub game_id: usize,
    pub seed: u64,
    pub blue_agent: AgentKind,
    pub green_agent: AgentKind,
    /// "B", "G", or "draw"
    pub winner: String,
    pub turns: usize,
    pub blue_score: f64,
    pub green_score: f64,
}

impl MatchRecord {
    pub fn from_outcome(
        game_id: usize,
        seed: u64,
        agents: (AgentKind, AgentKind),
        outcome: &MatchOutcome,
    ) -> Self {
        MatchRecord {
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            game_id,
            seed,
            blue_agent: agents.0,
            green_agent: agents.1,
            winner: outcome
                .winner
                .map_or_else(|| "draw".to_string(), |color| color.to_string()),
            turns: outcome.turns,
            blue_score: outcome.score_of(Color::Blue).unwrap_or(0.0),
            green_score: outcome.score_of(Color::Green).unwrap_or(0.0),
        }
    }
}

/// Appends match records to a CSV file, writing the header only when the
/// file is new.
pub struct ResultsWriter {
    path: PathBuf,
}

impl ResultsWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, records: &[MatchRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let needs_header = !self.path.exists()
            || std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<MatchRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_id: usize, winner: &str) -> MatchRecord {
        MatchRecord {
            timestamp: "2025-01-01 00:00:00".to_string(),
            game_id,
            seed: 42,
            blue_agent: AgentKind::Mcts,
            green_agent: AgentKind::Random,
            winner: winner.to_string(),
            turns: 180,
            blue_score: 310.0,
            green_score: -310.0,
        }
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultsWriter::new(dir.path().join("results").join("arena.csv"));

        writer.append(&[record(0, "B")]).unwrap();
        writer.append(&[record(1, "draw"), record(2, "G")]).unwrap();

        let raw = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(raw.matches("timestamp,game_id").count(), 1);
        assert!(raw.contains(",mcts,random,"));

        let loaded = writer.load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[1], record(1, "draw"));
        assert_eq!(loaded[2].winner, "G");
    }
}
