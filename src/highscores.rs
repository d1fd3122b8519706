//! Session leaderboard
//!
//! Tracks the top 10 runs since the page was opened. Kept in memory only.

use serde::{Deserialize, Serialize};

use crate::consts::DISTANCE_PER_POINT;
use crate::sim::GameState;

/// Maximum number of runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// Outcome of one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub score: u64,
    /// Pixels scrolled
    pub distance: f32,
    pub coins: u32,
}

impl RunRecord {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            distance: state.distance,
            coins: state.coins_collected,
        }
    }

    /// Distance as shown on the HUD
    pub fn meters(&self) -> u64 {
        (self.distance / DISTANCE_PER_POINT) as u64
    }

    /// Higher score wins; equal scores go to the longer run
    fn outranks(&self, other: &RunRecord) -> bool {
        self.score > other.score || (self.score == other.score && self.distance > other.distance)
    }
}

/// Best runs, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    runs: Vec<RunRecord>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1-based rank `run` would take, `None` if it misses the board.
    /// A run that only ties an existing one slots in below it.
    pub fn rank_of(&self, run: &RunRecord) -> Option<usize> {
        if run.score == 0 {
            return None;
        }
        let above = self.runs.iter().take_while(|r| !run.outranks(r)).count();
        (above < MAX_HIGH_SCORES).then_some(above + 1)
    }

    /// Put a finished run on the board; returns its rank
    pub fn record(&mut self, run: RunRecord) -> Option<usize> {
        let rank = self.rank_of(&run)?;
        self.runs.insert(rank - 1, run);
        self.runs.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u64, distance: f32) -> RunRecord {
        RunRecord {
            score,
            distance,
            coins: 0,
        }
    }

    #[test]
    fn test_scoreless_run_is_not_ranked() {
        let mut board = HighScores::new();
        assert_eq!(board.rank_of(&run(0, 500.0)), None);
        assert_eq!(board.record(run(0, 500.0)), None);
        assert!(board.best().is_none());
    }

    #[test]
    fn test_runs_sorted_best_first() {
        let mut board = HighScores::new();
        assert_eq!(board.record(run(100, 1000.0)), Some(1));
        assert_eq!(board.record(run(300, 2500.0)), Some(1));
        assert_eq!(board.record(run(200, 1800.0)), Some(2));
        let order: Vec<u64> = board.runs().iter().map(|r| r.score).collect();
        assert_eq!(order, vec![300, 200, 100]);
        assert_eq!(board.best().map(|r| r.score), Some(300));
    }

    #[test]
    fn test_score_tie_goes_to_longer_run() {
        let mut board = HighScores::new();
        board.record(run(200, 1500.0));
        // Same score, further: ranks above
        assert_eq!(board.record(run(200, 1900.0)), Some(1));
        // Exact tie: ranks below both
        assert_eq!(board.record(run(200, 1500.0)), Some(3));
        let distances: Vec<f32> = board.runs().iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1900.0, 1500.0, 1500.0]);
    }

    #[test]
    fn test_full_board_drops_lowest() {
        let mut board = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            board.record(run(i * 10, 0.0));
        }
        assert_eq!(board.runs().len(), MAX_HIGH_SCORES);
        // Only ties the lowest: misses the board
        assert_eq!(board.rank_of(&run(10, 0.0)), None);
        assert_eq!(board.rank_of(&run(55, 0.0)), Some(6));
        assert_eq!(board.record(run(1000, 0.0)), Some(1));
        assert_eq!(board.runs().len(), MAX_HIGH_SCORES);
        assert_eq!(board.runs().last().map(|r| r.score), Some(20));
    }

    #[test]
    fn test_record_from_state() {
        let mut state = GameState::new(9);
        state.distance = 2345.0;
        state.coins_collected = 4;
        state.refresh_score();
        let record = RunRecord::from_state(&state);
        assert_eq!(record.score, 234);
        assert_eq!(record.coins, 4);
        assert_eq!(record.meters(), 234);
    }
}
