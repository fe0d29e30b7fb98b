use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// Round clock and results for one interactive session
#[derive(Debug, Clone)]
pub struct GameMetrics {
    /// Play time banked before the clock was last stopped
    banked: Duration,
    running_since: Option<Instant>,
    pub best_score: u32,
    pub wins: u32,
    pub losses: u32,
}

impl GameMetrics {
    /// Metrics for a session whose first round has just started
    pub fn new() -> Self {
        Self {
            banked: Duration::ZERO,
            running_since: Some(Instant::now()),
            best_score: 0,
            wins: 0,
            losses: 0,
        }
    }

    pub fn start_round(&mut self) {
        self.banked = Duration::ZERO;
        self.running_since = Some(Instant::now());
    }

    pub fn pause_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += since.elapsed();
        }
    }

    pub fn resume_clock(&mut self) {
        self.running_since.get_or_insert_with(Instant::now);
    }

    /// Time spent playing the current round, pauses excluded
    pub fn round_time(&self) -> Duration {
        self.banked + self.running_since.map_or(Duration::ZERO, |since| since.elapsed())
    }

    /// Stop the clock and tally a finished round
    pub fn record_result(&mut self, status: GameStatus, score: u32) {
        self.pause_clock();
        match status {
            GameStatus::Won => self.wins += 1,
            GameStatus::Lost => self.losses += 1,
            GameStatus::Playing => return,
        }
        self.best_score = self.best_score.max(score);
    }

    pub fn rounds_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn format_time(&self) -> String {
        format_clock(self.round_time())
    }

    pub fn format_record(&self) -> String {
        format!("Won {} of {}", self.wins, self.rounds_played())
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_clock(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
