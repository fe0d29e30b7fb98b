//! Autopilot games without a terminal
//!
//! Useful for checking how the agent fares on a given board size: every game
//! runs to completion as fast as possible and reports its outcome.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::agent::Autopilot;
use crate::game::{GameConfig, GameEngine, GameStatus};

/// Outcome of one autonomous game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub game: usize,
    pub status: GameStatus,
    pub score: u32,
    pub steps: u32,
    /// True when the tick cap ended the game instead of a win or loss
    pub capped: bool,
}

pub struct HeadlessRunner {
    config: GameConfig,
    games: usize,
}

impl HeadlessRunner {
    pub fn new(config: GameConfig, games: usize) -> Self {
        Self { config, games }
    }

    /// Ticks allowed per game before it is abandoned
    fn tick_cap(&self) -> u64 {
        let cells = (self.config.grid_width * self.config.grid_height) as u64;
        cells.saturating_mul(cells).max(16)
    }

    pub fn run(&self) -> Result<Vec<GameReport>> {
        self.config.validate().context("Invalid game configuration")?;

        let mut engine = GameEngine::new(self.config.clone());
        let mut reports = Vec::with_capacity(self.games);

        for game in 1..=self.games {
            let mut state = engine.reset().context("Failed to set up the board")?;
            let mut autopilot = Autopilot::new(self.config.grid_width, self.config.grid_height);

            let mut ticks = 0;
            while state.is_alive() && ticks < self.tick_cap() {
                autopilot
                    .tick(&mut engine, &mut state)
                    .with_context(|| format!("Game {game} hit an invalid board position"))?;
                ticks += 1;
            }

            let report = GameReport {
                game,
                status: state.status,
                score: state.score,
                steps: state.steps,
                capped: state.is_alive(),
            };
            info!(
                game,
                status = ?report.status,
                score = report.score,
                steps = report.steps,
                "game finished"
            );
            reports.push(report);
        }

        Ok(reports)
    }

    /// Human readable summary of a batch of reports
    pub fn summarize(reports: &[GameReport]) -> String {
        if reports.is_empty() {
            return "No games played".to_string();
        }

        let won = reports.iter().filter(|r| r.status == GameStatus::Won).count();
        let best = reports.iter().map(|r| r.score).max().unwrap_or(0);
        let mean = reports.iter().map(|r| r.score as f64).sum::<f64>() / reports.len() as f64;

        format!(
            "Games: {}  Won: {}  Best score: {}  Mean score: {:.2}",
            reports.len(),
            won,
            best,
            mean
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_requested_games() {
        let runner = HeadlessRunner::new(GameConfig::new(6, 6).with_seed(8), 3);
        let reports = runner.run().unwrap();

        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.game, i + 1);
            assert!(report.status.is_terminal() || report.capped);
            assert!(report.score >= 1 || report.status == GameStatus::Lost);
        }
    }

    #[test]
    fn test_tiny_board_is_won() {
        let runner = HeadlessRunner::new(GameConfig::new(2, 1).with_seed(1), 1);
        let reports = runner.run().unwrap();
        assert_eq!(reports[0].status, GameStatus::Won);
        assert_eq!(reports[0].score, 2);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let runner = HeadlessRunner::new(GameConfig::new(0, 4), 1);
        assert!(runner.run().is_err());
    }

    #[test]
    fn test_summary() {
        let reports = vec![
            GameReport { game: 1, status: GameStatus::Won, score: 4, steps: 20, capped: false },
            GameReport { game: 2, status: GameStatus::Lost, score: 2, steps: 9, capped: false },
        ];
        assert_eq!(
            HeadlessRunner::summarize(&reports),
            "Games: 2  Won: 1  Best score: 4  Mean score: 3.00"
        );
        assert_eq!(HeadlessRunner::summarize(&[]), "No games played");
    }
}
