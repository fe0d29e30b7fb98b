use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CellState, GameState, GameStatus, Grid, Position};
use crate::metrics::GameMetrics;
use crate::modes::session::{Session, SessionState};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        session: &Session,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, session, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(&state.grid, state.snake.head);
        frame.render_widget(grid, chunks[1]);

        match session.state() {
            SessionState::Paused => {
                let area = centered(chunks[1], 44, 8);
                frame.render_widget(Clear, area);
                frame.render_widget(self.render_pause_menu(session), area);
            }
            SessionState::GameOver(status) => {
                let area = centered(chunks[1], 44, 8);
                frame.render_widget(Clear, area);
                frame.render_widget(self.render_game_over(state, status, metrics), area);
            }
            _ => {}
        }

        let controls = self.render_controls(session.state());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, grid: &Grid, head: Position) -> Paragraph<'_> {
        let lines: Vec<Line> = (0..grid.height())
            .map(|y| {
                let spans: Vec<Span> = grid
                    .row(y)
                    .iter()
                    .enumerate()
                    .map(|(x, &cell)| {
                        let pos = Position::new(x as i32, y as i32);
                        cell_span(cell, pos == head)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        session: &Session,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let mode = if session.is_autonomous() { "Bot" } else { "Player" };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(mode, value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}", session.config().speed), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_pause_menu(&self, session: &Session) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let bot = if session.is_autonomous() {
            " disable the bot"
        } else {
            " enable the bot"
        };

        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("R", key), Span::raw(" resume")]),
            Line::from(vec![Span::styled("B", key), Span::raw(bot)]),
            Line::from(vec![Span::styled("+ / -", key), Span::raw(" change speed")]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(
        &self,
        state: &GameState,
        status: GameStatus,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let (title, color) = match status {
            GameStatus::Won => ("YOU WON", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                metrics.format_record(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "P",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, screen: SessionState) -> Paragraph<'_> {
        let line = match screen {
            SessionState::Paused => Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Cyan)),
                Span::raw(" to resume | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            _ => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("P", Style::default().fg(Color::Cyan)),
                Span::raw(" to pause | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(cell: CellState, is_head: bool) -> Span<'static> {
    match cell {
        CellState::Occupied if is_head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        CellState::Occupied => Span::styled("□ ", Style::default().fg(Color::Green)),
        CellState::Target => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        CellState::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

/// A `width` x `height` rectangle in the middle of `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
