use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, interval};
use tracing::info;

use crate::agent::Autopilot;
use crate::game::{Direction, GameEngine, GameState, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::modes::session::{Session, SessionState};
use crate::render::Renderer;

/// Interactive terminal game, steered by the keyboard or the autopilot
pub struct PlayMode {
    engine: GameEngine,
    state: GameState,
    session: Session,
    autopilot: Autopilot,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Last direction pressed; kept until another key is pressed
    held_direction: Option<Direction>,
}

impl PlayMode {
    /// `session` must already be past the setup prompts
    pub fn new(session: Session) -> Result<Self> {
        let config = session.config().clone();
        config.validate().context("Invalid game configuration")?;

        let mut engine = GameEngine::new(config.clone());
        let state = engine.reset().context("Failed to set up the board")?;

        Ok(Self {
            engine,
            state,
            session,
            autopilot: Autopilot::new(config.grid_width, config.grid_height),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            held_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.session.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.session.state() == SessionState::Playing {
                        self.update_game()?;
                    }
                }

                // Render frame, always between two complete ticks
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key, self.session.state());
            self.apply(action, tick_timer)?;
        }

        Ok(())
    }

    fn apply(&mut self, action: KeyAction, tick_timer: &mut Interval) -> Result<()> {
        match action {
            KeyAction::Steer(direction) => {
                if !self.session.is_autonomous() {
                    self.held_direction = Some(direction);
                }
            }
            KeyAction::Pause => {
                self.session.pause()?;
                self.metrics.pause_clock();
            }
            KeyAction::Resume => {
                self.session.resume()?;
                self.metrics.resume_clock();
            }
            KeyAction::ToggleBot => {
                let autonomous = self.session.toggle_bot()?;
                self.autopilot.clear();
                // Keep heading the same way when the keyboard takes over
                self.held_direction = self.state.previous_direction;
                info!(autonomous, "control switched");
            }
            KeyAction::ChangeSpeed(factor) => {
                self.session.adjust_speed(factor)?;
                tick_timer.reset_after(self.session.config().tick_interval());
            }
            KeyAction::Restart => {
                self.reset_game()?;
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let status = if self.session.is_autonomous() {
            self.autopilot.tick(&mut self.engine, &mut self.state)?
        } else {
            self.engine.tick(&mut self.state, self.held_direction)?
        };

        if status != GameStatus::Playing {
            self.metrics.record_result(status, self.state.score);
            self.session.finish(status)?;
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.reset()?;
        self.session.restart()?;
        self.autopilot.clear();
        self.metrics.start_round();
        self.held_direction = None;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
