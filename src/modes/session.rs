//! Menu flow around a round of Snake
//!
//! A session starts by asking for the control mode, the speed and the board
//! size, then alternates between playing, paused and game-over screens.

use thiserror::Error;

use crate::game::config::MAX_SPEED;
use crate::game::{GameConfig, GameStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMode,
    AwaitingSpeed,
    AwaitingSize,
    Playing,
    Paused,
    GameOver(GameStatus),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Invalid input, enter B for bot or P for player")]
    InvalidMode,
    #[error("Input must be a number")]
    NotANumber,
    #[error("Input must be positive")]
    NotPositive,
    #[error("Invalid format, expected WIDTHxHEIGHT")]
    InvalidFormat,
    #[error("Invalid width input ({0})")]
    InvalidWidth(String),
    #[error("Width ({0}) must be positive")]
    WidthNotPositive(i64),
    #[error("Invalid height input ({0})")]
    InvalidHeight(String),
    #[error("Height ({0}) must be positive")]
    HeightNotPositive(i64),
    #[error("{action} is not possible while {state:?}")]
    UnexpectedInput {
        action: &'static str,
        state: SessionState,
    },
}

/// Session settings plus the screen currently shown
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    config: GameConfig,
}

impl Session {
    /// Start at the mode prompt with `defaults` for anything left blank
    pub fn new(defaults: GameConfig) -> Self {
        Self {
            state: SessionState::AwaitingMode,
            config: defaults,
        }
    }

    /// Skip the prompts and go straight to playing
    pub fn playing(config: GameConfig) -> Self {
        Self {
            state: SessionState::Playing,
            config,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_autonomous(&self) -> bool {
        self.config.autonomous
    }

    fn expect(&self, expected: SessionState, action: &'static str) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::UnexpectedInput {
                action,
                state: self.state,
            })
        }
    }

    /// `B` picks the bot, `P` the player
    pub fn submit_mode(&mut self, input: &str) -> Result<SessionState, SessionError> {
        self.expect(SessionState::AwaitingMode, "choosing a mode")?;
        self.config.autonomous = match input.trim().to_ascii_uppercase().as_str() {
            "B" => true,
            "P" => false,
            _ => return Err(SessionError::InvalidMode),
        };
        self.state = SessionState::AwaitingSpeed;
        Ok(self.state)
    }

    /// Blank keeps the current speed; values above the maximum are clamped
    pub fn submit_speed(&mut self, input: &str) -> Result<SessionState, SessionError> {
        self.expect(SessionState::AwaitingSpeed, "setting the speed")?;
        let input = input.trim();
        if !input.is_empty() {
            self.config.speed = parse_speed(input)?;
        }
        self.state = SessionState::AwaitingSize;
        Ok(self.state)
    }

    /// Blank keeps the current size, otherwise `WIDTHxHEIGHT`
    pub fn submit_size(&mut self, input: &str) -> Result<SessionState, SessionError> {
        self.expect(SessionState::AwaitingSize, "setting the size")?;
        let input = input.trim();
        if !input.is_empty() {
            let (width, height) = parse_size(input)?;
            self.config.grid_width = width;
            self.config.grid_height = height;
        }
        self.state = SessionState::Playing;
        Ok(self.state)
    }

    pub fn pause(&mut self) -> Result<SessionState, SessionError> {
        self.expect(SessionState::Playing, "pausing")?;
        self.state = SessionState::Paused;
        Ok(self.state)
    }

    pub fn resume(&mut self) -> Result<SessionState, SessionError> {
        self.expect(SessionState::Paused, "resuming")?;
        self.state = SessionState::Playing;
        Ok(self.state)
    }

    /// Hand control to the bot or take it back; only from the pause menu
    pub fn toggle_bot(&mut self) -> Result<bool, SessionError> {
        self.expect(SessionState::Paused, "toggling the bot")?;
        self.config.autonomous = !self.config.autonomous;
        Ok(self.config.autonomous)
    }

    /// Multiply the speed by `factor`, staying within `(0, MAX_SPEED]`
    pub fn adjust_speed(&mut self, factor: f32) -> Result<f32, SessionError> {
        self.expect(SessionState::Paused, "changing the speed")?;
        let speed = self.config.speed * factor;
        if speed.is_finite() && speed > 0.0 {
            self.config.speed = speed.min(MAX_SPEED);
        }
        Ok(self.config.speed)
    }

    /// Record the end of a round. Playing statuses are ignored.
    pub fn finish(&mut self, status: GameStatus) -> Result<SessionState, SessionError> {
        self.expect(SessionState::Playing, "ending the round")?;
        if status.is_terminal() {
            self.state = SessionState::GameOver(status);
        }
        Ok(self.state)
    }

    pub fn restart(&mut self) -> Result<SessionState, SessionError> {
        if !matches!(self.state, SessionState::GameOver(_)) {
            return Err(SessionError::UnexpectedInput {
                action: "restarting",
                state: self.state,
            });
        }
        self.state = SessionState::Playing;
        Ok(self.state)
    }
}

fn parse_speed(input: &str) -> Result<f32, SessionError> {
    let speed: f32 = input.parse().map_err(|_| SessionError::NotANumber)?;
    if speed.is_nan() {
        return Err(SessionError::NotANumber);
    }
    if speed <= 0.0 {
        return Err(SessionError::NotPositive);
    }
    Ok(speed.min(MAX_SPEED))
}

fn parse_size(input: &str) -> Result<(usize, usize), SessionError> {
    let upper = input.to_ascii_uppercase();
    let parts: Vec<&str> = upper.split('X').collect();
    let [width, height] = parts.as_slice() else {
        return Err(SessionError::InvalidFormat);
    };

    let width: i64 = width
        .trim()
        .parse()
        .map_err(|_| SessionError::InvalidWidth(width.trim().to_string()))?;
    if width <= 0 {
        return Err(SessionError::WidthNotPositive(width));
    }
    let height: i64 = height
        .trim()
        .parse()
        .map_err(|_| SessionError::InvalidHeight(height.trim().to_string()))?;
    if height <= 0 {
        return Err(SessionError::HeightNotPositive(height));
    }

    Ok((width as usize, height as usize))
}
