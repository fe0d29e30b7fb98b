use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use super::session::{Session, SessionError, SessionState};
use crate::game::GameConfig;

/// Ask for mode, speed and size on `output`, reading answers line by line
/// from `input`. Invalid answers are reported and asked again.
pub fn run_setup<R: BufRead, W: Write>(
    defaults: GameConfig,
    input: &mut R,
    output: &mut W,
) -> Result<Session> {
    let mut session = Session::new(defaults);

    loop {
        let prompt = match session.state() {
            SessionState::AwaitingMode => "Enter [B] for Bot and [P] for Player:".to_string(),
            SessionState::AwaitingSpeed => {
                format!("Enter speed (default {}):", session.config().speed)
            }
            SessionState::AwaitingSize => format!(
                "Enter game size (default {}x{}):",
                session.config().grid_width,
                session.config().grid_height
            ),
            _ => return Ok(session),
        };
        writeln!(output, "{prompt}")?;

        loop {
            let mut line = String::new();
            let read = input.read_line(&mut line).context("Failed to read answer")?;
            if read == 0 {
                bail!("input closed before setup finished");
            }

            let answer = match session.state() {
                SessionState::AwaitingMode => session.submit_mode(&line),
                SessionState::AwaitingSpeed => session.submit_speed(&line),
                _ => session.submit_size(&line),
            };
            match answer {
                Ok(_) => break,
                Err(err @ SessionError::UnexpectedInput { .. }) => return Err(err.into()),
                Err(err) => writeln!(output, "{err}")?,
            }
        }
    }
}
