use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;
use crate::modes::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Steer(Direction),
    Pause,
    Resume,
    ToggleBot,
    /// Multiply the speed by the given factor
    ChangeSpeed(f32),
    Restart,
    Quit,
    None,
}

/// Maps key presses to actions for the screen currently shown
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, screen: SessionState) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
            return KeyAction::Quit;
        }

        match screen {
            SessionState::Playing => Self::playing_key(key.code),
            SessionState::Paused => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => KeyAction::Resume,
                KeyCode::Char('b') | KeyCode::Char('B') => KeyAction::ToggleBot,
                KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::ChangeSpeed(1.5),
                KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::ChangeSpeed(1.0 / 1.5),
                _ => KeyAction::None,
            },
            SessionState::GameOver(_) => match key.code {
                KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('r') | KeyCode::Char('R') => {
                    KeyAction::Restart
                }
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    fn playing_key(code: KeyCode) -> KeyAction {
        match code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => KeyAction::Pause,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    fn press(handler: &InputHandler, code: KeyCode, screen: SessionState) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), screen)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();
        let playing = SessionState::Playing;

        assert_eq!(press(&handler, KeyCode::Up, playing), KeyAction::Steer(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Down, playing), KeyAction::Steer(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Left, playing), KeyAction::Steer(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Right, playing), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();
        let playing = SessionState::Playing;

        assert_eq!(press(&handler, KeyCode::Char('w'), playing), KeyAction::Steer(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Char('a'), playing), KeyAction::Steer(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Char('S'), playing), KeyAction::Steer(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Char('d'), playing), KeyAction::Steer(Direction::Right));
    }

    #[test]
    fn test_pause_menu_keys() {
        let handler = InputHandler::new();
        let paused = SessionState::Paused;

        assert_eq!(press(&handler, KeyCode::Char('p'), SessionState::Playing), KeyAction::Pause);
        assert_eq!(press(&handler, KeyCode::Char('r'), paused), KeyAction::Resume);
        assert_eq!(press(&handler, KeyCode::Char('b'), paused), KeyAction::ToggleBot);
        assert_eq!(press(&handler, KeyCode::Char('+'), paused), KeyAction::ChangeSpeed(1.5));
        // Steering is ignored while paused
        assert_eq!(press(&handler, KeyCode::Up, paused), KeyAction::None);
    }

    #[test]
    fn test_game_over_keys() {
        let handler = InputHandler::new();
        let over = SessionState::GameOver(GameStatus::Lost);

        assert_eq!(press(&handler, KeyCode::Char('p'), over), KeyAction::Restart);
        assert_eq!(press(&handler, KeyCode::Char('R'), over), KeyAction::Restart);
        assert_eq!(press(&handler, KeyCode::Left, over), KeyAction::None);
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        for screen in [SessionState::Playing, SessionState::Paused] {
            assert_eq!(press(&handler, KeyCode::Char('q'), screen), KeyAction::Quit);
            assert_eq!(press(&handler, KeyCode::Esc, screen), KeyAction::Quit);
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c, SessionState::Playing), KeyAction::Quit);
    }
}
