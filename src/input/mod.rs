//! Keyboard mapping.
//!
//! Stateless: each key event maps to at most one action. Key repeat is left
//! to the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameCommand;

/// What the UI should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Forward a command to the engine.
    Command(GameCommand),
    /// Start a new game (or restart after game over).
    Start,
    /// Leave the program.
    Quit,
}

/// Map a key event to a UI action, if it is bound.
///
/// Arrows and WASD both steer the piece; Enter starts; `q`, Esc and Ctrl-C
/// quit. Release/repeat events from terminals that report them are ignored.
pub fn map_key(event: &KeyEvent) -> Option<UiAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(UiAction::Quit),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Left | KeyCode::Char('a') => Some(UiAction::Command(GameCommand::MoveLeft)),
        KeyCode::Right | KeyCode::Char('d') => Some(UiAction::Command(GameCommand::MoveRight)),
        KeyCode::Down | KeyCode::Char('s') => Some(UiAction::Command(GameCommand::SoftDrop)),
        KeyCode::Up | KeyCode::Char('w') => Some(UiAction::Command(GameCommand::Rotate)),
        KeyCode::Enter => Some(UiAction::Start),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
        _ => None,
    }
}
