//! Key mapping from terminal events to grid actions.

use crate::types::GridAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to grid actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GridAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GridAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GridAction::MoveRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GridAction::MoveUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GridAction::MoveDown)
        }

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(GridAction::Select),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GridAction::RandomMove),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GridAction::NewBoard),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
