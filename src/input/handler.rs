//! Key mapping from terminal events to quiz actions.
//!
//! One key press, one action. Gesture disambiguation (which screen reacts
//! to what) stays in the runner; this mapping is pure.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Nerve, QuizAction};

/// Map keyboard input to quiz actions.
pub fn handle_key_event(key: KeyEvent) -> Option<QuizAction> {
    match key.code {
        // Cycle the selected card through the pending deck
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::BackTab => {
            Some(QuizAction::SelectPrev)
        }
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Tab
        | KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J') => Some(QuizAction::SelectNext),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(QuizAction::SelectPrev),

        // Place the selected card into a nerve column
        KeyCode::Char('1') | KeyCode::Char('m') | KeyCode::Char('M') => {
            Some(QuizAction::Place(Nerve::Median))
        }
        KeyCode::Char('2') | KeyCode::Char('u') | KeyCode::Char('U') => {
            Some(QuizAction::Place(Nerve::Ulnar))
        }
        KeyCode::Char('3') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(QuizAction::Place(Nerve::Radial))
        }

        // Drop the selection
        KeyCode::Esc => Some(QuizAction::ClearSelection),

        // Start / play again
        KeyCode::Enter | KeyCode::Char(' ') => Some(QuizAction::Start),

        _ => None,
    }
}

/// Check if key should quit the quiz.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
