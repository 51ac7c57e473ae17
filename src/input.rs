//! Key bindings and per-tick intent collection.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shricktris::Intents;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    Quit,
    SpeedUp,
    SpeedDown,
    Restart,
    None,
}

/// Map key event to game action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p' | 'P') | KeyCode::Pause => Action::Pause,
        KeyCode::Left => Action::MoveLeft,
        KeyCode::Right => Action::MoveRight,
        KeyCode::Up => Action::Rotate,
        KeyCode::Down => Action::SoftDrop,
        KeyCode::Char(' ') => Action::HardDrop,
        KeyCode::Char('+' | '=') => Action::SpeedUp,
        KeyCode::Char('-') => Action::SpeedDown,
        KeyCode::Char('r' | 'R') => Action::Restart,
        _ => Action::None,
    }
}

/// Presses seen since the last tick, folded into one snapshot.
#[derive(Debug, Default)]
pub struct IntentCollector {
    intents: Intents,
}

impl IntentCollector {
    /// Records a key event. Releases are ignored; terminal auto-repeat stands in for held keys.
    pub fn record(&mut self, key: KeyEvent) -> Action {
        if key.kind == KeyEventKind::Release {
            return Action::None;
        }
        let action = key_to_action(key);
        let intents = &mut self.intents;
        match action {
            Action::MoveLeft => intents.move_left = true,
            Action::MoveRight => intents.move_right = true,
            Action::Rotate => intents.rotate = true,
            Action::SoftDrop => intents.soft_drop = true,
            Action::HardDrop => intents.hard_drop = true,
            Action::Pause => intents.pause = true,
            Action::Quit => intents.quit = true,
            Action::SpeedUp => intents.speed_up = true,
            Action::SpeedDown => intents.speed_down = true,
            Action::Restart | Action::None => {}
        }
        action
    }

    /// Snapshot for the coming tick; the collector starts empty again.
    pub fn take(&mut self) -> Intents {
        std::mem::take(&mut self.intents)
    }
}
