//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Arrow keys
//! are the keyboard-accessible equivalent of dragging: they nudge the
//! focused element, and Shift switches to the coarse step.

use crate::input::{Direction, Modifiers, NudgeCommand, NudgeStep};

/// Actions that keyboard shortcuts can trigger on the focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Nudge(NudgeCommand),
    Delete,
    /// Abandon the current drag (Escape).
    CancelDrag,
}

/// Resolves key events into shortcut actions.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"ArrowLeft"`,
    /// `"Delete"`). Command-key combos are left to the browser.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return None;
        }

        let step = if modifiers.shift {
            NudgeStep::Coarse
        } else {
            NudgeStep::Fine
        };
        let nudge = |direction| Some(ShortcutAction::Nudge(NudgeCommand::new(direction, step)));

        match key {
            "ArrowLeft" | "Left" => nudge(Direction::Left),
            "ArrowRight" | "Right" => nudge(Direction::Right),
            "ArrowUp" | "Up" => nudge(Direction::Up),
            "ArrowDown" | "Down" => nudge(Direction::Down),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" | "Esc" => Some(ShortcutAction::CancelDrag),
            _ => None,
        }
    }
}
