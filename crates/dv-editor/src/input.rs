//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and keyboard events into a unified
//! `InputEvent` enum before they reach the positioning engine. Pointer
//! devices collapse to a single `PointerSample`; the keyboard produces
//! `Key` events that the shortcut map turns into `NudgeCommand`s.

use dv_core::Point;
use serde::{Deserialize, Serialize};

/// A pointer position in client (page) coordinates, from any device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Platform command key held (Ctrl or ⌘).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Nudge direction on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit offset in canvas space (y grows downward).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
        }
    }
}

/// Nudge granularity. Coarse is selected by holding Shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeStep {
    #[default]
    Fine,
    Coarse,
}

/// A device-independent keyboard move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NudgeCommand {
    pub direction: Direction,
    #[serde(default)]
    pub step: NudgeStep,
}

impl NudgeCommand {
    pub const fn new(direction: Direction, step: NudgeStep) -> Self {
        Self { direction, step }
    }
}

/// Touch lifecycle phases as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A normalized input event from any device.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse down or touch start.
    PointerDown(PointerSample),

    /// Mouse move or touch move.
    PointerMove(PointerSample),

    /// Mouse up, touch end, or touch cancel.
    PointerUp,

    /// Pointer left the tracked surface. Ends a drag exactly like `PointerUp`.
    PointerLeave,

    /// Key pressed while the canvas has focus.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn from_mouse_down(x: f64, y: f64) -> Self {
        Self::PointerDown(PointerSample::new(x, y))
    }

    pub fn from_mouse_move(x: f64, y: f64) -> Self {
        Self::PointerMove(PointerSample::new(x, y))
    }

    /// Normalize a touch event using its first touch point.
    ///
    /// Start/move without any touch point carry no position and yield `None`.
    pub fn from_touch(phase: TouchPhase, first_touch: Option<(f64, f64)>) -> Option<Self> {
        match phase {
            TouchPhase::Start => {
                first_touch.map(|(x, y)| Self::PointerDown(PointerSample::new(x, y)))
            }
            TouchPhase::Move => {
                first_touch.map(|(x, y)| Self::PointerMove(PointerSample::new(x, y)))
            }
            TouchPhase::End | TouchPhase::Cancel => Some(Self::PointerUp),
        }
    }

    pub fn from_key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }
}
