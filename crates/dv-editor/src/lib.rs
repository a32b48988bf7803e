pub mod controls;
pub mod engine;
pub mod hit;
pub mod input;
pub mod shortcuts;
pub mod store;

pub use controls::{CONTROL_RADIUS, Control, control_center};
pub use engine::{DragPhase, PositioningEngine};
pub use input::{Direction, InputEvent, Modifiers, NudgeCommand, NudgeStep, PointerSample};
pub use store::{Action, Store};
