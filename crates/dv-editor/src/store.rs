//! Action store: the single owner of editor state.
//!
//! Every change to the canvas or the invoice form goes through
//! [`Store::dispatch`] as an explicit [`Action`]. Raw device input is first
//! normalized into an [`InputEvent`] and then translated into actions by
//! [`Store::handle_input`], so hosts never mutate state directly.

use crate::controls::{Control, hit_control};
use crate::engine::PositioningEngine;
use crate::hit::hit_test;
use crate::input::{InputEvent, NudgeCommand, PointerSample};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use dv_core::{
    CanvasSize, EditorConfig, ElementId, ElementKind, InvoiceField, InvoiceFields, ItemField,
    NaiveDate, Point, Totals,
};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

/// Every state transition the editor supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    // ── Canvas ──
    BeginDrag {
        id: ElementId,
        at: PointerSample,
    },
    UpdateDrag {
        at: PointerSample,
    },
    EndDrag,
    Nudge {
        id: ElementId,
        #[serde(flatten)]
        command: NudgeCommand,
    },
    Delete {
        id: ElementId,
    },
    Add {
        kind: ElementKind,
    },
    Reset,
    SetContent {
        id: ElementId,
        content: String,
    },
    /// Make `id` the keyboard target (`None` clears focus).
    Focus {
        id: Option<ElementId>,
    },

    // ── Invoice form ──
    SetField {
        field: InvoiceField,
        value: String,
    },
    SetTaxRate {
        value: String,
    },
    AddItem,
    RemoveItem {
        id: u32,
    },
    EditItem {
        id: u32,
        field: ItemField,
        value: String,
    },

    // ── Page chrome ──
    ToggleTutorial,
}

/// Editor state: positioned elements, invoice form, focus, and page flags.
pub struct Store {
    engine: PositioningEngine,
    invoice: InvoiceFields,
    focused: Option<ElementId>,
    tutorial_visible: bool,
}

impl Store {
    /// A fresh editor: seed elements and a blank invoice issued `today`.
    pub fn new(config: &EditorConfig, today: NaiveDate) -> Self {
        Self {
            engine: PositioningEngine::new(config),
            invoice: InvoiceFields::new(today),
            focused: None,
            tutorial_visible: false,
        }
    }

    pub fn engine(&self) -> &PositioningEngine {
        &self.engine
    }

    pub fn invoice(&self) -> &InvoiceFields {
        &self.invoice
    }

    pub fn totals(&self) -> Totals {
        self.invoice.totals()
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn tutorial_visible(&self) -> bool {
        self.tutorial_visible
    }

    /// Forward the canvas bounding box from the host layout.
    pub fn set_canvas_rect(&mut self, origin: Point, size: CanvasSize) {
        self.engine.set_canvas_rect(origin, size);
    }

    /// Apply one action. Returns `true` if any observable state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::BeginDrag { id, at } => self.engine.begin_drag(id, at),
            Action::UpdateDrag { at } => self.engine.update_drag(at),
            Action::EndDrag => self.engine.end_drag(),
            Action::Nudge { id, command } => self.engine.nudge(id, command),
            Action::Delete { id } => {
                let removed = self.engine.delete(id);
                if removed && self.focused == Some(id) {
                    self.focused = None;
                }
                removed
            }
            Action::Add { kind } => {
                let id = self.engine.add(kind);
                self.focused = Some(id);
                true
            }
            Action::Reset => {
                self.engine.reset();
                self.focused = None;
                true
            }
            Action::SetContent { id, content } => self.engine.set_content(id, &content),
            Action::Focus { id } => {
                let id = id.filter(|id| self.engine.get(*id).is_some());
                let changed = self.focused != id;
                self.focused = id;
                changed
            }
            Action::SetField { field, value } => self.invoice.set_field(field, &value),
            Action::SetTaxRate { value } => self.invoice.set_tax_rate(&value),
            Action::AddItem => {
                self.invoice.add_item();
                true
            }
            Action::RemoveItem { id } => self.invoice.remove_item(id),
            Action::EditItem { id, field, value } => self.invoice.edit_item(id, field, &value),
            Action::ToggleTutorial => {
                self.tutorial_visible = !self.tutorial_visible;
                true
            }
        }
    }

    /// Apply a batch of actions. Returns `true` if any of them changed state.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = Action>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) || changed)
    }

    /// Translate a normalized input event into actions and apply them.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let actions = self.actions_for(event);
        self.dispatch_all(actions)
    }

    /// The actions a normalized input event maps to in the current state.
    pub fn actions_for(&self, event: &InputEvent) -> SmallVec<[Action; 2]> {
        match event {
            InputEvent::PointerDown(at) => {
                let point = self.engine.to_canvas(*at);
                let (elements, footprint) = (self.engine.elements(), self.engine.footprint());
                // Controls float over neighbouring elements, so they win.
                if let Some((id, control)) = hit_control(elements, footprint, point) {
                    return match control {
                        Control::Delete => smallvec![Action::Delete { id }],
                        Control::DragHandle => smallvec![
                            Action::Focus { id: Some(id) },
                            Action::BeginDrag { id, at: *at },
                        ],
                    };
                }
                match hit_test(elements, footprint, point) {
                    Some(id) => smallvec![
                        Action::Focus { id: Some(id) },
                        Action::BeginDrag { id, at: *at },
                    ],
                    None => smallvec![Action::Focus { id: None }],
                }
            }
            InputEvent::PointerMove(at) => {
                if self.engine.is_dragging() {
                    smallvec![Action::UpdateDrag { at: *at }]
                } else {
                    SmallVec::new()
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => smallvec![Action::EndDrag],
            InputEvent::Key { key, modifiers } => {
                let Some(shortcut) = ShortcutMap::resolve(key, *modifiers) else {
                    return SmallVec::new();
                };
                match (shortcut, self.focused) {
                    (ShortcutAction::Nudge(command), Some(id)) => {
                        smallvec![Action::Nudge { id, command }]
                    }
                    (ShortcutAction::Delete, Some(id)) => smallvec![Action::Delete { id }],
                    (ShortcutAction::CancelDrag, _) => smallvec![Action::EndDrag],
                    (_, None) => SmallVec::new(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::control_center;
    use crate::input::{Direction, Modifiers, NudgeStep};
    use pretty_assertions::assert_eq;

    fn store() -> Store {
        Store::new(
            &EditorConfig::default(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn action_json_uses_snake_case_tags() {
        let action: Action = serde_json::from_str(
            r#"{"type":"nudge","id":"header","direction":"left","step":"coarse"}"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::Nudge {
                id: ElementId::intern("header"),
                command: NudgeCommand::new(Direction::Left, NudgeStep::Coarse),
            }
        );

        let json = serde_json::to_value(Action::Add {
            kind: ElementKind::Image,
        })
        .unwrap();
        assert_eq!(json["type"], "add");
        assert_eq!(json["kind"], "image");
    }

    #[test]
    fn pointer_down_on_element_focuses_and_drags() {
        let s = store();
        let actions = s.actions_for(&InputEvent::from_mouse_down(30.0, 30.0));
        let header = ElementId::intern("header");
        assert_eq!(
            actions.as_slice(),
            &[
                Action::Focus { id: Some(header) },
                Action::BeginDrag {
                    id: header,
                    at: PointerSample::new(30.0, 30.0)
                },
            ]
        );
    }

    #[test]
    fn clicking_delete_control_removes_element() {
        let mut s = store();
        let header = ElementId::intern("header");
        let at = control_center(Point::new(20.0, 20.0), s.engine().footprint(), Control::Delete);
        assert!(s.handle_input(&InputEvent::from_mouse_down(at.x, at.y)));
        assert!(s.engine().get(header).is_none());
        assert!(!s.engine().is_dragging());
    }

    #[test]
    fn dragging_by_handle_moves_element() {
        let mut s = store();
        let header = ElementId::intern("header");
        let at = control_center(
            Point::new(20.0, 20.0),
            s.engine().footprint(),
            Control::DragHandle,
        );
        assert!(s.handle_input(&InputEvent::from_mouse_down(at.x, at.y)));
        assert_eq!(s.engine().active_id(), Some(header));
        assert_eq!(s.focused(), Some(header));

        s.handle_input(&InputEvent::from_mouse_move(at.x + 30.0, at.y + 40.0));
        s.handle_input(&InputEvent::PointerUp);
        assert_eq!(s.engine().get(header).unwrap().position, Point::new(50.0, 60.0));
    }

    #[test]
    fn pointer_move_while_idle_produces_nothing() {
        let s = store();
        assert!(s.actions_for(&InputEvent::from_mouse_move(10.0, 10.0)).is_empty());
    }

    #[test]
    fn add_focuses_new_element() {
        let mut s = store();
        s.dispatch(Action::Add {
            kind: ElementKind::Header,
        });
        let focused = s.focused().unwrap();
        assert!(focused.as_str().starts_with("header-"));
        assert_eq!(s.engine().elements().len(), 4);
    }

    #[test]
    fn delete_key_removes_focused_element() {
        let mut s = store();
        s.dispatch(Action::Focus {
            id: Some(ElementId::intern("logo")),
        });
        assert!(s.handle_input(&InputEvent::from_key("Delete", Modifiers::NONE)));
        assert!(s.engine().get(ElementId::intern("logo")).is_none());
        assert_eq!(s.focused(), None);
    }

    #[test]
    fn keys_without_focus_do_nothing() {
        let mut s = store();
        assert!(!s.handle_input(&InputEvent::from_key("ArrowLeft", Modifiers::NONE)));
    }

    #[test]
    fn focusing_unknown_element_clears_focus() {
        let mut s = store();
        s.dispatch(Action::Focus {
            id: Some(ElementId::intern("header")),
        });
        s.dispatch(Action::Focus {
            id: Some(ElementId::intern("nowhere")),
        });
        assert_eq!(s.focused(), None);
    }

    #[test]
    fn tutorial_toggles() {
        let mut s = store();
        s.dispatch(Action::ToggleTutorial);
        assert!(s.tutorial_visible());
        s.dispatch(Action::ToggleTutorial);
        assert!(!s.tutorial_visible());
    }
}
