//! Canvas positioning engine.
//!
//! Owns the placed elements and the canvas-wide drag state machine:
//!
//! ```text
//!   Idle ──begin_drag──▶ Dragging(active, grab_offset) ──end_drag──▶ Idle
//!                          │  ▲
//!                          └──┘ begin_drag (other element replaces)
//! ```
//!
//! Pointer samples arrive in client coordinates. The engine subtracts the
//! canvas origin and the grab offset recorded at `begin_drag`, so the
//! element keeps the point where it was grabbed under the pointer instead
//! of snapping its corner to the cursor.
//!
//! Every write to a position (drag, nudge, add, resize) goes through the
//! same clamp, keeping the footprint inside `[0, canvas - footprint]`.

use crate::input::{NudgeCommand, NudgeStep, PointerSample};
use dv_core::{
    CanvasSize, EditorConfig, ElementId, ElementKind, ElementSet, Footprint, PlacedElement, Point,
    Vec2, clamp_position,
};

/// Canvas-wide drag state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging {
        active: ElementId,
        /// `pointer - origin - position` captured when the drag began.
        grab_offset: Vec2,
    },
}

pub struct PositioningEngine {
    elements: ElementSet,
    phase: DragPhase,
    /// Canvas top-left in client coordinates.
    origin: Point,
    canvas: CanvasSize,
    footprint: Footprint,
    fine_step: f64,
    coarse_step: f64,
}

impl Default for PositioningEngine {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl PositioningEngine {
    /// A seeded engine with the canvas anchored at the client origin.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            elements: ElementSet::seeded(),
            phase: DragPhase::Idle,
            origin: Point::ZERO,
            canvas: config.canvas,
            footprint: config.footprint,
            fine_step: config.fine_step,
            coarse_step: config.coarse_step,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn elements(&self) -> &ElementSet {
        &self.elements
    }

    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.get(id)
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn active_id(&self) -> Option<ElementId> {
        match self.phase {
            DragPhase::Dragging { active, .. } => Some(active),
            DragPhase::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Elements in paint order (dragging element last).
    pub fn render_order(&self) -> Vec<&PlacedElement> {
        self.elements.render_order()
    }

    /// Convert a client-space sample to canvas space.
    pub fn to_canvas(&self, sample: PointerSample) -> Point {
        sample.to_point() - self.origin.to_vec2()
    }

    // ─── Canvas geometry ─────────────────────────────────────────────────

    /// Update the canvas bounding box (client origin + size).
    ///
    /// Existing elements are re-clamped so a shrinking canvas never leaves
    /// an element outside the new bounds.
    pub fn set_canvas_rect(&mut self, origin: Point, size: CanvasSize) {
        self.origin = origin;
        if size == self.canvas {
            return;
        }
        log::debug!(
            "canvas resized {}x{} -> {}x{}",
            self.canvas.width,
            self.canvas.height,
            size.width,
            size.height
        );
        self.canvas = size;
        let (canvas, footprint) = (self.canvas, self.footprint);
        for el in self.elements.iter_mut() {
            el.position = clamp_position(el.position, canvas, footprint);
        }
    }

    fn clamp(&self, candidate: Point) -> Point {
        clamp_position(candidate, self.canvas, self.footprint)
    }

    // ─── Drag state machine ──────────────────────────────────────────────

    /// Start dragging `id` from the given pointer sample.
    ///
    /// Replaces any drag already in progress. Unknown ids are a no-op.
    pub fn begin_drag(&mut self, id: ElementId, sample: PointerSample) -> bool {
        let Some(position) = self.elements.get(id).map(|el| el.position) else {
            log::debug!("begin_drag: unknown element {id}");
            return false;
        };

        if let Some(prev) = self.active_id()
            && prev != id
        {
            log::debug!("drag on {prev} superseded by {id}");
        }
        for el in self.elements.iter_mut() {
            el.dragging = el.id == id;
        }

        let grab_offset = self.to_canvas(sample) - position;
        self.phase = DragPhase::Dragging {
            active: id,
            grab_offset,
        };
        log::debug!("begin_drag {id} grab=({}, {})", grab_offset.x, grab_offset.y);
        true
    }

    /// Move the active element so the grab point follows the pointer.
    ///
    /// No-op while idle. Returns `true` if the position changed.
    pub fn update_drag(&mut self, sample: PointerSample) -> bool {
        let DragPhase::Dragging {
            active,
            grab_offset,
        } = self.phase
        else {
            return false;
        };
        let target = self.clamp(self.to_canvas(sample) - grab_offset);
        let Some(el) = self.elements.get_mut(active) else {
            // Active element vanished without going through `delete`.
            self.phase = DragPhase::Idle;
            return false;
        };
        if el.position == target {
            return false;
        }
        log::trace!("drag {active} -> ({}, {})", target.x, target.y);
        el.position = target;
        true
    }

    /// Finish the current drag. Idempotent.
    pub fn end_drag(&mut self) -> bool {
        let DragPhase::Dragging { active, .. } = self.phase else {
            return false;
        };
        if let Some(el) = self.elements.get_mut(active) {
            el.dragging = false;
        }
        self.phase = DragPhase::Idle;
        log::debug!("end_drag {active}");
        true
    }

    // ─── Keyboard path ───────────────────────────────────────────────────

    /// Move `id` by one keyboard step, independent of any drag session.
    pub fn nudge(&mut self, id: ElementId, cmd: NudgeCommand) -> bool {
        let distance = match cmd.step {
            NudgeStep::Fine => self.fine_step,
            NudgeStep::Coarse => self.coarse_step,
        };
        let Some(position) = self.elements.get(id).map(|el| el.position) else {
            log::debug!("nudge: unknown element {id}");
            return false;
        };
        let (ux, uy) = cmd.direction.unit();
        let target = self.clamp(position + Vec2::new(ux * distance, uy * distance));
        if target == position {
            return false;
        }
        if let Some(el) = self.elements.get_mut(id) {
            el.position = target;
        }
        true
    }

    // ─── Collection edits ────────────────────────────────────────────────

    /// Add a fresh element of `kind` at the default position.
    pub fn add(&mut self, kind: ElementKind) -> ElementId {
        let el = PlacedElement::fresh(kind);
        let id = el.id;
        self.insert(el);
        id
    }

    /// Insert a prepared element, clamping its position. Returns `false` on
    /// a duplicate id.
    pub fn insert(&mut self, mut element: PlacedElement) -> bool {
        element.position = self.clamp(element.position);
        element.dragging = false;
        let id = element.id;
        let inserted = self.elements.insert(element);
        if inserted {
            log::debug!("added element {id}");
        }
        inserted
    }

    /// Remove an element, ending the drag if it was the active target.
    pub fn delete(&mut self, id: ElementId) -> bool {
        if self.active_id() == Some(id) {
            self.end_drag();
        }
        let removed = self.elements.remove(id).is_some();
        if removed {
            log::debug!("deleted element {id}");
        }
        removed
    }

    /// Replace the text of a header/footer. Images and unknown ids are a no-op.
    pub fn set_content(&mut self, id: ElementId, content: &str) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        if !el.kind.is_textual() || el.content.as_deref() == Some(content) {
            return false;
        }
        el.content = Some(content.to_string());
        true
    }

    /// Discard everything and restore the seed elements.
    pub fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.elements.reset();
        let (canvas, footprint) = (self.canvas, self.footprint);
        for el in self.elements.iter_mut() {
            el.position = clamp_position(el.position, canvas, footprint);
        }
        log::debug!("canvas reset to seed elements");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;
    use pretty_assertions::assert_eq;

    fn header() -> ElementId {
        ElementId::intern("header")
    }

    fn engine_at(origin: Point) -> PositioningEngine {
        let mut engine = PositioningEngine::default();
        engine.set_canvas_rect(origin, CanvasSize::new(800.0, 600.0));
        engine
    }

    #[test]
    fn grab_point_is_preserved() {
        let mut engine = engine_at(Point::new(100.0, 200.0));
        let sample = PointerSample::new(150.0, 235.0);
        assert!(engine.begin_drag(header(), sample));
        engine.update_drag(sample);
        assert_eq!(engine.get(header()).unwrap().position, Point::new(20.0, 20.0));

        engine.update_drag(PointerSample::new(160.0, 240.0));
        assert_eq!(engine.get(header()).unwrap().position, Point::new(30.0, 25.0));
    }

    #[test]
    fn drag_clamps_to_canvas() {
        let mut engine = engine_at(Point::ZERO);
        engine.begin_drag(header(), PointerSample::new(25.0, 25.0));
        engine.update_drag(PointerSample::new(-500.0, 5000.0));
        assert_eq!(engine.get(header()).unwrap().position, Point::new(0.0, 550.0));
        engine.update_drag(PointerSample::new(5000.0, -500.0));
        assert_eq!(engine.get(header()).unwrap().position, Point::new(700.0, 0.0));
    }

    #[test]
    fn update_while_idle_is_noop() {
        let mut engine = PositioningEngine::default();
        assert!(!engine.update_drag(PointerSample::new(300.0, 300.0)));
        assert_eq!(engine.get(header()).unwrap().position, Point::new(20.0, 20.0));
    }

    #[test]
    fn begin_on_unknown_id_is_noop() {
        let mut engine = PositioningEngine::default();
        assert!(!engine.begin_drag(ElementId::intern("ghost"), PointerSample::new(0.0, 0.0)));
        assert_eq!(engine.phase(), DragPhase::Idle);
    }

    #[test]
    fn new_drag_supersedes_previous() {
        let mut engine = PositioningEngine::default();
        let logo = ElementId::intern("logo");
        engine.begin_drag(header(), PointerSample::new(30.0, 30.0));
        engine.begin_drag(logo, PointerSample::new(410.0, 30.0));

        assert_eq!(engine.active_id(), Some(logo));
        let dragging: Vec<&str> = engine
            .elements()
            .iter()
            .filter(|el| el.dragging)
            .map(|el| el.id.as_str())
            .collect();
        assert_eq!(dragging, vec!["logo"]);
    }

    #[test]
    fn end_drag_is_idempotent() {
        let mut engine = PositioningEngine::default();
        engine.begin_drag(header(), PointerSample::new(30.0, 30.0));
        assert!(engine.end_drag());
        assert!(!engine.end_drag());
        assert!(engine.elements().iter().all(|el| !el.dragging));
    }

    #[test]
    fn deleting_active_element_ends_drag() {
        let mut engine = PositioningEngine::default();
        engine.begin_drag(header(), PointerSample::new(30.0, 30.0));
        assert!(engine.delete(header()));
        assert_eq!(engine.active_id(), None);
        assert!(!engine.update_drag(PointerSample::new(90.0, 90.0)));
    }

    #[test]
    fn deleting_other_element_keeps_drag() {
        let mut engine = PositioningEngine::default();
        engine.begin_drag(header(), PointerSample::new(30.0, 30.0));
        engine.delete(ElementId::intern("footer"));
        assert_eq!(engine.active_id(), Some(header()));
    }

    #[test]
    fn coarse_nudge_clamps_at_left_edge() {
        let mut engine = PositioningEngine::default();
        engine.begin_drag(header(), PointerSample::new(20.0, 20.0));
        engine.update_drag(PointerSample::new(5.0, 20.0));
        engine.end_drag();
        assert_eq!(engine.get(header()).unwrap().position.x, 5.0);

        let left = NudgeCommand::new(Direction::Left, NudgeStep::Coarse);
        assert!(engine.nudge(header(), left));
        assert_eq!(engine.get(header()).unwrap().position.x, 0.0);
        assert!(!engine.nudge(header(), left));
    }

    #[test]
    fn nudge_steps() {
        let mut engine = PositioningEngine::default();
        engine.nudge(header(), NudgeCommand::new(Direction::Down, NudgeStep::Fine));
        assert_eq!(engine.get(header()).unwrap().position, Point::new(20.0, 21.0));
        engine.nudge(header(), NudgeCommand::new(Direction::Right, NudgeStep::Coarse));
        assert_eq!(engine.get(header()).unwrap().position, Point::new(30.0, 21.0));
    }

    #[test]
    fn nudge_does_not_touch_drag_state() {
        let mut engine = PositioningEngine::default();
        let logo = ElementId::intern("logo");
        engine.begin_drag(logo, PointerSample::new(410.0, 30.0));
        engine.nudge(header(), NudgeCommand::new(Direction::Up, NudgeStep::Fine));
        assert_eq!(engine.active_id(), Some(logo));
        assert!(!engine.get(header()).unwrap().dragging);
    }

    #[test]
    fn shrinking_canvas_reclamps_elements() {
        let mut engine = PositioningEngine::default();
        engine.set_canvas_rect(Point::ZERO, CanvasSize::new(300.0, 300.0));
        let logo = engine.get(ElementId::intern("logo")).unwrap();
        assert_eq!(logo.position, Point::new(200.0, 20.0));
        let footer = engine.get(ElementId::intern("footer")).unwrap();
        assert_eq!(footer.position, Point::new(20.0, 250.0));
    }

    #[test]
    fn set_content_skips_images() {
        let mut engine = PositioningEngine::default();
        assert!(!engine.set_content(ElementId::intern("logo"), "text"));
        assert!(engine.set_content(header(), "FACTURE"));
        assert_eq!(engine.get(header()).unwrap().content.as_deref(), Some("FACTURE"));
    }

    #[test]
    fn reset_discards_additions_and_drag() {
        let mut engine = PositioningEngine::default();
        let added = engine.add(ElementKind::Footer);
        engine.begin_drag(added, PointerSample::new(60.0, 60.0));
        engine.reset();
        assert_eq!(engine.phase(), DragPhase::Idle);
        let ids: Vec<&str> = engine.elements().iter().map(|el| el.id.as_str()).collect();
        assert_eq!(ids, vec!["header", "logo", "footer"]);
    }
}
