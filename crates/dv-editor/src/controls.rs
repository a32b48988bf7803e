//! On-canvas element controls: the drag handle and the delete button.
//!
//! Both float just above the element's footprint. The renderer paints them
//! from [`control_center`] and the store hit-tests them with
//! [`hit_control`], so what is drawn is exactly what is clickable.

use dv_core::{ElementId, ElementSet, Footprint, Point};

/// Radius of a control's circular hit and paint area.
pub const CONTROL_RADIUS: f64 = 9.0;

/// Distance from the footprint's top edge to a control's center.
const CONTROL_LIFT: f64 = CONTROL_RADIUS + 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Centered above the element; starts a drag.
    DragHandle,
    /// Above the element's top-right corner; removes it.
    Delete,
}

impl Control {
    pub const ALL: [Control; 2] = [Control::DragHandle, Control::Delete];
}

/// Canvas-space center of `control` for an element at `position`.
///
/// Controls never rise above the canvas top, so an element parked at
/// `y = 0` keeps clickable controls (overlapping its own body).
pub fn control_center(position: Point, footprint: Footprint, control: Control) -> Point {
    let y = (position.y - CONTROL_LIFT).max(CONTROL_RADIUS);
    let x = match control {
        Control::DragHandle => position.x + footprint.width / 2.0,
        Control::Delete => position.x + footprint.width - CONTROL_RADIUS,
    };
    Point::new(x, y)
}

/// The topmost control under `point`, in paint order front-to-back.
pub fn hit_control(
    elements: &ElementSet,
    footprint: Footprint,
    point: Point,
) -> Option<(ElementId, Control)> {
    elements.render_order().into_iter().rev().find_map(|el| {
        Control::ALL.into_iter().find_map(|control| {
            let center = control_center(el.position, footprint, control);
            (center.distance(point) <= CONTROL_RADIUS).then_some((el.id, control))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_header_controls() {
        let header = Point::new(20.0, 20.0);
        let fp = Footprint::default();
        assert_eq!(control_center(header, fp, Control::DragHandle), Point::new(70.0, 9.0));
        assert_eq!(control_center(header, fp, Control::Delete), Point::new(111.0, 9.0));
    }

    #[test]
    fn hits_delete_button_of_header() {
        let set = ElementSet::seeded();
        assert_eq!(
            hit_control(&set, Footprint::default(), Point::new(111.0, 9.0)),
            Some((ElementId::intern("header"), Control::Delete))
        );
    }

    #[test]
    fn body_is_not_a_control() {
        let set = ElementSet::seeded();
        assert_eq!(hit_control(&set, Footprint::default(), Point::new(40.0, 40.0)), None);
    }
}
