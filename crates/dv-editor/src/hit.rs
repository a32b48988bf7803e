//! Hit testing: canvas point → element lookup.
//!
//! Walks the paint order front-to-back, so the dragging element (painted
//! last) wins over anything underneath it. Elements are hit by their
//! nominal footprint, the same rectangle used for clamping.

use dv_core::{ElementId, ElementSet, Footprint, Point};

/// Find the topmost element whose footprint contains `point` (canvas space).
/// Returns `None` if the point is over the background.
pub fn hit_test(elements: &ElementSet, footprint: Footprint, point: Point) -> Option<ElementId> {
    elements
        .render_order()
        .into_iter()
        .rev()
        .find(|el| footprint.rect_at(el.position).contains(point))
        .map(|el| el.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::{ElementKind, PlacedElement};

    #[test]
    fn hits_seed_header() {
        let set = ElementSet::seeded();
        let hit = hit_test(&set, Footprint::default(), Point::new(25.0, 25.0));
        assert_eq!(hit, Some(ElementId::intern("header")));
    }

    #[test]
    fn background_misses() {
        let set = ElementSet::seeded();
        assert_eq!(
            hit_test(&set, Footprint::default(), Point::new(300.0, 300.0)),
            None
        );
    }

    #[test]
    fn later_elements_win_overlap() {
        let mut set = ElementSet::new();
        let a = PlacedElement::new(ElementId::intern("hit_a"), ElementKind::Header, Point::ZERO);
        let b = PlacedElement::new(
            ElementId::intern("hit_b"),
            ElementKind::Footer,
            Point::new(10.0, 10.0),
        );
        set.insert(a);
        set.insert(b);
        let p = Point::new(20.0, 20.0);
        assert_eq!(hit_test(&set, Footprint::default(), p), Some(ElementId::intern("hit_b")));

        // The dragging element is on top regardless of insertion order.
        set.get_mut(ElementId::intern("hit_a")).unwrap().dragging = true;
        assert_eq!(hit_test(&set, Footprint::default(), p), Some(ElementId::intern("hit_a")));
    }
}
