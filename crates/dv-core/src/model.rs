//! Placed-element data model.
//!
//! The canvas holds a flat, ordered set of decorative elements (headers,
//! footers, images) that float above the static invoice preview. Elements
//! are positioned by their top-left corner in canvas coordinates.

use crate::id::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Image used for the seeded logo element.
pub const SEED_LOGO_REF: &str = "https://source.unsplash.com/random/100x100?logo";

/// Image used for newly added image elements.
pub const DEFAULT_IMAGE_REF: &str = "https://source.unsplash.com/random/100x100?business";

/// Where `add` places a new element.
pub const DEFAULT_ADD_POSITION: Point = Point::new(50.0, 50.0);

// ─── Element kinds ───────────────────────────────────────────────────────

/// What an element renders. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Header,
    Footer,
    Image,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Image => "image",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "header" => Some(Self::Header),
            "footer" => Some(Self::Footer),
            "image" => Some(Self::Image),
            _ => None,
        }
    }

    /// Whether the element carries editable text.
    pub fn is_textual(self) -> bool {
        !matches!(self, Self::Image)
    }
}

// ─── Placed element ──────────────────────────────────────────────────────

/// A freely positioned element on the invoice canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedElement {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Editable text. `None` for images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Opaque image locator. `None` for text elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Top-left corner relative to the canvas origin.
    pub position: Point,
    /// True only while this element is the active drag target.
    #[serde(rename = "dragState")]
    pub dragging: bool,
}

impl PlacedElement {
    /// A new element with the kind's default content or image.
    pub fn new(id: ElementId, kind: ElementKind, position: Point) -> Self {
        let (content, image_ref) = match kind {
            ElementKind::Header => (Some("New Header".to_string()), None),
            ElementKind::Footer => (Some("New Footer".to_string()), None),
            ElementKind::Image => (None, Some(DEFAULT_IMAGE_REF.to_string())),
        };
        Self {
            id,
            kind,
            content,
            image_ref,
            position,
            dragging: false,
        }
    }

    /// A new element of `kind` with a fresh unique id at the default position.
    pub fn fresh(kind: ElementKind) -> Self {
        Self::new(ElementId::with_prefix(kind.name()), kind, DEFAULT_ADD_POSITION)
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        if self.kind.is_textual() {
            self.content = Some(content.into());
        }
        self
    }

    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        if self.kind == ElementKind::Image {
            self.image_ref = Some(image_ref.into());
        }
        self
    }
}

/// The three elements a fresh or reset canvas starts with.
pub fn seed_elements() -> Vec<PlacedElement> {
    vec![
        PlacedElement::new(
            ElementId::intern("header"),
            ElementKind::Header,
            Point::new(20.0, 20.0),
        )
        .with_content("INVOICE"),
        PlacedElement::new(
            ElementId::intern("logo"),
            ElementKind::Image,
            Point::new(400.0, 20.0),
        )
        .with_image_ref(SEED_LOGO_REF),
        PlacedElement::new(
            ElementId::intern("footer"),
            ElementKind::Footer,
            Point::new(20.0, 500.0),
        )
        .with_content("Thank you for your business"),
    ]
}

// ─── Element set ─────────────────────────────────────────────────────────

/// Ordered collection of placed elements with unique ids.
///
/// Collections are tiny (a handful of elements), so lookups scan linearly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementSet {
    elements: Vec<PlacedElement>,
}

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding the seed elements.
    pub fn seeded() -> Self {
        Self {
            elements: seed_elements(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedElement> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlacedElement> {
        self.elements.iter_mut()
    }

    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|el| el.id).collect()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|el| el.id == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut PlacedElement> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Append an element. Returns `false` (and drops it) if the id is taken.
    pub fn insert(&mut self, element: PlacedElement) -> bool {
        if self.contains(element.id) {
            log::warn!("duplicate element id {}, ignoring insert", element.id);
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Remove an element, returning it if present.
    pub fn remove(&mut self, id: ElementId) -> Option<PlacedElement> {
        let pos = self.elements.iter().position(|el| el.id == id)?;
        Some(self.elements.remove(pos))
    }

    /// Replace the whole collection with the seed elements.
    pub fn reset(&mut self) {
        self.elements = seed_elements();
    }

    /// Paint order: insertion order, except the dragging element goes last
    /// (on top). Stable for everything else.
    pub fn render_order(&self) -> Vec<&PlacedElement> {
        let mut order: Vec<&PlacedElement> =
            self.elements.iter().filter(|el| !el.dragging).collect();
        order.extend(self.elements.iter().filter(|el| el.dragging));
        order
    }
}
