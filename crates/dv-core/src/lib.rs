pub mod config;
pub mod geometry;
pub mod id;
pub mod invoice;
pub mod model;
pub mod numeric;

pub use config::EditorConfig;
pub use geometry::{CanvasSize, Footprint, clamp_position};
pub use id::ElementId;
pub use invoice::{InvoiceField, InvoiceFields, ItemField, LineItem, Totals, format_money};
pub use model::*;

// Re-export kurbo geometry and chrono dates so downstream crates don't need a direct dependency
pub use chrono::NaiveDate;
pub use kurbo::{Point, Rect, Vec2};
