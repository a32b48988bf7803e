//! Client-side PDF export.
//!
//! The canvas is rasterized by the host (see [`Rasterizer`]) and the
//! resulting bitmap is embedded as one full-width image on a portrait A4
//! page. There is no vector output: what the user sees is what they get.

pub mod controller;
pub mod error;
pub mod filename;
pub mod page;
pub mod pdf;
pub mod raster;

pub use controller::{ExportController, ExportStatus, ExportedPdf};
pub use error::ExportError;
pub use filename::export_file_name;
pub use page::{A4, PageRect, PageSize, fit_to_a4, fit_to_page};
pub use pdf::build_pdf;
pub use raster::{Bitmap, Rasterizer};
