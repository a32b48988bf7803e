//! Export orchestration: rasterize, assemble, name, and track the busy label.

use crate::error::ExportError;
use crate::filename::export_file_name;
use crate::pdf::build_pdf;
use crate::raster::Rasterizer;
use dv_core::InvoiceFields;
use log::{error, info};

/// Whether an export is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportStatus {
    #[default]
    Idle,
    Exporting,
}

impl ExportStatus {
    /// Text shown on the export control.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Export PDF",
            Self::Exporting => "Exporting...",
        }
    }
}

/// A finished export, ready to hand to the browser as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Drives one export at a time.
///
/// The host calls [`begin`](Self::begin), repaints so the busy label shows,
/// then calls [`complete`](Self::complete) on the next frame. Failures never
/// escape: they are logged and the control returns to [`ExportStatus::Idle`].
#[derive(Debug)]
pub struct ExportController {
    status: ExportStatus,
    scale: f64,
}

impl ExportController {
    pub fn new(scale: f64) -> Self {
        Self {
            status: ExportStatus::Idle,
            scale,
        }
    }

    pub fn status(&self) -> ExportStatus {
        self.status
    }

    pub fn label(&self) -> &'static str {
        self.status.label()
    }

    /// Mark an export as started. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.status == ExportStatus::Exporting {
            log::warn!("export already in progress, ignoring request");
            return false;
        }
        self.status = ExportStatus::Exporting;
        true
    }

    /// Rasterize the canvas and build the PDF for `invoice`, then return to
    /// idle whatever the outcome. Returns `None` on failure.
    pub fn complete<R: Rasterizer + ?Sized>(
        &mut self,
        rasterizer: &mut R,
        invoice: &InvoiceFields,
    ) -> Option<ExportedPdf> {
        let result = self.try_export(rasterizer, invoice);
        self.status = ExportStatus::Idle;

        match result {
            Ok(pdf) => {
                info!("exported {} ({} bytes)", pdf.file_name, pdf.bytes.len());
                Some(pdf)
            }
            Err(err) => {
                error!("Error generating PDF: {err}");
                None
            }
        }
    }

    /// [`begin`](Self::begin) and [`complete`](Self::complete) in one step.
    pub fn run<R: Rasterizer + ?Sized>(
        &mut self,
        rasterizer: &mut R,
        invoice: &InvoiceFields,
    ) -> Option<ExportedPdf> {
        if !self.begin() {
            return None;
        }
        self.complete(rasterizer, invoice)
    }

    /// The fallible half of [`complete`](Self::complete), without status tracking.
    pub fn try_export<R: Rasterizer + ?Sized>(
        &self,
        rasterizer: &mut R,
        invoice: &InvoiceFields,
    ) -> Result<ExportedPdf, ExportError> {
        let bitmap = rasterizer.rasterize(self.scale)?;
        let file_name = export_file_name(invoice);
        let bytes = build_pdf(&bitmap, file_name.trim_end_matches(".pdf"))?;
        Ok(ExportedPdf { file_name, bytes })
    }
}

impl Default for ExportController {
    fn default() -> Self {
        Self::new(2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(ExportStatus::Idle.label(), "Export PDF");
        assert_eq!(ExportStatus::Exporting.label(), "Exporting...");
        assert_eq!(ExportController::default().label(), "Export PDF");
    }

    #[test]
    fn begin_shows_busy_label_and_blocks_reentry() {
        let mut controller = ExportController::default();
        assert!(controller.begin());
        assert_eq!(controller.label(), "Exporting...");
        assert!(!controller.begin());
        assert_eq!(controller.status(), ExportStatus::Exporting);
    }
}
