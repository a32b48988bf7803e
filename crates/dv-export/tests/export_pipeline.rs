use dv_core::{InvoiceField, InvoiceFields, NaiveDate};
use dv_export::{Bitmap, ExportController, ExportError, ExportStatus, Rasterizer};
use pretty_assertions::assert_eq;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn invoice() -> InvoiceFields {
    let mut inv = InvoiceFields::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    inv.set_field(InvoiceField::InvoiceNumber, "042");
    inv.set_field(InvoiceField::ClientName, "Jane Q Public");
    inv
}

/// Paints an 800x600 canvas at the requested scale and records it.
struct SolidCanvas {
    scales: Vec<f64>,
}

impl Rasterizer for SolidCanvas {
    fn rasterize(&mut self, scale: f64) -> Result<Bitmap, ExportError> {
        self.scales.push(scale);
        let (w, h) = ((800.0 * scale) as u32, (600.0 * scale) as u32);
        Bitmap::from_rgba(w, h, [255, 255, 255, 255].repeat((w * h) as usize))
    }
}

struct BrokenCanvas;

impl Rasterizer for BrokenCanvas {
    fn rasterize(&mut self, _scale: f64) -> Result<Bitmap, ExportError> {
        Err(ExportError::Rasterize("canvas is tainted".into()))
    }
}

#[test]
fn export_names_file_and_builds_pdf() {
    init_logger();
    let mut controller = ExportController::new(2.0);
    let mut canvas = SolidCanvas { scales: Vec::new() };

    let pdf = controller.run(&mut canvas, &invoice()).unwrap();

    assert_eq!(pdf.file_name, "Invoice_042_Jane_Q_Public.pdf");
    assert!(pdf.bytes.starts_with(b"%PDF-1.5"));
    assert_eq!(canvas.scales, vec![2.0]);
    assert_eq!(controller.status(), ExportStatus::Idle);

    let doc = lopdf::Document::load_mem(&pdf.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn failed_export_reverts_label() {
    init_logger();
    let mut controller = ExportController::new(2.0);

    assert!(controller.run(&mut BrokenCanvas, &invoice()).is_none());
    assert_eq!(controller.label(), "Export PDF");
}

#[test]
fn try_export_surfaces_error() {
    let controller = ExportController::default();
    let err = controller
        .try_export(&mut BrokenCanvas, &invoice())
        .unwrap_err();
    assert_eq!(err.to_string(), "rasterization failed: canvas is tainted");
}

#[test]
fn busy_label_shows_between_begin_and_complete() {
    init_logger();
    let mut controller = ExportController::new(1.0);
    let mut canvas = SolidCanvas { scales: Vec::new() };

    assert!(controller.begin());
    assert_eq!(controller.label(), "Exporting...");
    assert!(controller.run(&mut canvas, &invoice()).is_none(), "re-entry is refused");
    assert!(canvas.scales.is_empty());

    let pdf = controller.complete(&mut canvas, &invoice());
    assert!(pdf.is_some());
    assert_eq!(canvas.scales, vec![1.0]);
    assert_eq!(controller.label(), "Export PDF");
}

#[test]
fn failed_complete_returns_to_idle() {
    init_logger();
    let mut controller = ExportController::new(2.0);
    controller.begin();
    assert!(controller.complete(&mut BrokenCanvas, &invoice()).is_none());
    assert_eq!(controller.status(), ExportStatus::Idle);
}
