//! Canvas2D renderer.
//!
//! Paints the static invoice preview first and the positioned elements on
//! top, in store render order, so a dragged element is always drawn last.

use dv_core::{ElementKind, Footprint, InvoiceFields, PlacedElement, Point, format_money};
use dv_editor::{CONTROL_RADIUS, Control, Store, control_center};
use std::collections::HashMap;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Loaded images keyed by their `imageRef`.
pub type ImageCache = HashMap<String, HtmlImageElement>;

/// Colors and fonts for the invoice surface.
pub struct CanvasTheme {
    pub page_bg: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub rule: &'static str,
    pub accent: &'static str,
    pub danger: &'static str,
    pub placeholder_bg: &'static str,
    pub font_family: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            page_bg: "#FFFFFF",
            text: "#1E293B",
            muted: "#64748B",
            rule: "#CBD5E1",
            accent: "#6366F1",
            danger: "#EF4444",
            placeholder_bg: "#E2E8F0",
            font_family: "Inter, sans-serif",
        }
    }

    fn font(&self, weight: u16, size: f64) -> String {
        format!("{weight} {size}px {}", self.font_family)
    }
}

/// What the current frame should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Drag handles and delete buttons. Off when rasterizing for export.
    pub show_controls: bool,
}

// Static preview layout, in canvas units.
const PREVIEW_TOP: f64 = 100.0;
const PREVIEW_INSET: f64 = 32.0;
const LINE: f64 = 20.0;
const ROW: f64 = 36.0;
const COL_QTY: f64 = 80.0;
const COL_MONEY: f64 = 128.0;
const TOTALS_WIDTH: f64 = 256.0;

// Element chrome.
const PAD: f64 = 8.0;
const HEADER_MIN_WIDTH: f64 = 100.0;
const FOOTER_MIN_WIDTH: f64 = 200.0;
const TEXT_MIN_HEIGHT: f64 = 40.0;
const IMAGE_SIZE: f64 = 100.0;
const DRAG_SCALE: f64 = 1.05;

/// Render one full frame.
pub fn render_canvas(
    ctx: &CanvasRenderingContext2d,
    store: &Store,
    images: &ImageCache,
    theme: &CanvasTheme,
    options: RenderOptions,
) {
    let canvas = store.engine().canvas();
    ctx.set_fill_style_str(theme.page_bg);
    ctx.fill_rect(0.0, 0.0, canvas.width, canvas.height);

    draw_preview(ctx, store.invoice(), canvas.width, theme);

    let order = store.engine().render_order();
    for element in &order {
        draw_element(ctx, element, images, theme);
    }
    // Controls sit above every element body, matching hit-test priority.
    if options.show_controls {
        let footprint = store.engine().footprint();
        for element in &order {
            draw_controls(ctx, theme, element.position, footprint);
        }
    }
}

// ─── Invoice preview ─────────────────────────────────────────────────────

fn draw_preview(
    ctx: &CanvasRenderingContext2d,
    invoice: &InvoiceFields,
    width: f64,
    theme: &CanvasTheme,
) {
    let left = PREVIEW_INSET;
    let right = width - PREVIEW_INSET;
    let mut y = PREVIEW_TOP;

    ctx.save();
    ctx.set_text_baseline("top");

    // Bill-to block (left)
    ctx.set_text_align("left");
    label(ctx, theme, "Bill To:", left, y);
    ctx.set_font(&theme.font(600, 16.0));
    ctx.set_fill_style_str(theme.text);
    let _ = ctx.fill_text(or_placeholder(&invoice.client_name, "Client Name"), left, y + LINE);
    ctx.set_font(&theme.font(400, 14.0));
    let _ = ctx.fill_text(
        or_placeholder(&invoice.client_email, "client@example.com"),
        left,
        y + LINE * 2.0,
    );
    let address = or_placeholder(&invoice.client_address, "Client Address");
    let mut left_bottom = y + LINE * 3.0;
    for line in address.lines() {
        let _ = ctx.fill_text(line, left, left_bottom);
        left_bottom += LINE;
    }

    // Invoice details (right)
    ctx.set_text_align("right");
    label(ctx, theme, "Invoice Details:", right, y);
    ctx.set_font(&theme.font(400, 14.0));
    ctx.set_fill_style_str(theme.text);
    let details = [
        format!("Invoice #: {}", invoice.invoice_number),
        format!("Date: {}", invoice.issue_date),
        format!("Due Date: {}", invoice.due_date),
    ];
    for (i, line) in details.iter().enumerate() {
        let _ = ctx.fill_text(line, right, y + LINE * (i as f64 + 1.0));
    }

    y = left_bottom.max(y + LINE * 4.0) + PREVIEW_INSET;

    // Items table
    let amount_x = right;
    let price_x = amount_x - COL_MONEY;
    let qty_x = price_x - COL_MONEY;
    ctx.set_font(&theme.font(600, 14.0));
    ctx.set_text_align("left");
    let _ = ctx.fill_text("Description", left, y);
    ctx.set_text_align("right");
    let _ = ctx.fill_text("Qty", qty_x, y);
    let _ = ctx.fill_text("Price", price_x, y);
    let _ = ctx.fill_text("Amount", amount_x, y);
    y += LINE + 4.0;
    rule(ctx, theme, left, right, y);

    ctx.set_font(&theme.font(400, 14.0));
    for item in &invoice.items {
        let text_y = y + (ROW - LINE) / 2.0;
        ctx.set_text_align("left");
        let desc_width = (qty_x - COL_QTY - left).max(0.0);
        let _ = ctx.fill_text_with_max_width(&item.description, left, text_y, desc_width);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&item.quantity.to_string(), qty_x, text_y);
        let _ = ctx.fill_text(&format_money(item.unit_price), price_x, text_y);
        let _ = ctx.fill_text(&format_money(item.amount()), amount_x, text_y);
        y += ROW;
        rule(ctx, theme, left, right, y);
    }

    // Totals
    y += PREVIEW_INSET;
    let totals = invoice.totals();
    let totals_left = right - TOTALS_WIDTH;
    let tax_label = format!("Tax ({}%):", invoice.tax_rate);
    let rows = [
        ("Subtotal:", totals.subtotal, 400),
        (tax_label.as_str(), totals.tax, 400),
        ("Total:", totals.total, 700),
    ];
    for (name, value, weight) in rows {
        ctx.set_font(&theme.font(weight, 14.0));
        ctx.set_text_align("left");
        let _ = ctx.fill_text(name, totals_left, y);
        ctx.set_text_align("right");
        let _ = ctx.fill_text(&format!("${}", format_money(value)), right, y);
        y += LINE + 8.0;
    }

    if !invoice.notes.is_empty() {
        y += PREVIEW_INSET - 8.0;
        ctx.set_text_align("left");
        ctx.set_font(&theme.font(400, 12.0));
        ctx.set_fill_style_str(theme.muted);
        for line in invoice.notes.lines() {
            let _ = ctx.fill_text(line, left, y);
            y += LINE - 4.0;
        }
    }

    ctx.restore();
}

fn label(ctx: &CanvasRenderingContext2d, theme: &CanvasTheme, text: &str, x: f64, y: f64) {
    ctx.set_font(&theme.font(400, 12.0));
    ctx.set_fill_style_str(theme.muted);
    let _ = ctx.fill_text(text, x, y);
}

fn rule(ctx: &CanvasRenderingContext2d, theme: &CanvasTheme, x0: f64, x1: f64, y: f64) {
    ctx.set_stroke_style_str(theme.rule);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(x0, y + 0.5);
    ctx.line_to(x1, y + 0.5);
    ctx.stroke();
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

// ─── Elements ────────────────────────────────────────────────────────────

fn draw_element(
    ctx: &CanvasRenderingContext2d,
    element: &PlacedElement,
    images: &ImageCache,
    theme: &CanvasTheme,
) {
    let (x, y) = (element.position.x, element.position.y);
    ctx.save();
    ctx.set_text_baseline("top");
    ctx.set_text_align("left");

    if element.dragging {
        let _ = ctx.translate(x, y);
        let _ = ctx.scale(DRAG_SCALE, DRAG_SCALE);
        let _ = ctx.translate(-x, -y);
    }

    let (w, h) = match element.kind {
        ElementKind::Header => draw_text_block(ctx, element, theme, 700, 20.0, HEADER_MIN_WIDTH),
        ElementKind::Footer => draw_text_block(ctx, element, theme, 400, 14.0, FOOTER_MIN_WIDTH),
        ElementKind::Image => draw_image(ctx, element, images, theme),
    };

    if element.dragging {
        ctx.set_stroke_style_str(theme.accent);
        ctx.set_line_width(2.0);
        ctx.stroke_rect(x, y, w, h);
    }
    ctx.restore();
}

/// Draw header/footer text. Returns the box size.
fn draw_text_block(
    ctx: &CanvasRenderingContext2d,
    element: &PlacedElement,
    theme: &CanvasTheme,
    weight: u16,
    size: f64,
    min_width: f64,
) -> (f64, f64) {
    let content = element.content.as_deref().unwrap_or_default();
    ctx.set_font(&theme.font(weight, size));
    ctx.set_fill_style_str(theme.text);

    let (x, y) = (element.position.x, element.position.y);
    let line_height = size * 1.4;
    let mut widest: f64 = 0.0;
    let mut lines = 0.0;
    for line in content.lines() {
        if let Ok(metrics) = ctx.measure_text(line) {
            widest = widest.max(metrics.width());
        }
        let _ = ctx.fill_text(line, x + PAD, y + PAD + line_height * lines);
        lines += 1.0;
    }
    let w = (widest + PAD * 2.0).max(min_width);
    let h = (line_height * lines + PAD * 2.0).max(TEXT_MIN_HEIGHT);
    (w, h)
}

/// Draw an image element, or a placeholder until its image has loaded.
fn draw_image(
    ctx: &CanvasRenderingContext2d,
    element: &PlacedElement,
    images: &ImageCache,
    theme: &CanvasTheme,
) -> (f64, f64) {
    let (x, y) = (element.position.x + PAD, element.position.y + PAD);
    let loaded = element
        .image_ref
        .as_ref()
        .and_then(|src| images.get(src))
        .filter(|img| img.complete() && img.natural_width() > 0);

    match loaded {
        Some(img) => {
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img, x, y, IMAGE_SIZE, IMAGE_SIZE,
            );
        }
        None => {
            ctx.set_fill_style_str(theme.placeholder_bg);
            ctx.fill_rect(x, y, IMAGE_SIZE, IMAGE_SIZE);
            ctx.set_fill_style_str(theme.muted);
            ctx.set_font(&theme.font(400, 12.0));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            let _ = ctx.fill_text("image", x + IMAGE_SIZE / 2.0, y + IMAGE_SIZE / 2.0);
        }
    }
    (IMAGE_SIZE + PAD * 2.0, IMAGE_SIZE + PAD * 2.0)
}

/// Drag handle and delete button, painted where the store hit-tests them.
fn draw_controls(
    ctx: &CanvasRenderingContext2d,
    theme: &CanvasTheme,
    position: Point,
    footprint: Footprint,
) {
    let handle = control_center(position, footprint, Control::DragHandle);
    let delete = control_center(position, footprint, Control::Delete);
    for (center, color) in [(handle, theme.accent), (delete, theme.danger)] {
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, CONTROL_RADIUS, 0.0, std::f64::consts::TAU);
        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    ctx.set_stroke_style_str(theme.page_bg);
    ctx.set_line_width(1.5);
    ctx.begin_path();
    // ↔
    ctx.move_to(handle.x - 5.0, handle.y);
    ctx.line_to(handle.x + 5.0, handle.y);
    // ×
    ctx.move_to(delete.x - 3.5, delete.y - 3.5);
    ctx.line_to(delete.x + 3.5, delete.y + 3.5);
    ctx.move_to(delete.x + 3.5, delete.y - 3.5);
    ctx.line_to(delete.x - 3.5, delete.y + 3.5);
    ctx.stroke();
}
