//! WASM bridge for DragVoice — exposes the editor store to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards raw DOM
//! events here, redraws when a call reports a change, and reads state back
//! as JSON strings.

mod logger;
mod render2d;

use dv_core::{
    CanvasSize, EditorConfig, ElementId, ElementKind, InvoiceField, InvoiceFields, ItemField,
    NaiveDate, PlacedElement, Point, Totals, format_money,
};
use dv_editor::input::TouchPhase;
use dv_editor::shortcuts::{ShortcutAction, ShortcutMap};
use dv_editor::{
    Action, Direction, InputEvent, Modifiers, NudgeCommand, NudgeStep, PointerSample, Store,
};
use dv_export::{Bitmap, ExportController, ExportError, ExportStatus, Rasterizer};
use render2d::{CanvasTheme, ImageCache, RenderOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// The main WASM-facing editor controller.
///
/// Owns the action store and the export controller. All interaction from
/// the page goes through this struct.
#[wasm_bindgen]
pub struct InvoiceCanvas {
    store: Store,
    export: ExportController,
    images: ImageCache,
    theme: CanvasTheme,
}

#[wasm_bindgen]
impl InvoiceCanvas {
    /// Create a controller. `config_json` may override any subset of
    /// [`EditorConfig`]; an invalid string falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Self {
        logger::init(log::LevelFilter::Debug);
        let config = parse_config(config_json.as_deref());
        Self::with_date(config, today())
    }

    /// Forward the canvas element's client bounding box.
    pub fn set_canvas_rect(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.store
            .set_canvas_rect(Point::new(left, top), CanvasSize::new(width, height));
    }

    /// Render the canvas with editing controls.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        render2d::render_canvas(
            ctx,
            &self.store,
            &self.images,
            &self.theme,
            RenderOptions {
                show_controls: true,
            },
        );
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Mouse down at client coordinates. Returns true if state changed.
    pub fn handle_mouse_down(&mut self, x: f64, y: f64) -> bool {
        self.store.handle_input(&InputEvent::from_mouse_down(x, y))
    }

    pub fn handle_mouse_move(&mut self, x: f64, y: f64) -> bool {
        self.store.handle_input(&InputEvent::from_mouse_move(x, y))
    }

    pub fn handle_mouse_up(&mut self) -> bool {
        self.store.handle_input(&InputEvent::PointerUp)
    }

    /// The pointer left the canvas; ends any drag.
    pub fn handle_mouse_leave(&mut self) -> bool {
        self.store.handle_input(&InputEvent::PointerLeave)
    }

    /// Touch event with `phase` one of `start`, `move`, `end`, `cancel`.
    /// `x`/`y` are the first touch point's client coordinates, if any.
    pub fn handle_touch(&mut self, phase: &str, x: Option<f64>, y: Option<f64>) -> bool {
        let phase = match phase {
            "start" => TouchPhase::Start,
            "move" => TouchPhase::Move,
            "end" => TouchPhase::End,
            "cancel" => TouchPhase::Cancel,
            other => {
                log::warn!("unknown touch phase {other:?}");
                return false;
            }
        };
        let first = x.zip(y);
        match InputEvent::from_touch(phase, first) {
            Some(event) => self.store.handle_input(&event),
            None => false,
        }
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a key press. Returns a JSON string:
    /// `{"changed":bool, "action":"<action_name>"}`
    pub fn handle_key(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let action_name = match ShortcutMap::resolve(key, modifiers) {
            Some(ShortcutAction::Nudge(_)) => "nudge",
            Some(ShortcutAction::Delete) => "delete",
            Some(ShortcutAction::CancelDrag) => "cancel_drag",
            None => "none",
        };
        let changed = self.store.handle_input(&InputEvent::from_key(key, modifiers));
        format!(r#"{{"changed":{changed},"action":"{action_name}"}}"#)
    }

    // ─── Element commands ────────────────────────────────────────────────

    /// Start dragging `id` from a drag handle at client coordinates.
    pub fn begin_drag(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(id) = known_id(id) else {
            return false;
        };
        self.store.dispatch_all([
            Action::Focus { id: Some(id) },
            Action::BeginDrag {
                id,
                at: PointerSample::new(x, y),
            },
        ])
    }

    /// Nudge `id` one step in `direction` (`left`/`right`/`up`/`down`).
    pub fn nudge(&mut self, id: &str, direction: &str, coarse: bool) -> bool {
        let direction = match direction {
            "left" => Direction::Left,
            "right" => Direction::Right,
            "up" => Direction::Up,
            "down" => Direction::Down,
            other => {
                log::warn!("unknown nudge direction {other:?}");
                return false;
            }
        };
        let Some(id) = known_id(id) else {
            return false;
        };
        let step = if coarse {
            NudgeStep::Coarse
        } else {
            NudgeStep::Fine
        };
        self.store.dispatch(Action::Nudge {
            id,
            command: NudgeCommand::new(direction, step),
        })
    }

    /// Add an element of `kind` (`header`/`footer`/`image`). Returns its id,
    /// or an empty string for an unknown kind.
    pub fn add_element(&mut self, kind: &str) -> String {
        let Some(kind) = ElementKind::from_name(kind) else {
            log::warn!("unknown element kind {kind:?}");
            return String::new();
        };
        self.store.dispatch(Action::Add { kind });
        self.store
            .focused()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn delete_element(&mut self, id: &str) -> bool {
        known_id(id).is_some_and(|id| self.store.dispatch(Action::Delete { id }))
    }

    /// Restore the three seed elements.
    pub fn reset_canvas(&mut self) -> bool {
        self.store.dispatch(Action::Reset)
    }

    pub fn set_content(&mut self, id: &str, content: &str) -> bool {
        let Some(id) = known_id(id) else {
            return false;
        };
        self.store.dispatch(Action::SetContent {
            id,
            content: content.to_string(),
        })
    }

    /// Make `id` the keyboard target; an empty string clears focus.
    pub fn focus(&mut self, id: &str) -> bool {
        let id = (!id.is_empty()).then(|| known_id(id)).flatten();
        self.store.dispatch(Action::Focus { id })
    }

    pub fn focused_id(&self) -> String {
        self.store
            .focused()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Hand over a loaded `<img>` for `image_ref`.
    pub fn set_image(&mut self, image_ref: &str, image: HtmlImageElement) {
        self.images.insert(image_ref.to_string(), image);
    }

    /// Image references the page still needs to load.
    pub fn pending_images_json(&self) -> String {
        let pending: Vec<&str> = self
            .store
            .engine()
            .elements()
            .iter()
            .filter_map(|e| e.image_ref.as_deref())
            .filter(|src| !self.images.contains_key(*src))
            .collect();
        serde_json::to_string(&pending).unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Invoice form ────────────────────────────────────────────────────

    /// Set an invoice field by its form name (`clientName`, `dueDate`, ...).
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let Some(field) = InvoiceField::from_name(name) else {
            log::warn!("unknown invoice field {name:?}");
            return false;
        };
        self.store.dispatch(Action::SetField {
            field,
            value: value.to_string(),
        })
    }

    pub fn set_tax_rate(&mut self, value: &str) -> bool {
        self.store.dispatch(Action::SetTaxRate {
            value: value.to_string(),
        })
    }

    pub fn add_item(&mut self) -> bool {
        self.store.dispatch(Action::AddItem)
    }

    pub fn remove_item(&mut self, id: u32) -> bool {
        self.store.dispatch(Action::RemoveItem { id })
    }

    /// Edit a line item column: `description`, `quantity`, or `price`.
    pub fn edit_item(&mut self, id: u32, field: &str, value: &str) -> bool {
        let field = match field {
            "description" => ItemField::Description,
            "quantity" => ItemField::Quantity,
            "price" | "unitPrice" => ItemField::UnitPrice,
            other => {
                log::warn!("unknown item field {other:?}");
                return false;
            }
        };
        self.store.dispatch(Action::EditItem {
            id,
            field,
            value: value.to_string(),
        })
    }

    pub fn toggle_tutorial(&mut self) -> bool {
        self.store.dispatch(Action::ToggleTutorial)
    }

    pub fn tutorial_visible(&self) -> bool {
        self.store.tutorial_visible()
    }

    /// Apply a JSON-encoded [`Action`]. Returns true if state changed.
    pub fn dispatch_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Action>(json) {
            Ok(action) => self.store.dispatch(action),
            Err(err) => {
                log::warn!("ignoring malformed action: {err}");
                false
            }
        }
    }

    // ─── Read-back ───────────────────────────────────────────────────────

    /// Elements in render order as JSON.
    pub fn elements_json(&self) -> String {
        let elements: Vec<&PlacedElement> = self.store.engine().render_order();
        serde_json::to_string(&elements).unwrap_or_else(|_| "[]".to_string())
    }

    /// Invoice fields plus derived totals as JSON.
    pub fn invoice_json(&self) -> String {
        serde_json::to_string(&InvoiceView::new(self.store.invoice()))
            .unwrap_or_else(|_| "{}".to_string())
    }

    pub fn export_file_name(&self) -> String {
        dv_export::export_file_name(self.store.invoice())
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Current export button label.
    pub fn export_label(&self) -> String {
        self.export.label().to_string()
    }

    /// Switch the export control to its busy label. Returns `false` if an
    /// export is already under way. Repaint, then call [`export_pdf`].
    ///
    /// [`export_pdf`]: Self::export_pdf
    pub fn begin_export(&mut self) -> bool {
        self.export.begin()
    }

    /// Rasterize onto `scratch` (an offscreen canvas context) and build the
    /// PDF. Returns `undefined` on failure; the error is logged. The control
    /// is back to idle afterwards.
    pub fn export_pdf(&mut self, scratch: &CanvasRenderingContext2d) -> Option<Vec<u8>> {
        if self.export.status() == ExportStatus::Idle {
            self.export.begin();
        }
        let mut rasterizer = CanvasRasterizer {
            ctx: scratch,
            store: &self.store,
            images: &self.images,
            theme: &self.theme,
        };
        self.export
            .complete(&mut rasterizer, self.store.invoice())
            .map(|pdf| pdf.bytes)
    }
}

impl InvoiceCanvas {
    /// A controller with an explicit config and issue date.
    pub fn with_date(config: EditorConfig, today: NaiveDate) -> Self {
        Self {
            store: Store::new(&config, today),
            export: ExportController::new(config.export_scale),
            images: ImageCache::new(),
            theme: CanvasTheme::light(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Resolve an id sent by the page without interning unknown names.
fn known_id(name: &str) -> Option<ElementId> {
    let id = ElementId::lookup(name);
    if id.is_none() {
        log::debug!("no element named {name:?}");
    }
    id
}

fn parse_config(json: Option<&str>) -> EditorConfig {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        None => EditorConfig::default(),
        Some(json) => EditorConfig::from_json(json).unwrap_or_else(|err| {
            log::warn!("invalid editor config, using defaults: {err}");
            EditorConfig::default()
        }),
    }
}

/// Today's local date from the JS clock.
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceView<'a> {
    #[serde(flatten)]
    fields: &'a InvoiceFields,
    totals: Totals,
    formatted: FormattedTotals,
}

#[derive(Serialize)]
struct FormattedTotals {
    subtotal: String,
    tax: String,
    total: String,
}

impl<'a> InvoiceView<'a> {
    fn new(fields: &'a InvoiceFields) -> Self {
        let totals = fields.totals();
        Self {
            fields,
            totals,
            formatted: FormattedTotals {
                subtotal: format_money(totals.subtotal),
                tax: format_money(totals.tax),
                total: format_money(totals.total),
            },
        }
    }
}

/// Re-renders the canvas onto a scratch context at export scale with
/// controls hidden, then reads the pixels back.
struct CanvasRasterizer<'a> {
    ctx: &'a CanvasRenderingContext2d,
    store: &'a Store,
    images: &'a ImageCache,
    theme: &'a CanvasTheme,
}

impl Rasterizer for CanvasRasterizer<'_> {
    fn rasterize(&mut self, scale: f64) -> Result<Bitmap, ExportError> {
        let canvas = self.store.engine().canvas();
        let width = (canvas.width * scale).round().max(0.0) as u32;
        let height = (canvas.height * scale).round().max(0.0) as u32;

        if let Some(el) = self.ctx.canvas() {
            el.set_width(width);
            el.set_height(height);
        }
        self.ctx
            .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
            .map_err(js_error)?;
        render2d::render_canvas(
            self.ctx,
            self.store,
            self.images,
            self.theme,
            RenderOptions {
                show_controls: false,
            },
        );

        let data = self
            .ctx
            .get_image_data(0.0, 0.0, width as f64, height as f64)
            .map_err(js_error)?;
        Bitmap::from_rgba(width, height, data.data().0)
    }
}

fn js_error(err: JsValue) -> ExportError {
    ExportError::Rasterize(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
