//! WASM bridge: exposes the region editor to the browser host.
//!
//! Built with `wasm-pack build --target web`. Every call answers with a
//! small JSON string so the host never has to marshal Rust types.

mod render2d;

use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wm_core::{DisplayRect, EditError, EditorConfig, ImageInfo, Point};
use wm_editor::convert::{ConversionSession, ConvertError, TargetFormat};
use wm_editor::input::{InputEvent, Modifiers};
use wm_editor::session::EditorSession;
use wm_editor::tools::ToolOutcome;
use wm_render::RegionTheme;

/// Canvas controller held by the host page. Owns the region session and
/// the independent conversion settings for the same image.
#[wasm_bindgen]
pub struct WmCanvas {
    session: EditorSession,
    convert: ConversionSession,
    theme: RegionTheme,
}

#[wasm_bindgen]
impl WmCanvas {
    /// Create a controller from an optional JSON config. Bad config falls
    /// back to defaults with a warning.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();
        let config = EditorConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("invalid editor config, using defaults: {e}");
            EditorConfig::default()
        });
        Self::with_config(config)
    }

    /// Start editing a freshly decoded bitmap.
    pub fn load_image(&mut self, width: u32, height: u32) {
        let image = ImageInfo::new(width, height);
        self.session.load_image(image);
        self.convert.set_source(Some(image));
    }

    pub fn unload_image(&mut self) {
        self.session.unload_image();
        self.convert.set_source(None);
    }

    /// Redraw the overlay. `ctx` belongs to a canvas sized to the bitmap.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let Some(image) = self.session.image() else {
            return;
        };
        render2d::render_ops(
            ctx,
            self.session.draw_ops(),
            &self.theme,
            f64::from(image.width),
            f64::from(image.height),
        );
    }

    /// Register `callback(opCount)`, invoked after every visible change.
    pub fn on_change(&mut self, callback: js_sys::Function) {
        self.session.on_change(move |ops| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(ops.len() as u32)) {
                log::error!("change callback failed: {e:?}");
            }
        });
    }

    // ─── Pointer ────────────────────────────────────────────────────────

    pub fn handle_pointer_down(&mut self, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> String {
        let rect = measure(canvas);
        self.pointer(InputEvent::pointer_down, Point::new(client_x, client_y), rect)
    }

    pub fn handle_pointer_move(&mut self, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> String {
        let rect = measure(canvas);
        self.pointer(InputEvent::pointer_move, Point::new(client_x, client_y), rect)
    }

    pub fn handle_pointer_up(&mut self, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> String {
        let rect = measure(canvas);
        self.pointer(InputEvent::pointer_up, Point::new(client_x, client_y), rect)
    }

    pub fn handle_pointer_leave(&mut self) -> String {
        outcome_json(self.session.pointer_leave())
    }

    /// CSS cursor for the pointer at a client position.
    pub fn cursor(&self, canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> String {
        self.cursor_at(Point::new(client_x, client_y), measure(canvas))
            .to_string()
    }

    // ─── Keyboard & commands ────────────────────────────────────────────

    /// Returns `{"action": <name|null>, "changed": bool, "error": <code|null>}`.
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let before = self.session.regions().to_vec();
        let result = self.session.handle_key(key, Modifiers { shift, ctrl, alt, meta });
        let changed = before != self.session.regions();
        match result {
            Ok(action) => json!({
                "action": action.map(|a| a.name()),
                "changed": changed,
                "error": null,
            }),
            Err(e) => json!({ "action": null, "changed": changed, "error": e.code() }),
        }
        .to_string()
    }

    pub fn undo(&mut self) -> String {
        status_json(self.session.undo())
    }

    pub fn redo(&mut self) -> String {
        status_json(self.session.redo())
    }

    pub fn delete_selected(&mut self) -> String {
        status_json(self.session.delete_selected().map(|_| ()))
    }

    pub fn clear_all(&mut self) -> String {
        status_json(self.session.clear_all().map(|_| ()))
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    /// `{"regions": [...], "selected": <index|null>}`.
    pub fn get_regions(&self) -> String {
        json!({
            "regions": self.session.regions(),
            "selected": self.session.selected(),
        })
        .to_string()
    }

    // ─── Backend requests ───────────────────────────────────────────────

    /// Payload for the inpainting command, or `{"error": code}`.
    pub fn inpaint_request(&self, image_data: &str) -> String {
        match self.session.inpaint_request(image_data) {
            Ok(req) => req
                .to_json()
                .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string()),
            Err(e) => error_json(e),
        }
    }

    /// `{"masks": [...], "window": <rect|null>}` for the current regions.
    pub fn mask_preview(&self) -> String {
        match self.session.mask_preview() {
            Ok((masks, window)) => json!({ "masks": masks, "window": window }).to_string(),
            Err(e) => error_json(e),
        }
    }

    pub fn set_target_format(&mut self, name: &str) -> String {
        convert_status(name.parse::<TargetFormat>().map(|f| self.convert.set_format(f)))
    }

    pub fn set_quality(&mut self, quality: u8) -> String {
        convert_status(self.convert.set_quality(quality))
    }

    pub fn set_compression_level(&mut self, level: u8) -> String {
        convert_status(self.convert.set_compression_level(level))
    }

    pub fn set_quantize(&mut self, quantize: bool) {
        self.convert.set_quantize(quantize);
    }

    /// Payload for the conversion command, or `{"error": message}`.
    pub fn convert_request(&self, image_data: &str) -> String {
        match self.convert.request(image_data) {
            Ok(req) => req
                .to_json()
                .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string()),
            Err(e) => json!({ "error": e.to_string() }).to_string(),
        }
    }
}

impl WmCanvas {
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            session: EditorSession::new(config),
            convert: ConversionSession::new(),
            theme: RegionTheme::default(),
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Map a client position through `rect` and feed it to the session.
    fn pointer(&mut self, event: fn(Point) -> InputEvent, client: Point, rect: DisplayRect) -> String {
        let result = self
            .session
            .map_pointer(client, rect)
            .and_then(|p| self.session.handle_input(&event(p)));
        outcome_json(result)
    }

    fn cursor_at(&self, client: Point, rect: DisplayRect) -> &'static str {
        let p = self.session.map_pointer(client, rect).unwrap_or(client);
        self.session.cursor_hint(p).as_css()
    }
}

/// Measure the canvas now; layout can change between events.
fn measure(canvas: &HtmlCanvasElement) -> DisplayRect {
    let r = canvas.get_bounding_client_rect();
    DisplayRect::new(r.left(), r.top(), r.width(), r.height())
}

fn outcome_json(result: Result<ToolOutcome, EditError>) -> String {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return error_json(e),
    };
    let (kind, index, error) = match outcome {
        ToolOutcome::Ignored => ("ignored", None, None),
        ToolOutcome::Selected(i) => ("selected", Some(i), None),
        ToolOutcome::DraftStarted => ("draft_started", None, None),
        ToolOutcome::DraftUpdated => ("draft_updated", None, None),
        ToolOutcome::Committed(i) => ("committed", Some(i), None),
        ToolOutcome::Rejected(e) => ("rejected", None, Some(e.code())),
        ToolOutcome::Hover { .. } => ("hover", None, None),
    };
    json!({
        "outcome": kind,
        "index": index,
        "redraw": outcome.needs_redraw(),
        "error": error,
    })
    .to_string()
}

fn status_json(result: Result<(), EditError>) -> String {
    match result {
        Ok(()) => json!({ "ok": true }).to_string(),
        Err(e) => error_json(e),
    }
}

fn error_json(e: EditError) -> String {
    json!({ "ok": false, "error": e.code(), "message": e.to_string() }).to_string()
}

fn convert_status(result: Result<(), ConvertError>) -> String {
    match result {
        Ok(()) => json!({ "ok": true }).to_string(),
        Err(e) => json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("wmark panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
