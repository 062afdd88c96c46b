//! Editor session: one loaded image with its region model and history.
//!
//! The session is the single owner of the mutable state and the only place
//! that decides when history is snapshotted. Every operation that changes
//! `committed` (commit, delete, clear) takes a snapshot; draft and selection
//! changes do not. After any visible change the draw ops are recomputed and
//! pushed to the registered listeners.
//!
//! Without an image every editing call returns `EditError::NoActiveImage`
//! and leaves the session untouched.

use crate::history::HistoryLog;
use crate::input::{InputEvent, Modifiers};
use crate::processing::{InpaintRequest, PixelRect, context_window, mask_rects};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{RegionTool, ToolOutcome};
use wm_core::{DisplayRect, EditError, EditorConfig, ImageInfo, Point, Region, RegionModel, map_to_image};
use wm_render::{CursorHint, DrawOp, cursor_hint, draw_ops_for};

/// Called with the fresh draw-op list after every visible change.
pub type ChangeListener = Box<dyn FnMut(&[DrawOp])>;

/// Per-image state. Replaced wholesale when a new image is loaded.
#[derive(Debug)]
pub struct ImageDocument {
    pub image: ImageInfo,
    pub regions: RegionModel,
    pub history: HistoryLog,
    pub tool: RegionTool,
}

impl ImageDocument {
    pub fn new(image: ImageInfo, config: &EditorConfig) -> Self {
        Self {
            image,
            regions: RegionModel::with_min_size(config.min_region_size),
            history: HistoryLog::with_depth(config.history_depth),
            tool: RegionTool::new(),
        }
    }
}

pub struct EditorSession {
    config: EditorConfig,
    document: Option<ImageDocument>,
    draw_ops: Vec<DrawOp>,
    listeners: Vec<ChangeListener>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            document: None,
            draw_ops: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Register a listener for draw-op changes.
    pub fn on_change(&mut self, listener: impl FnMut(&[DrawOp]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ─── Image lifecycle ────────────────────────────────────────────────

    /// Start a fresh document for `image`, discarding regions, history,
    /// and any in-flight drag from the previous one.
    pub fn load_image(&mut self, image: ImageInfo) {
        log::debug!("loading image {}x{}", image.width, image.height);
        self.document = Some(ImageDocument::new(image, &self.config));
        self.refresh();
    }

    pub fn unload_image(&mut self) {
        if self.document.take().is_some() {
            self.refresh();
        }
    }

    pub fn image(&self) -> Option<ImageInfo> {
        self.document.as_ref().map(|d| d.image)
    }

    pub fn document(&self) -> Option<&ImageDocument> {
        self.document.as_ref()
    }

    // ─── Pointer input ──────────────────────────────────────────────────

    /// Map a display-space pointer position into image space using the
    /// surface's freshly measured rect.
    pub fn map_pointer(&self, client: Point, rect: DisplayRect) -> Result<Point, EditError> {
        let doc = self.document.as_ref().ok_or(EditError::NoActiveImage)?;
        Ok(map_to_image(client, rect, doc.image))
    }

    /// Feed one image-space input event to the region tool. Key events are
    /// routed through the shortcut map instead.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<ToolOutcome, EditError> {
        if let InputEvent::Key { key, modifiers } = event {
            return self.handle_key(key, *modifiers).map(|_| ToolOutcome::Ignored);
        }

        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        let outcome = doc.tool.handle(event, &mut doc.regions);
        if outcome.changed_committed() {
            doc.history.snapshot(doc.regions.committed());
        }
        if outcome.needs_redraw() {
            self.refresh();
        }
        Ok(outcome)
    }

    pub fn pointer_down(&mut self, p: Point) -> Result<ToolOutcome, EditError> {
        self.handle_input(&InputEvent::pointer_down(p))
    }

    pub fn pointer_move(&mut self, p: Point) -> Result<ToolOutcome, EditError> {
        self.handle_input(&InputEvent::pointer_move(p))
    }

    pub fn pointer_up(&mut self, p: Point) -> Result<ToolOutcome, EditError> {
        self.handle_input(&InputEvent::pointer_up(p))
    }

    pub fn pointer_leave(&mut self) -> Result<ToolOutcome, EditError> {
        self.handle_input(&InputEvent::PointerLeave)
    }

    /// Cursor to show at `p`.
    pub fn cursor_hint(&self, p: Point) -> CursorHint {
        match &self.document {
            Some(doc) => cursor_hint(&doc.regions, p, doc.tool.is_dragging()),
            None => CursorHint::Crosshair,
        }
    }

    // ─── Keyboard ───────────────────────────────────────────────────────

    /// Resolve and apply a shortcut. `Ok(None)` means the key is unbound.
    pub fn handle_key(
        &mut self,
        key: &str,
        modifiers: Modifiers,
    ) -> Result<Option<ShortcutAction>, EditError> {
        let Some(action) =
            ShortcutMap::resolve(key, modifiers.ctrl, modifiers.shift, modifiers.alt, modifiers.meta)
        else {
            return Ok(None);
        };
        self.dispatch_action(action)?;
        Ok(Some(action))
    }

    pub fn dispatch_action(&mut self, action: ShortcutAction) -> Result<(), EditError> {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::DeleteSelected => self.delete_selected().map(|_| ()),
            ShortcutAction::ClearAll => self.clear_all().map(|_| ()),
            ShortcutAction::Deselect => self.clear_selection(),
        }
    }

    // ─── History ────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> Result<(), EditError> {
        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        let restored = doc.history.undo()?;
        doc.regions.replace_committed(restored);
        self.refresh();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        let restored = doc.history.redo()?;
        doc.regions.replace_committed(restored);
        self.refresh();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.document.as_ref().is_some_and(|d| d.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.document.as_ref().is_some_and(|d| d.history.can_redo())
    }

    pub fn history(&self) -> Option<&HistoryLog> {
        self.document.as_ref().map(|d| &d.history)
    }

    // ─── Selection & committed-set edits ────────────────────────────────

    pub fn select(&mut self, index: usize) -> Result<(), EditError> {
        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        doc.regions.select(index)?;
        self.refresh();
        Ok(())
    }

    pub fn clear_selection(&mut self) -> Result<(), EditError> {
        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        if doc.regions.selected().is_some() {
            doc.regions.clear_selection();
            self.refresh();
        }
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<Region, EditError> {
        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        let removed = doc.regions.delete_selected()?;
        doc.history.snapshot(doc.regions.committed());
        self.refresh();
        Ok(removed)
    }

    /// Remove every region. Returns whether anything was removed; history
    /// is only snapshotted when it was.
    pub fn clear_all(&mut self) -> Result<bool, EditError> {
        let doc = self.document.as_mut().ok_or(EditError::NoActiveImage)?;
        let had_draft = doc.regions.draft().is_some();
        let had_selection = doc.regions.selected().is_some();
        let changed = doc.regions.clear_all();
        doc.tool.reset();
        if changed {
            doc.history.snapshot(doc.regions.committed());
        }
        if changed || had_draft || had_selection {
            self.refresh();
        }
        Ok(changed)
    }

    // ─── Read access ────────────────────────────────────────────────────

    pub fn regions(&self) -> &[Region] {
        self.document
            .as_ref()
            .map(|d| d.regions.committed())
            .unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<usize> {
        self.document.as_ref().and_then(|d| d.regions.selected())
    }

    pub fn draft(&self) -> Option<Region> {
        self.document
            .as_ref()
            .and_then(|d| d.regions.draft())
            .map(|d| d.region)
    }

    /// The latest Render Sync projection.
    pub fn draw_ops(&self) -> &[DrawOp] {
        &self.draw_ops
    }

    /// Snapshot the committed list for the inpainting backend.
    pub fn inpaint_request(&self, image_data: impl Into<String>) -> Result<InpaintRequest, EditError> {
        if self.document.is_none() {
            return Err(EditError::NoActiveImage);
        }
        InpaintRequest::new(image_data, self.regions())
    }

    /// Mask rectangles and crop window the backend will use for the
    /// current regions, for previewing before a request is sent.
    pub fn mask_preview(&self) -> Result<(Vec<PixelRect>, Option<PixelRect>), EditError> {
        let doc = self.document.as_ref().ok_or(EditError::NoActiveImage)?;
        let masks = mask_rects(doc.regions.committed(), doc.image, self.config.mask_padding);
        let window = context_window(&masks, doc.image);
        Ok((masks, window))
    }

    fn refresh(&mut self) {
        self.draw_ops = match &self.document {
            Some(doc) => draw_ops_for(&doc.regions),
            None => Vec::new(),
        };
        for listener in &mut self.listeners {
            listener(&self.draw_ops);
        }
    }
}
