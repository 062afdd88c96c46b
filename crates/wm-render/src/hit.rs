//! Hover feedback layered on the model's hit test.
//!
//! Purely presentational: nothing here mutates the model. The authoritative
//! hit test is `RegionModel::hit_test`.

use wm_core::{Point, RegionModel};

/// Cursor style the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Over a committed region: a click selects it.
    Pointer,
    /// Over empty image: a drag draws a new region.
    Crosshair,
}

impl CursorHint {
    /// CSS `cursor` value.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Crosshair => "crosshair",
        }
    }
}

/// Cursor for a pointer at `point`. While dragging the draw cursor is kept
/// even when passing over existing regions.
pub fn cursor_hint(model: &RegionModel, point: Point, dragging: bool) -> CursorHint {
    if dragging {
        return CursorHint::Crosshair;
    }
    match model.hit_test(point) {
        Some(_) => CursorHint::Pointer,
        None => CursorHint::Crosshair,
    }
}
