//! Input abstraction layer.
//!
//! Host pointer and keyboard events normalised into one `InputEvent` enum.
//! Pointer coordinates are expected in image space; map them with
//! `wm_core::map_to_image` first.

use wm_core::Point;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved, with or without a button held.
    PointerMove { x: f64, y: f64 },

    /// Primary button released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the drawing surface. Ends a drag like `PointerUp`.
    PointerLeave,

    /// Key pressed. `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(p: Point) -> Self {
        Self::PointerDown { x: p.x, y: p.y }
    }

    pub fn pointer_move(p: Point) -> Self {
        Self::PointerMove { x: p.x, y: p.y }
    }

    pub fn pointer_up(p: Point) -> Self {
        Self::PointerUp { x: p.x, y: p.y }
    }

    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers,
        }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Point::new(*x, *y))
            }
            Self::PointerLeave | Self::Key { .. } => None,
        }
    }
}
