//! Display → image coordinate mapping.
//!
//! The drawing surface is usually rendered at a CSS size different from the
//! bitmap's intrinsic size. Pointer positions arrive in display space and
//! are scaled by `bitmap / display` per axis. The rect must be measured live
//! on every event; nothing here caches it.

use crate::geometry::Point;
use crate::image::ImageInfo;

/// The surface's measured on-screen rectangle (e.g. `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Map a pointer position in display space to image space.
///
/// A collapsed display axis (zero or negative size) maps with scale 1.0.
pub fn map_to_image(client: Point, rect: DisplayRect, bitmap: ImageInfo) -> Point {
    let sx = axis_scale(bitmap.width, rect.width);
    let sy = axis_scale(bitmap.height, rect.height);
    Point::new((client.x - rect.left) * sx, (client.y - rect.top) * sy)
}

fn axis_scale(intrinsic: u32, displayed: f64) -> f64 {
    if displayed > 0.0 {
        intrinsic as f64 / displayed
    } else {
        1.0
    }
}
