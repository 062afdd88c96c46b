//! What the core needs to know about a loaded image.

use serde::{Deserialize, Serialize};

/// Intrinsic pixel dimensions of the decoded bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
