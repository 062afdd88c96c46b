//! Editor configuration.
//!
//! Every field has a default, so a host may pass a partial JSON object or
//! nothing at all.

use crate::geometry::MIN_REGION_SIZE;
use serde::{Deserialize, Serialize};

/// Mask dilation in pixels applied around each region before inpainting.
pub const MASK_PADDING: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Regions with a side `<=` this many pixels are rejected at commit.
    /// Default: **4.0**.
    pub min_region_size: f64,

    /// Maximum number of history entries kept, including the seed entry.
    /// `None` keeps everything. Default: **None**.
    pub history_depth: Option<usize>,

    /// Pixels added on every side of a region when building inpainting
    /// masks. Default: **6**.
    pub mask_padding: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_region_size: MIN_REGION_SIZE,
            history_depth: None,
            mask_padding: MASK_PADDING,
        }
    }
}

impl EditorConfig {
    /// Parse from JSON. An empty string yields the defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text)
    }
}
