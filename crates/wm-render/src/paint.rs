//! Region model → draw ops.
//!
//! A pure projection: the same committed list, draft, and selection always
//! yield the same ops. Ops follow `committed` order so later regions paint
//! over earlier ones, and the draft is always last. Colours are resolved
//! from a `RegionTheme` by whichever surface paints the ops.

use kurbo::{Point as KPoint, Rect};
use wm_core::{Region, RegionModel};

/// Radius of the ordinal badge, also its inset from the region's corner.
pub const BADGE_RADIUS: f64 = 10.0;

/// Visual treatment of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStyle {
    Committed,
    Selected,
    Draft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Filled and stroked rectangle. `index` is `None` for the draft.
    Region {
        index: Option<usize>,
        rect: Rect,
        style: RegionStyle,
    },
    /// Filled circle with the 1-based region number.
    Badge {
        index: usize,
        center: KPoint,
        radius: f64,
        label: String,
        style: RegionStyle,
    },
}

/// Build the op list for a whole model.
pub fn draw_ops_for(model: &RegionModel) -> Vec<DrawOp> {
    build_draw_ops(
        model.committed(),
        model.draft().map(|d| &d.region),
        model.selected(),
    )
}

pub fn build_draw_ops(
    committed: &[Region],
    draft: Option<&Region>,
    selected: Option<usize>,
) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(committed.len() * 2 + 1);

    for (index, region) in committed.iter().enumerate() {
        let style = if selected == Some(index) {
            RegionStyle::Selected
        } else {
            RegionStyle::Committed
        };
        ops.push(DrawOp::Region {
            index: Some(index),
            rect: to_rect(region),
            style,
        });
        ops.push(DrawOp::Badge {
            index,
            center: KPoint::new(region.x1 + BADGE_RADIUS, region.y1 + BADGE_RADIUS),
            radius: BADGE_RADIUS,
            label: (index + 1).to_string(),
            style,
        });
    }

    if let Some(region) = draft {
        ops.push(DrawOp::Region {
            index: None,
            rect: to_rect(region),
            style: RegionStyle::Draft,
        });
    }

    log::trace!("built {} draw ops for {} regions", ops.len(), committed.len());
    ops
}

fn to_rect(region: &Region) -> Rect {
    Rect::new(region.x1, region.y1, region.x2, region.y2)
}

// ─── Theme ───────────────────────────────────────────────────────────────

/// sRGB colour with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// CSS `rgba()` string for Canvas2D.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Colours for one `RegionStyle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePaint {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub badge: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionTheme {
    pub committed: StylePaint,
    pub selected: StylePaint,
    pub draft: StylePaint,
    pub line_width: f64,
    pub badge_text: Rgba,
    pub badge_font: &'static str,
}

impl Default for RegionTheme {
    fn default() -> Self {
        Self::business()
    }
}

impl RegionTheme {
    /// Blue regions, gold selection and draft.
    pub fn business() -> Self {
        const BLUE: (u8, u8, u8) = (59, 130, 246);
        const GOLD: (u8, u8, u8) = (217, 172, 83);
        Self {
            committed: StylePaint {
                fill: Rgba::new(BLUE.0, BLUE.1, BLUE.2, 0.12),
                stroke: Rgba::new(BLUE.0, BLUE.1, BLUE.2, 0.9),
                badge: Rgba::opaque(BLUE.0, BLUE.1, BLUE.2),
            },
            selected: StylePaint {
                fill: Rgba::new(GOLD.0, GOLD.1, GOLD.2, 0.15),
                stroke: Rgba::new(GOLD.0, GOLD.1, GOLD.2, 0.95),
                badge: Rgba::opaque(GOLD.0, GOLD.1, GOLD.2),
            },
            draft: StylePaint {
                fill: Rgba::new(GOLD.0, GOLD.1, GOLD.2, 0.1),
                stroke: Rgba::new(GOLD.0, GOLD.1, GOLD.2, 0.8),
                badge: Rgba::opaque(GOLD.0, GOLD.1, GOLD.2),
            },
            line_width: 2.5,
            badge_text: Rgba::opaque(255, 255, 255),
            badge_font: r#"bold 11px -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif"#,
        }
    }

    pub fn paint(&self, style: RegionStyle) -> &StylePaint {
        match style {
            RegionStyle::Committed => &self.committed,
            RegionStyle::Selected => &self.selected,
            RegionStyle::Draft => &self.draft,
        }
    }
}
