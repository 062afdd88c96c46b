//! Draw ops → Vello scene.
//!
//! Paints the Render Sync projection on top of whatever the caller already
//! placed in the scene (normally the image itself).

use crate::paint::{DrawOp, RegionTheme, Rgba};
use kurbo::{Affine, Circle, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Append `ops` to `scene`, in order.
pub fn paint_scene(scene: &mut Scene, ops: &[DrawOp], theme: &RegionTheme) {
    let stroke = Stroke::new(theme.line_width);
    for op in ops {
        match op {
            DrawOp::Region { rect, style, .. } => {
                let paint = theme.paint(*style);
                scene.fill(Fill::NonZero, Affine::IDENTITY, to_color(paint.fill), None, rect);
                scene.stroke(&stroke, Affine::IDENTITY, to_color(paint.stroke), None, rect);
            }
            DrawOp::Badge {
                center,
                radius,
                label,
                style,
                ..
            } => {
                let disc = Circle::new(*center, *radius);
                let paint = theme.paint(*style);
                scene.fill(Fill::NonZero, Affine::IDENTITY, to_color(paint.badge), None, &disc);
                // Glyph shaping needs a font context the scene does not own.
                log::trace!("badge {label} at ({}, {})", center.x, center.y);
            }
        }
    }
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.alpha_u8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::build_draw_ops;
    use wm_core::Region;

    #[test]
    fn empty_ops_leave_scene_empty() {
        let mut scene = Scene::new();
        paint_scene(&mut scene, &[], &RegionTheme::default());
        assert!(scene.encoding().is_empty());
    }

    #[test]
    fn regions_encode_into_scene() {
        let ops = build_draw_ops(&[Region::new(0.0, 0.0, 40.0, 40.0)], None, Some(0));
        let mut scene = Scene::new();
        paint_scene(&mut scene, &ops, &RegionTheme::default());
        assert!(!scene.encoding().is_empty());
    }

    #[test]
    fn alpha_maps_to_u8() {
        let c = Rgba::new(10, 20, 30, 0.5);
        assert_eq!(c.alpha_u8(), 128);
        let _ = to_color(c);
    }
}
