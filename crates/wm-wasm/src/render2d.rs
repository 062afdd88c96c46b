//! Canvas2D renderer for region overlays.
//!
//! The image itself is shown by the host underneath an overlay canvas
//! sized to the bitmap, so this only clears the overlay and replays the
//! draw ops in image coordinates.

use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;
use wm_render::{DrawOp, RegionTheme};

pub fn render_ops(
    ctx: &CanvasRenderingContext2d,
    ops: &[DrawOp],
    theme: &RegionTheme,
    width: f64,
    height: f64,
) {
    ctx.clear_rect(0.0, 0.0, width, height);
    for op in ops {
        match op {
            DrawOp::Region { rect, style, .. } => {
                let paint = theme.paint(*style);
                ctx.save();
                ctx.set_fill_style_str(&paint.fill.to_css());
                ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
                ctx.set_stroke_style_str(&paint.stroke.to_css());
                ctx.set_line_width(theme.line_width);
                ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
                ctx.restore();
            }
            DrawOp::Badge {
                center,
                radius,
                label,
                style,
                ..
            } => draw_badge(ctx, center.x, center.y, *radius, label, theme, *style),
        }
    }
}

fn draw_badge(
    ctx: &CanvasRenderingContext2d,
    cx: f64,
    cy: f64,
    radius: f64,
    label: &str,
    theme: &RegionTheme,
    style: wm_render::RegionStyle,
) {
    ctx.save();
    ctx.begin_path();
    let _ = ctx.arc(cx, cy, radius, 0.0, TAU);
    ctx.set_fill_style_str(&theme.paint(style).badge.to_css());
    ctx.fill();

    ctx.set_fill_style_str(&theme.badge_text.to_css());
    ctx.set_font(theme.badge_font);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(label, cx, cy);
    ctx.restore();
}
