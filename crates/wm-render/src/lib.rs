pub mod hit;
pub mod paint;
pub mod scene;

pub use hit::{CursorHint, cursor_hint};
pub use paint::{DrawOp, RegionStyle, RegionTheme, Rgba, StylePaint, build_draw_ops, draw_ops_for};
pub use scene::paint_scene;
