//! Handing regions to the inpainting backend.
//!
//! The backend receives the image as a data URL and the committed regions as
//! `[x1, y1, x2, y2]` tuples. It paints a padded mask per region and inpaints
//! a context window around the union of the masks. The mask and window
//! arithmetic lives here so hosts can preview exactly what will be sent.

use serde::{Deserialize, Serialize};
use wm_core::{EditError, ImageInfo, Region};

/// Minimum extra context added around the mask bounds on each axis.
pub const CONTEXT_MARGIN: f64 = 128.0;

/// JSON payload for the inpainting command: `{"image_data": .., "boxes": [[..]]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InpaintRequest {
    pub image_data: String,
    pub boxes: Vec<[f64; 4]>,
}

impl InpaintRequest {
    /// Snapshot `regions` by value. An empty list is `NoRegions`.
    pub fn new(image_data: impl Into<String>, regions: &[Region]) -> Result<Self, EditError> {
        if regions.is_empty() {
            return Err(EditError::NoRegions);
        }
        Ok(Self {
            image_data: image_data.into(),
            boxes: regions.iter().map(Region::as_tuple).collect(),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Integer pixel rectangle. For mask rects both corners are painted
/// (inclusive); for a context window `x2`/`y2` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

/// Mask rectangles: each region truncated to integers, grown by `padding`
/// on every side, and clamped to the image. Regions entirely outside the
/// image are dropped.
pub fn mask_rects(regions: &[Region], image: ImageInfo, padding: u32) -> Vec<PixelRect> {
    let pad = i64::from(padding);
    let (w, h) = (i64::from(image.width), i64::from(image.height));
    regions
        .iter()
        .filter_map(|r| {
            let x1 = (r.x1 as i64 - pad).clamp(0, w);
            let y1 = (r.y1 as i64 - pad).clamp(0, h);
            let x2 = (r.x2 as i64 + pad).clamp(0, w);
            let y2 = (r.y2 as i64 + pad).clamp(0, h);
            (x1 < x2 && y1 < y2).then(|| PixelRect {
                x1: x1 as u32,
                y1: y1 as u32,
                x2: x2 as u32,
                y2: y2 as u32,
            })
        })
        .collect()
}

/// Crop window the backend inpaints: the masks' bounding box grown to
/// `max(2·size, size + 128)` per axis about its centre, clamped to the
/// image. `None` when there is no mask.
pub fn context_window(masks: &[PixelRect], image: ImageInfo) -> Option<PixelRect> {
    let first = masks.first()?;
    let mut bbox = (first.x1, first.y1, first.x2, first.y2);
    for m in &masks[1..] {
        bbox.0 = bbox.0.min(m.x1);
        bbox.1 = bbox.1.min(m.y1);
        bbox.2 = bbox.2.max(m.x2);
        bbox.3 = bbox.3.max(m.y2);
    }
    // Mask corners are painted, so the pixel bounds end one past them.
    let x1 = f64::from(bbox.0);
    let y1 = f64::from(bbox.1);
    let x2 = f64::from(bbox.2.saturating_add(1).min(image.width));
    let y2 = f64::from(bbox.3.saturating_add(1).min(image.height));

    let grow = |lo: f64, hi: f64, limit: u32| {
        let size = hi - lo;
        let centre = (lo + hi) / 2.0;
        let target = (size * 2.0).max(size + CONTEXT_MARGIN);
        let a = (centre - target / 2.0).max(0.0) as u32;
        let b = ((centre + target / 2.0) as u32).min(limit);
        (a, b)
    };
    let (nx1, nx2) = grow(x1, x2, image.width);
    let (ny1, ny2) = grow(y1, y2, image.height);
    Some(PixelRect {
        x1: nx1,
        y1: ny1,
        x2: nx2,
        y2: ny2,
    })
}

/// A `data:<mime>;base64,<payload>` string as returned by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub mime: &'a str,
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    pub fn parse(s: &'a str) -> Option<Self> {
        let rest = s.trim().strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime = header.strip_suffix(";base64")?;
        Some(Self { mime, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IMAGE: ImageInfo = ImageInfo::new(800, 600);

    #[test]
    fn request_serializes_tuples_in_order() {
        let regions = [
            Region::new(100.0, 100.0, 300.0, 250.0),
            Region::new(5.5, 6.0, 20.0, 30.25),
        ];
        let req = InpaintRequest::new("data:image/png;base64,AAAA", &regions).unwrap();
        assert_eq!(
            req.to_json().unwrap(),
            r#"{"image_data":"data:image/png;base64,AAAA","boxes":[[100.0,100.0,300.0,250.0],[5.5,6.0,20.0,30.25]]}"#
        );
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert_eq!(InpaintRequest::new("x", &[]), Err(EditError::NoRegions));
    }

    #[test]
    fn masks_are_padded_and_clamped() {
        let regions = [
            Region::new(100.4, 100.0, 300.9, 250.0),
            Region::new(2.0, 3.0, 797.0, 598.0),
            Region::new(900.0, 10.0, 950.0, 40.0),
        ];
        let masks = mask_rects(&regions, IMAGE, 6);
        assert_eq!(
            masks,
            vec![
                PixelRect { x1: 94, y1: 94, x2: 306, y2: 256 },
                PixelRect { x1: 0, y1: 0, x2: 800, y2: 600 },
            ]
        );
    }

    #[test]
    fn context_window_grows_and_clamps() {
        let masks = [PixelRect { x1: 94, y1: 94, x2: 306, y2: 256 }];
        // bbox 94..307 × 94..257: width 213 → 426, height 163 → 326.
        let win = context_window(&masks, IMAGE).unwrap();
        assert_eq!(win, PixelRect { x1: 0, y1: 12, x2: 413, y2: 338 });
        assert_eq!(context_window(&[], IMAGE), None);
    }

    #[test]
    fn small_mask_gets_fixed_margin() {
        let masks = [PixelRect { x1: 400, y1: 300, x2: 409, y2: 309 }];
        // 10px box: max(20, 138) = 138 around centre 405.
        let win = context_window(&masks, IMAGE).unwrap();
        assert_eq!(win, PixelRect { x1: 336, y1: 236, x2: 474, y2: 374 });
    }

    #[test]
    fn window_at_max_dimensions_does_not_overflow() {
        let huge = ImageInfo::new(u32::MAX, u32::MAX);
        let masks = [PixelRect { x1: 10, y1: 10, x2: u32::MAX, y2: u32::MAX }];
        let win = context_window(&masks, huge).unwrap();
        assert_eq!((win.x2, win.y2), (u32::MAX, u32::MAX));
        assert_eq!((win.x1, win.y1), (0, 0));
    }

    #[test]
    fn parse_data_url() {
        let url = DataUrl::parse("data:image/webp;base64,UklGR").unwrap();
        assert_eq!(url.mime, "image/webp");
        assert_eq!(url.payload, "UklGR");
        assert_eq!(DataUrl::parse("ERROR: boom"), None);
    }
}
