//! Integration tests: pointer gestures → region invariants and draw ops.
//!
//! Replays many pseudo-random drags (fixed seed) through the session and
//! checks the invariants that must hold after every event.

use wm_core::{DisplayRect, ImageInfo, Point};
use wm_editor::session::EditorSession;
use wm_editor::tools::ToolOutcome;
use wm_render::{DrawOp, RegionStyle};

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self, max: f64) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * max
    }
}

#[test]
fn committed_regions_stay_normalized_and_large_enough() {
    let mut session = EditorSession::default();
    session.load_image(ImageInfo::new(800, 600));
    let mut rng = Lcg(7);

    for _ in 0..300 {
        let from = Point::new(rng.next_f64(800.0), rng.next_f64(600.0));
        // Mix of tiny and large drags in every direction.
        let spread = if rng.next_f64(1.0) < 0.3 { 6.0 } else { 300.0 };
        let to = Point::new(
            from.x + rng.next_f64(spread) - spread / 2.0,
            from.y + rng.next_f64(spread) - spread / 2.0,
        );
        let before = session.regions().len();

        let down = session.pointer_down(from).unwrap();
        if matches!(down, ToolOutcome::Selected(_)) {
            assert_eq!(session.regions().len(), before);
            continue;
        }
        session.pointer_move(to).unwrap();
        let up = session.pointer_up(to).unwrap();

        match up {
            ToolOutcome::Committed(i) => {
                assert_eq!(i, before);
                assert_eq!(session.regions().len(), before + 1);
                assert_eq!(session.selected(), None);
                assert!(session.draft().is_none());
            }
            ToolOutcome::Rejected(_) => assert_eq!(session.regions().len(), before),
            other => panic!("unexpected outcome {other:?}"),
        }

        for r in session.regions() {
            assert!(r.x1 <= r.x2 && r.y1 <= r.y2, "not normalized: {r:?}");
            assert!(r.x2 - r.x1 > 4.0 && r.y2 - r.y1 > 4.0, "degenerate: {r:?}");
        }

        let history = session.history().unwrap();
        assert_eq!(history.current(), session.regions());
    }
}

#[test]
fn draw_ops_follow_the_session() {
    let mut session = EditorSession::default();
    session.load_image(ImageInfo::new(800, 600));

    session.pointer_down(Point::new(10.0, 10.0)).unwrap();
    session.pointer_move(Point::new(90.0, 90.0)).unwrap();
    // Mid-drag: only the draft is drawn.
    assert!(matches!(
        session.draw_ops(),
        [DrawOp::Region {
            index: None,
            style: RegionStyle::Draft,
            ..
        }]
    ));

    session.pointer_up(Point::new(90.0, 90.0)).unwrap();
    session.pointer_down(Point::new(50.0, 50.0)).unwrap();
    assert!(matches!(
        session.draw_ops(),
        [
            DrawOp::Region {
                index: Some(0),
                style: RegionStyle::Selected,
                ..
            },
            DrawOp::Badge {
                style: RegionStyle::Selected,
                ..
            }
        ]
    ));

    session.unload_image();
    assert!(session.draw_ops().is_empty());
}

#[test]
fn display_mapping_feeds_gestures() {
    let mut session = EditorSession::default();
    session.load_image(ImageInfo::new(1600, 1200));
    // Shown at half size, offset inside the page.
    let rect = DisplayRect::new(20.0, 40.0, 800.0, 600.0);

    let a = session.map_pointer(Point::new(70.0, 90.0), rect).unwrap();
    let b = session.map_pointer(Point::new(170.0, 165.0), rect).unwrap();
    session.pointer_down(a).unwrap();
    session.pointer_move(b).unwrap();
    session.pointer_up(b).unwrap();

    let r = session.regions()[0];
    assert_eq!((r.x1, r.y1, r.x2, r.y2), (100.0, 100.0, 300.0, 250.0));
}
