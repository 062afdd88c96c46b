//! Region tool: pointer input → region model edits.
//!
//! Two states. `Idle` hit-tests on pointer-down and either selects the region
//! under the pointer or starts drawing; `Dragging` stretches the draft until
//! the pointer is released or leaves the surface.
//!
//! | State    | Event         | Effect                               | Next     |
//! |----------|---------------|--------------------------------------|----------|
//! | Idle     | down on region| select it                            | Idle     |
//! | Idle     | down elsewhere| clear selection, open draft          | Dragging |
//! | Idle     | move          | hover only                           | Idle     |
//! | Dragging | move          | update draft                         | Dragging |
//! | Dragging | up / leave    | commit draft (may be rejected)       | Idle     |

use crate::input::InputEvent;
use wm_core::{EditError, Point, RegionModel};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
    },
}

/// What a single event did, for the session and the host's notices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolOutcome {
    /// Event did not apply in this state.
    Ignored,
    /// Pointer-down landed on region `index`, which is now selected.
    Selected(usize),
    /// Pointer-down on empty image opened a draft.
    DraftStarted,
    DraftUpdated,
    /// Drag ended and region `index` was appended.
    Committed(usize),
    /// Drag ended but the draft could not be committed.
    Rejected(EditError),
    /// Pointer moved without a drag.
    Hover { over_region: bool },
}

impl ToolOutcome {
    /// `true` when `committed` changed and history must be snapshotted.
    pub fn changed_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// `true` when anything visible (committed, draft, selection) changed.
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Ignored | Self::Hover { .. })
    }
}

#[derive(Debug, Default)]
pub struct RegionTool {
    state: ToolState,
}

impl RegionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ToolState::Dragging { .. })
    }

    /// Return to `Idle` without committing, e.g. when a new image replaces
    /// the model the drag was editing.
    pub fn reset(&mut self) {
        self.state = ToolState::Idle;
    }

    pub fn handle(&mut self, event: &InputEvent, model: &mut RegionModel) -> ToolOutcome {
        match (self.state, event) {
            (ToolState::Idle, InputEvent::PointerDown { x, y }) => {
                let point = Point::new(*x, *y);
                if let Some(index) = model.hit_test(point) {
                    // hit_test only returns valid indices.
                    return match model.select(index) {
                        Ok(()) => ToolOutcome::Selected(index),
                        Err(e) => ToolOutcome::Rejected(e),
                    };
                }
                model.clear_selection();
                model.begin_draft(point);
                self.state = ToolState::Dragging { anchor: point };
                ToolOutcome::DraftStarted
            }

            (ToolState::Dragging { .. }, InputEvent::PointerMove { x, y }) => {
                match model.update_draft(Point::new(*x, *y)) {
                    Ok(()) => ToolOutcome::DraftUpdated,
                    Err(e) => {
                        // Draft was cleared under us (clear-all mid-drag).
                        self.state = ToolState::Idle;
                        ToolOutcome::Rejected(e)
                    }
                }
            }

            (ToolState::Dragging { .. }, InputEvent::PointerUp { x, y }) => {
                // Fold the release position in; hosts may not send a final move.
                if model.update_draft(Point::new(*x, *y)).is_err() {
                    log::trace!("pointer-up with no open draft");
                }
                self.finish(model)
            }

            (ToolState::Dragging { .. }, InputEvent::PointerLeave) => self.finish(model),

            (ToolState::Idle, InputEvent::PointerMove { x, y }) => ToolOutcome::Hover {
                over_region: model.hit_test(Point::new(*x, *y)).is_some(),
            },

            _ => ToolOutcome::Ignored,
        }
    }

    fn finish(&mut self, model: &mut RegionModel) -> ToolOutcome {
        self.state = ToolState::Idle;
        match model.commit_draft() {
            Ok(index) => ToolOutcome::Committed(index),
            Err(e) => ToolOutcome::Rejected(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wm_core::Region;

    fn drag(tool: &mut RegionTool, model: &mut RegionModel, from: (f64, f64), to: (f64, f64)) -> ToolOutcome {
        tool.handle(&InputEvent::pointer_down(from.into()), model);
        tool.handle(&InputEvent::pointer_move(to.into()), model);
        tool.handle(&InputEvent::pointer_up(to.into()), model)
    }

    #[test]
    fn drag_on_empty_image_commits() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        let out = tool.handle(&InputEvent::pointer_down(Point::new(100.0, 100.0)), &mut model);
        assert_eq!(out, ToolOutcome::DraftStarted);
        assert_eq!(
            tool.state(),
            ToolState::Dragging {
                anchor: Point::new(100.0, 100.0)
            }
        );

        let out = tool.handle(&InputEvent::pointer_move(Point::new(300.0, 250.0)), &mut model);
        assert_eq!(out, ToolOutcome::DraftUpdated);
        assert_eq!(
            model.draft().map(|d| d.region),
            Some(Region::new(100.0, 100.0, 300.0, 250.0))
        );

        let out = tool.handle(&InputEvent::pointer_up(Point::new(300.0, 250.0)), &mut model);
        assert_eq!(out, ToolOutcome::Committed(0));
        assert_eq!(tool.state(), ToolState::Idle);
        assert_eq!(model.committed(), &[Region::new(100.0, 100.0, 300.0, 250.0)]);
    }

    #[test]
    fn click_on_region_selects_without_dragging() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        drag(&mut tool, &mut model, (100.0, 100.0), (300.0, 250.0));

        let out = tool.handle(&InputEvent::pointer_down(Point::new(150.0, 150.0)), &mut model);
        assert_eq!(out, ToolOutcome::Selected(0));
        assert_eq!(model.selected(), Some(0));
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(model.draft().is_none());

        // Release after a select is not a commit.
        let out = tool.handle(&InputEvent::pointer_up(Point::new(150.0, 150.0)), &mut model);
        assert_eq!(out, ToolOutcome::Ignored);
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn tiny_drag_is_rejected_and_returns_to_idle() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        let out = drag(&mut tool, &mut model, (10.0, 10.0), (11.0, 11.0));
        assert_eq!(out, ToolOutcome::Rejected(EditError::DegenerateRegion));
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(model.is_empty());
    }

    #[test]
    fn leaving_surface_commits() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        tool.handle(&InputEvent::pointer_down(Point::new(0.0, 0.0)), &mut model);
        tool.handle(&InputEvent::pointer_move(Point::new(40.0, 40.0)), &mut model);
        let out = tool.handle(&InputEvent::PointerLeave, &mut model);
        assert_eq!(out, ToolOutcome::Committed(0));
        assert!(!tool.is_dragging());
    }

    #[test]
    fn drawing_clears_previous_selection() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        drag(&mut tool, &mut model, (0.0, 0.0), (50.0, 50.0));
        tool.handle(&InputEvent::pointer_down(Point::new(25.0, 25.0)), &mut model);
        assert_eq!(model.selected(), Some(0));

        tool.handle(&InputEvent::pointer_down(Point::new(200.0, 200.0)), &mut model);
        assert_eq!(model.selected(), None);
        assert!(tool.is_dragging());
    }

    #[test]
    fn hover_does_not_mutate() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        drag(&mut tool, &mut model, (0.0, 0.0), (50.0, 50.0));
        let before = model.clone();
        assert_eq!(
            tool.handle(&InputEvent::pointer_move(Point::new(10.0, 10.0)), &mut model),
            ToolOutcome::Hover { over_region: true }
        );
        assert_eq!(
            tool.handle(&InputEvent::pointer_move(Point::new(90.0, 90.0)), &mut model),
            ToolOutcome::Hover { over_region: false }
        );
        assert_eq!(model, before);
    }

    #[test]
    fn cleared_draft_ends_drag() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        tool.handle(&InputEvent::pointer_down(Point::new(0.0, 0.0)), &mut model);
        model.clear_all();
        let out = tool.handle(&InputEvent::pointer_move(Point::new(40.0, 40.0)), &mut model);
        assert_eq!(out, ToolOutcome::Rejected(EditError::NoDraft));
        assert_eq!(tool.state(), ToolState::Idle);
    }

    #[test]
    fn release_without_draft_is_rejected() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        tool.handle(&InputEvent::pointer_down(Point::new(0.0, 0.0)), &mut model);
        model.abandon_draft();
        let out = tool.handle(&InputEvent::pointer_up(Point::new(40.0, 40.0)), &mut model);
        assert_eq!(out, ToolOutcome::Rejected(EditError::NoDraft));
        assert_eq!(tool.state(), ToolState::Idle);
        assert!(model.is_empty());
    }

    #[test]
    fn reverse_drag_commits_normalized() {
        let mut tool = RegionTool::new();
        let mut model = RegionModel::new();
        drag(&mut tool, &mut model, (300.0, 250.0), (100.0, 100.0));
        let r = model.committed()[0];
        assert!(r.x1 <= r.x2 && r.y1 <= r.y2);
    }
}
