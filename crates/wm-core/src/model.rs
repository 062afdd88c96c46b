//! Region model: committed regions, the in-progress draft, and the selection.
//!
//! Insertion order matters. It gives each region its 1-based display number
//! and its z-order (last committed is on top for hit testing and painting).
//!
//! The model never records history itself. Callers that change `committed`
//! (commit, delete, clear) are responsible for taking a history snapshot;
//! draft and selection changes are never snapshotted.

use crate::error::EditError;
use crate::geometry::{MIN_REGION_SIZE, Point, Region};

/// The rectangle being drawn by an active drag.
///
/// `anchor` is the fixed pointer-down corner; `region` is always the
/// normalized span between the anchor and the latest pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub anchor: Point,
    pub region: Region,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionModel {
    committed: Vec<Region>,
    selected: Option<usize>,
    draft: Option<Draft>,
    /// Degeneracy threshold used by `commit_draft`.
    min_size: f64,
}

impl Default for RegionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionModel {
    pub fn new() -> Self {
        Self::with_min_size(MIN_REGION_SIZE)
    }

    pub fn with_min_size(min_size: f64) -> Self {
        Self {
            committed: Vec::new(),
            selected: None,
            draft: None,
            min_size,
        }
    }

    pub fn committed(&self) -> &[Region] {
        &self.committed
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.selected.and_then(|i| self.committed.get(i))
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    // ─── Draft ──────────────────────────────────────────────────────────

    /// Open a draft with both corners at `origin`. Replaces any open draft
    /// and clears the selection.
    pub fn begin_draft(&mut self, origin: Point) {
        self.selected = None;
        self.draft = Some(Draft {
            anchor: origin,
            region: Region::at(origin),
        });
    }

    /// Stretch the draft between its anchor and `corner`.
    pub fn update_draft(&mut self, corner: Point) -> Result<(), EditError> {
        let draft = self.draft.as_mut().ok_or(EditError::NoDraft)?;
        draft.region = Region::spanning(draft.anchor, corner);
        Ok(())
    }

    /// Close the draft. On success returns the index of the new region.
    ///
    /// The draft is cleared whatever the outcome. A degenerate draft is
    /// dropped without touching `committed`.
    pub fn commit_draft(&mut self) -> Result<usize, EditError> {
        let draft = self.draft.take().ok_or(EditError::NoDraft)?;
        let region = draft.region.normalized();
        if region.is_degenerate(self.min_size) {
            log::debug!(
                "rejecting degenerate region {:.1}x{:.1}",
                region.width(),
                region.height()
            );
            return Err(EditError::DegenerateRegion);
        }
        self.committed.push(region);
        self.selected = None;
        let index = self.committed.len() - 1;
        log::debug!("committed region #{} {:?}", index + 1, region);
        Ok(index)
    }

    /// Drop the draft without committing.
    pub fn abandon_draft(&mut self) -> Option<Draft> {
        self.draft.take()
    }

    // ─── Hit testing & selection ────────────────────────────────────────

    /// Topmost committed region containing `point`.
    ///
    /// Scans from the last index down so the most recently drawn region wins
    /// where regions overlap.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.committed
            .iter()
            .enumerate()
            .rev()
            .find(|(_, r)| r.contains(point))
            .map(|(i, _)| i)
    }

    pub fn select(&mut self, index: usize) -> Result<(), EditError> {
        if index >= self.committed.len() {
            return Err(EditError::InvalidSelection(index));
        }
        self.selected = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ─── Committed-set mutations ────────────────────────────────────────

    /// Remove the selected region and clear the selection.
    pub fn delete_selected(&mut self) -> Result<Region, EditError> {
        let index = self.selected.take().ok_or(EditError::NoSelection)?;
        if index >= self.committed.len() {
            return Err(EditError::InvalidSelection(index));
        }
        let removed = self.committed.remove(index);
        log::debug!("deleted region #{} {:?}", index + 1, removed);
        Ok(removed)
    }

    /// Remove every region and clear draft and selection.
    /// Returns `true` if `committed` was non-empty.
    pub fn clear_all(&mut self) -> bool {
        self.draft = None;
        self.selected = None;
        let changed = !self.committed.is_empty();
        self.committed.clear();
        changed
    }

    /// Replace the committed set wholesale (undo/redo restore).
    ///
    /// The draft is left alone. A selection that no longer indexes the
    /// restored list is cleared.
    pub fn replace_committed(&mut self, regions: &[Region]) {
        self.committed.clear();
        self.committed.extend_from_slice(regions);
        if self.selected.is_some_and(|i| i >= self.committed.len()) {
            log::debug!("selection {:?} dropped after restore", self.selected);
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draw(model: &mut RegionModel, from: (f64, f64), to: (f64, f64)) -> Result<usize, EditError> {
        model.begin_draft(from.into());
        model.update_draft(to.into())?;
        model.commit_draft()
    }

    #[test]
    fn commit_normalizes_reverse_drag() {
        let mut model = RegionModel::new();
        let idx = draw(&mut model, (300.0, 250.0), (100.0, 100.0)).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(model.committed(), &[Region::new(100.0, 100.0, 300.0, 250.0)]);
    }

    #[test]
    fn draft_tracks_anchor_across_quadrants() {
        let mut model = RegionModel::new();
        model.begin_draft(Point::new(50.0, 50.0));
        model.update_draft(Point::new(80.0, 90.0)).unwrap();
        model.update_draft(Point::new(10.0, 20.0)).unwrap();
        let draft = model.draft().unwrap();
        assert_eq!(draft.anchor, Point::new(50.0, 50.0));
        assert_eq!(draft.region, Region::new(10.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn degenerate_commit_is_rejected_and_clears_draft() {
        let mut model = RegionModel::new();
        let err = draw(&mut model, (10.0, 10.0), (11.0, 11.0)).unwrap_err();
        assert_eq!(err, EditError::DegenerateRegion);
        assert!(model.is_empty());
        assert!(model.draft().is_none());

        // Thin in one axis only is still degenerate.
        let err = draw(&mut model, (0.0, 0.0), (200.0, 4.0)).unwrap_err();
        assert_eq!(err, EditError::DegenerateRegion);
        assert!(model.is_empty());
    }

    #[test]
    fn commit_clears_selection_and_draft() {
        let mut model = RegionModel::new();
        draw(&mut model, (0.0, 0.0), (50.0, 50.0)).unwrap();
        model.select(0).unwrap();
        draw(&mut model, (100.0, 100.0), (150.0, 150.0)).unwrap();
        assert_eq!(model.selected(), None);
        assert!(model.draft().is_none());
    }

    #[test]
    fn update_or_commit_without_draft() {
        let mut model = RegionModel::new();
        assert_eq!(model.update_draft(Point::new(1.0, 1.0)), Err(EditError::NoDraft));
        assert_eq!(model.commit_draft(), Err(EditError::NoDraft));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut model = RegionModel::new();
        draw(&mut model, (0.0, 0.0), (100.0, 100.0)).unwrap();
        draw(&mut model, (50.0, 50.0), (150.0, 150.0)).unwrap();
        assert_eq!(model.hit_test(Point::new(75.0, 75.0)), Some(1));
        assert_eq!(model.hit_test(Point::new(25.0, 25.0)), Some(0));
        assert_eq!(model.hit_test(Point::new(400.0, 400.0)), None);
    }

    #[test]
    fn select_out_of_range_is_noop() {
        let mut model = RegionModel::new();
        draw(&mut model, (0.0, 0.0), (10.0, 10.0)).unwrap();
        model.select(0).unwrap();
        assert_eq!(model.select(5), Err(EditError::InvalidSelection(5)));
        assert_eq!(model.selected(), Some(0));
    }

    #[test]
    fn delete_selected_removes_and_clears() {
        let mut model = RegionModel::new();
        draw(&mut model, (0.0, 0.0), (10.0, 10.0)).unwrap();
        draw(&mut model, (20.0, 20.0), (40.0, 40.0)).unwrap();
        model.select(0).unwrap();
        let removed = model.delete_selected().unwrap();
        assert_eq!(removed, Region::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(model.committed(), &[Region::new(20.0, 20.0, 40.0, 40.0)]);
        assert_eq!(model.selected(), None);
        assert_eq!(model.delete_selected(), Err(EditError::NoSelection));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn clear_all_reports_change() {
        let mut model = RegionModel::new();
        assert!(!model.clear_all());
        draw(&mut model, (0.0, 0.0), (10.0, 10.0)).unwrap();
        model.begin_draft(Point::new(30.0, 30.0));
        assert!(model.clear_all());
        assert!(model.is_empty());
        assert!(model.draft().is_none());
    }

    #[test]
    fn restore_drops_dangling_selection() {
        let mut model = RegionModel::new();
        draw(&mut model, (0.0, 0.0), (10.0, 10.0)).unwrap();
        draw(&mut model, (20.0, 20.0), (40.0, 40.0)).unwrap();
        model.select(1).unwrap();
        model.replace_committed(&[Region::new(0.0, 0.0, 10.0, 10.0)]);
        assert_eq!(model.selected(), None);

        model.select(0).unwrap();
        model.replace_committed(&[Region::new(0.0, 0.0, 10.0, 10.0), Region::new(1.0, 1.0, 9.0, 9.0)]);
        assert_eq!(model.selected(), Some(0));
    }
}
