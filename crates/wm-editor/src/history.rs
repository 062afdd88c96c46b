//! Undo/redo history of committed-region snapshots.
//!
//! A single linear log with a cursor. `entries[cursor]` always mirrors the
//! model's committed list. Snapshotting after an undo truncates everything
//! past the cursor, so there is never more than one redo branch.
//!
//! Drafts and selection are not part of a snapshot.

use wm_core::{EditError, HistoryStep, Region};

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Vec<Region>>,
    cursor: usize,
    /// Maximum number of entries kept (`None` = unbounded).
    max_depth: Option<usize>,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// A log seeded with a single empty entry.
    pub fn new() -> Self {
        Self::with_depth(None)
    }

    pub fn with_depth(max_depth: Option<usize>) -> Self {
        Self {
            entries: vec![Vec::new()],
            cursor: 0,
            // Room for the seed plus at least one edit.
            max_depth: max_depth.map(|d| d.max(2)),
        }
    }

    /// Record `committed` as the newest entry, discarding any redo branch.
    pub fn snapshot(&mut self, committed: &[Region]) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(committed.to_vec());
        if let Some(max) = self.max_depth
            && self.entries.len() > max
        {
            // The empty seed always survives so undo can reach "no regions".
            let excess = self.entries.len() - max;
            self.entries.drain(1..1 + excess);
        }
        self.cursor = self.entries.len() - 1;
        log::debug!(
            "history snapshot: {} regions, entry {}/{}",
            committed.len(),
            self.cursor,
            self.entries.len()
        );
    }

    /// Step back one entry and return it.
    pub fn undo(&mut self) -> Result<&[Region], EditError> {
        if self.cursor == 0 {
            return Err(EditError::EmptyHistoryBoundary(HistoryStep::Undo));
        }
        self.cursor -= 1;
        log::debug!("undo → entry {}", self.cursor);
        Ok(&self.entries[self.cursor])
    }

    /// Step forward one entry and return it.
    pub fn redo(&mut self) -> Result<&[Region], EditError> {
        if self.cursor + 1 >= self.entries.len() {
            return Err(EditError::EmptyHistoryBoundary(HistoryStep::Redo));
        }
        self.cursor += 1;
        log::debug!("redo → entry {}", self.cursor);
        Ok(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the log keeps at least its seed entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> &[Region] {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[Vec<Region>] {
        &self.entries
    }
}
