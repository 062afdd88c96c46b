//! Editing outcomes that leave state unchanged.
//!
//! None of these are fatal. Every operation either mutates and succeeds, or
//! returns one of these with the model untouched so the host can show a
//! notice.

use std::fmt;
use thiserror::Error;

/// Which end of the history an undo/redo ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStep {
    Undo,
    Redo,
}

impl fmt::Display for HistoryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The draft was too small to commit and has been discarded.
    #[error("region too small, ignored")]
    DegenerateRegion,

    #[error("nothing to {0}")]
    EmptyHistoryBoundary(HistoryStep),

    #[error("no region at index {0}")]
    InvalidSelection(usize),

    /// Delete requested with nothing selected.
    #[error("no region selected")]
    NoSelection,

    #[error("no image loaded")]
    NoActiveImage,

    /// `update_draft`/`commit_draft` without an open draft.
    #[error("no region is being drawn")]
    NoDraft,

    /// Processing was requested with an empty selection.
    #[error("no regions selected")]
    NoRegions,
}

impl EditError {
    /// Stable machine-readable name, used in host-facing JSON replies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DegenerateRegion => "degenerate_region",
            Self::EmptyHistoryBoundary(HistoryStep::Undo) => "nothing_to_undo",
            Self::EmptyHistoryBoundary(HistoryStep::Redo) => "nothing_to_redo",
            Self::InvalidSelection(_) => "invalid_selection",
            Self::NoSelection => "no_selection",
            Self::NoActiveImage => "no_active_image",
            Self::NoDraft => "no_draft",
            Self::NoRegions => "no_regions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            EditError::EmptyHistoryBoundary(HistoryStep::Redo).to_string(),
            "nothing to redo"
        );
        assert_eq!(
            EditError::InvalidSelection(3).to_string(),
            "no region at index 3"
        );
        assert_eq!(EditError::DegenerateRegion.code(), "degenerate_region");
    }
}
