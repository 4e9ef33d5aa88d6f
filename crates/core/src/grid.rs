//! Grid presentation state.
//!
//! The grid owns exactly one piece of transient UI state: which project is
//! currently selected for the detail view. Card layout is driven by the
//! per-project `grid_class` hint with a generic span as fallback.

use crate::project::Project;

/// Span class applied to cards that carry no layout hint.
pub const DEFAULT_SPAN: &str = "col-span-1 row-span-1";

/// Selection state for the card grid.
#[derive(Debug, Default)]
pub struct GridSelection {
    selected: Option<Project>,
}

impl GridSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activating any card selects that card's project.
    pub fn select(&mut self, project: Project) {
        self.selected = Some(project);
    }

    /// Closing the detail view clears the selection.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.as_ref()
    }
}

/// The layout span for a card: the project's own hint or the generic one.
pub fn span_class(project: &Project) -> &str {
    project.grid_class.as_deref().unwrap_or(DEFAULT_SPAN)
}
