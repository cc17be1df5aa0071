use crate::color::ColorMap;
use crate::data::filter::SelectionState;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// `dataset` is the canonical copy: loaded once at startup and never
/// touched again. Every view the UI shows is derived fresh each frame from
/// `(dataset, selection)` by the pure functions in [`crate::data::filter`].
pub struct AppState {
    /// Canonical dataset, immutable for the whole session.
    pub dataset: Dataset,

    /// The user's current filter choices, mutated only by sidebar widgets.
    pub selection: SelectionState,

    /// Stable per-cause colours for the line chart.
    pub colors: ColorMap,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let colors = ColorMap::new(dataset.causes());
        Self {
            dataset,
            selection: SelectionState::default(),
            colors,
        }
    }

    /// Toggle a single cause in the selection. Only causes present in the
    /// canonical dataset ever reach this, so the subset invariant holds.
    pub fn toggle_cause(&mut self, cause: &str) {
        if !self.selection.selected_causes.remove(cause) {
            self.selection.selected_causes.insert(cause.to_string());
        }
    }

    /// Select every cause in the dataset.
    pub fn select_all_causes(&mut self) {
        self.selection.selected_causes = self.dataset.causes().map(str::to_string).collect();
    }

    /// Clear the cause selection (a valid state: the views go to their
    /// placeholder prompts).
    pub fn select_no_causes(&mut self) {
        self.selection.selected_causes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;

    fn state() -> AppState {
        AppState::new(loader::parse_for_tests(
            "cause,male0\nCancer,1.0\nStroke,2.0\n",
        ))
    }

    #[test]
    fn toggling_adds_then_removes() {
        let mut state = state();
        state.toggle_cause("Cancer");
        assert!(state.selection.selected_causes.contains("Cancer"));
        state.toggle_cause("Cancer");
        assert!(state.selection.selected_causes.is_empty());
    }

    #[test]
    fn select_all_then_none() {
        let mut state = state();
        state.select_all_causes();
        assert_eq!(state.selection.selected_causes.len(), 2);
        state.select_no_causes();
        assert!(state.selection.selected_causes.is_empty());
    }
}
