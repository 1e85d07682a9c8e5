use sudoku_types::SolutionResponse;

use crate::api::SolveError;

/// Interaction phase of the upload widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    DragActive,
    Uploading,
    Succeeded,
    Failed,
}

/// Outcome of the most recent submission that was allowed to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Solved(SolutionResponse),
    Rejected(String),
}

/// Explicit state for the page's single upload widget. All mutation goes
/// through the transition methods below; rendering reads it.
#[derive(Debug, Default)]
pub struct UploadState {
    phase: UploadPhase,
    generation: u64,
    pub outcome: Option<SolveOutcome>,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Generation tag of the newest submission. A response may only apply
    /// if it carries this value.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.phase == UploadPhase::Uploading
    }

    pub fn is_drag_active(&self) -> bool {
        self.phase == UploadPhase::DragActive
    }

    /// Drag entered the drop target. Succeeded/Failed count as rest states:
    /// a finished widget accepts the next puzzle immediately.
    pub fn drag_entered(&mut self) {
        if self.phase != UploadPhase::Uploading {
            self.phase = UploadPhase::DragActive;
        }
    }

    /// Drag left the target (or ended) without a drop.
    pub fn drag_left(&mut self) {
        if self.phase == UploadPhase::DragActive {
            self.phase = UploadPhase::Idle;
        }
    }

    /// Starts a new submission, superseding any in-flight one. Clears the
    /// previous outcome so the grid is empty for the whole upload, and
    /// returns the generation tag the response must present.
    pub fn submission_started(&mut self) -> u64 {
        self.generation += 1;
        self.outcome = None;
        self.phase = UploadPhase::Uploading;
        self.generation
    }

    /// Applies a finished submission. Returns `false` (leaving state
    /// untouched) for responses of superseded submissions, so a slow
    /// round-trip can never clobber a newer one.
    pub fn response_arrived(
        &mut self,
        generation: u64,
        result: Result<SolutionResponse, SolveError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(response) => {
                self.phase = UploadPhase::Succeeded;
                self.outcome = Some(SolveOutcome::Solved(response));
            }
            Err(error) => {
                self.phase = UploadPhase::Failed;
                self.outcome = Some(SolveOutcome::Rejected(error.user_message()));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sudoku_types::{Cell, CellSource, GRID_CELLS};

    fn solved_response() -> SolutionResponse {
        SolutionResponse {
            success: true,
            values: (0..GRID_CELLS)
                .map(|i| Cell {
                    value: ((i % 9) + 1).to_string(),
                    source: if i % 3 == 0 {
                        CellSource::Solved
                    } else {
                        CellSource::Parsed
                    },
                })
                .collect(),
            points: None,
            error: None,
            title: None,
            body: None,
        }
    }

    #[test]
    fn drag_marker_toggles_and_never_sticks() {
        let mut state = UploadState::new();
        assert!(!state.is_drag_active());

        state.drag_entered();
        assert!(state.is_drag_active());

        state.drag_left();
        assert!(!state.is_drag_active());
        assert_eq!(state.phase(), UploadPhase::Idle);

        // Enter then drop: the submission itself clears the marker.
        state.drag_entered();
        state.submission_started();
        assert!(!state.is_drag_active());
        assert!(state.is_loading());

        // A trailing dragend after the drop must not revive the marker.
        state.drag_left();
        assert!(state.is_loading());
    }

    #[test]
    fn drag_is_ignored_while_uploading() {
        let mut state = UploadState::new();
        state.submission_started();
        state.drag_entered();
        assert!(state.is_loading());
        assert!(!state.is_drag_active());
    }

    #[test]
    fn new_submission_clears_previous_outcome() {
        let mut state = UploadState::new();
        let generation = state.submission_started();
        assert!(state.response_arrived(generation, Ok(solved_response())));
        assert!(matches!(state.outcome, Some(SolveOutcome::Solved(_))));

        state.submission_started();
        assert!(state.outcome.is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut state = UploadState::new();
        let first = state.submission_started();
        let second = state.submission_started();

        // The superseded submission resolves late; it must not apply.
        assert!(!state.response_arrived(first, Ok(solved_response())));
        assert!(state.outcome.is_none());
        assert!(state.is_loading());

        assert!(state.response_arrived(
            second,
            Err(SolveError::Server {
                message: "could not parse image".to_string(),
            }),
        ));
        assert_eq!(state.phase(), UploadPhase::Failed);
        assert_eq!(
            state.outcome,
            Some(SolveOutcome::Rejected("could not parse image".to_string()))
        );
    }

    #[test]
    fn current_response_applies_regardless_of_interleaving() {
        // Same two submissions, opposite completion order.
        let mut state = UploadState::new();
        let first = state.submission_started();
        let second = state.submission_started();

        assert!(state.response_arrived(second, Ok(solved_response())));
        assert_eq!(state.phase(), UploadPhase::Succeeded);

        // The stale one arriving afterwards changes nothing.
        assert!(!state.response_arrived(
            first,
            Err(SolveError::Transport("timeout".to_string()))
        ));
        assert_eq!(state.phase(), UploadPhase::Succeeded);
        assert!(matches!(state.outcome, Some(SolveOutcome::Solved(_))));
    }

    #[test]
    fn transport_and_malformed_failures_degrade_to_readable_text() {
        let mut state = UploadState::new();
        let generation = state.submission_started();
        assert!(state.response_arrived(
            generation,
            Err(SolveError::Malformed("expected value at line 1".to_string())),
        ));
        let Some(SolveOutcome::Rejected(message)) = &state.outcome else {
            panic!("expected a rejection");
        };
        assert!(!message.is_empty());
        assert!(!message.contains("line 1"));
    }
}
