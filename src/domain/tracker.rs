//! Stage progression logic
//!
//! Pure functions for advancing and undoing stages on a progress track.
//! Inputs are never mutated; a refused operation reports why and leaves
//! the caller holding the original track.

use crate::schemas::{Stage, StageStatus, StageTrack, TankProfile, UndoPolicy};

use super::catalog::{applicable_stages, previous_applicable};

/// Result of an advance or undo attempt
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResult<T = StageTrack> {
    /// The operation applied
    Applied {
        /// The updated value
        next: T,
    },
    /// The operation was a no-op
    Unchanged {
        /// Why nothing changed
        reason: String,
    },
}

impl<T> TransitionResult<T> {
    pub fn unchanged(reason: impl Into<String>) -> Self {
        TransitionResult::Unchanged {
            reason: reason.into(),
        }
    }

    /// Check if the operation was a no-op
    pub fn is_unchanged(&self) -> bool {
        matches!(self, TransitionResult::Unchanged { .. })
    }

    /// Get the updated value if the operation applied
    pub fn next(self) -> Option<T> {
        match self {
            TransitionResult::Applied { next } => Some(next),
            TransitionResult::Unchanged { .. } => None,
        }
    }

    /// Get the reason if the operation was a no-op
    pub fn reason(&self) -> Option<&str> {
        match self {
            TransitionResult::Applied { .. } => None,
            TransitionResult::Unchanged { reason } => Some(reason),
        }
    }

    /// The updated value, or `original` when nothing changed
    pub fn unwrap_or(self, original: T) -> T {
        self.next().unwrap_or(original)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> TransitionResult<U> {
        match self {
            TransitionResult::Applied { next } => TransitionResult::Applied { next: f(next) },
            TransitionResult::Unchanged { reason } => TransitionResult::Unchanged { reason },
        }
    }
}

/// What a click on a stage means for its current status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    Advance,
    /// Needs confirmation from the user before it is applied
    Undo,
}

/// Route a click on `stage`: completed stages are undone, anything else
/// is advanced.
pub fn action_for(track: &StageTrack, stage: Stage) -> StageAction {
    match track.status_of(stage) {
        Some(StageStatus::Completed) => StageAction::Undo,
        _ => StageAction::Advance,
    }
}

/// Complete `stage` and open the stage that follows it.
///
/// Every earlier applicable stage must already be completed.
pub fn advance(track: &StageTrack, profile: &TankProfile, stage: Stage) -> TransitionResult {
    advance_with_stages(track, &applicable_stages(profile), profile.pump_pit, stage)
}

/// `advance` against an explicit applicable-stage list.
pub fn advance_with_stages(
    track: &StageTrack,
    stages: &[Stage],
    pump_pit: bool,
    stage: Stage,
) -> TransitionResult {
    let index = match stages.iter().position(|&s| s == stage) {
        Some(index) => index,
        None => {
            return TransitionResult::unchanged(format!("{} does not apply to this tank", stage))
        }
    };

    match track.status_of(stage) {
        None => return TransitionResult::unchanged(format!("{} has no progress entry", stage)),
        Some(StageStatus::Completed) => {
            return TransitionResult::unchanged(format!("{} is already completed", stage))
        }
        Some(_) => {}
    }

    if let Some(&open) = stages[..index]
        .iter()
        .find(|&&earlier| track.status_of(earlier) != Some(StageStatus::Completed))
    {
        return TransitionResult::unchanged(format!("{} must be completed before {}", open, stage));
    }

    let mut next_track = track.clone();
    next_track.update_status(stage, StageStatus::Completed);

    let opened = match stage {
        // Terminal for pump pits
        Stage::LadderInstallation => None,
        Stage::RepairAndCleaning => repair_successor(stages, index),
        Stage::InspectionStage3 if pump_pit => Some(Stage::LadderInstallation),
        Stage::InspectionStage2 if pump_pit && !stages.contains(&Stage::InspectionStage3) => {
            Some(Stage::LadderInstallation)
        }
        _ => stages.get(index + 1).copied(),
    };

    match opened {
        Some(next) => {
            next_track.set_status(next, StageStatus::InProgress);
            next_track.current_stage = Some(next);
        }
        None => next_track.current_stage = Some(stage),
    }

    TransitionResult::Applied { next: next_track }
}

/// Cleaning hands over to the first inspection when nothing lies between
/// them; otherwise the list order decides.
fn repair_successor(stages: &[Stage], index: usize) -> Option<Stage> {
    match stages.get(index + 1) {
        Some(&Stage::InspectionStage1) => Some(Stage::InspectionStage1),
        other => other.copied(),
    }
}

/// Undo `stage` under the given policy.
///
/// Only stages that have been reached (in progress or completed) can be
/// undone.
pub fn undo(
    track: &StageTrack,
    profile: &TankProfile,
    stage: Stage,
    policy: UndoPolicy,
) -> TransitionResult {
    undo_with_stages(track, &applicable_stages(profile), stage, policy)
}

/// `undo` against an explicit applicable-stage list.
pub fn undo_with_stages(
    track: &StageTrack,
    stages: &[Stage],
    stage: Stage,
    policy: UndoPolicy,
) -> TransitionResult {
    let index = match stages.iter().position(|&s| s == stage) {
        Some(index) => index,
        None => {
            return TransitionResult::unchanged(format!("{} does not apply to this tank", stage))
        }
    };

    match track.status_of(stage) {
        None => return TransitionResult::unchanged(format!("{} has no progress entry", stage)),
        Some(StageStatus::NotStarted) => {
            return TransitionResult::unchanged(format!("{} has not been started", stage))
        }
        Some(_) => {}
    }

    let reopened = match policy {
        UndoPolicy::Reopen => stage,
        UndoPolicy::StepBack => previous_applicable(stages, stage).unwrap_or(stage),
    };

    let mut next_track = track.clone();
    let reopened_index = if reopened == stage {
        index
    } else {
        index - 1
    };
    for &later in &stages[reopened_index + 1..] {
        next_track.update_status(later, StageStatus::NotStarted);
    }
    next_track.update_status(reopened, StageStatus::InProgress);
    next_track.current_stage = Some(reopened);

    TransitionResult::Applied { next: next_track }
}

/// Check the completed-prefix invariant of a track against its stage list:
/// completed stages, then at most one in-progress stage, then not-started
/// stages. Stages without an entry are treated as not started.
pub fn holds_completed_prefix(track: &StageTrack, stages: &[Stage]) -> bool {
    let mut seen_open = false;
    for &stage in stages {
        match track.status_of(stage).unwrap_or(StageStatus::NotStarted) {
            StageStatus::Completed | StageStatus::InProgress if seen_open => return false,
            StageStatus::Completed => {}
            StageStatus::InProgress | StageStatus::NotStarted => seen_open = true,
        }
    }
    true
}
