//! Group coordination
//!
//! Routes advance/undo to a tank's own track or to one of its sub-tanks,
//! and projects the active sub-tank's stage onto the parent for display.
//! The parent's stored `currentStage` is never rewritten here.

use crate::schemas::{Level, Stage, Tank, UndoPolicy};

use super::aggregation::is_track_completed;
use super::catalog::applicable_stages;
use super::category::CategoryTable;
use super::tracker::{self, TransitionResult};

/// Default sub-tank to show: the first one that still has work left,
/// or the first one when all are complete.
pub fn default_active_index(level: Level, tank: &Tank, table: &CategoryTable) -> usize {
    tank.sub_tanks
        .iter()
        .position(|sub| {
            let profile = table.sub_tank_profile(level, tank, sub);
            !is_track_completed(&sub.track, &applicable_stages(&profile))
        })
        .unwrap_or(0)
}

/// Stage to display for a tank. For grouped tanks this is the active
/// sub-tank's current stage; an out-of-range index falls back to the
/// first sub-tank.
pub fn display_stage(tank: &Tank, active: Option<usize>) -> Option<Stage> {
    if !tank.is_grouped() {
        return tank.track.current_stage;
    }
    let index = active.filter(|&i| i < tank.sub_tanks.len()).unwrap_or(0);
    tank.sub_tanks[index].track.current_stage
}

/// Applicable stages for the tank itself or the given sub-tank
pub fn stages_for(
    level: Level,
    tank: &Tank,
    sub: Option<usize>,
    table: &CategoryTable,
) -> Option<Vec<Stage>> {
    match sub {
        None => Some(applicable_stages(&table.tank_profile(level, tank))),
        Some(index) => tank
            .sub_tanks
            .get(index)
            .map(|sub_tank| applicable_stages(&table.sub_tank_profile(level, tank, sub_tank))),
    }
}

/// Check that `sub` addresses something that carries progress
fn check_target(tank: &Tank, sub: Option<usize>) -> Result<(), String> {
    match (tank.is_grouped(), sub) {
        (true, None) => Err(format!("{} is grouped; select a sub-tank", tank.id)),
        (false, Some(_)) => Err(format!("{} has no sub-tanks", tank.id)),
        (true, Some(index)) if index >= tank.sub_tanks.len() => Err(format!(
            "{} has no sub-tank #{} ({} sub-tanks)",
            tank.id,
            index + 1,
            tank.sub_tanks.len()
        )),
        _ => Ok(()),
    }
}

/// Advance `stage` on the tank, or on sub-tank `sub` of a grouped tank.
pub fn advance_tank(
    level: Level,
    tank: &Tank,
    sub: Option<usize>,
    stage: Stage,
    table: &CategoryTable,
) -> TransitionResult<Tank> {
    if let Err(reason) = check_target(tank, sub) {
        tracing::debug!(tank = %tank.id, %reason, "advance skipped");
        return TransitionResult::unchanged(reason);
    }

    let result = match sub {
        Some(index) => {
            let sub_tank = &tank.sub_tanks[index];
            let profile = table.sub_tank_profile(level, tank, sub_tank);
            tracker::advance(&sub_tank.track, &profile, stage).map(|track| {
                let mut next = tank.clone();
                next.sub_tanks[index].track = track;
                next
            })
        }
        None => {
            let profile = table.tank_profile(level, tank);
            tracker::advance(&tank.track, &profile, stage).map(|track| Tank {
                track,
                ..tank.clone()
            })
        }
    };

    if let Some(reason) = result.reason() {
        tracing::debug!(tank = %tank.id, ?sub, %stage, reason, "advance skipped");
    }
    result
}

/// Undo `stage` on the tank, or on sub-tank `sub` of a grouped tank.
pub fn undo_tank(
    level: Level,
    tank: &Tank,
    sub: Option<usize>,
    stage: Stage,
    policy: UndoPolicy,
    table: &CategoryTable,
) -> TransitionResult<Tank> {
    if let Err(reason) = check_target(tank, sub) {
        tracing::debug!(tank = %tank.id, %reason, "undo skipped");
        return TransitionResult::unchanged(reason);
    }

    let result = match sub {
        Some(index) => {
            let sub_tank = &tank.sub_tanks[index];
            let profile = table.sub_tank_profile(level, tank, sub_tank);
            tracker::undo(&sub_tank.track, &profile, stage, policy).map(|track| {
                let mut next = tank.clone();
                next.sub_tanks[index].track = track;
                next
            })
        }
        None => {
            let profile = table.tank_profile(level, tank);
            tracker::undo(&tank.track, &profile, stage, policy).map(|track| Tank {
                track,
                ..tank.clone()
            })
        }
    };

    if let Some(reason) = result.reason() {
        tracing::debug!(tank = %tank.id, ?sub, %stage, reason, "undo skipped");
    }
    result
}
