//! Undo command - Reopen a stage and reset what follows it

use std::path::Path;

use crate::cli::workspace::{parse_level, parse_stage, target, target_index, Workspace};
use crate::domain::{undo_tank, TransitionResult};
use crate::errors::{Result, TanktrackError};

/// Undo `stage` under the configured policy and persist it.
///
/// Undo discards progress on every later stage, so it requires `yes`.
pub async fn run(
    cwd: Option<&Path>,
    level: &str,
    id: &str,
    stage: &str,
    sub: Option<usize>,
    yes: bool,
) -> Result<()> {
    let level = parse_level(level)?;
    let stage = parse_stage(stage)?;
    let mut ws = Workspace::open(cwd)?;
    let tank = ws.tank(level, id)?;
    let index = target_index(tank, sub)?;
    let target_id = target(tank, index).0.to_string();

    if !yes {
        return Err(TanktrackError::ConfirmationRequired(format!(
            "undoing {} on {} resets every later stage; re-run with --yes",
            stage, target_id
        )));
    }

    let policy = ws.config.undo_policy;
    match undo_tank(level, tank, index, stage, policy, &ws.table) {
        TransitionResult::Applied { next } => {
            let reopened = target(&next, index).1.current_stage;
            ws.save_tank(level, next)?;

            tracing::info!(tank = %target_id, %stage, ?policy, ?reopened, "undone");
            match reopened {
                Some(current) => println!("{}: {} in progress", target_id, current),
                None => println!("{}: {} undone", target_id, stage),
            }
            Ok(())
        }
        TransitionResult::Unchanged { reason } => Err(TanktrackError::StateTransition(reason)),
    }
}
