//! Advance command - Complete a stage and open the next one

use std::path::Path;

use crate::cli::workspace::{parse_level, parse_stage, target, target_index, Workspace};
use crate::domain::{action_for, advance_tank, StageAction, TransitionResult};
use crate::errors::{Result, TanktrackError};

/// Advance `stage` on a tank, or on sub-tank `sub` (1-based), and persist it
pub async fn run(
    cwd: Option<&Path>,
    level: &str,
    id: &str,
    stage: &str,
    sub: Option<usize>,
) -> Result<()> {
    let level = parse_level(level)?;
    let stage = parse_stage(stage)?;
    let mut ws = Workspace::open(cwd)?;
    let tank = ws.tank(level, id)?;
    let index = target_index(tank, sub)?;
    let (target_id, track) = target(tank, index);

    if action_for(track, stage) == StageAction::Undo {
        return Err(TanktrackError::StateTransition(format!(
            "{} is already completed on {}; use `tanktrack undo` to reopen it",
            stage, target_id
        )));
    }
    let target_id = target_id.to_string();

    match advance_tank(level, tank, index, stage, &ws.table) {
        TransitionResult::Applied { next } => {
            let (_, track) = target(&next, index);
            let opened = track.current_stage;
            ws.save_tank(level, next)?;

            tracing::info!(tank = %target_id, %stage, ?opened, "advanced");
            match opened {
                Some(current) if current != stage => {
                    println!("{}: {} completed, {} in progress", target_id, stage, current)
                }
                _ => println!("{}: {} completed", target_id, stage),
            }
            Ok(())
        }
        TransitionResult::Unchanged { reason } => Err(TanktrackError::StateTransition(reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::seeded_root;
    use crate::fs::{load, JsonDirStore};
    use crate::schemas::{Level, Stage, StageStatus};

    #[tokio::test]
    async fn test_advance_persists() {
        let temp = seeded_root().await;
        run(Some(temp.path()), "N00", "N00-T-001", "FormworkRemoval", None).await.unwrap();

        let store = JsonDirStore::open(temp.path());
        let tank = load(&store, Level::N00, "N00-T-001").unwrap().unwrap();
        assert_eq!(tank.track.status_of(Stage::FormworkRemoval), Some(StageStatus::Completed));
        assert_eq!(tank.track.status_of(Stage::RepairAndCleaning), Some(StageStatus::InProgress));
        assert_eq!(tank.track.current_stage, Some(Stage::RepairAndCleaning));
    }

    #[tokio::test]
    async fn test_advance_sub_tank() {
        let temp = seeded_root().await;
        run(Some(temp.path()), "n10", "EB16-STE-089", "formwork removal", Some(2)).await.unwrap();

        let store = JsonDirStore::open(temp.path());
        let tank = load(&store, Level::N10, "EB16-STE-089").unwrap().unwrap();
        assert_eq!(tank.sub_tanks[1].track.current_stage, Some(Stage::RepairAndCleaning));
        assert_eq!(tank.sub_tanks[0].track.current_stage, Some(Stage::FormworkRemoval));
        assert_eq!(tank.track.current_stage, None);
    }

    #[tokio::test]
    async fn test_advance_completed_stage_is_refused() {
        let temp = seeded_root().await;
        run(Some(temp.path()), "N00", "N00-T-001", "FormworkRemoval", None).await.unwrap();

        let err = run(Some(temp.path()), "N00", "N00-T-001", "FormworkRemoval", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
        assert!(err.to_string().contains("tanktrack undo"));
    }

    #[tokio::test]
    async fn test_advance_inapplicable_stage() {
        let temp = seeded_root().await;
        // Deposit tanks skip pump anchors
        let err = run(Some(temp.path()), "N20", "DEP-N20-01", "PumpAnchors", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STATE_TRANSITION");
    }

    #[tokio::test]
    async fn test_advance_grouped_without_sub() {
        let temp = seeded_root().await;
        let err = run(Some(temp.path()), "N10", "EB16-STE-089", "FormworkRemoval", None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "SUB_TANK_NOT_FOUND");
    }
}
