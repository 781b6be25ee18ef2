//! Completion predicates and the inspection report
//!
//! Grouped tanks are judged by their sub-tanks only; the parent's own
//! progress array is ignored once a tank is grouped.

use serde::Serialize;

use crate::schemas::{Level, Site, Stage, StageStatus, StageTrack, SubTank, Tank};

use super::catalog::{applicable_stages, is_inspection_stage, INSPECTION_STAGES};
use super::category::CategoryTable;

/// Display color of a tank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStatus {
    Complete,
    InInspection,
    InProgress,
}

impl std::fmt::Display for ColorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorStatus::Complete => write!(f, "complete"),
            ColorStatus::InInspection => write!(f, "in inspection"),
            ColorStatus::InProgress => write!(f, "in progress"),
        }
    }
}

/// Every listed stage has a completed entry
pub fn is_track_completed(track: &StageTrack, stages: &[Stage]) -> bool {
    stages
        .iter()
        .all(|&stage| track.status_of(stage) == Some(StageStatus::Completed))
}

/// Whether every applicable stage is completed. For a grouped tank this
/// must hold for every sub-tank.
pub fn is_fully_completed(level: Level, tank: &Tank, table: &CategoryTable) -> bool {
    if tank.is_grouped() {
        return tank
            .sub_tanks
            .iter()
            .all(|sub| is_sub_tank_completed(level, tank, sub, table));
    }
    let profile = table.tank_profile(level, tank);
    is_track_completed(&tank.track, &applicable_stages(&profile))
}

fn is_sub_tank_completed(level: Level, tank: &Tank, sub: &SubTank, table: &CategoryTable) -> bool {
    let profile = table.sub_tank_profile(level, tank, sub);
    is_track_completed(&sub.track, &applicable_stages(&profile))
}

fn track_in_inspection(track: &StageTrack) -> bool {
    track.current_stage.is_some_and(is_inspection_stage)
}

/// Whether the tank, or any of its sub-tanks, sits at an inspection stage
pub fn is_in_inspection(tank: &Tank) -> bool {
    if tank.is_grouped() {
        return tank.sub_tanks.iter().any(|sub| {
            track_in_inspection(&sub.track)
                || INSPECTION_STAGES
                    .iter()
                    .any(|&stage| sub.track.status_of(stage) == Some(StageStatus::InProgress))
        });
    }
    track_in_inspection(&tank.track)
}

pub fn color_status(level: Level, tank: &Tank, table: &CategoryTable) -> ColorStatus {
    if is_fully_completed(level, tank, table) {
        ColorStatus::Complete
    } else if is_in_inspection(tank) {
        ColorStatus::InInspection
    } else {
        ColorStatus::InProgress
    }
}

/// In inspection and not yet fully completed
pub fn ready_for_inspection(level: Level, tank: &Tank, table: &CategoryTable) -> bool {
    is_in_inspection(tank) && !is_fully_completed(level, tank, table)
}

fn ladder_completed(track: &StageTrack) -> bool {
    track.status_of(Stage::LadderInstallation) == Some(StageStatus::Completed)
}

/// Secondary marker: the ladder is installed (on every sub-tank, if grouped).
/// A track without a ladder entry does not count.
pub fn has_completed_ladder_installation(tank: &Tank) -> bool {
    if tank.is_grouped() {
        return tank.sub_tanks.iter().all(|sub| ladder_completed(&sub.track));
    }
    ladder_completed(&tank.track)
}

/// One tank awaiting inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub level: Level,
    pub tank_id: String,
    pub tank_name: String,
    /// Entities at an inspection stage: the tank itself, or the sub-tanks
    pub waiting: Vec<WaitingEntity>,
}

/// A tank or sub-tank and the inspection stage it is waiting on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitingEntity {
    pub id: String,
    pub stage: Stage,
}

/// Tanks across every level that are ready for inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionReport {
    /// ISO 8601 timestamp when the report was generated
    pub generated_at: String,
    pub ready: Vec<ReportEntry>,
    /// Tanks that are neither ready nor complete
    pub pending_count: usize,
    pub complete_count: usize,
}

fn waiting_stage(track: &StageTrack) -> Option<Stage> {
    track
        .current_stage
        .filter(|&stage| is_inspection_stage(stage))
        .or_else(|| {
            INSPECTION_STAGES
                .iter()
                .copied()
                .find(|&stage| track.status_of(stage) == Some(StageStatus::InProgress))
        })
}

/// Entities still waiting on an inspection; finished sub-tanks keep their
/// last inspection as current stage and are left out.
fn waiting_entities(level: Level, tank: &Tank, table: &CategoryTable) -> Vec<WaitingEntity> {
    if tank.is_grouped() {
        return tank
            .sub_tanks
            .iter()
            .filter(|sub| !is_sub_tank_completed(level, tank, sub, table))
            .filter_map(|sub| {
                waiting_stage(&sub.track).map(|stage| WaitingEntity {
                    id: sub.id.clone(),
                    stage,
                })
            })
            .collect();
    }
    tank.track
        .current_stage
        .filter(|&stage| is_inspection_stage(stage))
        .map(|stage| WaitingEntity {
            id: tank.id.clone(),
            stage,
        })
        .into_iter()
        .collect()
}

/// Partition every tank on the site into ready-for-inspection, complete
/// and pending.
pub fn inspection_report(site: &Site, table: &CategoryTable) -> InspectionReport {
    let mut ready = Vec::new();
    let mut pending_count = 0;
    let mut complete_count = 0;

    for (level, tank) in site.tanks() {
        if is_fully_completed(level, tank, table) {
            complete_count += 1;
        } else if is_in_inspection(tank) {
            ready.push(ReportEntry {
                level,
                tank_id: tank.id.clone(),
                tank_name: tank.name.clone(),
                waiting: waiting_entities(level, tank, table),
            });
        } else {
            pending_count += 1;
        }
    }

    InspectionReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        ready,
        pending_count,
        complete_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{Classifier, TankDescriptor};
    use crate::domain::tracker::advance;
    use crate::schemas::ClassificationRules;

    const N00: Level = Level::N00;

    fn table() -> CategoryTable {
        CategoryTable::new(Classifier::new(ClassificationRules::default()))
    }

    /// Track of `stages` with every stage before `current` completed
    fn track_at(stages: &[Stage], current: Option<Stage>) -> StageTrack {
        let mut track = StageTrack::seeded(stages);
        let profile_stages = stages.to_vec();
        let mut pos = 0;
        while pos < profile_stages.len() && Some(profile_stages[pos]) != current {
            track.update_status(profile_stages[pos], StageStatus::Completed);
            pos += 1;
        }
        if let Some(stage) = current {
            track.update_status(stage, StageStatus::InProgress);
            track.current_stage = Some(stage);
        } else {
            track.current_stage = profile_stages.last().copied();
        }
        track
    }

    fn stages_of(table: &CategoryTable, id: &str, parent: Option<&str>) -> Vec<Stage> {
        let desc = TankDescriptor {
            id,
            parent_id: parent,
            kind: "",
        };
        applicable_stages(&table.profile(Level::N00, &desc))
    }

    fn grouped_tank(table: &CategoryTable, currents: &[Option<Stage>]) -> Tank {
        let parent = "EB16-STE-089";
        let subs = currents
            .iter()
            .enumerate()
            .map(|(i, current)| {
                let id = format!("{}-TANK-{:02}", parent, i + 1);
                let stages = stages_of(table, &id, Some(parent));
                SubTank::new(id.clone(), format!("Tank {}", i + 1), track_at(&stages, *current))
            })
            .collect();
        Tank::new(parent, "Retention tank", "Retention", "N10", StageTrack::default())
            .with_sub_tanks(subs)
    }

    fn plain_tank(table: &CategoryTable, id: &str, current: Option<Stage>) -> Tank {
        let stages = stages_of(table, id, None);
        Tank::new(id, id, "Fire water", "N00", track_at(&stages, current))
    }

    #[test]
    fn test_fresh_tank_is_in_progress() {
        let t = table();
        let tank = plain_tank(&t, "N00-T-001", Some(Stage::FormworkRemoval));
        assert!(!is_fully_completed(N00, &tank, &t));
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::InProgress);
        assert!(!ready_for_inspection(N00, &tank, &t));
    }

    #[test]
    fn test_tank_at_inspection() {
        let t = table();
        let tank = plain_tank(&t, "N00-T-001", Some(Stage::InspectionStage2));
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::InInspection);
        assert!(ready_for_inspection(N00, &tank, &t));
    }

    #[test]
    fn test_completed_tank() {
        let t = table();
        let tank = plain_tank(&t, "N00-T-001", None);
        assert!(is_fully_completed(N00, &tank, &t));
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::Complete);
        // Completed at the last inspection stage: not ready any more
        assert!(is_in_inspection(&tank));
        assert!(!ready_for_inspection(N00, &tank, &t));
    }

    #[test]
    fn test_grouped_two_complete_one_in_progress() {
        let t = table();
        let tank = grouped_tank(&t, &[None, None, Some(Stage::GroutOpeningsInWall)]);
        assert!(!is_fully_completed(N00, &tank, &t));
        assert_ne!(color_status(N00, &tank, &t), ColorStatus::Complete);
    }

    #[test]
    fn test_grouped_all_complete_ignores_parent_progress() {
        let t = table();
        let mut tank = grouped_tank(&t, &[None, None]);
        tank.track = StageTrack::seeded(&[Stage::FormworkRemoval]);
        assert!(is_fully_completed(N00, &tank, &t));
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::Complete);
    }

    #[test]
    fn test_grouped_any_sub_tank_in_inspection() {
        let t = table();
        let tank = grouped_tank(
            &t,
            &[Some(Stage::RepairAndCleaning), Some(Stage::InspectionStage1), None],
        );
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::InInspection);
        assert!(ready_for_inspection(N00, &tank, &t));
    }

    #[test]
    fn test_grouped_inspection_detected_from_progress_entry() {
        let t = table();
        let mut tank = grouped_tank(&t, &[Some(Stage::InspectionStage2)]);
        // Stale pointer, but the progress entry is still open
        tank.sub_tanks[0].track.current_stage = Some(Stage::GroutOpeningsInWall);
        assert!(is_in_inspection(&tank));
    }

    #[test]
    fn test_grouped_without_sub_tanks_falls_back_to_own_track() {
        let t = table();
        let mut tank = plain_tank(&t, "N00-T-002", Some(Stage::InspectionStage1));
        tank.is_grouped = true;
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::InInspection);
    }

    #[test]
    fn test_ladder_marker() {
        let t = table();
        let pit = "N00-PP-01";
        let stages = stages_of(&t, pit, None);
        let track = track_at(&stages, Some(Stage::LadderInstallation));
        let mut tank = Tank::new(pit, "Pump pit", "Pump pit", "N00", track);
        assert!(!has_completed_ladder_installation(&tank));

        let profile = t.tank_profile(N00, &tank);
        tank.track = advance(&tank.track, &profile, Stage::LadderInstallation).next().unwrap();
        assert!(has_completed_ladder_installation(&tank));
        assert_eq!(color_status(N00, &tank, &t), ColorStatus::Complete);
    }

    #[test]
    fn test_ladder_marker_absent_entry() {
        let t = table();
        let tank = plain_tank(&t, "N00-T-001", None);
        assert!(!has_completed_ladder_installation(&tank));
    }

    #[test]
    fn test_ladder_marker_grouped_requires_all() {
        let t = table();
        let mut tank = grouped_tank(&t, &[None, None]);
        tank.sub_tanks[0]
            .track
            .set_status(Stage::LadderInstallation, StageStatus::Completed);
        assert!(!has_completed_ladder_installation(&tank));

        tank.sub_tanks[1]
            .track
            .set_status(Stage::LadderInstallation, StageStatus::Completed);
        assert!(has_completed_ladder_installation(&tank));
    }

    #[test]
    fn test_inspection_report_partitions_site() {
        let t = table();
        let mut site = Site::default();
        site.insert(Level::N00, plain_tank(&t, "N00-T-001", Some(Stage::InspectionStage1)));
        site.insert(Level::N00, plain_tank(&t, "N00-T-002", Some(Stage::Slope)));
        site.insert(Level::N20, plain_tank(&t, "N20-T-001", None));
        site.insert(
            Level::N10,
            grouped_tank(&t, &[Some(Stage::InspectionStage3), Some(Stage::FormworkRemoval)]),
        );

        let report = inspection_report(&site, &t);
        assert_eq!(report.complete_count, 1);
        assert_eq!(report.pending_count, 1);
        assert_eq!(report.ready.len(), 2);

        assert_eq!(report.ready[0].level, Level::N00);
        assert_eq!(report.ready[0].tank_id, "N00-T-001");
        assert_eq!(
            report.ready[0].waiting,
            vec![WaitingEntity {
                id: "N00-T-001".to_string(),
                stage: Stage::InspectionStage1
            }]
        );

        let grouped = &report.ready[1];
        assert_eq!(grouped.level, Level::N10);
        assert_eq!(grouped.waiting.len(), 1);
        assert_eq!(grouped.waiting[0].id, "EB16-STE-089-TANK-01");
        assert_eq!(grouped.waiting[0].stage, Stage::InspectionStage3);
    }

    #[test]
    fn test_report_skips_finished_sub_tanks() {
        let t = table();
        let mut site = Site::default();
        site.insert(
            Level::N10,
            grouped_tank(
                &t,
                &[None, Some(Stage::FormworkRemoval), Some(Stage::InspectionStage1)],
            ),
        );

        let report = inspection_report(&site, &t);
        assert_eq!(report.ready.len(), 1);
        assert_eq!(
            report.ready[0].waiting,
            vec![WaitingEntity {
                id: "EB16-STE-089-TANK-03".to_string(),
                stage: Stage::InspectionStage1
            }]
        );
    }

    #[test]
    fn test_report_finished_and_fresh_sub_tank_waits_on_nothing() {
        let t = table();
        let mut site = Site::default();
        let tank = grouped_tank(&t, &[None, Some(Stage::FormworkRemoval)]);
        assert_eq!(tank.sub_tanks[0].track.current_stage, Some(Stage::InspectionStage3));
        site.insert(Level::N10, tank);

        let report = inspection_report(&site, &t);
        assert_eq!(report.ready.len(), 1);
        assert!(report.ready[0].waiting.is_empty());
    }
}
