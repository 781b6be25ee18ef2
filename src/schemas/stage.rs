//! Stage schema - Construction stages and their per-entity progress

use serde::{Deserialize, Serialize};

use crate::domain::STAGE_CATALOG;

/// A construction stage.
///
/// Declaration order is catalog order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    FormworkRemoval,
    RepairAndCleaning,
    DwallAnchorageRemoval,
    DwallAnchorageWaterproofing,
    GroutOpeningsInWall,
    PumpAnchors,
    Slope,
    InspectionStage1,
    Waterproofing,
    WaterproofingOfWalls,
    InspectionStage2,
    WaterproofingOfFloor,
    InspectionStage3,
    LadderInstallation,
}

impl Stage {
    /// Human-readable label used in CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Stage::FormworkRemoval => "Formwork removal",
            Stage::RepairAndCleaning => "Repair and cleaning",
            Stage::DwallAnchorageRemoval => "D-wall anchorage removal",
            Stage::DwallAnchorageWaterproofing => "D-wall anchorage waterproofing",
            Stage::GroutOpeningsInWall => "Grout openings in wall",
            Stage::PumpAnchors => "Pump anchors",
            Stage::Slope => "Slope",
            Stage::InspectionStage1 => "Inspection stage 1",
            Stage::Waterproofing => "Waterproofing",
            Stage::WaterproofingOfWalls => "Waterproofing of walls",
            Stage::InspectionStage2 => "Inspection stage 2",
            Stage::WaterproofingOfFloor => "Waterproofing of floor",
            Stage::InspectionStage3 => "Inspection stage 3",
            Stage::LadderInstallation => "Ladder installation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::str::FromStr for Stage {
    type Err = String;

    /// Accepts the variant name (`InspectionStage1`), the label
    /// (`Inspection stage 1`) or any separator/case variation of either
    /// (`inspection-stage-1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        STAGE_CATALOG
            .iter()
            .copied()
            .find(|stage| {
                normalize(&format!("{:?}", stage)) == wanted || normalize(stage.label()) == wanted
            })
            .ok_or_else(|| format!("Unknown stage: {}", s))
    }
}

/// Progress status of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageStatus::NotStarted => write!(f, "not started"),
            StageStatus::InProgress => write!(f, "in progress"),
            StageStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A (stage, status) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgress {
    pub stage: Stage,
    pub status: StageStatus,
}

impl StageProgress {
    pub fn new(stage: Stage, status: StageStatus) -> Self {
        StageProgress { stage, status }
    }
}

/// The progress-carrying part of a tank or sub-tank record.
///
/// Flattened into both `Tank` and `SubTank`, so the JSON keeps the
/// `currentStage` / `progress` keys at the record's top level.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTrack {
    /// Stage currently being worked on (unset before any progress exists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stage: Option<Stage>,

    /// One entry per stage, kept in catalog order
    #[serde(default)]
    pub progress: Vec<StageProgress>,
}

impl StageTrack {
    /// Seed progress for a fresh entity: the first stage in progress,
    /// everything after it not started.
    pub fn seeded(stages: &[Stage]) -> Self {
        let progress = stages
            .iter()
            .enumerate()
            .map(|(i, &stage)| {
                let status = if i == 0 {
                    StageStatus::InProgress
                } else {
                    StageStatus::NotStarted
                };
                StageProgress::new(stage, status)
            })
            .collect();

        StageTrack {
            current_stage: stages.first().copied(),
            progress,
        }
    }

    /// Status recorded for `stage`, if the progress array has an entry for it
    pub fn status_of(&self, stage: Stage) -> Option<StageStatus> {
        self.progress
            .iter()
            .find(|p| p.stage == stage)
            .map(|p| p.status)
    }

    pub fn has_entry(&self, stage: Stage) -> bool {
        self.progress.iter().any(|p| p.stage == stage)
    }

    /// Set the status of `stage`, inserting an entry if none exists and
    /// keeping the array in catalog order.
    pub fn set_status(&mut self, stage: Stage, status: StageStatus) {
        match self.progress.iter_mut().find(|p| p.stage == stage) {
            Some(entry) => entry.status = status,
            None => {
                self.progress.push(StageProgress::new(stage, status));
                self.progress.sort_by_key(|p| p.stage);
            }
        }
    }

    /// Set the status of `stage` only if an entry already exists
    pub fn update_status(&mut self, stage: Stage, status: StageStatus) {
        if let Some(entry) = self.progress.iter_mut().find(|p| p.stage == stage) {
            entry.status = status;
        }
    }
}
