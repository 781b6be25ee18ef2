//! Stage catalog
//!
//! Every stage list an entity can have is a subsequence of
//! `STAGE_CATALOG`, in the same relative order.

use crate::schemas::{Stage, TankCategory, TankProfile};

/// The canonical ordering of construction stages.
///
/// IMPORTANT: This is the source of truth for stage ordering. Progress
/// arrays are kept sorted by position in this list.
pub const STAGE_CATALOG: &[Stage] = &[
    Stage::FormworkRemoval,
    Stage::RepairAndCleaning,
    Stage::DwallAnchorageRemoval,
    Stage::DwallAnchorageWaterproofing,
    Stage::GroutOpeningsInWall,
    Stage::PumpAnchors,
    Stage::Slope,
    Stage::InspectionStage1,
    Stage::Waterproofing,
    Stage::WaterproofingOfWalls,
    Stage::InspectionStage2,
    Stage::WaterproofingOfFloor,
    Stage::InspectionStage3,
    Stage::LadderInstallation,
];

/// Stages that mark a tank as "in inspection"
pub const INSPECTION_STAGES: &[Stage] = &[
    Stage::InspectionStage1,
    Stage::InspectionStage2,
    Stage::InspectionStage3,
];

const STANDARD_STAGES: &[Stage] = &[
    Stage::FormworkRemoval,
    Stage::RepairAndCleaning,
    Stage::PumpAnchors,
    Stage::Slope,
    Stage::InspectionStage1,
    Stage::Waterproofing,
    Stage::InspectionStage2,
    Stage::InspectionStage3,
];

const LIMITED_STAGES: &[Stage] = &[
    Stage::FormworkRemoval,
    Stage::RepairAndCleaning,
    Stage::InspectionStage1,
    Stage::Waterproofing,
    Stage::InspectionStage2,
    Stage::InspectionStage3,
];

const DWALL_PRIMARY_STAGES: &[Stage] = &[
    Stage::FormworkRemoval,
    Stage::RepairAndCleaning,
    Stage::DwallAnchorageRemoval,
    Stage::DwallAnchorageWaterproofing,
    Stage::GroutOpeningsInWall,
    Stage::InspectionStage1,
    Stage::WaterproofingOfWalls,
    Stage::InspectionStage2,
    Stage::WaterproofingOfFloor,
    Stage::InspectionStage3,
];

const DWALL_STAGES: &[Stage] = &[
    Stage::FormworkRemoval,
    Stage::RepairAndCleaning,
    Stage::DwallAnchorageRemoval,
    Stage::DwallAnchorageWaterproofing,
    Stage::GroutOpeningsInWall,
    Stage::InspectionStage1,
    Stage::Waterproofing,
    Stage::InspectionStage2,
    Stage::InspectionStage3,
];

/// 0-based position of a stage in the catalog
pub fn get_stage_index(stage: Stage) -> Option<usize> {
    STAGE_CATALOG.iter().position(|&s| s == stage)
}

/// Base stage list of a category, before the pump-pit extension
pub fn category_stages(category: TankCategory) -> &'static [Stage] {
    match category {
        TankCategory::DwallAnchoredPrimary => DWALL_PRIMARY_STAGES,
        TankCategory::DwallAnchored => DWALL_STAGES,
        TankCategory::LimitedNoAnchors => LIMITED_STAGES,
        TankCategory::Standard => STANDARD_STAGES,
    }
}

/// Ordered list of stages that apply to an entity with this profile.
///
/// Pump pits get `LadderInstallation` appended to their category's list.
pub fn applicable_stages(profile: &TankProfile) -> Vec<Stage> {
    let mut stages = category_stages(profile.category).to_vec();
    if profile.pump_pit {
        stages.push(Stage::LadderInstallation);
    }
    stages
}

pub fn is_inspection_stage(stage: Stage) -> bool {
    INSPECTION_STAGES.contains(&stage)
}

/// Returns the stage following `stage` in `stages`, or None when `stage`
/// is last or not part of the list.
pub fn next_applicable(stages: &[Stage], stage: Stage) -> Option<Stage> {
    let index = stages.iter().position(|&s| s == stage)?;
    stages.get(index + 1).copied()
}

/// Returns the stage preceding `stage` in `stages`.
pub fn previous_applicable(stages: &[Stage], stage: Stage) -> Option<Stage> {
    let index = stages.iter().position(|&s| s == stage)?;
    index.checked_sub(1).map(|i| stages[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_catalog_subsequence(stages: &[Stage]) -> bool {
        stages
            .windows(2)
            .all(|pair| match (get_stage_index(pair[0]), get_stage_index(pair[1])) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            })
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(STAGE_CATALOG.len(), 14);
        assert_eq!(STAGE_CATALOG[0], Stage::FormworkRemoval);
        assert_eq!(STAGE_CATALOG[13], Stage::LadderInstallation);
        for (i, &stage) in STAGE_CATALOG.iter().enumerate() {
            assert_eq!(get_stage_index(stage), Some(i));
        }
    }

    #[test]
    fn test_stage_index_is_some_for_every_parsed_stage() {
        for stage in STAGE_CATALOG {
            let parsed = stage.label().parse::<Stage>().unwrap();
            assert!(get_stage_index(parsed).is_some(), "{:?}", parsed);
        }
        let last = STAGE_CATALOG.len() - 1;
        assert_eq!(get_stage_index(Stage::LadderInstallation), Some(last));
        assert_eq!(get_stage_index(Stage::FormworkRemoval), Some(0));
    }

    #[test]
    fn test_every_category_list_is_a_catalog_subsequence() {
        for category in [
            TankCategory::DwallAnchoredPrimary,
            TankCategory::DwallAnchored,
            TankCategory::LimitedNoAnchors,
            TankCategory::Standard,
        ] {
            for pump_pit in [false, true] {
                let stages = applicable_stages(&TankProfile::new(category, pump_pit));
                assert!(is_catalog_subsequence(&stages), "{:?} pump_pit={}", category, pump_pit);
                assert_eq!(stages[0], Stage::FormworkRemoval);
            }
        }
    }

    #[test]
    fn test_standard_stages() {
        let stages = applicable_stages(&TankProfile::new(TankCategory::Standard, false));
        assert_eq!(stages.len(), 8);
        assert!(stages.contains(&Stage::PumpAnchors));
        assert!(stages.contains(&Stage::Slope));
        assert_eq!(stages.last(), Some(&Stage::InspectionStage3));
    }

    #[test]
    fn test_pump_pit_appends_ladder() {
        let plain = applicable_stages(&TankProfile::new(TankCategory::Standard, false));
        let pit = applicable_stages(&TankProfile::new(TankCategory::Standard, true));
        assert_eq!(pit.len(), plain.len() + 1);
        assert_eq!(pit.last(), Some(&Stage::LadderInstallation));
    }

    #[test]
    fn test_dwall_asymmetry() {
        let primary =
            applicable_stages(&TankProfile::new(TankCategory::DwallAnchoredPrimary, false));
        let other = applicable_stages(&TankProfile::new(TankCategory::DwallAnchored, false));

        assert!(primary.contains(&Stage::WaterproofingOfWalls));
        assert!(primary.contains(&Stage::WaterproofingOfFloor));
        assert!(!primary.contains(&Stage::Waterproofing));

        assert!(other.contains(&Stage::Waterproofing));
        assert!(!other.contains(&Stage::WaterproofingOfWalls));
        assert!(!other.contains(&Stage::WaterproofingOfFloor));

        for stages in [&primary, &other] {
            assert!(stages.contains(&Stage::GroutOpeningsInWall));
            assert!(!stages.contains(&Stage::PumpAnchors));
            assert!(!stages.contains(&Stage::Slope));
        }
    }

    #[test]
    fn test_limited_stages() {
        let stages = applicable_stages(&TankProfile::new(TankCategory::LimitedNoAnchors, false));
        assert_eq!(
            stages,
            vec![
                Stage::FormworkRemoval,
                Stage::RepairAndCleaning,
                Stage::InspectionStage1,
                Stage::Waterproofing,
                Stage::InspectionStage2,
                Stage::InspectionStage3,
            ]
        );
    }

    #[test]
    fn test_next_and_previous_applicable() {
        let stages = category_stages(TankCategory::Standard);
        assert_eq!(next_applicable(stages, Stage::FormworkRemoval), Some(Stage::RepairAndCleaning));
        assert_eq!(next_applicable(stages, Stage::InspectionStage3), None);
        assert_eq!(next_applicable(stages, Stage::GroutOpeningsInWall), None);
        assert_eq!(
            previous_applicable(stages, Stage::RepairAndCleaning),
            Some(Stage::FormworkRemoval)
        );
        assert_eq!(previous_applicable(stages, Stage::FormworkRemoval), None);
    }

    #[test]
    fn test_is_inspection_stage() {
        assert!(is_inspection_stage(Stage::InspectionStage1));
        assert!(is_inspection_stage(Stage::InspectionStage3));
        assert!(!is_inspection_stage(Stage::Waterproofing));
        assert!(!is_inspection_stage(Stage::LadderInstallation));
    }
}
