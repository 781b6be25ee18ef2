//! Domain logic for stage applicability, progression and completion

mod aggregation;
mod catalog;
mod category;
mod group;
mod tracker;


pub use aggregation::{
    color_status, has_completed_ladder_installation, inspection_report, is_fully_completed,
    is_in_inspection, is_track_completed, ready_for_inspection, ColorStatus, InspectionReport,
    ReportEntry, WaitingEntity,
};
pub use catalog::{
    applicable_stages, category_stages, get_stage_index, is_inspection_stage, next_applicable,
    previous_applicable, INSPECTION_STAGES, STAGE_CATALOG,
};
pub use category::{resolve, CategoryTable, Classifier, TankDescriptor};
pub use group::{advance_tank, default_active_index, display_stage, stages_for, undo_tank};
pub use tracker::{
    action_for, advance, advance_with_stages, holds_completed_prefix, undo, undo_with_stages,
    StageAction, TransitionResult,
};
