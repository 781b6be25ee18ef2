//! Schema types for tanktrack
//!
//! All types serialize to the JSON record shape the storage layer keeps.

mod category;
mod config;
mod level;
mod stage;
mod tank;

pub use category::{CategoryOverride, TankCategory, TankProfile};
pub use config::{ClassificationRules, Config, FamilyRule, UndoPolicy};
pub use level::{Level, Site, LEVELS};
pub use stage::{Stage, StageProgress, StageStatus, StageTrack};
pub use tank::{Coordinates, LevelTanks, SubTank, Tank};
