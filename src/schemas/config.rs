//! Config schema - Configuration for tanktrack

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CategoryOverride;

/// Which semantics `undo` applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UndoPolicy {
    /// Reopen the target stage; everything after it goes back to not started
    #[default]
    Reopen,
    /// Reset the target stage to not started and reopen the stage before it
    StepBack,
}

/// A family of tanks recognised by id: every marker must occur in the id
/// (or the parent id, for sub-tanks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRule {
    pub name: String,
    pub all_of: Vec<String>,
}

impl FamilyRule {
    fn new(name: &str, all_of: &[&str]) -> Self {
        FamilyRule {
            name: name.to_string(),
            all_of: all_of.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Rules used to classify tanks into categories at load time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Id marker of the D-wall anchored family
    #[serde(default = "default_dwall_marker")]
    pub dwall_marker: String,

    /// Id suffix identifying the primary sub-tank of the D-wall family
    #[serde(default = "default_primary_sub_tank_suffix")]
    pub primary_sub_tank_suffix: String,

    /// Families that skip pump anchors and slope
    #[serde(default = "default_limited_families")]
    pub limited_families: Vec<FamilyRule>,

    /// Type markers that together identify rain water valve chambers
    #[serde(default = "default_rain_water_marker")]
    pub rain_water_marker: String,

    #[serde(default = "default_valve_marker")]
    pub valve_marker: String,

    /// Ids of every known pump pit
    #[serde(default = "default_pump_pit_ids")]
    pub pump_pit_ids: Vec<String>,

    /// Type marker that makes a tank a pump pit regardless of id
    #[serde(default = "default_chiller_room_marker")]
    pub chiller_room_marker: String,

    /// Explicit classification per tank or sub-tank id
    #[serde(default)]
    pub overrides: BTreeMap<String, CategoryOverride>,
}

fn default_dwall_marker() -> String {
    "EB16".to_string()
}

fn default_primary_sub_tank_suffix() -> String {
    "-TANK-01".to_string()
}

fn default_limited_families() -> Vec<FamilyRule> {
    vec![
        FamilyRule::new("exterior_fire_water", &["EB1", "Exterior"]),
        FamilyRule::new("interior_sanitary_water", &["EB1", "Interior"]),
        FamilyRule::new("deposit", &["DEP"]),
    ]
}

fn default_rain_water_marker() -> String {
    "rain water".to_string()
}

fn default_valve_marker() -> String {
    "valve".to_string()
}

fn default_pump_pit_ids() -> Vec<String> {
    [
        "N00-PP-01",
        "N00-PP-02",
        "N00-PP-03",
        "N00-PP-04",
        "N10-PP-01",
        "N10-PP-02",
        "N20-PP-01",
        "N30-PP-01",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_chiller_room_marker() -> String {
    "chiller room".to_string()
}

impl Default for ClassificationRules {
    fn default() -> Self {
        ClassificationRules {
            dwall_marker: default_dwall_marker(),
            primary_sub_tank_suffix: default_primary_sub_tank_suffix(),
            limited_families: default_limited_families(),
            rain_water_marker: default_rain_water_marker(),
            valve_marker: default_valve_marker(),
            pump_pit_ids: default_pump_pit_ids(),
            chiller_room_marker: default_chiller_room_marker(),
            overrides: BTreeMap::new(),
        }
    }
}

/// Main configuration for tanktrack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub classification: ClassificationRules,

    #[serde(default)]
    pub undo_policy: UndoPolicy,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            classification: ClassificationRules::default(),
            undo_policy: UndoPolicy::Reopen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::TankCategory;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.undo_policy, UndoPolicy::Reopen);
        assert_eq!(config.classification.dwall_marker, "EB16");
        assert_eq!(config.classification.limited_families.len(), 3);
        assert!(config.classification.pump_pit_ids.contains(&"N00-PP-01".to_string()));
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{"undo_policy": "step_back"}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.undo_policy, UndoPolicy::StepBack);
        assert_eq!(parsed.classification, ClassificationRules::default());
    }

    #[test]
    fn test_classification_partial_json() {
        let json = r#"{
            "classification": {
                "pump_pit_ids": ["PIT-A"],
                "overrides": {"ODD-1": {"category": "limited_no_anchors", "pump_pit": true}}
            }
        }"#;
        let parsed: Config = serde_json::from_str(json).unwrap();
        let rules = &parsed.classification;

        assert_eq!(rules.pump_pit_ids, vec!["PIT-A".to_string()]);
        assert_eq!(rules.dwall_marker, "EB16");
        assert_eq!(rules.overrides["ODD-1"].category, TankCategory::LimitedNoAnchors);
        assert_eq!(rules.overrides["ODD-1"].pump_pit, Some(true));
    }

    #[test]
    fn test_undo_policy_serialization() {
        assert_eq!(serde_json::to_string(&UndoPolicy::Reopen).unwrap(), "\"reopen\"");
        assert_eq!(serde_json::to_string(&UndoPolicy::StepBack).unwrap(), "\"step_back\"");
    }
}
