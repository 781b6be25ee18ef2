//! Tank schema - Tanks, sub-tanks and the per-level collections they live in

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::StageTrack;

/// Map position of a tank on its level plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// A sub-tank owned by a grouped tank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTank {
    pub id: String,

    pub name: String,

    #[serde(flatten)]
    pub track: StageTrack,
}

impl SubTank {
    pub fn new(id: impl Into<String>, name: impl Into<String>, track: StageTrack) -> Self {
        SubTank {
            id: id.into(),
            name: name.into(),
            track,
        }
    }
}

/// A physical water tank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tank {
    /// Unique identifier within its level
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Free-text tank type (e.g. "Rain water valve chamber")
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Own progress. Not meaningful once the tank is grouped.
    #[serde(flatten)]
    pub track: StageTrack,

    #[serde(default)]
    pub is_grouped: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_tanks: Vec<SubTank>,
}

impl Tank {
    /// Create an ungrouped tank with the given progress
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        location: impl Into<String>,
        track: StageTrack,
    ) -> Self {
        Tank {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            location: location.into(),
            coordinates: None,
            track,
            is_grouped: false,
            sub_tanks: Vec::new(),
        }
    }

    /// Return this tank grouped over the given sub-tanks
    pub fn with_sub_tanks(mut self, sub_tanks: Vec<SubTank>) -> Self {
        self.is_grouped = true;
        self.sub_tanks = sub_tanks;
        self
    }

    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Coordinates { x, y });
        self
    }

    /// Whether progress is carried by sub-tanks rather than the tank itself
    pub fn is_grouped(&self) -> bool {
        self.is_grouped && !self.sub_tanks.is_empty()
    }
}

/// Tanks of one level, keyed by tank id
pub type LevelTanks = BTreeMap<String, Tank>;
