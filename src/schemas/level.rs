//! Level schema - The closed set of building levels and the site they form

use serde::{Deserialize, Serialize};

use super::{LevelTanks, Tank};

/// A building level. Serialized as its storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "n00Tanks")]
    N00,
    #[serde(rename = "n10Tanks")]
    N10,
    #[serde(rename = "n20Tanks")]
    N20,
    #[serde(rename = "n30Tanks")]
    N30,
}

/// All levels, bottom to top
pub const LEVELS: &[Level] = &[Level::N00, Level::N10, Level::N20, Level::N30];

impl Level {
    /// Storage key of the level's tank collection
    pub fn key(&self) -> &'static str {
        match self {
            Level::N00 => "n00Tanks",
            Level::N10 => "n10Tanks",
            Level::N20 => "n20Tanks",
            Level::N30 => "n30Tanks",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Level::N00 => "N00",
            Level::N10 => "N10",
            Level::N20 => "N20",
            Level::N30 => "N30",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    /// Accepts `N00`, `n00` or the storage key `n00Tanks`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let short = lower.strip_suffix("tanks").unwrap_or(&lower);
        match short {
            "n00" => Ok(Level::N00),
            "n10" => Ok(Level::N10),
            "n20" => Ok(Level::N20),
            "n30" => Ok(Level::N30),
            _ => Err(format!("Unknown level: {}", s)),
        }
    }
}

/// Every level's tanks.
///
/// Unknown level keys are rejected at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Site {
    #[serde(rename = "n00Tanks", default)]
    pub n00_tanks: LevelTanks,

    #[serde(rename = "n10Tanks", default)]
    pub n10_tanks: LevelTanks,

    #[serde(rename = "n20Tanks", default)]
    pub n20_tanks: LevelTanks,

    #[serde(rename = "n30Tanks", default)]
    pub n30_tanks: LevelTanks,
}

impl Site {
    pub fn level(&self, level: Level) -> &LevelTanks {
        match level {
            Level::N00 => &self.n00_tanks,
            Level::N10 => &self.n10_tanks,
            Level::N20 => &self.n20_tanks,
            Level::N30 => &self.n30_tanks,
        }
    }

    pub fn level_mut(&mut self, level: Level) -> &mut LevelTanks {
        match level {
            Level::N00 => &mut self.n00_tanks,
            Level::N10 => &mut self.n10_tanks,
            Level::N20 => &mut self.n20_tanks,
            Level::N30 => &mut self.n30_tanks,
        }
    }

    /// Insert a tank under its own id
    pub fn insert(&mut self, level: Level, tank: Tank) {
        self.level_mut(level).insert(tank.id.clone(), tank);
    }

    /// Every tank together with its level, bottom level first
    pub fn tanks(&self) -> impl Iterator<Item = (Level, &Tank)> + '_ {
        LEVELS
            .iter()
            .flat_map(move |&level| self.level(level).values().map(move |tank| (level, tank)))
    }

    pub fn tank_count(&self) -> usize {
        LEVELS.iter().map(|&level| self.level(level).len()).sum()
    }
}
